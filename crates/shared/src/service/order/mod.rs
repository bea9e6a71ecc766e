mod command;
mod query;

use self::command::OrderCommandService;
use self::query::OrderQueryService;
use crate::{
    abstract_trait::{
        DynMedicineQueryRepository, DynOrderCommandRepository, DynOrderCommandService,
        DynOrderQueryRepository, DynOrderQueryService,
    },
    utils::ServiceTracer,
};
use prometheus_client::registry::Registry;
use std::{fmt, sync::Arc};
use tokio::sync::Mutex;

#[derive(Clone)]
pub struct OrderService {
    pub query: DynOrderQueryService,
    pub command: DynOrderCommandService,
}

pub struct OrderServiceDeps {
    pub query: DynOrderQueryRepository,
    pub command: DynOrderCommandRepository,
    pub medicine_query: DynMedicineQueryRepository,
    pub registry: Arc<Mutex<Registry>>,
}

impl fmt::Debug for OrderService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OrderService")
            .field("query", &"Arc<dyn OrderQueryServiceTrait>")
            .field("command", &"Arc<dyn OrderCommandServiceTrait>")
            .finish()
    }
}

impl OrderService {
    pub async fn new(deps: OrderServiceDeps) -> Self {
        let OrderServiceDeps {
            query,
            command,
            medicine_query,
            registry,
        } = deps;

        let query_tracer =
            ServiceTracer::new("order-query-service", "order_query_service", &registry).await;
        let command_tracer =
            ServiceTracer::new("order-command-service", "order_command_service", &registry)
                .await;

        let query_service =
            Arc::new(OrderQueryService::new(query.clone(), query_tracer)) as DynOrderQueryService;

        let command_service = Arc::new(OrderCommandService::new(
            medicine_query,
            command,
            query,
            command_tracer,
        )) as DynOrderCommandService;

        Self {
            query: query_service,
            command: command_service,
        }
    }
}
