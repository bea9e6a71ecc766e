mod command;
mod query;

use self::command::MedicineCommandService;
use self::query::MedicineQueryService;
use crate::{
    abstract_trait::{
        DynMedicineCommandRepository, DynMedicineCommandService, DynMedicineQueryRepository,
        DynMedicineQueryService,
    },
    utils::ServiceTracer,
};
use prometheus_client::registry::Registry;
use std::{fmt, sync::Arc};
use tokio::sync::Mutex;

#[derive(Clone)]
pub struct MedicineService {
    pub query: DynMedicineQueryService,
    pub command: DynMedicineCommandService,
}

impl fmt::Debug for MedicineService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MedicineService")
            .field("query", &"Arc<dyn MedicineQueryServiceTrait>")
            .field("command", &"Arc<dyn MedicineCommandServiceTrait>")
            .finish()
    }
}

impl MedicineService {
    pub async fn new(
        query: DynMedicineQueryRepository,
        command: DynMedicineCommandRepository,
        registry: Arc<Mutex<Registry>>,
    ) -> Self {
        let query_tracer =
            ServiceTracer::new("medicine-query-service", "medicine_query_service", &registry)
                .await;
        let command_tracer = ServiceTracer::new(
            "medicine-command-service",
            "medicine_command_service",
            &registry,
        )
        .await;

        let query_service =
            Arc::new(MedicineQueryService::new(query, query_tracer)) as DynMedicineQueryService;
        let command_service = Arc::new(MedicineCommandService::new(command, command_tracer))
            as DynMedicineCommandService;

        Self {
            query: query_service,
            command: command_service,
        }
    }
}
