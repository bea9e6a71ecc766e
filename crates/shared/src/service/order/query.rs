use crate::{
    abstract_trait::{DynOrderQueryRepository, OrderQueryServiceTrait},
    domain::responses::{ApiResponse, OrderResponse},
    errors::ServiceError,
    model::UserRole,
    utils::{Method, ServiceTracer},
};
use async_trait::async_trait;
use opentelemetry::KeyValue;
use tracing::{error, info, warn};

pub struct OrderQueryService {
    query: DynOrderQueryRepository,
    tracer: ServiceTracer,
}

impl OrderQueryService {
    pub fn new(query: DynOrderQueryRepository, tracer: ServiceTracer) -> Self {
        Self { query, tracer }
    }
}

#[async_trait]
impl OrderQueryServiceTrait for OrderQueryService {
    async fn find_all(&self) -> Result<ApiResponse<Vec<OrderResponse>>, ServiceError> {
        info!("🔍 Listing all orders");

        let method = Method::Get;
        let tracing_ctx = self.tracer.start_tracing(
            "FindAllOrders",
            vec![KeyValue::new("component", "order")],
        );

        match self.query.find_all().await {
            Ok(orders) => {
                let data: Vec<OrderResponse> =
                    orders.into_iter().map(OrderResponse::from).collect();

                self.tracer
                    .complete_tracing_success(&tracing_ctx, method, "Orders retrieved")
                    .await;

                Ok(ApiResponse::success(format!("Found {} orders", data.len()), data))
            }
            Err(err) => {
                error!("❌ Failed to list orders: {err:?}");
                self.tracer
                    .complete_tracing_error(&tracing_ctx, method, "Failed to list orders")
                    .await;
                Err(ServiceError::Repo(err))
            }
        }
    }

    async fn find_by_user(
        &self,
        user_id: i32,
    ) -> Result<ApiResponse<Vec<OrderResponse>>, ServiceError> {
        info!("🔍 Listing orders of user {user_id}");

        let method = Method::Get;
        let tracing_ctx = self.tracer.start_tracing(
            "FindOrdersByUser",
            vec![
                KeyValue::new("component", "order"),
                KeyValue::new("user.id", user_id.to_string()),
            ],
        );

        match self.query.find_by_user(user_id).await {
            Ok(orders) => {
                let data: Vec<OrderResponse> =
                    orders.into_iter().map(OrderResponse::from).collect();

                self.tracer
                    .complete_tracing_success(&tracing_ctx, method, "User orders retrieved")
                    .await;

                Ok(ApiResponse::success(format!("Found {} orders", data.len()), data))
            }
            Err(err) => {
                error!("❌ Failed to list orders of user {user_id}: {err:?}");
                self.tracer
                    .complete_tracing_error(&tracing_ctx, method, "Failed to list user orders")
                    .await;
                Err(ServiceError::Repo(err))
            }
        }
    }

    async fn find_by_id(
        &self,
        id: i32,
        user_id: i32,
        role: UserRole,
    ) -> Result<ApiResponse<OrderResponse>, ServiceError> {
        info!("🔍 Fetching order ID {id} for user {user_id}");

        let method = Method::Get;
        let tracing_ctx = self.tracer.start_tracing(
            "FindOrderById",
            vec![
                KeyValue::new("component", "order"),
                KeyValue::new("order.id", id.to_string()),
                KeyValue::new("user.id", user_id.to_string()),
            ],
        );

        let order = match self.query.find_by_id(id).await {
            Ok(Some(order)) => order,
            Ok(None) => {
                self.tracer
                    .complete_tracing_error(&tracing_ctx, method, "Order not found")
                    .await;
                return Err(ServiceError::NotFound("Order".into()));
            }
            Err(err) => {
                error!("❌ Failed to fetch order {id}: {err:?}");
                self.tracer
                    .complete_tracing_error(&tracing_ctx, method, "Failed to fetch order")
                    .await;
                return Err(ServiceError::Repo(err));
            }
        };

        if order.user_id != user_id && role != UserRole::Admin {
            warn!("⛔ User {user_id} tried to read order {id} of user {}", order.user_id);
            self.tracer
                .complete_tracing_error(&tracing_ctx, method, "Order belongs to another user")
                .await;
            return Err(ServiceError::Forbidden(
                "Not authorized to view this order".into(),
            ));
        }

        self.tracer
            .complete_tracing_success(&tracing_ctx, method, "Order retrieved")
            .await;

        Ok(ApiResponse::success(
            "Order retrieved successfully",
            OrderResponse::from(order),
        ))
    }
}
