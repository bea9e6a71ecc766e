use crate::{
    domain::{
        requests::{CreateOrderRequest, NewOrder, UpdateOrderStatusRequest},
        responses::{ApiResponse, OrderResponse},
    },
    errors::{RepositoryError, ServiceError},
    model::{Order as OrderModel, OrderStatus},
};
use async_trait::async_trait;
use std::sync::Arc;

pub type DynOrderCommandRepository = Arc<dyn OrderCommandRepositoryTrait + Send + Sync>;
pub type DynOrderCommandService = Arc<dyn OrderCommandServiceTrait + Send + Sync>;

#[async_trait]
pub trait OrderCommandRepositoryTrait {
    /// Decrements stock for every line and persists the order as one atomic
    /// unit. Either everything is written or nothing is.
    ///
    /// Fails with [`RepositoryError::InsufficientStock`] if any line no longer
    /// fits the stock at commit time, and with
    /// [`RepositoryError::MissingMedicine`] if a medicine has disappeared.
    async fn create_order(&self, order: &NewOrder) -> Result<OrderModel, RepositoryError>;

    /// Compare-and-set on the status column. Fails with
    /// [`RepositoryError::Conflict`] when the stored status is no longer
    /// `expected`.
    async fn update_status(
        &self,
        id: i32,
        expected: OrderStatus,
        status: OrderStatus,
    ) -> Result<OrderModel, RepositoryError>;
}

#[async_trait]
pub trait OrderCommandServiceTrait {
    async fn create_order(
        &self,
        user_id: i32,
        req: &CreateOrderRequest,
    ) -> Result<ApiResponse<OrderResponse>, ServiceError>;
    async fn update_status(
        &self,
        id: i32,
        req: &UpdateOrderStatusRequest,
    ) -> Result<ApiResponse<OrderResponse>, ServiceError>;
}
