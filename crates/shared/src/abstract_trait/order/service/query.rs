use crate::{
    domain::responses::{ApiResponse, OrderResponse},
    errors::{RepositoryError, ServiceError},
    model::{Order as OrderModel, UserRole},
};
use async_trait::async_trait;
use std::sync::Arc;

pub type DynOrderQueryRepository = Arc<dyn OrderQueryRepositoryTrait + Send + Sync>;
pub type DynOrderQueryService = Arc<dyn OrderQueryServiceTrait + Send + Sync>;

#[async_trait]
pub trait OrderQueryRepositoryTrait {
    async fn find_all(&self) -> Result<Vec<OrderModel>, RepositoryError>;
    async fn find_by_user(&self, user_id: i32) -> Result<Vec<OrderModel>, RepositoryError>;
    async fn find_by_id(&self, id: i32) -> Result<Option<OrderModel>, RepositoryError>;
}

#[async_trait]
pub trait OrderQueryServiceTrait {
    async fn find_all(&self) -> Result<ApiResponse<Vec<OrderResponse>>, ServiceError>;
    async fn find_by_user(
        &self,
        user_id: i32,
    ) -> Result<ApiResponse<Vec<OrderResponse>>, ServiceError>;
    /// Visible to the order's owner and to administrators only.
    async fn find_by_id(
        &self,
        id: i32,
        user_id: i32,
        role: UserRole,
    ) -> Result<ApiResponse<OrderResponse>, ServiceError>;
}
