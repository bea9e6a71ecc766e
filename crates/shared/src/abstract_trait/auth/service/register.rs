use crate::{
    domain::{
        requests::RegisterRequest,
        responses::{ApiResponse, AuthResponse, UserResponse},
    },
    errors::ServiceError,
};
use async_trait::async_trait;
use std::sync::Arc;

pub type DynRegisterService = Arc<dyn RegisterServiceTrait + Send + Sync>;

#[async_trait]
pub trait RegisterServiceTrait {
    async fn register(
        &self,
        req: &RegisterRequest,
    ) -> Result<ApiResponse<AuthResponse>, ServiceError>;
    /// Creates the administrator account unless the email is already taken.
    async fn ensure_admin(
        &self,
        email: &str,
        password: &str,
    ) -> Result<UserResponse, ServiceError>;
}
