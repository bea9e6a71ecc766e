use crate::{
    domain::{
        requests::LoginRequest,
        responses::{ApiResponse, AuthResponse},
    },
    errors::ServiceError,
};
use async_trait::async_trait;
use std::sync::Arc;

pub type DynLoginService = Arc<dyn LoginServiceTrait + Send + Sync>;

#[async_trait]
pub trait LoginServiceTrait {
    async fn login(&self, req: &LoginRequest) -> Result<ApiResponse<AuthResponse>, ServiceError>;
}
