use crate::{
    domain::{
        requests::UpdateProfileRequest,
        responses::{ApiResponse, UserResponse},
    },
    errors::ServiceError,
};
use async_trait::async_trait;
use std::sync::Arc;

pub type DynIdentityService = Arc<dyn IdentityServiceTrait + Send + Sync>;

#[async_trait]
pub trait IdentityServiceTrait {
    async fn get_me(&self, user_id: i32) -> Result<ApiResponse<UserResponse>, ServiceError>;
    async fn update_profile(
        &self,
        user_id: i32,
        req: &UpdateProfileRequest,
    ) -> Result<ApiResponse<UserResponse>, ServiceError>;
}
