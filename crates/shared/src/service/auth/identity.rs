use crate::{
    abstract_trait::{DynUserCommandRepository, DynUserQueryRepository, IdentityServiceTrait},
    domain::{
        requests::UpdateProfileRequest,
        responses::{ApiResponse, UserResponse},
    },
    errors::{RepositoryError, ServiceError},
    utils::{Method, ServiceTracer},
};
use async_trait::async_trait;
use opentelemetry::KeyValue;
use tracing::{error, info};
use validator::Validate;

pub struct IdentityService {
    user_query: DynUserQueryRepository,
    user_command: DynUserCommandRepository,
    tracer: ServiceTracer,
}

impl IdentityService {
    pub fn new(
        user_query: DynUserQueryRepository,
        user_command: DynUserCommandRepository,
        tracer: ServiceTracer,
    ) -> Self {
        Self {
            user_query,
            user_command,
            tracer,
        }
    }
}

#[async_trait]
impl IdentityServiceTrait for IdentityService {
    async fn get_me(&self, user_id: i32) -> Result<ApiResponse<UserResponse>, ServiceError> {
        info!("👤 Fetching profile of user {user_id}");

        let method = Method::Get;
        let tracing_ctx = self.tracer.start_tracing(
            "GetMe",
            vec![
                KeyValue::new("component", "auth"),
                KeyValue::new("user.id", user_id.to_string()),
            ],
        );

        match self.user_query.find_by_id(user_id).await {
            Ok(Some(user)) => {
                self.tracer
                    .complete_tracing_success(&tracing_ctx, method, "User retrieved")
                    .await;

                Ok(ApiResponse::success(
                    "User retrieved successfully",
                    UserResponse::from(user),
                ))
            }
            Ok(None) => {
                self.tracer
                    .complete_tracing_error(&tracing_ctx, method, "User not found")
                    .await;
                Err(ServiceError::NotFound("User".into()))
            }
            Err(err) => {
                error!("❌ Failed to fetch user {user_id}: {err:?}");
                self.tracer
                    .complete_tracing_error(&tracing_ctx, method, "Failed to fetch user")
                    .await;
                Err(ServiceError::Repo(err))
            }
        }
    }

    async fn update_profile(
        &self,
        user_id: i32,
        req: &UpdateProfileRequest,
    ) -> Result<ApiResponse<UserResponse>, ServiceError> {
        info!("✏️ Updating profile of user {user_id}");

        let method = Method::Put;
        let tracing_ctx = self.tracer.start_tracing(
            "UpdateProfile",
            vec![
                KeyValue::new("component", "auth"),
                KeyValue::new("user.id", user_id.to_string()),
            ],
        );

        if let Err(errors) = req.validate() {
            self.tracer
                .complete_tracing_error(&tracing_ctx, method, "Invalid profile data")
                .await;
            return Err(ServiceError::from(errors));
        }

        match self.user_command.update_profile(user_id, req).await {
            Ok(user) => {
                self.tracer
                    .complete_tracing_success(&tracing_ctx, method, "Profile updated")
                    .await;

                Ok(ApiResponse::success(
                    "Profile updated successfully",
                    UserResponse::from(user),
                ))
            }
            Err(RepositoryError::NotFound) => {
                self.tracer
                    .complete_tracing_error(&tracing_ctx, method, "User not found")
                    .await;
                Err(ServiceError::NotFound("User".into()))
            }
            Err(err) => {
                error!("❌ Failed to update user {user_id}: {err:?}");
                self.tracer
                    .complete_tracing_error(&tracing_ctx, method, "Failed to update profile")
                    .await;
                Err(ServiceError::Repo(err))
            }
        }
    }
}
