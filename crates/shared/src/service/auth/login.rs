use super::{ACCESS_TOKEN, normalize_email};
use crate::{
    abstract_trait::{DynHashing, DynJwtService, DynUserQueryRepository, LoginServiceTrait},
    domain::{
        requests::LoginRequest,
        responses::{ApiResponse, AuthResponse, UserResponse},
    },
    errors::ServiceError,
    utils::{Method, ServiceTracer},
};
use async_trait::async_trait;
use opentelemetry::KeyValue;
use tracing::{error, info, warn};

pub struct LoginService {
    hash: DynHashing,
    jwt: DynJwtService,
    query: DynUserQueryRepository,
    tracer: ServiceTracer,
}

impl LoginService {
    pub fn new(
        hash: DynHashing,
        jwt: DynJwtService,
        query: DynUserQueryRepository,
        tracer: ServiceTracer,
    ) -> Self {
        Self {
            hash,
            jwt,
            query,
            tracer,
        }
    }
}

#[async_trait]
impl LoginServiceTrait for LoginService {
    async fn login(&self, req: &LoginRequest) -> Result<ApiResponse<AuthResponse>, ServiceError> {
        let email = normalize_email(&req.email);
        info!("🔐 Attempting login for email: {email}");

        let method = Method::Post;
        let tracing_ctx = self.tracer.start_tracing(
            "Login",
            vec![
                KeyValue::new("component", "auth"),
                KeyValue::new("user.email", email.clone()),
            ],
        );

        let user = match self.query.find_by_email(&email).await {
            Ok(Some(user)) => user,
            Ok(None) => {
                warn!("❌ Login failed, unknown email: {email}");
                self.tracer
                    .complete_tracing_error(&tracing_ctx, method, "Invalid credentials")
                    .await;
                return Err(ServiceError::InvalidCredentials);
            }
            Err(err) => {
                error!("❌ Failed to look up user {email}: {err:?}");
                self.tracer
                    .complete_tracing_error(&tracing_ctx, method, "Failed to look up user")
                    .await;
                return Err(ServiceError::Repo(err));
            }
        };

        if let Err(err) = self
            .hash
            .compare_password(&user.password, &req.password)
            .await
        {
            warn!("❌ Login failed, wrong password for {email}");
            self.tracer
                .complete_tracing_error(&tracing_ctx, method, "Invalid credentials")
                .await;
            return Err(err);
        }

        let token = match self.jwt.generate_token(user.user_id as i64, ACCESS_TOKEN) {
            Ok(token) => token,
            Err(err) => {
                error!("❌ Failed to issue token for {email}: {err:?}");
                self.tracer
                    .complete_tracing_error(&tracing_ctx, method, "Failed to issue token")
                    .await;
                return Err(err);
            }
        };

        self.tracer
            .complete_tracing_success(&tracing_ctx, method, "Login successful")
            .await;

        Ok(ApiResponse::success(
            "Login successful",
            AuthResponse {
                token,
                user: UserResponse::from(user),
            },
        ))
    }
}
