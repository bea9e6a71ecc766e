use super::{ACCESS_TOKEN, normalize_email};
use crate::{
    abstract_trait::{
        DynHashing, DynJwtService, DynUserCommandRepository, DynUserQueryRepository,
        RegisterServiceTrait,
    },
    domain::{
        requests::{NewUser, RegisterRequest},
        responses::{ApiResponse, AuthResponse, UserResponse},
    },
    errors::{RepositoryError, ServiceError},
    model::{Address, UserRole},
    utils::{Method, ServiceTracer},
};
use async_trait::async_trait;
use opentelemetry::KeyValue;
use tracing::{error, info, warn};
use validator::Validate;

pub struct RegisterService {
    hash: DynHashing,
    jwt: DynJwtService,
    query: DynUserQueryRepository,
    command: DynUserCommandRepository,
    tracer: ServiceTracer,
}

impl RegisterService {
    pub fn new(
        hash: DynHashing,
        jwt: DynJwtService,
        query: DynUserQueryRepository,
        command: DynUserCommandRepository,
        tracer: ServiceTracer,
    ) -> Self {
        Self {
            hash,
            jwt,
            query,
            command,
            tracer,
        }
    }

    fn email_taken(email: &str) -> ServiceError {
        ServiceError::Repo(RepositoryError::AlreadyExists(format!(
            "Email {email} is already registered"
        )))
    }
}

#[async_trait]
impl RegisterServiceTrait for RegisterService {
    async fn register(
        &self,
        req: &RegisterRequest,
    ) -> Result<ApiResponse<AuthResponse>, ServiceError> {
        let email = normalize_email(&req.email);
        info!("📝 Registering user: {email}");

        let method = Method::Post;
        let tracing_ctx = self.tracer.start_tracing(
            "Register",
            vec![
                KeyValue::new("component", "auth"),
                KeyValue::new("user.email", email.clone()),
            ],
        );

        let normalized = RegisterRequest {
            email: email.clone(),
            ..req.clone()
        };

        if let Err(errors) = normalized.validate() {
            self.tracer
                .complete_tracing_error(&tracing_ctx, method, "Invalid registration data")
                .await;
            return Err(ServiceError::from(errors));
        }

        match self.query.find_by_email(&email).await {
            Ok(Some(_)) => {
                warn!("⚠️ Email already registered: {email}");
                self.tracer
                    .complete_tracing_error(&tracing_ctx, method, "Email already registered")
                    .await;
                return Err(Self::email_taken(&email));
            }
            Ok(None) => {}
            Err(err) => {
                error!("❌ Failed to check email {email}: {err:?}");
                self.tracer
                    .complete_tracing_error(&tracing_ctx, method, "Failed to check email")
                    .await;
                return Err(ServiceError::Repo(err));
            }
        }

        let password = match self.hash.hash_password(&req.password).await {
            Ok(hashed) => hashed,
            Err(err) => {
                self.tracer
                    .complete_tracing_error(&tracing_ctx, method, "Failed to hash password")
                    .await;
                return Err(err);
            }
        };

        let new_user = NewUser {
            name: req.name.trim().to_string(),
            email: email.clone(),
            password,
            phone: req.phone.clone(),
            address: req.address.clone(),
            role: UserRole::User,
        };

        let user = match self.command.create_user(&new_user).await {
            Ok(user) => user,
            Err(RepositoryError::AlreadyExists(_)) => {
                self.tracer
                    .complete_tracing_error(&tracing_ctx, method, "Email already registered")
                    .await;
                return Err(Self::email_taken(&email));
            }
            Err(err) => {
                error!("❌ Failed to create user {email}: {err:?}");
                self.tracer
                    .complete_tracing_error(&tracing_ctx, method, "Failed to create user")
                    .await;
                return Err(ServiceError::Repo(err));
            }
        };

        let token = match self.jwt.generate_token(user.user_id as i64, ACCESS_TOKEN) {
            Ok(token) => token,
            Err(err) => {
                self.tracer
                    .complete_tracing_error(&tracing_ctx, method, "Failed to issue token")
                    .await;
                return Err(err);
            }
        };

        self.tracer
            .complete_tracing_success(&tracing_ctx, method, "User registered")
            .await;

        Ok(ApiResponse::success(
            "User registered successfully",
            AuthResponse {
                token,
                user: UserResponse::from(user),
            },
        ))
    }

    async fn ensure_admin(
        &self,
        email: &str,
        password: &str,
    ) -> Result<UserResponse, ServiceError> {
        let email = normalize_email(email);

        if let Some(existing) = self.query.find_by_email(&email).await? {
            if !existing.is_admin() {
                warn!("⚠️ Bootstrap email {email} belongs to a non-admin account, leaving it as is");
            }
            return Ok(UserResponse::from(existing));
        }

        let admin = NewUser {
            name: "Administrator".to_string(),
            email: email.clone(),
            password: self.hash.hash_password(password).await?,
            phone: None,
            address: Address::default(),
            role: UserRole::Admin,
        };

        let user = self.command.create_user(&admin).await?;
        info!("👑 Administrator account created: {email}");

        Ok(UserResponse::from(user))
    }
}
