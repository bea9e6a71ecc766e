mod identity;
mod login;
mod register;

use self::identity::IdentityService;
use self::login::LoginService;
use self::register::RegisterService;
use crate::{
    abstract_trait::{
        DynHashing, DynIdentityService, DynJwtService, DynLoginService, DynRegisterService,
        DynUserCommandRepository, DynUserQueryRepository,
    },
    utils::ServiceTracer,
};
use prometheus_client::registry::Registry;
use std::sync::Arc;
use tokio::sync::Mutex;

pub(crate) const ACCESS_TOKEN: &str = "access";

/// Emails are compared and stored trimmed and lowercased.
pub(crate) fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

#[derive(Clone)]
pub struct AuthService {
    pub identity: DynIdentityService,
    pub login: DynLoginService,
    pub register: DynRegisterService,
}

#[derive(Clone)]
pub struct AuthServiceDeps {
    pub hash: DynHashing,
    pub jwt: DynJwtService,
    pub user_query: DynUserQueryRepository,
    pub user_command: DynUserCommandRepository,
    pub registry: Arc<Mutex<Registry>>,
}

impl AuthService {
    pub async fn new(deps: AuthServiceDeps) -> Self {
        let AuthServiceDeps {
            hash,
            jwt,
            user_query,
            user_command,
            registry,
        } = deps;

        let identity_tracer =
            ServiceTracer::new("identity-service", "identity_service", &registry).await;
        let login_tracer = ServiceTracer::new("login-service", "login_service", &registry).await;
        let register_tracer =
            ServiceTracer::new("register-service", "register_service", &registry).await;

        let identity = Arc::new(IdentityService::new(
            user_query.clone(),
            user_command.clone(),
            identity_tracer,
        )) as DynIdentityService;

        let login = Arc::new(LoginService::new(
            hash.clone(),
            jwt.clone(),
            user_query.clone(),
            login_tracer,
        )) as DynLoginService;

        let register = Arc::new(RegisterService::new(
            hash,
            jwt,
            user_query,
            user_command,
            register_tracer,
        )) as DynRegisterService;

        Self {
            identity,
            login,
            register,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::normalize_email;

    #[test]
    fn emails_are_trimmed_and_lowercased() {
        assert_eq!(normalize_email("  Jane.Doe@Example.COM "), "jane.doe@example.com");
    }
}
