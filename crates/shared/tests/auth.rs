mod common;

use common::{register_request, spawn_app};
use shared::{
    abstract_trait::DynHashing,
    config::{Config, Hashing},
    domain::requests::{LoginRequest, UpdateProfileRequest},
    errors::{RepositoryError, ServiceError},
    model::{Address, UserRole},
    state::AppState,
};
use std::sync::Arc;

fn login(email: &str, password: &str) -> LoginRequest {
    LoginRequest {
        email: email.to_string(),
        password: password.to_string(),
    }
}

#[tokio::test]
async fn registered_users_can_log_in() {
    let app = spawn_app().await;
    let auth = &app.state.di_container.auth_service;

    let registered = auth
        .register
        .register(&register_request("Jane Doe", "  Jane@Pharmacy.test "))
        .await
        .unwrap();
    assert_eq!(registered.message, "User registered successfully");
    assert_eq!(registered.data.user.email, "jane@pharmacy.test");
    assert_eq!(registered.data.user.role, UserRole::User);

    let user_id = app
        .state
        .jwt_config
        .verify_token(&registered.data.token, "access")
        .unwrap();
    assert_eq!(user_id, registered.data.user.id as i64);

    let logged_in = auth
        .login
        .login(&login("JANE@pharmacy.test", "secret123"))
        .await
        .unwrap();
    assert_eq!(logged_in.data.user.id, registered.data.user.id);
    assert!(!logged_in.data.token.is_empty());
}

#[tokio::test]
async fn wrong_credentials_are_indistinguishable() {
    let app = spawn_app().await;
    let auth = &app.state.di_container.auth_service;

    auth.register
        .register(&register_request("Jane Doe", "jane@pharmacy.test"))
        .await
        .unwrap();

    let wrong_password = auth
        .login
        .login(&login("jane@pharmacy.test", "nope-nope"))
        .await
        .unwrap_err();
    assert!(matches!(wrong_password, ServiceError::InvalidCredentials));

    let unknown_email = auth
        .login
        .login(&login("ghost@pharmacy.test", "secret123"))
        .await
        .unwrap_err();
    assert!(matches!(unknown_email, ServiceError::InvalidCredentials));
}

#[tokio::test]
async fn duplicate_emails_are_rejected() {
    let app = spawn_app().await;
    let register = &app.state.di_container.auth_service.register;

    register
        .register(&register_request("Jane Doe", "jane@pharmacy.test"))
        .await
        .unwrap();

    let err = register
        .register(&register_request("Other Jane", "JANE@pharmacy.test"))
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        ServiceError::Repo(RepositoryError::AlreadyExists(_))
    ));
}

#[tokio::test]
async fn registration_input_is_validated() {
    let app = spawn_app().await;
    let register = &app.state.di_container.auth_service.register;

    let mut req = register_request("Jane Doe", "not-an-email");
    req.confirm_password = "different".into();

    match register.register(&req).await.unwrap_err() {
        ServiceError::Validation(messages) => {
            assert!(messages.contains(&"Invalid email format".to_string()));
            assert!(messages.contains(&"Passwords do not match".to_string()));
        }
        other => panic!("expected validation failure, got {other:?}"),
    }
}

#[tokio::test]
async fn profile_can_be_read_and_updated() {
    let app = spawn_app().await;
    let auth = &app.state.di_container.auth_service;

    let user = auth
        .register
        .register(&register_request("Jane Doe", "jane@pharmacy.test"))
        .await
        .unwrap()
        .data
        .user;

    let me = auth.identity.get_me(user.id).await.unwrap().data;
    assert_eq!(me.email, "jane@pharmacy.test");

    let update = UpdateProfileRequest {
        name: "Jane Smith".into(),
        phone: Some("555-0100".into()),
        address: Address {
            street: Some("1 Main St".into()),
            city: Some("Springfield".into()),
            ..Address::default()
        },
    };
    let updated = auth
        .identity
        .update_profile(user.id, &update)
        .await
        .unwrap()
        .data;
    assert_eq!(updated.name, "Jane Smith");
    assert_eq!(updated.phone.as_deref(), Some("555-0100"));
    assert_eq!(updated.address.city.as_deref(), Some("Springfield"));
    assert_eq!(updated.email, "jane@pharmacy.test");

    let err = auth.identity.get_me(user.id + 100).await.unwrap_err();
    assert!(matches!(err, ServiceError::NotFound(_)));
}

#[tokio::test]
async fn administrator_is_bootstrapped_once() {
    let uploads = tempfile::tempdir().unwrap();
    let mut config = Config::in_memory("test-secret", uploads.path());
    config.admin = Some(shared::config::AdminSeed {
        email: "admin@pharmacy.test".into(),
        password: "admin-pass".into(),
    });
    let hashing = Arc::new(Hashing::with_cost(4)) as DynHashing;

    let state = AppState::with_hashing(&config, hashing).await.unwrap();
    let auth = &state.di_container.auth_service;

    let admin = auth
        .login
        .login(&login("admin@pharmacy.test", "admin-pass"))
        .await
        .unwrap()
        .data
        .user;
    assert_eq!(admin.role, UserRole::Admin);

    let again = auth
        .register
        .ensure_admin("admin@pharmacy.test", "other-pass")
        .await
        .unwrap();
    assert_eq!(again.id, admin.id);
}
