use axum::{
    Extension, Json,
    body::Body,
    http::{Request, StatusCode},
    middleware::Next,
    response::IntoResponse,
};
use shared::{
    abstract_trait::DynIdentityService,
    errors::{ErrorResponse, ServiceError},
    model::UserRole,
};
use tracing::error;

/// The authenticated caller, attached to the request by [`session_middleware`].
#[derive(Debug, Clone)]
pub struct Session {
    pub user_id: i32,
    pub email: String,
    pub role: UserRole,
}

impl Session {
    pub fn is_admin(&self) -> bool {
        self.role == UserRole::Admin
    }
}

pub async fn session_middleware(
    Extension(identity): Extension<DynIdentityService>,
    mut req: Request<Body>,
    next: Next,
) -> Result<impl IntoResponse, (StatusCode, Json<ErrorResponse>)> {
    let Some(user_id) = req.extensions().get::<i32>().copied() else {
        return Err((
            StatusCode::UNAUTHORIZED,
            Json(ErrorResponse::new("Missing user_id in request context")),
        ));
    };

    let user = match identity.get_me(user_id).await {
        Ok(resp) => resp.data,
        Err(ServiceError::NotFound(_)) => {
            return Err((
                StatusCode::UNAUTHORIZED,
                Json(ErrorResponse::new("User no longer exists")),
            ));
        }
        Err(err) => {
            error!("❌ Failed to load session for user {user_id}: {err}");
            return Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::new("Failed to load session")),
            ));
        }
    };

    let session = Session {
        user_id: user.id,
        email: user.email,
        role: user.role,
    };

    req.extensions_mut().insert(session);

    Ok(next.run(req).await)
}
