use super::session::Session;
use axum::{
    Json,
    body::Body,
    http::{Request, StatusCode},
    middleware::Next,
    response::IntoResponse,
};
use shared::errors::ErrorResponse;
use tracing::warn;

/// Lets administrators through. Must run after the session middleware.
pub async fn admin_middleware(
    req: Request<Body>,
    next: Next,
) -> Result<impl IntoResponse, (StatusCode, Json<ErrorResponse>)> {
    match req.extensions().get::<Session>() {
        Some(session) if session.is_admin() => Ok(next.run(req).await),
        Some(session) => {
            warn!(
                "⛔ User {} ({}) denied admin route {}",
                session.user_id,
                session.email,
                req.uri().path()
            );
            Err((
                StatusCode::FORBIDDEN,
                Json(ErrorResponse::new("Not authorized as an admin")),
            ))
        }
        None => Err((
            StatusCode::UNAUTHORIZED,
            Json(ErrorResponse::new("Missing session in request context")),
        )),
    }
}
