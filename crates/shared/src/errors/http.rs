use crate::errors::{error::ErrorResponse, repository::RepositoryError, service::ServiceError};
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use tracing::error;

#[derive(Debug)]
pub enum HttpError {
    BadRequest(String),
    Unauthorized(String),
    Forbidden(String),
    NotFound(String),
    Conflict(String),
    PayloadTooLarge(String),
    Internal(String),
}

impl From<ServiceError> for HttpError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::LineItemNotFound(id) => {
                HttpError::BadRequest(format!("Medicine {id} not found"))
            }

            ServiceError::InsufficientStock { name, .. } => {
                HttpError::BadRequest(format!("Insufficient stock for {name}"))
            }

            ServiceError::InvalidTransition { from, to } => HttpError::BadRequest(format!(
                "Cannot change order status from {from} to {to}"
            )),

            ServiceError::Validation(errors) => HttpError::BadRequest(errors.join("; ")),

            ServiceError::Upload(msg) => HttpError::BadRequest(msg),

            ServiceError::NotFound(what) => HttpError::NotFound(format!("{what} not found")),

            ServiceError::Forbidden(msg) => HttpError::Forbidden(msg),

            ServiceError::InvalidCredentials => {
                HttpError::Unauthorized("Invalid credentials".to_string())
            }

            ServiceError::Jwt(_) | ServiceError::InvalidTokenType => {
                HttpError::Unauthorized("Invalid token".into())
            }

            ServiceError::TokenExpired => HttpError::Unauthorized("Token expired".into()),

            ServiceError::Repo(repo_err) => match repo_err {
                RepositoryError::NotFound => HttpError::NotFound("Not found".into()),
                RepositoryError::Conflict(msg) => HttpError::Conflict(msg),
                RepositoryError::AlreadyExists(msg) => HttpError::Conflict(msg),
                other => {
                    error!("❌ Persistence failure: {other}");
                    HttpError::Internal("Something went wrong".into())
                }
            },

            ServiceError::Bcrypt(err) => {
                error!("❌ Hashing failure: {err}");
                HttpError::Internal("Internal authentication error".into())
            }

            ServiceError::Storage(err) => {
                error!("❌ File storage failure: {err}");
                HttpError::Internal("Something went wrong".into())
            }

            ServiceError::Internal(msg) => {
                error!("❌ Internal failure: {msg}");
                HttpError::Internal("Something went wrong".into())
            }
        }
    }
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let (status, msg) = match self {
            HttpError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            HttpError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg),
            HttpError::Forbidden(msg) => (StatusCode::FORBIDDEN, msg),
            HttpError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            HttpError::Conflict(msg) => (StatusCode::CONFLICT, msg),
            HttpError::PayloadTooLarge(msg) => (StatusCode::PAYLOAD_TOO_LARGE, msg),
            HttpError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
        };

        (status, Json(ErrorResponse::new(msg))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn line_item_errors_name_the_medicine() {
        match HttpError::from(ServiceError::LineItemNotFound(9)) {
            HttpError::BadRequest(msg) => assert_eq!(msg, "Medicine 9 not found"),
            other => panic!("unexpected mapping: {other:?}"),
        }

        let err = ServiceError::InsufficientStock {
            medicine_id: 1,
            name: "Paracetamol".into(),
            requested: 5,
            available: 3,
        };
        match HttpError::from(err) {
            HttpError::BadRequest(msg) => assert_eq!(msg, "Insufficient stock for Paracetamol"),
            other => panic!("unexpected mapping: {other:?}"),
        }
    }

    #[test]
    fn persistence_failures_do_not_leak_details() {
        let err = ServiceError::Repo(RepositoryError::Custom("pool timed out on 10.0.0.3".into()));
        match HttpError::from(err) {
            HttpError::Internal(msg) => assert_eq!(msg, "Something went wrong"),
            other => panic!("unexpected mapping: {other:?}"),
        }
    }

    #[test]
    fn missing_records_map_to_not_found() {
        let response = HttpError::from(ServiceError::NotFound("Order".into())).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
