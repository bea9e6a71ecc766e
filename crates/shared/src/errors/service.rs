use crate::{errors::repository::RepositoryError, model::OrderStatus};
use bcrypt::BcryptError;
use jsonwebtoken::errors::Error as JwtError;
use thiserror::Error;
use validator::{ValidationErrors, ValidationErrorsKind};

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("Repository error: {0}")]
    Repo(#[from] RepositoryError),

    #[error("{0} not found")]
    NotFound(String),

    #[error("Medicine {0} not found")]
    LineItemNotFound(i32),

    #[error("Insufficient stock for {name}: requested {requested}, available {available}")]
    InsufficientStock {
        medicine_id: i32,
        name: String,
        requested: i32,
        available: i32,
    },

    #[error("Cannot change order status from {from} to {to}")]
    InvalidTransition { from: OrderStatus, to: OrderStatus },

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Validation failed: {0:?}")]
    Validation(Vec<String>),

    #[error("Bcrypt error: {0}")]
    Bcrypt(#[from] BcryptError),

    #[error("JWT error: {0}")]
    Jwt(#[from] JwtError),

    #[error("Token has expired")]
    TokenExpired,

    #[error("Invalid Token")]
    InvalidTokenType,

    #[error("Upload rejected: {0}")]
    Upload(String),

    #[error("File storage error: {0}")]
    Storage(#[from] std::io::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl ServiceError {
    pub fn validation(message: impl Into<String>) -> Self {
        ServiceError::Validation(vec![message.into()])
    }
}

fn collect_messages(errors: &ValidationErrors, out: &mut Vec<String>) {
    for (field, kind) in errors.errors() {
        match kind {
            ValidationErrorsKind::Field(errs) => {
                out.extend(errs.iter().map(|err| match &err.message {
                    Some(message) => message.to_string(),
                    None => format!("{field} is invalid"),
                }));
            }
            ValidationErrorsKind::Struct(inner) => collect_messages(inner, out),
            ValidationErrorsKind::List(items) => {
                for inner in items.values() {
                    collect_messages(inner, out);
                }
            }
        }
    }
}

impl From<ValidationErrors> for ServiceError {
    fn from(errors: ValidationErrors) -> Self {
        let mut messages = Vec::new();
        collect_messages(&errors, &mut messages);
        messages.sort();
        messages.dedup();
        ServiceError::Validation(messages)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::requests::{CreateOrderRequest, OrderItemRequest};
    use validator::Validate;

    #[test]
    fn nested_validation_messages_are_flattened() {
        let req = CreateOrderRequest {
            items: vec![
                OrderItemRequest {
                    medicine: 1,
                    quantity: 0,
                },
                OrderItemRequest {
                    medicine: 2,
                    quantity: -1,
                },
            ],
            delivery_details: Default::default(),
            payment_details: Default::default(),
        };

        let errors = req.validate().unwrap_err();
        match ServiceError::from(errors) {
            ServiceError::Validation(messages) => {
                assert_eq!(messages, vec!["Quantity must be at least 1".to_string()]);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
