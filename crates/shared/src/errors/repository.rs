use sqlx::Error as SqlxError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("Database error: {0}")]
    Sqlx(#[from] SqlxError),

    #[error("Not found")]
    NotFound,

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Already exists: {0}")]
    AlreadyExists(String),

    #[error("Insufficient stock for medicine {medicine_id}: {available} available")]
    InsufficientStock { medicine_id: i32, available: i32 },

    #[error("Medicine {0} does not exist")]
    MissingMedicine(i32),

    #[error("Corrupted record: {0}")]
    Corrupted(String),

    #[error("Custom: {0}")]
    Custom(String),
}
