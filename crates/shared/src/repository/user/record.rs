use crate::{
    errors::RepositoryError,
    model::{Address, User},
};
use chrono::NaiveDateTime;
use sqlx::{FromRow, types::Json};

pub(super) const USER_COLUMNS: &str =
    "user_id, name, email, password, phone, address, role, created_at, updated_at";

#[derive(Debug, FromRow)]
pub(super) struct UserRecord {
    pub user_id: i32,
    pub name: String,
    pub email: String,
    pub password: String,
    pub phone: Option<String>,
    pub address: Json<Address>,
    pub role: String,
    pub created_at: Option<NaiveDateTime>,
    pub updated_at: Option<NaiveDateTime>,
}

impl TryFrom<UserRecord> for User {
    type Error = RepositoryError;

    fn try_from(record: UserRecord) -> Result<Self, Self::Error> {
        let role = record.role.parse().map_err(|err: String| {
            RepositoryError::Corrupted(format!("user {}: {err}", record.user_id))
        })?;

        Ok(User {
            user_id: record.user_id,
            name: record.name,
            email: record.email,
            password: record.password,
            phone: record.phone,
            address: record.address.0,
            role,
            created_at: record.created_at,
            updated_at: record.updated_at,
        })
    }
}
