use super::record::{USER_COLUMNS, UserRecord};
use crate::{
    abstract_trait::UserCommandRepositoryTrait,
    config::ConnectionPool,
    domain::requests::{NewUser, UpdateProfileRequest},
    errors::RepositoryError,
    model::User as UserModel,
    repository::is_unique_violation,
};
use async_trait::async_trait;
use sqlx::types::Json;
use tracing::{error, info};

pub struct UserCommandRepository {
    db: ConnectionPool,
}

impl UserCommandRepository {
    pub fn new(db: ConnectionPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UserCommandRepositoryTrait for UserCommandRepository {
    async fn create_user(&self, req: &NewUser) -> Result<UserModel, RepositoryError> {
        let mut conn = self.db.acquire().await.map_err(RepositoryError::from)?;

        let sql = format!(
            r#"
            INSERT INTO users (name, email, password, phone, address, role, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, current_timestamp, current_timestamp)
            RETURNING {USER_COLUMNS}
            "#
        );

        let record = sqlx::query_as::<_, UserRecord>(&sql)
            .bind(&req.name)
            .bind(&req.email)
            .bind(&req.password)
            .bind(&req.phone)
            .bind(Json(&req.address))
            .bind(req.role.as_str())
            .fetch_one(&mut *conn)
            .await
            .map_err(|err| match err {
                err if is_unique_violation(&err) => {
                    RepositoryError::AlreadyExists(format!("user with email {}", req.email))
                }
                err => {
                    error!("❌ Failed to create user {}: {:?}", req.email, err);
                    RepositoryError::from(err)
                }
            })?;

        info!("✅ User created: {}", record.email);
        UserModel::try_from(record)
    }

    async fn update_profile(
        &self,
        user_id: i32,
        req: &UpdateProfileRequest,
    ) -> Result<UserModel, RepositoryError> {
        let mut conn = self.db.acquire().await.map_err(RepositoryError::from)?;

        let sql = format!(
            r#"
            UPDATE users
            SET name = $2,
                phone = $3,
                address = $4,
                updated_at = current_timestamp
            WHERE user_id = $1
            RETURNING {USER_COLUMNS}
            "#
        );

        let record = sqlx::query_as::<_, UserRecord>(&sql)
            .bind(user_id)
            .bind(&req.name)
            .bind(&req.phone)
            .bind(Json(&req.address))
            .fetch_optional(&mut *conn)
            .await
            .map_err(|err| {
                error!("❌ Failed to update user {}: {:?}", user_id, err);
                RepositoryError::from(err)
            })?
            .ok_or(RepositoryError::NotFound)?;

        info!("🔄 Updated profile of user {}", user_id);
        UserModel::try_from(record)
    }
}
