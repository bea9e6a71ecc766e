use super::record::{USER_COLUMNS, UserRecord};
use crate::{
    abstract_trait::UserQueryRepositoryTrait, config::ConnectionPool, errors::RepositoryError,
    model::User as UserModel,
};
use async_trait::async_trait;
use tracing::error;

pub struct UserQueryRepository {
    db: ConnectionPool,
}

impl UserQueryRepository {
    pub fn new(db: ConnectionPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UserQueryRepositoryTrait for UserQueryRepository {
    async fn find_by_id(&self, user_id: i32) -> Result<Option<UserModel>, RepositoryError> {
        let mut conn = self.db.acquire().await.map_err(RepositoryError::from)?;

        let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE user_id = $1");

        let record = sqlx::query_as::<_, UserRecord>(&sql)
            .bind(user_id)
            .fetch_optional(&mut *conn)
            .await
            .map_err(|err| {
                error!("❌ Failed to fetch user ID {}: {:?}", user_id, err);
                RepositoryError::from(err)
            })?;

        record.map(UserModel::try_from).transpose()
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<UserModel>, RepositoryError> {
        let mut conn = self.db.acquire().await.map_err(RepositoryError::from)?;

        let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE email = $1");

        let record = sqlx::query_as::<_, UserRecord>(&sql)
            .bind(email)
            .fetch_optional(&mut *conn)
            .await
            .map_err(|err| {
                error!("❌ Failed to fetch user by email {}: {:?}", email, err);
                RepositoryError::from(err)
            })?;

        record.map(UserModel::try_from).transpose()
    }
}
