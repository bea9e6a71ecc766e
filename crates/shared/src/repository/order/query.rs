use super::record::{ORDER_COLUMNS, OrderRecord, assemble};
use crate::{
    abstract_trait::OrderQueryRepositoryTrait, config::ConnectionPool, errors::RepositoryError,
    model::Order as OrderModel,
};
use async_trait::async_trait;
use tracing::{error, info};

pub struct OrderQueryRepository {
    db: ConnectionPool,
}

impl OrderQueryRepository {
    pub fn new(db: ConnectionPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl OrderQueryRepositoryTrait for OrderQueryRepository {
    async fn find_all(&self) -> Result<Vec<OrderModel>, RepositoryError> {
        let mut conn = self.db.acquire().await.map_err(RepositoryError::from)?;

        let sql = format!("SELECT {ORDER_COLUMNS} FROM orders ORDER BY created_at DESC, order_id DESC");

        let records = sqlx::query_as::<_, OrderRecord>(&sql)
            .fetch_all(&mut *conn)
            .await
            .map_err(|err| {
                error!("❌ Failed to fetch orders: {:?}", err);
                RepositoryError::from(err)
            })?;

        info!("✅ Found {} orders", records.len());
        assemble(&mut *conn, records).await
    }

    async fn find_by_user(&self, user_id: i32) -> Result<Vec<OrderModel>, RepositoryError> {
        let mut conn = self.db.acquire().await.map_err(RepositoryError::from)?;

        let sql = format!(
            "SELECT {ORDER_COLUMNS} FROM orders WHERE user_id = $1 ORDER BY created_at DESC, order_id DESC"
        );

        let records = sqlx::query_as::<_, OrderRecord>(&sql)
            .bind(user_id)
            .fetch_all(&mut *conn)
            .await
            .map_err(|err| {
                error!("❌ Failed to fetch orders of user {}: {:?}", user_id, err);
                RepositoryError::from(err)
            })?;

        info!("✅ Found {} orders for user {}", records.len(), user_id);
        assemble(&mut *conn, records).await
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<OrderModel>, RepositoryError> {
        let mut conn = self.db.acquire().await.map_err(RepositoryError::from)?;

        let sql = format!("SELECT {ORDER_COLUMNS} FROM orders WHERE order_id = $1");

        let record = sqlx::query_as::<_, OrderRecord>(&sql)
            .bind(id)
            .fetch_optional(&mut *conn)
            .await
            .map_err(|err| {
                error!("❌ Failed to fetch order ID {}: {:?}", id, err);
                RepositoryError::from(err)
            })?;

        match record {
            Some(record) => Ok(assemble(&mut *conn, vec![record]).await?.pop()),
            None => Ok(None),
        }
    }
}
