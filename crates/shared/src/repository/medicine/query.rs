use super::record::{MEDICINE_COLUMNS, MedicineRecord};
use crate::{
    abstract_trait::MedicineQueryRepositoryTrait,
    config::ConnectionPool,
    domain::requests::MedicineFilter,
    errors::RepositoryError,
    model::Medicine as MedicineModel,
    repository::escape_like,
};
use async_trait::async_trait;
use tracing::{error, info};

pub struct MedicineQueryRepository {
    db: ConnectionPool,
}

impl MedicineQueryRepository {
    pub fn new(db: ConnectionPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl MedicineQueryRepositoryTrait for MedicineQueryRepository {
    async fn find_all(
        &self,
        filter: &MedicineFilter,
    ) -> Result<Vec<MedicineModel>, RepositoryError> {
        let mut conn = self.db.acquire().await.map_err(RepositoryError::from)?;

        let category = filter.category.map(|c| c.as_str());
        let pattern = filter
            .search
            .as_deref()
            .map(|search| format!("%{}%", escape_like(search)));

        let sql = format!(
            r#"
            SELECT {MEDICINE_COLUMNS}
            FROM medicines
            WHERE ($1::TEXT IS NULL OR category = $1)
              AND ($2::TEXT IS NULL
                   OR name ILIKE $2 ESCAPE '\'
                   OR description ILIKE $2 ESCAPE '\')
            ORDER BY medicine_id
            "#
        );

        let records = sqlx::query_as::<_, MedicineRecord>(&sql)
            .bind(category)
            .bind(pattern)
            .fetch_all(&mut *conn)
            .await
            .map_err(|err| {
                error!("❌ Failed to fetch medicines: {:?}", err);
                RepositoryError::from(err)
            })?;

        info!("✅ Found {} medicines", records.len());

        records.into_iter().map(MedicineModel::try_from).collect()
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<MedicineModel>, RepositoryError> {
        let mut conn = self.db.acquire().await.map_err(RepositoryError::from)?;

        let sql = format!("SELECT {MEDICINE_COLUMNS} FROM medicines WHERE medicine_id = $1");

        let record = sqlx::query_as::<_, MedicineRecord>(&sql)
            .bind(id)
            .fetch_optional(&mut *conn)
            .await
            .map_err(|err| {
                error!("❌ Failed to fetch medicine ID {}: {:?}", id, err);
                RepositoryError::from(err)
            })?;

        record.map(MedicineModel::try_from).transpose()
    }
}
