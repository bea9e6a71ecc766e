use crate::{
    abstract_trait::PrescriptionRepositoryTrait, config::ConnectionPool,
    domain::requests::NewPrescription, errors::RepositoryError,
    model::Prescription as PrescriptionModel,
};
use async_trait::async_trait;
use chrono::NaiveDateTime;
use sqlx::FromRow;
use tracing::{error, info};

const PRESCRIPTION_COLUMNS: &str = "prescription_id, user_id, name, file_name, url, upload_date";

#[derive(Debug, FromRow)]
struct PrescriptionRecord {
    prescription_id: i32,
    user_id: i32,
    name: String,
    file_name: String,
    url: String,
    upload_date: NaiveDateTime,
}

impl From<PrescriptionRecord> for PrescriptionModel {
    fn from(record: PrescriptionRecord) -> Self {
        PrescriptionModel {
            prescription_id: record.prescription_id,
            user_id: record.user_id,
            name: record.name,
            file_name: record.file_name,
            url: record.url,
            upload_date: record.upload_date,
        }
    }
}

pub struct PgPrescriptionRepository {
    db: ConnectionPool,
}

impl PgPrescriptionRepository {
    pub fn new(db: ConnectionPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl PrescriptionRepositoryTrait for PgPrescriptionRepository {
    async fn create(&self, req: &NewPrescription) -> Result<PrescriptionModel, RepositoryError> {
        let mut conn = self.db.acquire().await.map_err(RepositoryError::from)?;

        let sql = format!(
            r#"
            INSERT INTO prescriptions (user_id, name, file_name, url, upload_date)
            VALUES ($1, $2, $3, $4, current_timestamp)
            RETURNING {PRESCRIPTION_COLUMNS}
            "#
        );

        let record = sqlx::query_as::<_, PrescriptionRecord>(&sql)
            .bind(req.user_id)
            .bind(&req.name)
            .bind(&req.file_name)
            .bind(&req.url)
            .fetch_one(&mut *conn)
            .await
            .map_err(|err| {
                error!(
                    "❌ Failed to record prescription {} for user {}: {:?}",
                    req.file_name, req.user_id, err
                );
                RepositoryError::from(err)
            })?;

        info!(
            "✅ Recorded prescription ID {} for user {}",
            record.prescription_id, record.user_id
        );
        Ok(record.into())
    }

    async fn find_by_user(
        &self,
        user_id: i32,
    ) -> Result<Vec<PrescriptionModel>, RepositoryError> {
        let mut conn = self.db.acquire().await.map_err(RepositoryError::from)?;

        let sql = format!(
            "SELECT {PRESCRIPTION_COLUMNS} FROM prescriptions WHERE user_id = $1 \
             ORDER BY upload_date DESC, prescription_id DESC"
        );

        let records = sqlx::query_as::<_, PrescriptionRecord>(&sql)
            .bind(user_id)
            .fetch_all(&mut *conn)
            .await
            .map_err(|err| {
                error!(
                    "❌ Failed to fetch prescriptions of user {}: {:?}",
                    user_id, err
                );
                RepositoryError::from(err)
            })?;

        Ok(records.into_iter().map(PrescriptionModel::from).collect())
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<PrescriptionModel>, RepositoryError> {
        let mut conn = self.db.acquire().await.map_err(RepositoryError::from)?;

        let sql = format!("SELECT {PRESCRIPTION_COLUMNS} FROM prescriptions WHERE prescription_id = $1");

        let record = sqlx::query_as::<_, PrescriptionRecord>(&sql)
            .bind(id)
            .fetch_optional(&mut *conn)
            .await
            .map_err(|err| {
                error!("❌ Failed to fetch prescription ID {}: {:?}", id, err);
                RepositoryError::from(err)
            })?;

        Ok(record.map(PrescriptionModel::from))
    }

    async fn delete(&self, id: i32) -> Result<(), RepositoryError> {
        let mut conn = self.db.acquire().await.map_err(RepositoryError::from)?;

        let result = sqlx::query("DELETE FROM prescriptions WHERE prescription_id = $1")
            .bind(id)
            .execute(&mut *conn)
            .await
            .map_err(|err| {
                error!("❌ Failed to delete prescription ID {}: {:?}", id, err);
                RepositoryError::from(err)
            })?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        info!("🗑️ Deleted prescription ID {}", id);
        Ok(())
    }
}
