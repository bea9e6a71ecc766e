use super::record::{MEDICINE_COLUMNS, MedicineRecord};
use crate::{
    abstract_trait::MedicineCommandRepositoryTrait,
    config::ConnectionPool,
    domain::requests::{CreateMedicineRequest, UpdateMedicineRequest},
    errors::RepositoryError,
    model::{DEFAULT_MEDICINE_IMAGE, Medicine as MedicineModel},
};
use async_trait::async_trait;
use tracing::{error, info};

pub struct MedicineCommandRepository {
    db: ConnectionPool,
}

impl MedicineCommandRepository {
    pub fn new(db: ConnectionPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl MedicineCommandRepositoryTrait for MedicineCommandRepository {
    async fn create_medicine(
        &self,
        req: &CreateMedicineRequest,
    ) -> Result<MedicineModel, RepositoryError> {
        let mut conn = self.db.acquire().await.map_err(RepositoryError::from)?;

        let image = req
            .image
            .as_deref()
            .filter(|image| !image.trim().is_empty())
            .unwrap_or(DEFAULT_MEDICINE_IMAGE);

        let sql = format!(
            r#"
            INSERT INTO medicines (name, description, price, category, dosage, manufacturer,
                                   expiry_date, stock, image, requires_prescription,
                                   created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, current_timestamp, current_timestamp)
            RETURNING {MEDICINE_COLUMNS}
            "#
        );

        let record = sqlx::query_as::<_, MedicineRecord>(&sql)
            .bind(&req.name)
            .bind(&req.description)
            .bind(req.price)
            .bind(req.category.as_str())
            .bind(&req.dosage)
            .bind(&req.manufacturer)
            .bind(req.expiry_date)
            .bind(req.stock)
            .bind(image)
            .bind(req.requires_prescription)
            .fetch_one(&mut *conn)
            .await
            .map_err(|err| {
                error!("❌ Failed to create medicine {}: {:?}", req.name, err);
                RepositoryError::from(err)
            })?;

        info!(
            "✅ Created medicine ID {} ({})",
            record.medicine_id, record.name
        );

        MedicineModel::try_from(record)
    }

    async fn update_medicine(
        &self,
        req: &UpdateMedicineRequest,
    ) -> Result<MedicineModel, RepositoryError> {
        let id = req.id.ok_or(RepositoryError::NotFound)?;
        let mut conn = self.db.acquire().await.map_err(RepositoryError::from)?;

        let image = req
            .image
            .as_deref()
            .filter(|image| !image.trim().is_empty());

        let sql = format!(
            r#"
            UPDATE medicines
            SET name = $2,
                description = $3,
                price = $4,
                category = $5,
                dosage = $6,
                manufacturer = $7,
                expiry_date = $8,
                stock = $9,
                image = COALESCE($10, image),
                requires_prescription = $11,
                updated_at = current_timestamp
            WHERE medicine_id = $1
            RETURNING {MEDICINE_COLUMNS}
            "#
        );

        let record = sqlx::query_as::<_, MedicineRecord>(&sql)
            .bind(id)
            .bind(&req.name)
            .bind(&req.description)
            .bind(req.price)
            .bind(req.category.as_str())
            .bind(&req.dosage)
            .bind(&req.manufacturer)
            .bind(req.expiry_date)
            .bind(req.stock)
            .bind(image)
            .bind(req.requires_prescription)
            .fetch_optional(&mut *conn)
            .await
            .map_err(|err| {
                error!("❌ Failed to update medicine ID {}: {:?}", id, err);
                RepositoryError::from(err)
            })?
            .ok_or(RepositoryError::NotFound)?;

        info!("🔄 Updated medicine ID {}", record.medicine_id);

        MedicineModel::try_from(record)
    }

    async fn delete_medicine(&self, id: i32) -> Result<(), RepositoryError> {
        let mut conn = self.db.acquire().await.map_err(RepositoryError::from)?;

        let result = sqlx::query("DELETE FROM medicines WHERE medicine_id = $1")
            .bind(id)
            .execute(&mut *conn)
            .await
            .map_err(|err| {
                error!("❌ Failed to delete medicine ID {}: {:?}", id, err);
                RepositoryError::from(err)
            })?;

        if result.rows_affected() == 0 {
            info!("⚠️ No medicine found to delete with ID {}", id);
            return Err(RepositoryError::NotFound);
        }

        info!("🗑️ Deleted medicine ID {}", id);
        Ok(())
    }
}
