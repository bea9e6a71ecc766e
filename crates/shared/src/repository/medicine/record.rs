use crate::{errors::RepositoryError, model::Medicine};
use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use sqlx::FromRow;

pub(super) const MEDICINE_COLUMNS: &str = "medicine_id, name, description, price, category, \
     dosage, manufacturer, expiry_date, stock, image, requires_prescription, created_at, updated_at";

#[derive(Debug, FromRow)]
pub(super) struct MedicineRecord {
    pub medicine_id: i32,
    pub name: String,
    pub description: String,
    pub price: Decimal,
    pub category: String,
    pub dosage: String,
    pub manufacturer: String,
    pub expiry_date: NaiveDate,
    pub stock: i32,
    pub image: String,
    pub requires_prescription: bool,
    pub created_at: Option<NaiveDateTime>,
    pub updated_at: Option<NaiveDateTime>,
}

impl TryFrom<MedicineRecord> for Medicine {
    type Error = RepositoryError;

    fn try_from(record: MedicineRecord) -> Result<Self, Self::Error> {
        let category = record.category.parse().map_err(|err: String| {
            RepositoryError::Corrupted(format!("medicine {}: {err}", record.medicine_id))
        })?;

        Ok(Medicine {
            medicine_id: record.medicine_id,
            name: record.name,
            description: record.description,
            price: record.price,
            category,
            dosage: record.dosage,
            manufacturer: record.manufacturer,
            expiry_date: record.expiry_date,
            stock: record.stock,
            image: record.image,
            requires_prescription: record.requires_prescription,
            created_at: record.created_at,
            updated_at: record.updated_at,
        })
    }
}
