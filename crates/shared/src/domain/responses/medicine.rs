use crate::model::{Medicine, MedicineCategory};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Serialize, Deserialize, ToSchema, Clone)]
#[serde(rename_all = "camelCase")]
pub struct MedicineResponse {
    pub id: i32,
    pub name: String,
    pub description: String,
    #[schema(value_type = f64)]
    pub price: Decimal,
    pub category: MedicineCategory,
    pub dosage: String,
    pub manufacturer: String,
    pub expiry_date: NaiveDate,
    pub stock: i32,
    pub image: String,
    pub requires_prescription: bool,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

impl From<Medicine> for MedicineResponse {
    fn from(value: Medicine) -> Self {
        MedicineResponse {
            id: value.medicine_id,
            name: value.name,
            description: value.description,
            price: value.price,
            category: value.category,
            dosage: value.dosage,
            manufacturer: value.manufacturer,
            expiry_date: value.expiry_date,
            stock: value.stock,
            image: value.image,
            requires_prescription: value.requires_prescription,
            created_at: value.created_at.map(|dt| dt.to_string()),
            updated_at: value.updated_at.map(|dt| dt.to_string()),
        }
    }
}
