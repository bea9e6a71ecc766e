use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};
use utoipa::ToSchema;

pub const DEFAULT_MEDICINE_IMAGE: &str = "/default-medicine.jpg";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
pub enum MedicineCategory {
    #[serde(rename = "OTC")]
    Otc,
    Prescription,
}

impl MedicineCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            MedicineCategory::Otc => "OTC",
            MedicineCategory::Prescription => "Prescription",
        }
    }
}

impl fmt::Display for MedicineCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MedicineCategory {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "OTC" => Ok(MedicineCategory::Otc),
            "Prescription" => Ok(MedicineCategory::Prescription),
            other => Err(format!("unknown medicine category '{other}'")),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Medicine {
    pub medicine_id: i32,
    pub name: String,
    pub description: String,
    pub price: Decimal,
    pub category: MedicineCategory,
    pub dosage: String,
    pub manufacturer: String,
    pub expiry_date: NaiveDate,
    pub stock: i32,
    pub image: String,
    pub requires_prescription: bool,
    pub created_at: Option<NaiveDateTime>,
    pub updated_at: Option<NaiveDateTime>,
}

impl Medicine {
    /// Case-insensitive substring match against name or description.
    pub fn matches_search(&self, needle: &str) -> bool {
        let needle = needle.to_lowercase();
        self.name.to_lowercase().contains(&needle)
            || self.description.to_lowercase().contains(&needle)
    }
}
