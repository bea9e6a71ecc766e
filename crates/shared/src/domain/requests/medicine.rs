use crate::model::MedicineCategory;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::{Validate, ValidationError};

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema, IntoParams)]
pub struct FindAllMedicines {
    /// `OTC`, `Prescription` or `all`.
    #[serde(default)]
    pub category: Option<String>,

    #[serde(default)]
    pub search: Option<String>,
}

fn validate_price(price: &Decimal) -> Result<(), ValidationError> {
    if price.is_sign_negative() && !price.is_zero() {
        return Err(ValidationError::new("range").with_message("Price cannot be negative".into()));
    }
    Ok(())
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateMedicineRequest {
    #[validate(length(min = 1, message = "Name is required"))]
    #[schema(example = "Paracetamol 500mg")]
    pub name: String,

    #[validate(length(min = 1, message = "Description is required"))]
    pub description: String,

    #[validate(custom(function = "validate_price"))]
    #[schema(value_type = f64, example = 4.5)]
    pub price: Decimal,

    pub category: MedicineCategory,

    #[validate(length(min = 1, message = "Dosage is required"))]
    pub dosage: String,

    #[validate(length(min = 1, message = "Manufacturer is required"))]
    pub manufacturer: String,

    pub expiry_date: NaiveDate,

    #[validate(range(min = 0, message = "Stock cannot be negative"))]
    #[schema(example = 100)]
    pub stock: i32,

    #[serde(default)]
    pub image: Option<String>,

    #[serde(default)]
    pub requires_prescription: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateMedicineRequest {
    #[serde(skip)]
    pub id: Option<i32>,

    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,

    #[validate(length(min = 1, message = "Description is required"))]
    pub description: String,

    #[validate(custom(function = "validate_price"))]
    #[schema(value_type = f64, example = 4.5)]
    pub price: Decimal,

    pub category: MedicineCategory,

    #[validate(length(min = 1, message = "Dosage is required"))]
    pub dosage: String,

    #[validate(length(min = 1, message = "Manufacturer is required"))]
    pub manufacturer: String,

    pub expiry_date: NaiveDate,

    #[validate(range(min = 0, message = "Stock cannot be negative"))]
    pub stock: i32,

    #[serde(default)]
    pub image: Option<String>,

    #[serde(default)]
    pub requires_prescription: bool,
}

/// Parsed form of [`FindAllMedicines`]; `None` means "no constraint".
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MedicineFilter {
    pub category: Option<MedicineCategory>,
    pub search: Option<String>,
}

impl TryFrom<&FindAllMedicines> for MedicineFilter {
    type Error = String;

    fn try_from(req: &FindAllMedicines) -> Result<Self, Self::Error> {
        let category = match req.category.as_deref().map(str::trim) {
            None | Some("") | Some("all") => None,
            Some(value) => Some(value.parse::<MedicineCategory>()?),
        };

        let search = req
            .search
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_owned);

        Ok(Self { category, search })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_and_blank_mean_no_filter() {
        for category in [None, Some(""), Some("all")] {
            let req = FindAllMedicines {
                category: category.map(str::to_owned),
                search: Some("   ".into()),
            };
            assert_eq!(MedicineFilter::try_from(&req), Ok(MedicineFilter::default()));
        }
    }

    #[test]
    fn category_must_be_known() {
        let req = FindAllMedicines {
            category: Some("Herbal".into()),
            search: None,
        };
        assert!(MedicineFilter::try_from(&req).is_err());

        let req = FindAllMedicines {
            category: Some("OTC".into()),
            search: Some(" cold ".into()),
        };
        let filter = MedicineFilter::try_from(&req).unwrap();
        assert_eq!(filter.category, Some(MedicineCategory::Otc));
        assert_eq!(filter.search.as_deref(), Some("cold"));
    }
}
