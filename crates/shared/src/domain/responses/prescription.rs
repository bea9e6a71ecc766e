use crate::model::Prescription;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Serialize, Deserialize, ToSchema, Clone)]
#[serde(rename_all = "camelCase")]
pub struct PrescriptionResponse {
    pub id: i32,
    pub name: String,
    pub url: String,
    pub upload_date: String,
}

impl From<Prescription> for PrescriptionResponse {
    fn from(value: Prescription) -> Self {
        PrescriptionResponse {
            id: value.prescription_id,
            name: value.name,
            url: value.url,
            upload_date: value.upload_date.to_string(),
        }
    }
}
