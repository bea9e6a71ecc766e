use chrono::NaiveDateTime;

#[derive(Debug, Clone, PartialEq)]
pub struct Prescription {
    pub prescription_id: i32,
    pub user_id: i32,
    pub name: String,
    pub file_name: String,
    pub url: String,
    pub upload_date: NaiveDateTime,
}
