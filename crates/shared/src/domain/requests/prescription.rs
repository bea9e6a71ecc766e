#[derive(Debug, Clone)]
pub struct UploadPrescriptionRequest {
    pub user_id: i32,
    pub original_name: String,
    pub bytes: Vec<u8>,
}

#[derive(Debug, Clone)]
pub struct NewPrescription {
    pub user_id: i32,
    pub name: String,
    pub file_name: String,
    pub url: String,
}
