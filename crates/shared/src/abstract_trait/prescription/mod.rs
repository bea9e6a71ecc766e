use crate::{
    domain::{
        requests::{NewPrescription, UploadPrescriptionRequest},
        responses::{ApiResponse, PrescriptionResponse},
    },
    errors::{RepositoryError, ServiceError},
    model::Prescription as PrescriptionModel,
};
use async_trait::async_trait;
use std::sync::Arc;

pub type DynPrescriptionRepository = Arc<dyn PrescriptionRepositoryTrait + Send + Sync>;
pub type DynPrescriptionService = Arc<dyn PrescriptionServiceTrait + Send + Sync>;

#[async_trait]
pub trait PrescriptionRepositoryTrait {
    async fn create(&self, req: &NewPrescription) -> Result<PrescriptionModel, RepositoryError>;
    async fn find_by_user(&self, user_id: i32)
    -> Result<Vec<PrescriptionModel>, RepositoryError>;
    async fn find_by_id(&self, id: i32) -> Result<Option<PrescriptionModel>, RepositoryError>;
    async fn delete(&self, id: i32) -> Result<(), RepositoryError>;
}

#[async_trait]
pub trait PrescriptionServiceTrait {
    async fn upload(
        &self,
        req: UploadPrescriptionRequest,
    ) -> Result<ApiResponse<PrescriptionResponse>, ServiceError>;
    async fn find_by_user(
        &self,
        user_id: i32,
    ) -> Result<ApiResponse<Vec<PrescriptionResponse>>, ServiceError>;
    async fn delete(&self, user_id: i32, id: i32) -> Result<ApiResponse<()>, ServiceError>;
}
