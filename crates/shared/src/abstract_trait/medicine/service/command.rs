use crate::{
    domain::{
        requests::{CreateMedicineRequest, UpdateMedicineRequest},
        responses::{ApiResponse, MedicineResponse},
    },
    errors::{RepositoryError, ServiceError},
    model::Medicine as MedicineModel,
};
use async_trait::async_trait;
use std::sync::Arc;

pub type DynMedicineCommandRepository = Arc<dyn MedicineCommandRepositoryTrait + Send + Sync>;
pub type DynMedicineCommandService = Arc<dyn MedicineCommandServiceTrait + Send + Sync>;

#[async_trait]
pub trait MedicineCommandRepositoryTrait {
    async fn create_medicine(
        &self,
        req: &CreateMedicineRequest,
    ) -> Result<MedicineModel, RepositoryError>;
    /// Fails with [`RepositoryError::NotFound`] when `req.id` is unknown.
    async fn update_medicine(
        &self,
        req: &UpdateMedicineRequest,
    ) -> Result<MedicineModel, RepositoryError>;
    async fn delete_medicine(&self, id: i32) -> Result<(), RepositoryError>;
}

#[async_trait]
pub trait MedicineCommandServiceTrait {
    async fn create_medicine(
        &self,
        req: &CreateMedicineRequest,
    ) -> Result<ApiResponse<MedicineResponse>, ServiceError>;
    async fn update_medicine(
        &self,
        req: &UpdateMedicineRequest,
    ) -> Result<ApiResponse<MedicineResponse>, ServiceError>;
    async fn delete_medicine(&self, id: i32) -> Result<ApiResponse<()>, ServiceError>;
}
