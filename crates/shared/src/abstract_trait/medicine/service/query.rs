use crate::{
    domain::{
        requests::{FindAllMedicines, MedicineFilter},
        responses::{ApiResponse, MedicineResponse},
    },
    errors::{RepositoryError, ServiceError},
    model::Medicine as MedicineModel,
};
use async_trait::async_trait;
use std::sync::Arc;

pub type DynMedicineQueryRepository = Arc<dyn MedicineQueryRepositoryTrait + Send + Sync>;
pub type DynMedicineQueryService = Arc<dyn MedicineQueryServiceTrait + Send + Sync>;

#[async_trait]
pub trait MedicineQueryRepositoryTrait {
    async fn find_all(&self, filter: &MedicineFilter)
    -> Result<Vec<MedicineModel>, RepositoryError>;
    async fn find_by_id(&self, id: i32) -> Result<Option<MedicineModel>, RepositoryError>;
}

#[async_trait]
pub trait MedicineQueryServiceTrait {
    async fn find_all(
        &self,
        req: &FindAllMedicines,
    ) -> Result<ApiResponse<Vec<MedicineResponse>>, ServiceError>;
    async fn find_by_id(&self, id: i32) -> Result<ApiResponse<MedicineResponse>, ServiceError>;
}
