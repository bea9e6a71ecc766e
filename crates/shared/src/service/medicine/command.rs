use crate::{
    abstract_trait::{DynMedicineCommandRepository, MedicineCommandServiceTrait},
    domain::{
        requests::{CreateMedicineRequest, UpdateMedicineRequest},
        responses::{ApiResponse, MedicineResponse},
    },
    errors::{RepositoryError, ServiceError},
    utils::{Method, ServiceTracer},
};
use async_trait::async_trait;
use opentelemetry::KeyValue;
use tracing::{error, info};

pub struct MedicineCommandService {
    command: DynMedicineCommandRepository,
    tracer: ServiceTracer,
}

impl MedicineCommandService {
    pub fn new(command: DynMedicineCommandRepository, tracer: ServiceTracer) -> Self {
        Self { command, tracer }
    }
}

fn not_found_as_medicine(err: RepositoryError) -> ServiceError {
    match err {
        RepositoryError::NotFound => ServiceError::NotFound("Medicine".into()),
        other => ServiceError::Repo(other),
    }
}

#[async_trait]
impl MedicineCommandServiceTrait for MedicineCommandService {
    async fn create_medicine(
        &self,
        req: &CreateMedicineRequest,
    ) -> Result<ApiResponse<MedicineResponse>, ServiceError> {
        info!("🏗️ Creating medicine: {}", req.name);

        let method = Method::Post;
        let tracing_ctx = self.tracer.start_tracing(
            "CreateMedicine",
            vec![
                KeyValue::new("component", "medicine"),
                KeyValue::new("medicine.name", req.name.clone()),
                KeyValue::new("medicine.category", req.category.as_str()),
            ],
        );

        match self.command.create_medicine(req).await {
            Ok(medicine) => {
                self.tracer
                    .complete_tracing_success(&tracing_ctx, method, "Medicine created")
                    .await;

                Ok(ApiResponse::success(
                    "Medicine created successfully",
                    MedicineResponse::from(medicine),
                ))
            }
            Err(err) => {
                error!("❌ Failed to create medicine {}: {err:?}", req.name);
                self.tracer
                    .complete_tracing_error(&tracing_ctx, method, "Failed to create medicine")
                    .await;
                Err(ServiceError::Repo(err))
            }
        }
    }

    async fn update_medicine(
        &self,
        req: &UpdateMedicineRequest,
    ) -> Result<ApiResponse<MedicineResponse>, ServiceError> {
        let id = req
            .id
            .ok_or_else(|| ServiceError::validation("Medicine id is required"))?;

        info!("🔄 Updating medicine ID {id}");

        let method = Method::Put;
        let tracing_ctx = self.tracer.start_tracing(
            "UpdateMedicine",
            vec![
                KeyValue::new("component", "medicine"),
                KeyValue::new("medicine.id", id.to_string()),
            ],
        );

        match self.command.update_medicine(req).await {
            Ok(medicine) => {
                self.tracer
                    .complete_tracing_success(&tracing_ctx, method, "Medicine updated")
                    .await;

                Ok(ApiResponse::success(
                    "Medicine updated successfully",
                    MedicineResponse::from(medicine),
                ))
            }
            Err(err) => {
                error!("❌ Failed to update medicine {id}: {err:?}");
                self.tracer
                    .complete_tracing_error(&tracing_ctx, method, "Failed to update medicine")
                    .await;
                Err(not_found_as_medicine(err))
            }
        }
    }

    async fn delete_medicine(&self, id: i32) -> Result<ApiResponse<()>, ServiceError> {
        info!("🗑️ Deleting medicine ID {id}");

        let method = Method::Delete;
        let tracing_ctx = self.tracer.start_tracing(
            "DeleteMedicine",
            vec![
                KeyValue::new("component", "medicine"),
                KeyValue::new("medicine.id", id.to_string()),
            ],
        );

        match self.command.delete_medicine(id).await {
            Ok(()) => {
                self.tracer
                    .complete_tracing_success(&tracing_ctx, method, "Medicine deleted")
                    .await;

                Ok(ApiResponse::success("Medicine removed", ()))
            }
            Err(err) => {
                error!("❌ Failed to delete medicine {id}: {err:?}");
                self.tracer
                    .complete_tracing_error(&tracing_ctx, method, "Failed to delete medicine")
                    .await;
                Err(not_found_as_medicine(err))
            }
        }
    }
}
