use crate::{
    abstract_trait::{DynMedicineQueryRepository, MedicineQueryServiceTrait},
    domain::{
        requests::{FindAllMedicines, MedicineFilter},
        responses::{ApiResponse, MedicineResponse},
    },
    errors::ServiceError,
    utils::{Method, ServiceTracer},
};
use async_trait::async_trait;
use opentelemetry::KeyValue;
use tracing::{error, info};

pub struct MedicineQueryService {
    query: DynMedicineQueryRepository,
    tracer: ServiceTracer,
}

impl MedicineQueryService {
    pub fn new(query: DynMedicineQueryRepository, tracer: ServiceTracer) -> Self {
        Self { query, tracer }
    }
}

#[async_trait]
impl MedicineQueryServiceTrait for MedicineQueryService {
    async fn find_all(
        &self,
        req: &FindAllMedicines,
    ) -> Result<ApiResponse<Vec<MedicineResponse>>, ServiceError> {
        info!(
            "🔍 Listing medicines | category: {:?}, search: {:?}",
            req.category, req.search
        );

        let method = Method::Get;
        let tracing_ctx = self.tracer.start_tracing(
            "FindAllMedicines",
            vec![
                KeyValue::new("component", "medicine"),
                KeyValue::new("operation", "find_all"),
                KeyValue::new("category", req.category.clone().unwrap_or_default()),
                KeyValue::new("search", req.search.clone().unwrap_or_default()),
            ],
        );

        let filter = match MedicineFilter::try_from(req) {
            Ok(filter) => filter,
            Err(msg) => {
                self.tracer
                    .complete_tracing_error(&tracing_ctx, method, &msg)
                    .await;
                return Err(ServiceError::validation(msg));
            }
        };

        match self.query.find_all(&filter).await {
            Ok(medicines) => {
                let data: Vec<MedicineResponse> =
                    medicines.into_iter().map(MedicineResponse::from).collect();

                self.tracer
                    .complete_tracing_success(&tracing_ctx, method, "Medicines retrieved")
                    .await;

                Ok(ApiResponse::success(
                    format!("Found {} medicines", data.len()),
                    data,
                ))
            }
            Err(err) => {
                error!("❌ Failed to list medicines: {err:?}");
                self.tracer
                    .complete_tracing_error(&tracing_ctx, method, "Failed to list medicines")
                    .await;
                Err(ServiceError::Repo(err))
            }
        }
    }

    async fn find_by_id(&self, id: i32) -> Result<ApiResponse<MedicineResponse>, ServiceError> {
        info!("🔍 Fetching medicine ID {id}");

        let method = Method::Get;
        let tracing_ctx = self.tracer.start_tracing(
            "FindMedicineById",
            vec![
                KeyValue::new("component", "medicine"),
                KeyValue::new("medicine.id", id.to_string()),
            ],
        );

        match self.query.find_by_id(id).await {
            Ok(Some(medicine)) => {
                self.tracer
                    .complete_tracing_success(&tracing_ctx, method, "Medicine retrieved")
                    .await;

                Ok(ApiResponse::success(
                    "Medicine retrieved successfully",
                    MedicineResponse::from(medicine),
                ))
            }
            Ok(None) => {
                self.tracer
                    .complete_tracing_error(&tracing_ctx, method, "Medicine not found")
                    .await;
                Err(ServiceError::NotFound("Medicine".into()))
            }
            Err(err) => {
                error!("❌ Failed to fetch medicine {id}: {err:?}");
                self.tracer
                    .complete_tracing_error(&tracing_ctx, method, "Failed to fetch medicine")
                    .await;
                Err(ServiceError::Repo(err))
            }
        }
    }
}
