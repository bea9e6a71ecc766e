use crate::{
    abstract_trait::{DynFileStorage, DynPrescriptionRepository, PrescriptionServiceTrait},
    domain::{
        requests::{NewPrescription, UploadPrescriptionRequest},
        responses::{ApiResponse, PrescriptionResponse},
    },
    errors::ServiceError,
    utils::{Method, ServiceTracer},
};
use async_trait::async_trait;
use chrono::Utc;
use opentelemetry::KeyValue;
use prometheus_client::registry::Registry;
use std::{path::Path, sync::Arc};
use tokio::sync::Mutex;
use tracing::{error, info, warn};

const ALLOWED_EXTENSIONS: [&str; 4] = ["pdf", "jpg", "jpeg", "png"];

const PRESCRIPTION_URL_PREFIX: &str = "/uploads/prescriptions";

pub struct PrescriptionService {
    repo: DynPrescriptionRepository,
    storage: DynFileStorage,
    max_upload_bytes: usize,
    tracer: ServiceTracer,
}

pub struct PrescriptionServiceDeps {
    pub repo: DynPrescriptionRepository,
    pub storage: DynFileStorage,
    pub max_upload_bytes: usize,
    pub registry: Arc<Mutex<Registry>>,
}

impl PrescriptionService {
    pub async fn new(deps: PrescriptionServiceDeps) -> Self {
        let PrescriptionServiceDeps {
            repo,
            storage,
            max_upload_bytes,
            registry,
        } = deps;

        let tracer =
            ServiceTracer::new("prescription-service", "prescription_service", &registry).await;

        Self {
            repo,
            storage,
            max_upload_bytes,
            tracer,
        }
    }
}

/// Last path component of a client-supplied name with anything outside
/// `[A-Za-z0-9._-]` replaced by `_`.
pub(crate) fn sanitize_file_name(original: &str) -> String {
    let base = original
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or(original)
        .trim();

    let cleaned: String = base
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') {
                c
            } else {
                '_'
            }
        })
        .collect();

    let cleaned = cleaned.trim_start_matches('.');
    if cleaned.is_empty() {
        "prescription".to_string()
    } else {
        cleaned.to_string()
    }
}

pub(crate) fn has_allowed_extension(file_name: &str) -> bool {
    Path::new(file_name)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase())
        .is_some_and(|ext| ALLOWED_EXTENSIONS.contains(&ext.as_str()))
}

fn check_upload(req: &UploadPrescriptionRequest, max_bytes: usize) -> Result<(), ServiceError> {
    if req.bytes.is_empty() {
        return Err(ServiceError::Upload("Please upload a file".into()));
    }

    if !has_allowed_extension(&req.original_name) {
        return Err(ServiceError::Upload(
            "Only PDF, JPG, JPEG and PNG files are allowed".into(),
        ));
    }

    if req.bytes.len() > max_bytes {
        return Err(ServiceError::Upload(format!(
            "File exceeds the {max_bytes} byte limit"
        )));
    }

    Ok(())
}

#[async_trait]
impl PrescriptionServiceTrait for PrescriptionService {
    async fn upload(
        &self,
        req: UploadPrescriptionRequest,
    ) -> Result<ApiResponse<PrescriptionResponse>, ServiceError> {
        info!(
            "📤 Uploading prescription {} ({} bytes) for user {}",
            req.original_name,
            req.bytes.len(),
            req.user_id
        );

        let method = Method::Post;
        let tracing_ctx = self.tracer.start_tracing(
            "UploadPrescription",
            vec![
                KeyValue::new("component", "prescription"),
                KeyValue::new("user.id", req.user_id.to_string()),
                KeyValue::new("file.size", req.bytes.len() as i64),
            ],
        );

        if let Err(err) = check_upload(&req, self.max_upload_bytes) {
            self.tracer
                .complete_tracing_error(&tracing_ctx, method, &err.to_string())
                .await;
            return Err(err);
        }

        let file_name = format!(
            "{}-{}",
            Utc::now().timestamp_millis(),
            sanitize_file_name(&req.original_name)
        );

        if let Err(err) = self.storage.save(&file_name, &req.bytes).await {
            error!("❌ Failed to store {file_name}: {err}");
            self.tracer
                .complete_tracing_error(&tracing_ctx, method, "Failed to store file")
                .await;
            return Err(ServiceError::Storage(err));
        }

        let record = NewPrescription {
            user_id: req.user_id,
            name: req.original_name.clone(),
            url: format!("{PRESCRIPTION_URL_PREFIX}/{file_name}"),
            file_name: file_name.clone(),
        };

        match self.repo.create(&record).await {
            Ok(prescription) => {
                self.tracer
                    .complete_tracing_success(&tracing_ctx, method, "Prescription uploaded")
                    .await;

                Ok(ApiResponse::success(
                    "Prescription uploaded successfully",
                    PrescriptionResponse::from(prescription),
                ))
            }
            Err(err) => {
                error!("❌ Failed to record prescription {file_name}: {err:?}");
                if let Err(io_err) = self.storage.remove(&file_name).await {
                    warn!("⚠️ Orphaned upload {file_name} left on disk: {io_err}");
                }
                self.tracer
                    .complete_tracing_error(&tracing_ctx, method, "Failed to record prescription")
                    .await;
                Err(ServiceError::Repo(err))
            }
        }
    }

    async fn find_by_user(
        &self,
        user_id: i32,
    ) -> Result<ApiResponse<Vec<PrescriptionResponse>>, ServiceError> {
        let method = Method::Get;
        let tracing_ctx = self.tracer.start_tracing(
            "FindPrescriptionsByUser",
            vec![
                KeyValue::new("component", "prescription"),
                KeyValue::new("user.id", user_id.to_string()),
            ],
        );

        match self.repo.find_by_user(user_id).await {
            Ok(prescriptions) => {
                let data: Vec<PrescriptionResponse> = prescriptions
                    .into_iter()
                    .map(PrescriptionResponse::from)
                    .collect();

                self.tracer
                    .complete_tracing_success(&tracing_ctx, method, "Prescriptions retrieved")
                    .await;

                Ok(ApiResponse::success(
                    format!("Found {} prescriptions", data.len()),
                    data,
                ))
            }
            Err(err) => {
                error!("❌ Failed to list prescriptions of user {user_id}: {err:?}");
                self.tracer
                    .complete_tracing_error(&tracing_ctx, method, "Failed to list prescriptions")
                    .await;
                Err(ServiceError::Repo(err))
            }
        }
    }

    async fn delete(&self, user_id: i32, id: i32) -> Result<ApiResponse<()>, ServiceError> {
        info!("🗑️ User {user_id} deleting prescription {id}");

        let method = Method::Delete;
        let tracing_ctx = self.tracer.start_tracing(
            "DeletePrescription",
            vec![
                KeyValue::new("component", "prescription"),
                KeyValue::new("user.id", user_id.to_string()),
                KeyValue::new("prescription.id", id.to_string()),
            ],
        );

        let prescription = match self.repo.find_by_id(id).await {
            Ok(Some(found)) if found.user_id == user_id => found,
            Ok(_) => {
                self.tracer
                    .complete_tracing_error(&tracing_ctx, method, "Prescription not found")
                    .await;
                return Err(ServiceError::NotFound("Prescription".into()));
            }
            Err(err) => {
                error!("❌ Failed to fetch prescription {id}: {err:?}");
                self.tracer
                    .complete_tracing_error(&tracing_ctx, method, "Failed to fetch prescription")
                    .await;
                return Err(ServiceError::Repo(err));
            }
        };

        if let Err(err) = self.repo.delete(id).await {
            error!("❌ Failed to delete prescription {id}: {err:?}");
            self.tracer
                .complete_tracing_error(&tracing_ctx, method, "Failed to delete prescription")
                .await;
            return Err(ServiceError::Repo(err));
        }

        if let Err(err) = self.storage.remove(&prescription.file_name).await {
            warn!(
                "⚠️ Prescription {id} removed but its file {} stayed: {err}",
                prescription.file_name
            );
        }

        self.tracer
            .complete_tracing_success(&tracing_ctx, method, "Prescription deleted")
            .await;

        Ok(ApiResponse::success("Prescription deleted", ()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sanitizing_strips_directories_and_odd_characters() {
        assert_eq!(sanitize_file_name("../../etc/passwd"), "passwd");
        assert_eq!(sanitize_file_name("C:\\scans\\my rx (1).PDF"), "my_rx__1_.PDF");
        assert_eq!(sanitize_file_name(".hidden.png"), "hidden.png");
        assert_eq!(sanitize_file_name("   "), "prescription");
    }

    #[test]
    fn only_documents_and_images_are_accepted() {
        for name in ["rx.pdf", "rx.JPG", "rx.jpeg", "scan.Png"] {
            assert!(has_allowed_extension(name), "{name} should be accepted");
        }
        for name in ["rx.exe", "rx", "rx.pdf.sh", "pdf"] {
            assert!(!has_allowed_extension(name), "{name} should be rejected");
        }
    }

    #[test]
    fn oversized_and_empty_uploads_are_rejected() {
        let mut req = UploadPrescriptionRequest {
            user_id: 1,
            original_name: "rx.pdf".into(),
            bytes: vec![0; 11],
        };
        assert!(matches!(check_upload(&req, 10), Err(ServiceError::Upload(_))));

        req.bytes.clear();
        assert!(matches!(check_upload(&req, 10), Err(ServiceError::Upload(_))));

        req.bytes = vec![0; 10];
        assert!(check_upload(&req, 10).is_ok());
    }
}
