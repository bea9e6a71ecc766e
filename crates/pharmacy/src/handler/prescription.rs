use crate::middleware::jwt::auth_middleware;
use axum::{
    Extension, Json,
    extract::{Multipart, Path, multipart::MultipartError},
    http::StatusCode,
    middleware,
    response::IntoResponse,
    routing::{delete, get, post},
};
use shared::{
    abstract_trait::DynPrescriptionService,
    domain::{
        requests::UploadPrescriptionRequest,
        responses::{ApiResponse, PrescriptionResponse},
    },
    errors::HttpError,
    state::AppState,
};
use std::sync::Arc;
use tracing::warn;
use utoipa::ToSchema;
use utoipa_axum::router::OpenApiRouter;

const FILE_FIELD: &str = "prescription";

/// Multipart body accepted by the upload endpoint.
#[derive(ToSchema)]
#[allow(dead_code)]
pub struct PrescriptionUploadForm {
    /// PDF, JPG, JPEG or PNG scan of the prescription.
    #[schema(value_type = String, format = Binary)]
    prescription: Vec<u8>,
}

fn multipart_error(err: MultipartError) -> HttpError {
    warn!("⚠️ Rejected prescription upload: {}", err.body_text());

    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        HttpError::PayloadTooLarge("File too large".into())
    } else {
        HttpError::BadRequest(err.body_text())
    }
}

#[utoipa::path(
    post,
    path = "/api/prescriptions/upload",
    tag = "Prescription",
    security(("bearer_auth" = [])),
    request_body(content = PrescriptionUploadForm, content_type = "multipart/form-data"),
    responses(
        (status = 201, description = "Prescription stored", body = ApiResponse<PrescriptionResponse>),
        (status = 400, description = "Missing file, unsupported type or file too large"),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn upload_prescription(
    Extension(service): Extension<DynPrescriptionService>,
    Extension(user_id): Extension<i32>,
    mut multipart: Multipart,
) -> Result<impl IntoResponse, HttpError> {
    let mut upload = None;

    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }

        let original_name = field.file_name().unwrap_or_default().to_string();
        let bytes = field.bytes().await.map_err(multipart_error)?;

        upload = Some(UploadPrescriptionRequest {
            user_id,
            original_name,
            bytes: bytes.to_vec(),
        });
    }

    let Some(upload) = upload else {
        return Err(HttpError::BadRequest("Please upload a file".into()));
    };

    let response = service.upload(upload).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

#[utoipa::path(
    get,
    path = "/api/prescriptions",
    tag = "Prescription",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Prescriptions uploaded by the caller", body = ApiResponse<Vec<PrescriptionResponse>>),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn get_prescriptions(
    Extension(service): Extension<DynPrescriptionService>,
    Extension(user_id): Extension<i32>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.find_by_user(user_id).await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    delete,
    path = "/api/prescriptions/{id}",
    tag = "Prescription",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Prescription ID")),
    responses(
        (status = 200, description = "Prescription removed", body = serde_json::Value),
        (status = 404, description = "Prescription not found")
    )
)]
pub async fn delete_prescription(
    Extension(service): Extension<DynPrescriptionService>,
    Extension(user_id): Extension<i32>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.delete(user_id, id).await?;
    Ok((StatusCode::OK, Json(response)))
}

pub fn prescription_routes(app_state: Arc<AppState>) -> OpenApiRouter {
    OpenApiRouter::new()
        .route("/api/prescriptions/upload", post(upload_prescription))
        .route("/api/prescriptions", get(get_prescriptions))
        .route("/api/prescriptions/{id}", delete(delete_prescription))
        .route_layer(middleware::from_fn(auth_middleware))
        .layer(Extension(
            app_state.di_container.prescription_service.clone(),
        ))
        .layer(Extension(app_state.jwt_config.clone()))
}
