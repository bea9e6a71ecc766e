use crate::middleware::{
    admin::admin_middleware, jwt::auth_middleware, session::session_middleware,
    validate::SimpleValidatedJson,
};
use axum::{
    Extension, Json,
    extract::{Path, Query},
    http::StatusCode,
    middleware,
    response::IntoResponse,
    routing::{get, post},
};
use shared::{
    abstract_trait::{DynMedicineCommandService, DynMedicineQueryService},
    domain::{
        requests::{CreateMedicineRequest, FindAllMedicines, UpdateMedicineRequest},
        responses::{ApiResponse, MedicineResponse},
    },
    errors::HttpError,
    state::AppState,
};
use std::sync::Arc;
use utoipa_axum::router::OpenApiRouter;

#[utoipa::path(
    get,
    path = "/api/medicines",
    tag = "Medicine",
    params(FindAllMedicines),
    responses(
        (status = 200, description = "List of medicines", body = ApiResponse<Vec<MedicineResponse>>),
        (status = 400, description = "Unknown category")
    )
)]
pub async fn get_medicines(
    Extension(service): Extension<DynMedicineQueryService>,
    Query(params): Query<FindAllMedicines>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.find_all(&params).await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    get,
    path = "/api/medicines/{id}",
    tag = "Medicine",
    params(("id" = i32, Path, description = "Medicine ID")),
    responses(
        (status = 200, description = "Medicine details", body = ApiResponse<MedicineResponse>),
        (status = 404, description = "Medicine not found")
    )
)]
pub async fn get_medicine(
    Extension(service): Extension<DynMedicineQueryService>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.find_by_id(id).await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    post,
    path = "/api/medicines",
    tag = "Medicine",
    security(("bearer_auth" = [])),
    request_body = CreateMedicineRequest,
    responses(
        (status = 201, description = "Medicine created", body = ApiResponse<MedicineResponse>),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Admin only")
    )
)]
pub async fn create_medicine(
    Extension(service): Extension<DynMedicineCommandService>,
    SimpleValidatedJson(body): SimpleValidatedJson<CreateMedicineRequest>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.create_medicine(&body).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

#[utoipa::path(
    put,
    path = "/api/medicines/{id}",
    tag = "Medicine",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Medicine ID")),
    request_body = UpdateMedicineRequest,
    responses(
        (status = 200, description = "Medicine updated", body = ApiResponse<MedicineResponse>),
        (status = 400, description = "Validation error"),
        (status = 403, description = "Admin only"),
        (status = 404, description = "Medicine not found")
    )
)]
pub async fn update_medicine(
    Extension(service): Extension<DynMedicineCommandService>,
    Path(id): Path<i32>,
    SimpleValidatedJson(mut body): SimpleValidatedJson<UpdateMedicineRequest>,
) -> Result<impl IntoResponse, HttpError> {
    body.id = Some(id);

    let response = service.update_medicine(&body).await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    delete,
    path = "/api/medicines/{id}",
    tag = "Medicine",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Medicine ID")),
    responses(
        (status = 200, description = "Medicine removed", body = serde_json::Value),
        (status = 403, description = "Admin only"),
        (status = 404, description = "Medicine not found")
    )
)]
pub async fn delete_medicine(
    Extension(service): Extension<DynMedicineCommandService>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.delete_medicine(id).await?;
    Ok((StatusCode::OK, Json(response)))
}

pub fn medicine_routes(app_state: Arc<AppState>) -> OpenApiRouter {
    let medicine = &app_state.di_container.medicine_service;

    let public_routes = OpenApiRouter::new()
        .route("/api/medicines", get(get_medicines))
        .route("/api/medicines/{id}", get(get_medicine));

    let admin_routes = OpenApiRouter::new()
        .route("/api/medicines", post(create_medicine))
        .route(
            "/api/medicines/{id}",
            axum::routing::put(update_medicine).delete(delete_medicine),
        )
        .route_layer(middleware::from_fn(admin_middleware))
        .route_layer(middleware::from_fn(session_middleware))
        .route_layer(middleware::from_fn(auth_middleware));

    OpenApiRouter::new()
        .merge(public_routes)
        .merge(admin_routes)
        .layer(Extension(medicine.query.clone()))
        .layer(Extension(medicine.command.clone()))
        .layer(Extension(app_state.di_container.auth_service.identity.clone()))
        .layer(Extension(app_state.jwt_config.clone()))
}
