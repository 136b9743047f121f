use axum::{
    extract::{multipart::MultipartRejection, Multipart, Path, Query, State},
    http::{header, HeaderMap, HeaderValue, StatusCode},
    middleware::from_fn_with_state,
    response::{Html, IntoResponse, Response},
    routing::{delete, get, post, put},
    Json, Router,
};
use serde::Deserialize;

use crate::controllers::expose_controller::{ExposeController, ExposeDocument};
use crate::controllers::vehicle_controller::VehicleController;
use crate::dto::vehicle_dto::{
    CreateVehicleResponse, MessageResponse, UpdateVehicleResponse, VehicleForm, VehicleResponse,
    WriteMode,
};
use crate::middleware::require_admin;
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::utils::multipart::MultipartForm;
use crate::utils::urls::resolve_base_url;
use crate::utils::validation::parse_resource_id;

/// Lecturas y exposé públicos; escrituras solo para administradores
pub fn create_vehicle_router(state: AppState) -> Router<AppState> {
    let admin = from_fn_with_state(state, require_admin);

    Router::new()
        .route(
            "/",
            get(list_vehicles).merge(post(create_vehicle).route_layer(admin.clone())),
        )
        .route(
            "/:id",
            get(get_vehicle).merge(
                put(update_vehicle)
                    .merge(delete(delete_vehicle))
                    .route_layer(admin),
            ),
        )
        .route("/:id/expose", get(get_expose))
}

async fn list_vehicles(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<Vec<VehicleResponse>>, AppError> {
    let base_url = resolve_base_url(&headers, &state.config);
    let controller = VehicleController::new(&state);
    let response = controller.list(&base_url).await?;
    Ok(Json(response))
}

async fn get_vehicle(
    State(state): State<AppState>,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> Result<Json<VehicleResponse>, AppError> {
    let id = parse_resource_id("Vehicle", &id)?;
    let base_url = resolve_base_url(&headers, &state.config);
    let controller = VehicleController::new(&state);
    let response = controller.get_by_id(id, &base_url).await?;
    Ok(Json(response))
}

async fn create_vehicle(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<(StatusCode, Json<CreateVehicleResponse>), AppError> {
    let form = MultipartForm::read(multipart?, state.config.max_upload_images).await?;
    let form = VehicleForm::from_multipart(form, WriteMode::Create)?;
    let controller = VehicleController::new(&state);
    let response = controller.create(form).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

async fn update_vehicle(
    State(state): State<AppState>,
    Path(id): Path<String>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<UpdateVehicleResponse>, AppError> {
    let id = parse_resource_id("Vehicle", &id)?;
    let form = MultipartForm::read(multipart?, state.config.max_upload_images).await?;
    let form = VehicleForm::from_multipart(form, WriteMode::Update)?;
    let controller = VehicleController::new(&state);
    let response = controller.update(id, form).await?;
    Ok(Json(response))
}

async fn delete_vehicle(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, AppError> {
    let id = parse_resource_id("Vehicle", &id)?;
    let controller = VehicleController::new(&state);
    let response = controller.delete(id).await?;
    Ok(Json(response))
}

#[derive(Debug, Deserialize)]
struct ExposeQuery {
    html: Option<String>,
}

impl ExposeQuery {
    fn wants_html(&self) -> bool {
        matches!(self.html.as_deref(), Some("1") | Some("true"))
    }
}

async fn get_expose(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(query): Query<ExposeQuery>,
    headers: HeaderMap,
) -> Result<Response, AppError> {
    let id = parse_resource_id("Vehicle", &id)?;
    let base_url = resolve_base_url(&headers, &state.config);
    let controller = ExposeController::new(&state);

    match controller.generate(id, &base_url, query.wants_html()).await? {
        ExposeDocument::Html(html) => Ok(Html(html).into_response()),
        ExposeDocument::Pdf { file_name, bytes } => {
            let disposition = HeaderValue::from_str(&format!("attachment; filename=\"{}\"", file_name))
                .map_err(|e| AppError::Internal(format!("Cabecera inválida: {}", e)))?;
            Ok((
                [
                    (header::CONTENT_TYPE, HeaderValue::from_static("application/pdf")),
                    (header::CONTENT_DISPOSITION, disposition),
                ],
                bytes,
            )
                .into_response())
        }
    }
}
