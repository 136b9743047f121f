use axum::{
    extract::{multipart::MultipartRejection, rejection::JsonRejection, Multipart, Path, State},
    http::StatusCode,
    routing::{get, put},
    Json, Router,
};

use crate::controllers::customer_form_controller::CustomerFormController;
use crate::dto::customer_form_dto::{
    CreateCustomerFormResponse, CustomerFormSubmission, UpdateStatusRequest, UpdateStatusResponse,
};
use crate::models::CustomerFormRecord;
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::utils::multipart::MultipartForm;
use crate::utils::validation::parse_resource_id;

pub fn create_customer_form_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_forms).post(create_form))
        .route("/:id", get(get_form))
        .route("/:id/status", put(update_status))
}

async fn list_forms(State(state): State<AppState>) -> Result<Json<Vec<CustomerFormRecord>>, AppError> {
    let controller = CustomerFormController::new(&state);
    Ok(Json(controller.list().await?))
}

async fn get_form(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<CustomerFormRecord>, AppError> {
    let id = parse_resource_id("Customer form", &id)?;
    let controller = CustomerFormController::new(&state);
    Ok(Json(controller.get_by_id(id).await?))
}

async fn create_form(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<(StatusCode, Json<CreateCustomerFormResponse>), AppError> {
    let form = MultipartForm::read(multipart?, state.config.max_upload_images).await?;
    let submission = CustomerFormSubmission::from_multipart(form)?;
    let controller = CustomerFormController::new(&state);
    let response = controller.create(submission).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

async fn update_status(
    State(state): State<AppState>,
    Path(id): Path<String>,
    request: Result<Json<UpdateStatusRequest>, JsonRejection>,
) -> Result<Json<UpdateStatusResponse>, AppError> {
    let id = parse_resource_id("Customer form", &id)?;
    let Json(request) = request?;
    let controller = CustomerFormController::new(&state);
    Ok(Json(controller.update_status(id, request).await?))
}
