use axum::{
    extract::{rejection::JsonRejection, State},
    middleware::from_fn_with_state,
    routing::{get, post},
    Extension, Json, Router,
};

use crate::controllers::auth_controller::AuthController;
use crate::dto::auth_dto::{LoginRequest, LoginResponse, ProfileResponse};
use crate::middleware::require_admin;
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::utils::jwt::JwtClaims;

pub fn create_auth_router(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/login", post(login))
        .route(
            "/profile",
            get(profile).route_layer(from_fn_with_state(state, require_admin)),
        )
}

async fn login(
    State(state): State<AppState>,
    request: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<Json<LoginResponse>, AppError> {
    let Json(request) = request?;
    let controller = AuthController::new(&state);
    Ok(Json(controller.login(request).await?))
}

async fn profile(Extension(claims): Extension<JwtClaims>) -> Json<ProfileResponse> {
    Json(ProfileResponse { user: claims })
}
