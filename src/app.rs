//! Construcción del router de la aplicación
//!
//! Usado por `main` y por los tests de integración.

use axum::{
    error_handling::HandleErrorLayer,
    extract::DefaultBodyLimit,
    middleware::from_fn_with_state,
    response::{IntoResponse, Response},
    BoxError, Router,
};
use tower::{timeout::TimeoutLayer, ServiceBuilder};
use tower_http::{compression::CompressionLayer, trace::TraceLayer};

use crate::{
    middleware::{cors_layer, strip_error_details},
    routes::create_api_router,
    state::AppState,
    utils::errors::AppError,
};

pub fn create_router(state: AppState) -> Router {
    let config = state.config.clone();

    Router::new()
        .nest("/api", create_api_router(state.clone()))
        .layer(DefaultBodyLimit::max(config.max_upload_bytes))
        .layer(
            ServiceBuilder::new()
                .layer(HandleErrorLayer::new(handle_middleware_error))
                .layer(TimeoutLayer::new(config.request_timeout)),
        )
        .layer(from_fn_with_state(state.clone(), strip_error_details))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(&config))
        .with_state(state)
}

async fn handle_middleware_error(err: BoxError) -> Response {
    if err.is::<tower::timeout::error::Elapsed>() {
        AppError::Timeout.into_response()
    } else {
        AppError::Internal(err.to_string()).into_response()
    }
}
