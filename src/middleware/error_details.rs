//! Eliminación de detalles de error en producción
//!
//! Las respuestas de error llevan su `ErrorResponse` como extensión; en
//! producción el cuerpo se vuelve a serializar sin `details`.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};

use crate::{state::AppState, utils::errors::ErrorResponse};

pub async fn strip_error_details(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    let response = next.run(request).await;
    if !state.config.is_production() {
        return response;
    }

    let public = response
        .extensions()
        .get::<ErrorResponse>()
        .filter(|body| body.details.is_some())
        .map(ErrorResponse::without_details);
    let Some(public) = public else {
        return response;
    };

    let (mut parts, _) = response.into_parts();
    parts.headers.remove(axum::http::header::CONTENT_LENGTH);
    (parts, Json(public)).into_response()
}
