use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use serde_json::{json, Value};

use crate::database::connection::ping;
use crate::state::AppState;

pub fn create_health_router() -> Router<AppState> {
    Router::new().route("/", get(health))
}

/// Round trip a la base de datos
async fn health(State(state): State<AppState>) -> (StatusCode, Json<Value>) {
    match ping(&state.pool).await {
        Ok(time) => (StatusCode::OK, Json(json!({ "success": true, "time": time }))),
        Err(e) => {
            tracing::error!("❌ Health check fallido: {}", e);
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({ "success": false, "error": "Database unavailable" })),
            )
        }
    }
}
