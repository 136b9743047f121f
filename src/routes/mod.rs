//! Rutas de la API
//!
//! Todas las rutas cuelgan de `/api`.

pub mod auth_routes;
pub mod customer_form_routes;
pub mod health_routes;
pub mod vehicle_routes;

use axum::Router;

use crate::state::AppState;

pub fn create_api_router(state: AppState) -> Router<AppState> {
    Router::new()
        .nest("/vehicles", vehicle_routes::create_vehicle_router(state.clone()))
        .nest("/customer-forms", customer_form_routes::create_customer_form_router())
        .nest("/admin", auth_routes::create_auth_router(state))
        .nest("/health", health_routes::create_health_router())
}
