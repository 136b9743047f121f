//! Sistema de manejo de errores
//!
//! Este módulo define todos los tipos de errores del sistema
//! y su conversión a respuestas HTTP apropiadas.

use axum::{
    extract::{multipart::MultipartRejection, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::json;
use thiserror::Error;

/// Errores principales de la aplicación
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),

    #[error("Missing required fields: {}", .0.join(", "))]
    MissingFields(Vec<String>),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Request timeout")]
    Timeout,

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("External API error: {0}")]
    ExternalApi(String),

    #[error("JWT error: {0}")]
    Jwt(String),

    #[error("Hash error: {0}")]
    Hash(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

/// Respuesta de error para la API
///
/// Se adjunta también como extensión de la respuesta para que el middleware
/// de producción pueda eliminar `details`.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub missing_fields: Option<Vec<String>>,
}

impl ErrorResponse {
    fn new(error: &str, message: impl Into<String>, code: &str) -> Self {
        Self {
            error: error.to_string(),
            message: message.into(),
            details: None,
            code: Some(code.to_string()),
            missing_fields: None,
        }
    }

    fn with_details(mut self, details: serde_json::Value) -> Self {
        self.details = Some(details);
        self
    }

    /// Copia sin información de depuración
    pub fn without_details(&self) -> Self {
        Self {
            details: None,
            ..self.clone()
        }
    }
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Database(_) | AppError::Hash(_) | AppError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            AppError::Validation(_) | AppError::MissingFields(_) | AppError::BadRequest(_) => {
                StatusCode::BAD_REQUEST
            }
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::Forbidden(_) | AppError::Jwt(_) => StatusCode::FORBIDDEN,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Timeout => StatusCode::REQUEST_TIMEOUT,
            AppError::Storage(_) | AppError::ExternalApi(_) => StatusCode::BAD_GATEWAY,
        }
    }

    fn to_error_response(&self) -> ErrorResponse {
        match self {
            AppError::Database(e) => ErrorResponse::new(
                "Database Error",
                "An error occurred while accessing the database",
                "DB_ERROR",
            )
            .with_details(json!({ "sql_error": e.to_string() })),

            AppError::Validation(e) => ErrorResponse::new(
                "Validation Error",
                "The provided data is invalid",
                "VALIDATION_ERROR",
            )
            .with_details(json!(e)),

            AppError::MissingFields(fields) => ErrorResponse {
                missing_fields: Some(fields.clone()),
                ..ErrorResponse::new(
                    "Validation Error",
                    format!("Missing required fields: {}", fields.join(", ")),
                    "MISSING_FIELDS",
                )
            },

            AppError::Unauthorized(msg) => ErrorResponse::new("Unauthorized", msg.as_str(), "UNAUTHORIZED"),

            AppError::Forbidden(msg) => ErrorResponse::new("Forbidden", msg.as_str(), "FORBIDDEN"),

            AppError::Jwt(msg) => ErrorResponse::new(
                "JWT Error",
                "Token inválido o expirado",
                "JWT_ERROR",
            )
            .with_details(json!({ "jwt_error": msg })),

            AppError::NotFound(msg) => ErrorResponse::new("Not Found", msg.as_str(), "NOT_FOUND"),

            AppError::BadRequest(msg) => ErrorResponse::new("Bad Request", msg.as_str(), "BAD_REQUEST"),

            AppError::Timeout => ErrorResponse::new(
                "Request Timeout",
                "The request took too long to complete",
                "TIMEOUT",
            ),

            AppError::Storage(msg) => ErrorResponse::new(
                "Storage Error",
                "An error occurred while storing uploaded files",
                "STORAGE_ERROR",
            )
            .with_details(json!({ "storage_error": msg })),

            AppError::ExternalApi(msg) => ErrorResponse::new(
                "External API Error",
                "An error occurred while communicating with external service",
                "EXTERNAL_API_ERROR",
            )
            .with_details(json!({ "external_api_error": msg })),

            AppError::Hash(msg) => ErrorResponse::new(
                "Hash Error",
                "An error occurred while processing credentials",
                "HASH_ERROR",
            )
            .with_details(json!({ "hash_error": msg })),

            AppError::Internal(msg) => ErrorResponse::new(
                "Internal Server Error",
                "An unexpected error occurred",
                "INTERNAL_ERROR",
            )
            .with_details(json!({ "internal_error": msg })),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!("❌ {}", self);
        } else {
            tracing::warn!("⚠️ {}", self);
        }

        let body = self.to_error_response();
        let mut response = (status, Json(body.clone())).into_response();
        response.extensions_mut().insert(body);
        response
    }
}

/// Cuerpo JSON ilegible o con campos que faltan: 400 estructurado, no 422 en texto plano
impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        bad_request_error(&rejection.body_text())
    }
}

impl From<MultipartRejection> for AppError {
    fn from(rejection: MultipartRejection) -> Self {
        bad_request_error(&rejection.body_text())
    }
}

/// Resultado tipado para operaciones que pueden fallar
pub type AppResult<T> = Result<T, AppError>;

/// Función helper para crear errores de recurso no encontrado
pub fn not_found_error(resource: &str, id: &str) -> AppError {
    AppError::NotFound(format!("{} with id '{}' not found", resource, id))
}

/// Función helper para crear errores de solicitud incorrecta
pub fn bad_request_error(message: &str) -> AppError {
    AppError::BadRequest(message.to_string())
}
