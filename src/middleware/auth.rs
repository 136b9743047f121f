//! Middleware de autenticación JWT
//!
//! Protege las rutas de administración: sin cabecera `Authorization: Bearer`
//! responde 401, con un token inválido o expirado responde 403. Los claims
//! verificados se inyectan en las extensiones de la request.

use axum::{
    extract::{Request, State},
    http::header,
    middleware::Next,
    response::Response,
};

use crate::{
    state::AppState,
    utils::{
        errors::AppError,
        jwt::{extract_token_from_header, verify_token, JwtConfig, ADMIN_ROLE},
    },
};

pub async fn require_admin(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let auth_header = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .ok_or_else(|| AppError::Unauthorized("Token de autorización requerido".to_string()))?;

    let token = extract_token_from_header(auth_header)?;
    let claims = verify_token(token, &JwtConfig::from(state.config.as_ref()))?;

    if claims.role != ADMIN_ROLE {
        return Err(AppError::Forbidden("Se requiere rol de administrador".to_string()));
    }

    tracing::debug!("🔐 Request autenticada: {}", claims.username);
    request.extensions_mut().insert(claims);
    Ok(next.run(request).await)
}
