use std::sync::Arc;

use tracing::{info, warn};
use validator::Validate;

use crate::config::environment::EnvironmentConfig;
use crate::dto::auth_dto::{AdminUser, LoginRequest, LoginResponse};
use crate::state::AppState;
use crate::utils::errors::{AppError, AppResult};
use crate::utils::jwt::{generate_token, JwtConfig, ADMIN_ROLE};

pub struct AuthController {
    config: Arc<EnvironmentConfig>,
}

impl AuthController {
    pub fn new(state: &AppState) -> Self {
        Self {
            config: state.config.clone(),
        }
    }

    /// Validar credenciales del administrador y emitir un token
    pub async fn login(&self, request: LoginRequest) -> AppResult<LoginResponse> {
        request.validate()?;

        let admin = &self.config.admin;
        let password_hash = admin.password_hash.clone();
        let LoginRequest { username, password } = request;

        let password_matches = tokio::task::spawn_blocking(move || bcrypt::verify(password, &password_hash))
            .await
            .map_err(|e| AppError::Internal(format!("Error verificando credenciales: {}", e)))?
            .map_err(|e| AppError::Hash(e.to_string()))?;

        if username != admin.username || !password_matches {
            warn!("🔒 Login fallido para '{}'", username);
            return Err(AppError::Unauthorized("Invalid credentials".to_string()));
        }

        let token = generate_token(&username, ADMIN_ROLE, &JwtConfig::from(self.config.as_ref()))?;
        info!("🔑 Login de administrador: {}", username);

        Ok(LoginResponse {
            token,
            user: AdminUser {
                username,
                role: ADMIN_ROLE.to_string(),
            },
        })
    }
}
