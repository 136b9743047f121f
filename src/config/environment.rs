//! Configuración de variables de entorno
//!
//! Este módulo construye la configuración completa del servicio una sola vez
//! al arrancar. Los handlers reciben la configuración a través de `AppState`
//! y nunca leen variables de entorno por su cuenta.

use std::env;
use std::str::FromStr;
use std::time::Duration;

use thiserror::Error;

use super::database::DatabaseConfig;
use super::expose::ExposeConfig;
use super::storage::StorageConfig;

/// Secreto JWT usado cuando no se configura `JWT_SECRET` (solo desarrollo)
pub const DEFAULT_JWT_SECRET: &str = "dealership-dev-jwt-secret-change-me";
pub const DEFAULT_ADMIN_USERNAME: &str = "root";
pub const DEFAULT_ADMIN_PASSWORD: &str = "123456";
/// Validez máxima de un token: un año
pub const MAX_JWT_EXPIRATION: u64 = 365 * 24 * 60 * 60;

/// Errores al cargar la configuración
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Variable {key} inválida: '{value}'")]
    InvalidValue { key: &'static str, value: String },

    #[error("Error generando hash de la contraseña de administrador: {0}")]
    PasswordHash(#[from] bcrypt::BcryptError),
}

/// Credenciales del administrador. La contraseña solo se guarda como hash bcrypt.
#[derive(Clone)]
pub struct AdminCredentials {
    pub username: String,
    pub password_hash: String,
    pub uses_default_password: bool,
}

impl std::fmt::Debug for AdminCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminCredentials")
            .field("username", &self.username)
            .field("password_hash", &"***")
            .finish()
    }
}

impl AdminCredentials {
    /// Construir credenciales a partir de una contraseña en texto plano
    pub fn from_plain(username: impl Into<String>, password: &str) -> Result<Self, ConfigError> {
        Ok(Self {
            username: username.into(),
            password_hash: bcrypt::hash(password, bcrypt::DEFAULT_COST)?,
            uses_default_password: password == DEFAULT_ADMIN_PASSWORD,
        })
    }
}

/// Configuración del entorno
#[derive(Debug, Clone)]
pub struct EnvironmentConfig {
    pub environment: String,
    pub port: u16,
    pub host: String,
    pub jwt_secret: String,
    pub jwt_expiration: u64,
    pub admin: AdminCredentials,
    pub cors_origins: Vec<String>,
    pub api_base_url: Option<String>,
    pub request_timeout: Duration,
    pub max_upload_images: usize,
    pub max_upload_bytes: usize,
    pub database: DatabaseConfig,
    pub storage: StorageConfig,
    pub expose: ExposeConfig,
}

impl Default for EnvironmentConfig {
    fn default() -> Self {
        Self {
            environment: "development".to_string(),
            port: 3001,
            host: "0.0.0.0".to_string(),
            jwt_secret: DEFAULT_JWT_SECRET.to_string(),
            jwt_expiration: 24 * 60 * 60,
            admin: AdminCredentials {
                username: DEFAULT_ADMIN_USERNAME.to_string(),
                // bcrypt con coste mínimo; se regenera en from_env()
                password_hash: bcrypt::hash(DEFAULT_ADMIN_PASSWORD, 4).unwrap_or_default(),
                uses_default_password: true,
            },
            cors_origins: Vec::new(),
            api_base_url: None,
            request_timeout: Duration::from_secs(60),
            max_upload_images: 10,
            max_upload_bytes: 50 * 1024 * 1024,
            database: DatabaseConfig::default(),
            storage: StorageConfig::default(),
            expose: ExposeConfig::default(),
        }
    }
}

impl EnvironmentConfig {
    /// Cargar la configuración desde las variables de entorno.
    ///
    /// Las variables ausentes conservan el valor por defecto; las presentes
    /// pero mal formadas producen un `ConfigError`.
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let admin_username = var_or("ADMIN_USERNAME", DEFAULT_ADMIN_USERNAME);
        let admin = match env::var("ADMIN_PASSWORD_HASH").ok().filter(|h| !h.trim().is_empty()) {
            Some(hash) => AdminCredentials {
                username: admin_username,
                password_hash: hash,
                uses_default_password: false,
            },
            None => AdminCredentials::from_plain(
                admin_username,
                &var_or("ADMIN_PASSWORD", DEFAULT_ADMIN_PASSWORD),
            )?,
        };

        Ok(Self {
            environment: var_or("ENVIRONMENT", &defaults.environment),
            port: parse_var("PORT", defaults.port)?,
            host: var_or("HOST", &defaults.host),
            jwt_secret: var_or("JWT_SECRET", DEFAULT_JWT_SECRET),
            jwt_expiration: bounded_jwt_expiration(parse_var(
                "JWT_EXPIRATION",
                defaults.jwt_expiration,
            )?)?,
            admin,
            cors_origins: env::var("CORS_ORIGINS")
                .map(|origins| split_list(&origins))
                .unwrap_or_default(),
            api_base_url: optional_var("API_BASE_URL"),
            request_timeout: Duration::from_secs(parse_var(
                "REQUEST_TIMEOUT_SECS",
                defaults.request_timeout.as_secs(),
            )?),
            max_upload_images: parse_var("MAX_UPLOAD_IMAGES", defaults.max_upload_images)?,
            max_upload_bytes: parse_var("MAX_UPLOAD_BYTES", defaults.max_upload_bytes)?,
            database: DatabaseConfig::from_env()?,
            storage: StorageConfig::from_env()?,
            expose: ExposeConfig::from_env()?,
        })
    }

    /// Verificar si estamos en modo desarrollo
    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }

    /// Verificar si estamos en modo producción
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    /// Obtener la URL del servidor
    pub fn server_url(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// URL base usada cuando la request no trae cabecera `Origin`
    pub fn fallback_base_url(&self) -> String {
        self.api_base_url
            .clone()
            .unwrap_or_else(|| format!("http://localhost:{}", self.port))
    }

    /// Avisos sobre valores inseguros por defecto (nunca incluyen los secretos)
    pub fn insecure_defaults(&self) -> Vec<&'static str> {
        let mut warnings = Vec::new();
        if self.jwt_secret == DEFAULT_JWT_SECRET {
            warnings.push("JWT_SECRET no configurado, se usa un secreto de desarrollo");
        }
        if self.admin.uses_default_password {
            warnings.push("Credenciales de administrador por defecto en uso");
        }
        warnings
    }
}

pub(crate) fn var_or(key: &str, default: &str) -> String {
    env::var(key)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| default.to_string())
}

pub(crate) fn optional_var(key: &str) -> Option<String> {
    env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

pub(crate) fn parse_var<T: FromStr>(key: &'static str, default: T) -> Result<T, ConfigError> {
    match optional_var(key) {
        Some(value) => value
            .parse()
            .map_err(|_| ConfigError::InvalidValue { key, value }),
        None => Ok(default),
    }
}

/// `JWT_EXPIRATION` debe estar entre 1 segundo y `MAX_JWT_EXPIRATION`
pub(crate) fn bounded_jwt_expiration(seconds: u64) -> Result<u64, ConfigError> {
    if seconds == 0 || seconds > MAX_JWT_EXPIRATION {
        return Err(ConfigError::InvalidValue {
            key: "JWT_EXPIRATION",
            value: seconds.to_string(),
        });
    }
    Ok(seconds)
}

pub(crate) fn split_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}
