//! Shared application state
//!
//! Este módulo define el estado compartido de la aplicación que se pasa
//! a través del router de Axum. Se construye una sola vez al arrancar.

use std::sync::Arc;

use sqlx::PgPool;

use crate::config::environment::EnvironmentConfig;
use crate::services::expose_service::ExposeService;
use crate::services::pdf_service::ChromiumPdfRenderer;
use crate::services::storage_service::{S3Storage, SharedStorage};
use crate::services::text_generation_service::text_generator_from_config;
use crate::utils::errors::AppResult;

#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub config: Arc<EnvironmentConfig>,
    pub storage: SharedStorage,
    pub expose: Arc<ExposeService>,
}

impl AppState {
    pub fn new(
        pool: PgPool,
        config: EnvironmentConfig,
        storage: SharedStorage,
        expose: ExposeService,
    ) -> Self {
        Self {
            pool,
            config: Arc::new(config),
            storage,
            expose: Arc::new(expose),
        }
    }

    /// Estado con los colaboradores reales (S3, Anthropic, Chromium)
    pub async fn from_config(pool: PgPool, config: EnvironmentConfig) -> AppResult<Self> {
        let storage: SharedStorage = Arc::new(S3Storage::new(&config.storage).await);
        let expose = ExposeService::new(
            text_generator_from_config(&config.expose)?,
            Arc::new(ChromiumPdfRenderer::new(&config.expose)),
            config.expose.clone(),
        );
        Ok(Self::new(pool, config, storage, expose))
    }
}
