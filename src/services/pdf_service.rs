//! Conversión de HTML a PDF
//!
//! Usa Chromium headless como subproceso con `--print-to-pdf`. Los archivos
//! temporales se borran en todos los caminos de salida.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::process::Command;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::config::expose::ExposeConfig;
use crate::utils::errors::{AppError, AppResult};

#[async_trait]
pub trait PdfRenderer: Send + Sync {
    async fn render(&self, html: &str) -> AppResult<Vec<u8>>;
}

pub type SharedPdfRenderer = Arc<dyn PdfRenderer>;

pub struct ChromiumPdfRenderer {
    chromium_path: String,
    timeout: Duration,
}

impl ChromiumPdfRenderer {
    pub fn new(config: &ExposeConfig) -> Self {
        Self {
            chromium_path: config.chromium_path.clone(),
            timeout: config.pdf_timeout,
        }
    }

    async fn render_in(&self, work_dir: &Path, html: &str) -> AppResult<Vec<u8>> {
        let input = work_dir.join("expose.html");
        let output = work_dir.join("expose.pdf");

        tokio::fs::write(&input, html)
            .await
            .map_err(|e| AppError::Internal(format!("Error escribiendo HTML temporal: {}", e)))?;

        let run = Command::new(&self.chromium_path)
            .arg("--headless=new")
            .arg("--no-sandbox")
            .arg("--disable-gpu")
            .arg("--no-pdf-header-footer")
            .arg("--virtual-time-budget=10000")
            .arg(format!("--print-to-pdf={}", output.display()))
            .arg(format!("file://{}", input.display()))
            .kill_on_drop(true)
            .output();

        let result = tokio::time::timeout(self.timeout, run)
            .await
            .map_err(|_| AppError::ExternalApi("Timeout generando el PDF".to_string()))?
            .map_err(|e| {
                AppError::ExternalApi(format!("No se pudo ejecutar '{}': {}", self.chromium_path, e))
            })?;

        if !result.status.success() {
            return Err(AppError::ExternalApi(format!(
                "Chromium terminó con {}: {}",
                result.status,
                String::from_utf8_lossy(&result.stderr).trim()
            )));
        }

        tokio::fs::read(&output)
            .await
            .map_err(|e| AppError::ExternalApi(format!("PDF no generado: {}", e)))
    }
}

/// Directorio de trabajo que se borra al soltarse, también si el futuro se cancela
struct WorkDir {
    path: PathBuf,
}

impl WorkDir {
    async fn create() -> AppResult<Self> {
        let path = std::env::temp_dir().join(format!("expose-{}", Uuid::new_v4()));
        tokio::fs::create_dir_all(&path)
            .await
            .map_err(|e| AppError::Internal(format!("Error creando directorio temporal: {}", e)))?;
        Ok(Self { path })
    }

    fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for WorkDir {
    fn drop(&mut self) {
        if let Err(e) = std::fs::remove_dir_all(&self.path) {
            warn!("⚠️ No se pudo borrar {}: {}", self.path.display(), e);
        }
    }
}

#[async_trait]
impl PdfRenderer for ChromiumPdfRenderer {
    async fn render(&self, html: &str) -> AppResult<Vec<u8>> {
        let work_dir = WorkDir::create().await?;
        let pdf = self.render_in(work_dir.path(), html).await?;
        debug!("📄 PDF generado: {} bytes", pdf.len());
        Ok(pdf)
    }
}
