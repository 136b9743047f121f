//! Servicio de almacenamiento de objetos
//!
//! Sube los blobs de imágenes y devuelve su URL pública. La base de datos
//! es la referencia de qué claves están vivas.

use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use aws_config::BehaviorVersion;
use aws_sdk_s3::config::Builder as S3ConfigBuilder;
use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::Client as S3Client;
use axum::body::Bytes;
use chrono::Utc;
use rand::Rng;
use tracing::{debug, info};

use crate::config::storage::StorageConfig;
use crate::utils::errors::{AppError, AppResult};

#[async_trait]
pub trait ObjectStorage: Send + Sync {
    /// Guardar el objeto bajo `key` y devolver su URL pública
    async fn put_object(&self, key: &str, bytes: Bytes, content_type: &str) -> AppResult<String>;

    /// Carpeta opcional donde se generan las claves
    fn folder(&self) -> Option<&str> {
        None
    }
}

pub type SharedStorage = Arc<dyn ObjectStorage>;

/// Clave resistente a colisiones: `{carpeta/}{unix_millis}-{aleatorio}.{ext}`
pub fn generate_object_key(folder: Option<&str>, original_filename: &str) -> String {
    let suffix: u32 = rand::thread_rng().gen_range(0..1_000_000_000);
    let file_name = format!(
        "{}-{}.{}",
        Utc::now().timestamp_millis(),
        suffix,
        file_extension(original_filename)
    );

    match folder.map(|f| f.trim_matches('/')).filter(|f| !f.is_empty()) {
        Some(folder) => format!("{}/{}", folder, file_name),
        None => file_name,
    }
}

fn file_extension(original_filename: &str) -> String {
    Path::new(original_filename)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| {
            ext.chars()
                .filter(char::is_ascii_alphanumeric)
                .collect::<String>()
                .to_ascii_lowercase()
        })
        .filter(|ext| !ext.is_empty())
        .unwrap_or_else(|| "bin".to_string())
}

/// Almacenamiento en S3 (o compatible, p. ej. MinIO)
pub struct S3Storage {
    client: S3Client,
    config: StorageConfig,
}

impl S3Storage {
    pub async fn new(config: &StorageConfig) -> Self {
        let aws_config = aws_config::defaults(BehaviorVersion::latest())
            .region(aws_config::Region::new(config.region.clone()))
            .load()
            .await;

        let mut builder = S3ConfigBuilder::from(&aws_config);
        if let Some(endpoint_url) = &config.endpoint_url {
            builder = builder.endpoint_url(endpoint_url);
        }
        if config.force_path_style {
            builder = builder.force_path_style(true);
        }

        info!(
            "🪣 Almacenamiento S3 configurado: bucket={} region={}",
            config.bucket, config.region
        );

        Self {
            client: S3Client::from_conf(builder.build()),
            config: config.clone(),
        }
    }
}

#[async_trait]
impl ObjectStorage for S3Storage {
    async fn put_object(&self, key: &str, bytes: Bytes, content_type: &str) -> AppResult<String> {
        let size = bytes.len();
        let request = self
            .client
            .put_object()
            .bucket(&self.config.bucket)
            .key(key)
            .body(ByteStream::from(bytes))
            .content_type(content_type)
            .send();

        tokio::time::timeout(self.config.operation_timeout, request)
            .await
            .map_err(|_| AppError::Storage(format!("Timeout subiendo '{}'", key)))?
            .map_err(|e| AppError::Storage(format!("Error subiendo '{}': {}", key, e)))?;

        debug!("📤 Objeto subido: {} ({} bytes)", key, size);
        Ok(self.config.public_url(key))
    }

    fn folder(&self) -> Option<&str> {
        self.config.folder.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_keeps_lowercased_extension() {
        let key = generate_object_key(None, "Foto Front.JPG");
        assert!(key.ends_with(".jpg"));
        let (stamp, rest) = key.split_once('-').unwrap();
        assert!(stamp.parse::<i64>().is_ok());
        assert!(rest.trim_end_matches(".jpg").parse::<u32>().unwrap() < 1_000_000_000);
    }

    #[test]
    fn test_key_uses_folder_prefix() {
        let key = generate_object_key(Some("/vehicles/"), "a.png");
        assert!(key.starts_with("vehicles/"));
        assert!(key.ends_with(".png"));
    }

    #[test]
    fn test_key_without_extension() {
        assert!(generate_object_key(None, "scan").ends_with(".bin"));
        assert!(generate_object_key(Some(""), "bad.$$").ends_with(".bin"));
        assert!(!generate_object_key(Some(""), "x.jpg").starts_with('/'));
    }

    #[test]
    fn test_keys_do_not_collide() {
        let keys: std::collections::HashSet<String> =
            (0..50).map(|_| generate_object_key(None, "a.jpg")).collect();
        assert!(keys.len() > 45);
    }
}
