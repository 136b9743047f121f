//! Configuración del almacenamiento de objetos (S3)

use std::time::Duration;

use super::environment::{optional_var, parse_var, var_or, ConfigError};

#[derive(Debug, Clone)]
pub struct StorageConfig {
    pub region: String,
    pub bucket: String,
    /// Prefijo opcional de las claves, sin barra final
    pub folder: Option<String>,
    /// Endpoint alternativo (MinIO, LocalStack)
    pub endpoint_url: Option<String>,
    /// Base pública de las URLs; por defecto la URL virtual-host de AWS
    pub public_base_url: Option<String>,
    pub force_path_style: bool,
    pub operation_timeout: Duration,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            region: "eu-central-1".to_string(),
            bucket: "dealership-vehicle-images".to_string(),
            folder: None,
            endpoint_url: None,
            public_base_url: None,
            force_path_style: false,
            operation_timeout: Duration::from_secs(30),
        }
    }
}

impl StorageConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();
        Ok(Self {
            region: var_or("AWS_REGION", &defaults.region),
            bucket: var_or("S3_BUCKET_NAME", &defaults.bucket),
            folder: optional_var("S3_BUCKET_FOLDER")
                .map(|f| f.trim_matches('/').to_string())
                .filter(|f| !f.is_empty()),
            endpoint_url: optional_var("S3_ENDPOINT_URL"),
            public_base_url: optional_var("S3_PUBLIC_BASE_URL"),
            force_path_style: parse_var("S3_FORCE_PATH_STYLE", defaults.force_path_style)?,
            operation_timeout: Duration::from_secs(parse_var(
                "S3_TIMEOUT_SECS",
                defaults.operation_timeout.as_secs(),
            )?),
        })
    }

    /// URL pública de un objeto ya subido
    pub fn public_url(&self, key: &str) -> String {
        match &self.public_base_url {
            Some(base) => format!("{}/{}", base.trim_end_matches('/'), key),
            None => format!("https://{}.s3.{}.amazonaws.com/{}", self.bucket, self.region, key),
        }
    }
}
