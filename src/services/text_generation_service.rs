//! Servicio de generación de texto
//!
//! Cliente de la Messages API de Anthropic usado por el exposé. Sin API key
//! se usa `DisabledTextGenerator`, que siempre falla y activa el texto de
//! respaldo.

use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::config::expose::ExposeConfig;
use crate::utils::errors::{AppError, AppResult};

const ANTHROPIC_VERSION: &str = "2023-06-01";

#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, prompt: &str, max_tokens: u32) -> AppResult<String>;
}

pub type SharedTextGenerator = Arc<dyn TextGenerator>;

#[derive(Debug, Serialize)]
struct MessagesRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    messages: Vec<Message<'a>>,
}

#[derive(Debug, Serialize)]
struct Message<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct MessagesResponse {
    content: Vec<ContentBlock>,
}

#[derive(Debug, Deserialize)]
struct ContentBlock {
    #[serde(rename = "type")]
    content_type: String,
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    error: ApiErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ApiErrorDetail {
    #[serde(rename = "type")]
    error_type: String,
    message: String,
}

/// Generador sobre la Messages API con timeout explícito
pub struct AnthropicTextGenerator {
    client: reqwest::Client,
    api_key: String,
    model: String,
    api_url: String,
}

impl AnthropicTextGenerator {
    pub fn new(config: &ExposeConfig, api_key: impl Into<String>) -> AppResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.text_generation_timeout)
            .build()
            .map_err(|e| AppError::Internal(format!("Error creando cliente HTTP: {}", e)))?;

        Ok(Self {
            client,
            api_key: api_key.into(),
            model: config.anthropic_model.clone(),
            api_url: config.anthropic_api_url.clone(),
        })
    }

    fn parse_error(status: reqwest::StatusCode, body: &str) -> AppError {
        match serde_json::from_str::<ApiErrorBody>(body) {
            Ok(err) => AppError::ExternalApi(format!(
                "Anthropic {} ({}): {}",
                status, err.error.error_type, err.error.message
            )),
            Err(_) => AppError::ExternalApi(format!("Anthropic HTTP {}", status)),
        }
    }
}

#[async_trait]
impl TextGenerator for AnthropicTextGenerator {
    async fn generate(&self, prompt: &str, max_tokens: u32) -> AppResult<String> {
        let body = MessagesRequest {
            model: &self.model,
            max_tokens,
            messages: vec![Message {
                role: "user",
                content: prompt,
            }],
        };

        let response = self
            .client
            .post(&self.api_url)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    AppError::ExternalApi("Timeout en la API de Anthropic".to_string())
                } else {
                    AppError::ExternalApi(format!("Error de red con Anthropic: {}", e))
                }
            })?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| AppError::ExternalApi(format!("Error leyendo respuesta: {}", e)))?;

        if !status.is_success() {
            return Err(Self::parse_error(status, &text));
        }

        let parsed: MessagesResponse = serde_json::from_str(&text)
            .map_err(|e| AppError::ExternalApi(format!("Respuesta de Anthropic inválida: {}", e)))?;

        let output: String = parsed
            .content
            .into_iter()
            .filter(|block| block.content_type == "text")
            .filter_map(|block| block.text)
            .collect();

        log::debug!("🤖 Texto generado: {} caracteres", output.len());
        Ok(output)
    }
}

/// Generador sin API key configurada
pub struct DisabledTextGenerator;

#[async_trait]
impl TextGenerator for DisabledTextGenerator {
    async fn generate(&self, _prompt: &str, _max_tokens: u32) -> AppResult<String> {
        Err(AppError::ExternalApi(
            "ANTHROPIC_API_KEY no configurada".to_string(),
        ))
    }
}

/// Generador según la configuración: Anthropic con API key, si no deshabilitado
pub fn text_generator_from_config(config: &ExposeConfig) -> AppResult<SharedTextGenerator> {
    match &config.anthropic_api_key {
        Some(api_key) => Ok(Arc::new(AnthropicTextGenerator::new(config, api_key.clone())?)),
        None => {
            log::warn!("⚠️ ANTHROPIC_API_KEY no configurada: el exposé usará texto estático");
            Ok(Arc::new(DisabledTextGenerator))
        }
    }
}
