//! Configuración del generador de exposés (texto generado + PDF)

use std::time::Duration;

use super::environment::{optional_var, parse_var, var_or, ConfigError};

pub const DEFAULT_ANTHROPIC_API_URL: &str = "https://api.anthropic.com/v1/messages";
pub const DEFAULT_ANTHROPIC_MODEL: &str = "claude-3-5-sonnet-latest";

#[derive(Clone)]
pub struct ExposeConfig {
    pub anthropic_api_key: Option<String>,
    pub anthropic_model: String,
    pub anthropic_api_url: String,
    pub text_generation_timeout: Duration,
    pub chromium_path: String,
    pub pdf_timeout: Duration,
    pub logo_url: String,
    pub dealer_name: String,
    pub dealer_phone: String,
    pub dealer_email: String,
    pub dealer_address: String,
}

impl std::fmt::Debug for ExposeConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExposeConfig")
            .field("anthropic_api_key", &self.anthropic_api_key.as_ref().map(|_| "***"))
            .field("anthropic_model", &self.anthropic_model)
            .field("chromium_path", &self.chromium_path)
            .field("dealer_name", &self.dealer_name)
            .finish()
    }
}

impl Default for ExposeConfig {
    fn default() -> Self {
        Self {
            anthropic_api_key: None,
            anthropic_model: DEFAULT_ANTHROPIC_MODEL.to_string(),
            anthropic_api_url: DEFAULT_ANTHROPIC_API_URL.to_string(),
            text_generation_timeout: Duration::from_secs(60),
            chromium_path: "chromium".to_string(),
            pdf_timeout: Duration::from_secs(60),
            logo_url: "https://kfz-abaci.de/wp-content/uploads/2023/11/Logo-KFZ-Abaci.png".to_string(),
            dealer_name: "KFZ Abaci".to_string(),
            dealer_phone: "+49 151 23456789".to_string(),
            dealer_email: "info@kfz-abaci.de".to_string(),
            dealer_address: "Musterstraße 123, 45678 Gelsenkirchen".to_string(),
        }
    }
}

impl ExposeConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();
        Ok(Self {
            anthropic_api_key: optional_var("ANTHROPIC_API_KEY"),
            anthropic_model: var_or("ANTHROPIC_MODEL", &defaults.anthropic_model),
            anthropic_api_url: var_or("ANTHROPIC_API_URL", &defaults.anthropic_api_url),
            text_generation_timeout: Duration::from_secs(parse_var(
                "TEXT_GENERATION_TIMEOUT_SECS",
                defaults.text_generation_timeout.as_secs(),
            )?),
            chromium_path: var_or("CHROMIUM_PATH", &defaults.chromium_path),
            pdf_timeout: Duration::from_secs(parse_var(
                "PDF_TIMEOUT_SECS",
                defaults.pdf_timeout.as_secs(),
            )?),
            logo_url: var_or("EXPOSE_LOGO_URL", &defaults.logo_url),
            dealer_name: var_or("DEALER_NAME", &defaults.dealer_name),
            dealer_phone: var_or("DEALER_PHONE", &defaults.dealer_phone),
            dealer_email: var_or("DEALER_EMAIL", &defaults.dealer_email),
            dealer_address: var_or("DEALER_ADDRESS", &defaults.dealer_address),
        })
    }
}
