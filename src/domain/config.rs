//! Application configuration.
//!
//! Loaded from `config.toml` in the data directory when present; every
//! field has a default so a missing file means a fully default config.
//! The API key is never stored in the file, only read from the
//! `GEMINI_API_KEY` environment variable.

use std::path::Path;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::domain::AppError;

/// Top-level configuration record.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AppConfig {
    /// Model endpoint configuration.
    #[serde(default)]
    pub model: ModelApiConfig,
}

impl AppConfig {
    /// Parse a TOML document.
    pub fn from_toml_str(raw: &str) -> Result<Self, AppError> {
        let config: AppConfig = toml::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Load `config.toml` from the data directory, or defaults when absent.
    pub fn load_or_default(data_dir: &Path) -> Result<Self, AppError> {
        let path = data_dir.join("config.toml");
        if !path.exists() {
            return Ok(Self::default());
        }
        let raw = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&raw)
    }

    pub fn validate(&self) -> Result<(), AppError> {
        self.model.validate()
    }
}

/// Generative model API configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ModelApiConfig {
    /// Base URL of the generative API.
    #[serde(default = "default_api_base_url")]
    pub api_base_url: Url,
    /// Model used for structured text flows.
    #[serde(default = "default_text_model")]
    pub text_model: String,
    /// Model used for image generation.
    #[serde(default = "default_image_model")]
    pub image_model: String,
    /// Request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
    /// Maximum retry attempts for retryable failures.
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,
    /// Base delay between retries in milliseconds.
    #[serde(default = "default_retry_delay_ms")]
    pub retry_delay_ms: u64,
}

impl Default for ModelApiConfig {
    fn default() -> Self {
        Self {
            api_base_url: default_api_base_url(),
            text_model: default_text_model(),
            image_model: default_image_model(),
            timeout_secs: default_timeout(),
            max_retries: default_max_retries(),
            retry_delay_ms: default_retry_delay_ms(),
        }
    }
}

impl ModelApiConfig {
    pub fn validate(&self) -> Result<(), AppError> {
        if self.timeout_secs == 0 {
            return Err(AppError::InvalidConfig("timeout_secs must be greater than 0".to_string()));
        }
        if self.max_retries == 0 {
            return Err(AppError::InvalidConfig("max_retries must be greater than 0".to_string()));
        }
        if self.retry_delay_ms == 0 {
            return Err(AppError::InvalidConfig(
                "retry_delay_ms must be greater than 0".to_string(),
            ));
        }
        if self.text_model.trim().is_empty() {
            return Err(AppError::InvalidConfig("text_model must not be blank".to_string()));
        }
        if self.image_model.trim().is_empty() {
            return Err(AppError::InvalidConfig("image_model must not be blank".to_string()));
        }
        Ok(())
    }
}

fn default_api_base_url() -> Url {
    Url::parse("https://generativelanguage.googleapis.com/v1beta")
        .expect("Default API URL must be valid")
}

fn default_text_model() -> String {
    "gemini-1.5-flash-latest".to_string()
}

fn default_image_model() -> String {
    "gemini-2.0-flash-preview-image-generation".to_string()
}

fn default_timeout() -> u64 {
    60
}

fn default_max_retries() -> u32 {
    3
}

fn default_retry_delay_ms() -> u64 {
    500
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_yields_defaults() {
        let config = AppConfig::from_toml_str("").unwrap();
        assert_eq!(config.model.text_model, "gemini-1.5-flash-latest");
        assert_eq!(config.model.timeout_secs, 60);
    }

    #[test]
    fn partial_model_section_keeps_other_defaults() {
        let config = AppConfig::from_toml_str("[model]\ntimeout_secs = 10\n").unwrap();
        assert_eq!(config.model.timeout_secs, 10);
        assert_eq!(config.model.max_retries, 3);
    }

    #[test]
    fn zero_timeout_is_rejected() {
        let err = AppConfig::from_toml_str("[model]\ntimeout_secs = 0\n").unwrap_err();
        assert!(matches!(err, AppError::InvalidConfig(_)));
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let err = AppConfig::from_toml_str("[model]\napi_key = \"secret\"\n").unwrap_err();
        assert!(matches!(err, AppError::TomlParseError(_)));
    }
}
