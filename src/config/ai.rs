//! AI provider configuration

use secrecy::{ExposeSecret, Secret};
use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;

/// Reasoning service configuration (OpenRouter)
#[derive(Debug, Clone, Deserialize)]
pub struct AiConfig {
    /// OpenRouter API key. Without it the recommendation stage is skipped.
    pub openrouter_api_key: Option<Secret<String>>,

    /// Model slug
    #[serde(default = "default_model")]
    pub model: String,

    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Sent as `HTTP-Referer`
    #[serde(default = "default_referer")]
    pub referer: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    #[serde(default = "default_temperature")]
    pub temperature: f32,

    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,

    /// Maximum provider calls in flight
    #[serde(default = "default_concurrency")]
    pub concurrency: usize,

    /// How many top risks get a recommendation
    #[serde(default = "default_max_components")]
    pub max_components: usize,
}

impl AiConfig {
    /// Get timeout as Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// The API key, if one is configured and non-blank.
    pub fn api_key(&self) -> Option<&Secret<String>> {
        self.openrouter_api_key
            .as_ref()
            .filter(|key| !key.expose_secret().trim().is_empty())
    }

    /// Check if the recommendation stage can run
    pub fn is_enabled(&self) -> bool {
        self.api_key().is_some()
    }

    /// Validate AI configuration
    ///
    /// A missing key is not an error; it disables recommendations.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.timeout_secs == 0 || self.timeout_secs > 300 {
            return Err(ValidationError::InvalidTimeout);
        }
        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            return Err(ValidationError::InvalidBaseUrl);
        }
        if !self.temperature.is_finite() || !(0.0..=2.0).contains(&self.temperature) {
            return Err(ValidationError::InvalidTemperature);
        }
        if self.max_tokens == 0 {
            return Err(ValidationError::InvalidMaxTokens);
        }
        if self.concurrency == 0 || self.concurrency > 32 {
            return Err(ValidationError::InvalidConcurrency);
        }
        Ok(())
    }
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            openrouter_api_key: None,
            model: default_model(),
            base_url: default_base_url(),
            referer: default_referer(),
            timeout_secs: default_timeout(),
            temperature: default_temperature(),
            max_tokens: default_max_tokens(),
            concurrency: default_concurrency(),
            max_components: default_max_components(),
        }
    }
}

fn default_model() -> String {
    "openai/gpt-4o-mini".to_string()
}

fn default_base_url() -> String {
    "https://openrouter.ai/api/v1".to_string()
}

fn default_referer() -> String {
    "https://sky-guard.example.com".to_string()
}

fn default_timeout() -> u64 {
    30
}

fn default_temperature() -> f32 {
    0.3
}

fn default_max_tokens() -> u32 {
    1000
}

fn default_concurrency() -> usize {
    4
}

fn default_max_components() -> usize {
    5
}
