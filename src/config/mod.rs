//! Application configuration module
//!
//! This module provides type-safe configuration loading from environment variables
//! using the `config` and `dotenvy` crates. Configuration is loaded with the
//! `SKY_GUARD` prefix and nested values use double underscores as separators.
//!
//! # Example
//!
//! ```no_run
//! use sky_guard::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("Reading datasets from {}", config.pipeline.data_dir.display());
//! ```

mod ai;
mod error;
mod logging;
mod pipeline;
mod roi;

pub use ai::AiConfig;
pub use error::{ConfigError, ValidationError};
pub use logging::{LogFormat, LoggingConfig};
pub use pipeline::PipelineConfig;
pub use roi::RoiConfig;

use serde::Deserialize;

/// Unprefixed variable also accepted for the OpenRouter key.
pub const OPENROUTER_API_KEY_VAR: &str = "OPENROUTER_API_KEY";

/// Root application configuration
///
/// Every section has defaults, so an empty environment yields a runnable
/// configuration with the recommendation stage disabled.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Reasoning service configuration (OpenRouter)
    #[serde(default)]
    pub ai: AiConfig,

    /// Dataset and report locations
    #[serde(default)]
    pub pipeline: PipelineConfig,

    /// ROI model assumptions
    #[serde(default)]
    pub roi: RoiConfig,

    /// Log format and filter
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `SKY_GUARD` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    /// 4. Deserializes into typed configuration structs
    ///
    /// # Environment Variable Format
    ///
    /// - `SKY_GUARD__PIPELINE__TOP_N=10` -> `pipeline.top_n = 10`
    /// - `SKY_GUARD__AI__OPENROUTER_API_KEY=...` -> `ai.openrouter_api_key = ...`
    ///
    /// `OPENROUTER_API_KEY` is used when the prefixed key is unset.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if values cannot be parsed into expected types.
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if present (development)
        dotenvy::dotenv().ok();

        let mut builder = config::Config::builder();
        if let Ok(key) = std::env::var(OPENROUTER_API_KEY_VAR) {
            builder = builder.set_default("ai.openrouter_api_key", key)?;
        }

        let config = builder
            .add_source(
                config::Environment::default()
                    .prefix("SKY_GUARD")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if any configuration value is invalid.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.ai.validate()?;
        self.pipeline.validate()?;
        self.roi.validate()?;
        self.logging.validate()?;
        Ok(())
    }
}
