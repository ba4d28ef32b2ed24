//! Configuration error types

use thiserror::Error;

/// Errors that can occur during configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading failed: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Validation failed: {0}")]
    ValidationFailed(#[from] ValidationError),
}

/// Errors that can occur during configuration validation
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Required configuration missing: {0}")]
    MissingRequired(&'static str),

    #[error("Invalid request timeout")]
    InvalidTimeout,

    #[error("Invalid AI base URL format")]
    InvalidBaseUrl,

    #[error("Temperature must be between 0 and 2")]
    InvalidTemperature,

    #[error("Max tokens must be greater than zero")]
    InvalidMaxTokens,

    #[error("Concurrency must be between 1 and 32")]
    InvalidConcurrency,

    #[error("Top N must be greater than zero")]
    InvalidTopN,

    #[error("Invalid ROI assumption: {0}")]
    InvalidRoiAssumption(&'static str),

    #[error("Invalid log filter directive")]
    InvalidLogFilter,
}
