//! AI Provider Adapters.
//!
//! Implementations of the AIProvider port.
//!
//! ## Available Adapters
//!
//! - `MockAIProvider` - Configurable mock for testing
//! - `OpenRouterProvider` - OpenRouter chat completions (OpenAI-compatible)

mod mock_provider;
mod openrouter_provider;

pub use mock_provider::{MockAIProvider, MockError, MockResponse, DEFAULT_MOCK_CONTENT};
pub use openrouter_provider::{
    OpenRouterConfig, OpenRouterProvider, DEFAULT_BASE_URL, DEFAULT_REFERER,
};
