//! OpenRouter Provider - Implementation of AIProvider for OpenRouter's
//! OpenAI-compatible chat completions API.
//!
//! # Configuration
//!
//! ```ignore
//! let config = OpenRouterConfig::new(api_key)
//!     .with_model("anthropic/claude-3-haiku")
//!     .with_timeout(Duration::from_secs(30));
//!
//! let provider = OpenRouterProvider::new(config)?;
//! ```
//!
//! Requests are sent once. A failed call surfaces as an [`AIError`] and the
//! caller decides what to do with it.

use async_trait::async_trait;
use reqwest::{header, Client, Response, StatusCode};
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::ports::{
    AIError, AIProvider, CompletionRequest, CompletionResponse, FinishReason, MessageRole,
    ProviderInfo, TokenUsage,
};

pub const DEFAULT_BASE_URL: &str = "https://openrouter.ai/api/v1";
pub const DEFAULT_REFERER: &str = "https://sky-guard.example.com";

/// Retry hint used when a 429 carries no usable `Retry-After` header.
const DEFAULT_RETRY_AFTER_SECS: u32 = 30;

/// Configuration for the OpenRouter provider.
#[derive(Debug, Clone)]
pub struct OpenRouterConfig {
    api_key: Secret<String>,
    /// Model slug (e.g., "openai/gpt-4o-mini").
    pub model: String,
    pub base_url: String,
    /// Sent as `HTTP-Referer` for OpenRouter app attribution.
    pub referer: String,
    pub timeout: Duration,
}

impl OpenRouterConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: Secret::new(api_key.into()),
            model: "openai/gpt-4o-mini".to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            referer: DEFAULT_REFERER.to_string(),
            timeout: Duration::from_secs(30),
        }
    }

    /// Builds a configuration from an already-wrapped secret.
    pub fn from_secret(api_key: Secret<String>) -> Self {
        Self {
            api_key,
            ..Self::new(String::new())
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    pub fn with_referer(mut self, referer: impl Into<String>) -> Self {
        self.referer = referer.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    fn api_key(&self) -> &str {
        self.api_key.expose_secret()
    }
}

/// OpenRouter API provider implementation.
pub struct OpenRouterProvider {
    config: OpenRouterConfig,
    client: Client,
}

impl OpenRouterProvider {
    pub fn new(config: OpenRouterConfig) -> Result<Self, AIError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| AIError::network(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { config, client })
    }

    fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.config.base_url.trim_end_matches('/'))
    }

    fn to_wire_request(&self, request: &CompletionRequest) -> ChatRequest {
        let messages = request
            .messages
            .iter()
            .map(|msg| ChatMessage {
                role: match msg.role {
                    MessageRole::System => "system",
                    MessageRole::User => "user",
                    MessageRole::Assistant => "assistant",
                }
                .to_string(),
                content: Some(msg.content.clone()),
            })
            .collect();

        ChatRequest {
            model: self.config.model.clone(),
            messages,
            max_tokens: request.max_tokens,
            temperature: request.temperature,
        }
    }

    async fn send_request(&self, request: &CompletionRequest) -> Result<Response, AIError> {
        let wire_request = self.to_wire_request(request);

        self.client
            .post(self.completions_url())
            .bearer_auth(self.config.api_key())
            .header("HTTP-Referer", &self.config.referer)
            .json(&wire_request)
            .send()
            .await
            .map_err(|e| self.map_transport_error(e))
    }

    fn map_transport_error(&self, e: reqwest::Error) -> AIError {
        if e.is_timeout() {
            AIError::Timeout {
                timeout_secs: timeout_secs(self.config.timeout),
            }
        } else if e.is_connect() {
            AIError::network(format!("Connection failed: {}", e))
        } else {
            AIError::network(e.to_string())
        }
    }

    async fn handle_response_status(&self, response: Response) -> Result<Response, AIError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let retry_after = response
            .headers()
            .get(header::RETRY_AFTER)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.trim().parse::<u32>().ok());
        let body = response.text().await.unwrap_or_default();

        Err(status_error(status, retry_after, body))
    }

    async fn parse_response(&self, response: Response) -> Result<CompletionResponse, AIError> {
        let response = self.handle_response_status(response).await?;
        let body = response
            .text()
            .await
            .map_err(|e| self.map_transport_error(e))?;
        parse_completion(&body)
    }
}

#[async_trait]
impl AIProvider for OpenRouterProvider {
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse, AIError> {
        tracing::debug!(
            model = %self.config.model,
            trace_id = %request.metadata.trace_id,
            part_number = ?request.metadata.part_number.as_ref().map(|p| p.as_str()),
            "Calling OpenRouter"
        );

        let response = self.send_request(&request).await?;
        let completion = self.parse_response(response).await?;

        tracing::debug!(
            trace_id = %request.metadata.trace_id,
            total_tokens = completion.usage.total_tokens,
            finish_reason = ?completion.finish_reason,
            "OpenRouter call completed"
        );
        Ok(completion)
    }

    fn provider_info(&self) -> ProviderInfo {
        ProviderInfo::new("openrouter", &self.config.model)
    }
}

/// Maps a non-success status to the matching error.
/// Whole seconds of `timeout`, saturating at `u32::MAX`.
fn timeout_secs(timeout: Duration) -> u32 {
    u32::try_from(timeout.as_secs()).unwrap_or(u32::MAX)
}

fn status_error(status: StatusCode, retry_after: Option<u32>, body: String) -> AIError {
    match status.as_u16() {
        401 => AIError::AuthenticationFailed,
        429 => AIError::rate_limited(retry_after.unwrap_or(DEFAULT_RETRY_AFTER_SECS)),
        400 => AIError::InvalidRequest(body),
        500..=599 => AIError::unavailable(format!("Server error {}: {}", status, body)),
        other => AIError::unexpected_status(other, body),
    }
}

/// Decodes a chat completions envelope.
fn parse_completion(body: &str) -> Result<CompletionResponse, AIError> {
    let wire: ChatResponse = serde_json::from_str(body)
        .map_err(|e| AIError::parse(format!("Failed to parse response: {}", e)))?;

    let choice = wire
        .choices
        .into_iter()
        .next()
        .ok_or_else(|| AIError::parse("No choices in response"))?;

    let content = choice
        .message
        .content
        .ok_or_else(|| AIError::parse("Choice has no message content"))?;

    let usage = wire
        .usage
        .map(|u| TokenUsage::new(u.prompt_tokens, u.completion_tokens))
        .unwrap_or_default();

    Ok(CompletionResponse {
        content,
        usage,
        model: wire.model.unwrap_or_default(),
        finish_reason: FinishReason::from_wire(choice.finish_reason.as_deref()),
    })
}

// ----- OpenRouter API Types -----

#[derive(Debug, Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
}

#[derive(Debug, Serialize, Deserialize)]
struct ChatMessage {
    role: String,
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    model: Option<String>,
    choices: Vec<ChatChoice>,
    usage: Option<ChatUsage>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ChatUsage {
    prompt_tokens: u32,
    completion_tokens: u32,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::RunId;
    use crate::ports::RequestMetadata;

    fn provider() -> OpenRouterProvider {
        OpenRouterProvider::new(OpenRouterConfig::new("test-key")).unwrap()
    }

    #[test]
    fn config_builder_works() {
        let config = OpenRouterConfig::new("test-key")
            .with_model("anthropic/claude-3-haiku")
            .with_base_url("https://proxy.internal/api/v1/")
            .with_referer("https://mro.example.org")
            .with_timeout(Duration::from_secs(10));

        assert_eq!(config.model, "anthropic/claude-3-haiku");
        assert_eq!(config.referer, "https://mro.example.org");
        assert_eq!(config.timeout, Duration::from_secs(10));
        assert_eq!(config.api_key(), "test-key");
    }

    #[test]
    fn defaults_target_openrouter() {
        let config = OpenRouterConfig::from_secret(Secret::new("k".to_string()));
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.referer, DEFAULT_REFERER);
        assert_eq!(config.timeout, Duration::from_secs(30));
        assert_eq!(config.api_key(), "k");
    }

    #[test]
    fn completions_url_tolerates_trailing_slash() {
        let provider = OpenRouterProvider::new(
            OpenRouterConfig::new("k").with_base_url("https://openrouter.ai/api/v1/"),
        )
        .unwrap();
        assert_eq!(
            provider.completions_url(),
            "https://openrouter.ai/api/v1/chat/completions"
        );
    }

    #[test]
    fn wire_request_carries_model_and_sampling() {
        let request = CompletionRequest::new(RequestMetadata::new(RunId::new(), "t"))
            .with_message(MessageRole::User, "prompt text")
            .with_temperature(0.3)
            .with_max_tokens(1000);

        let json = serde_json::to_value(provider().to_wire_request(&request)).unwrap();
        assert_eq!(json["model"], "openai/gpt-4o-mini");
        assert_eq!(json["messages"][0]["role"], "user");
        assert_eq!(json["messages"][0]["content"], "prompt text");
        assert_eq!(json["max_tokens"], 1000);
        assert!((json["temperature"].as_f64().unwrap() - 0.3).abs() < 1e-6);
    }

    #[test]
    fn status_mapping() {
        assert!(matches!(
            status_error(StatusCode::UNAUTHORIZED, None, String::new()),
            AIError::AuthenticationFailed
        ));
        assert!(matches!(
            status_error(StatusCode::TOO_MANY_REQUESTS, Some(12), String::new()),
            AIError::RateLimited { retry_after_secs: 12 }
        ));
        assert!(matches!(
            status_error(StatusCode::TOO_MANY_REQUESTS, None, String::new()),
            AIError::RateLimited { retry_after_secs: 30 }
        ));
        assert!(matches!(
            status_error(StatusCode::BAD_REQUEST, None, "bad model".to_string()),
            AIError::InvalidRequest(body) if body == "bad model"
        ));
        assert!(matches!(
            status_error(StatusCode::BAD_GATEWAY, None, String::new()),
            AIError::Unavailable { .. }
        ));
        assert!(matches!(
            status_error(StatusCode::PAYMENT_REQUIRED, None, String::new()),
            AIError::UnexpectedStatus { status: 402, .. }
        ));
    }

    #[test]
    fn parses_completion_envelope() {
        let body = r#"{
            "id": "gen-1",
            "model": "openai/gpt-4o-mini",
            "choices": [{"message": {"role": "assistant", "content": "{\"root_cause\": \"x\"}"}, "finish_reason": "stop"}],
            "usage": {"prompt_tokens": 420, "completion_tokens": 180, "total_tokens": 600}
        }"#;

        let completion = parse_completion(body).unwrap();
        assert_eq!(completion.content, "{\"root_cause\": \"x\"}");
        assert_eq!(completion.model, "openai/gpt-4o-mini");
        assert_eq!(completion.usage.total_tokens, 600);
        assert_eq!(completion.finish_reason, FinishReason::Stop);
    }

    #[test]
    fn empty_choices_is_parse_error() {
        let err = parse_completion(r#"{"model": "m", "choices": []}"#).unwrap_err();
        assert!(matches!(err, AIError::Parse(_)));
    }

    #[test]
    fn null_content_is_parse_error() {
        let body = r#"{"choices": [{"message": {"role": "assistant", "content": null}, "finish_reason": "length"}]}"#;
        assert!(matches!(parse_completion(body), Err(AIError::Parse(_))));
    }

    #[test]
    fn html_error_page_is_parse_error() {
        assert!(matches!(
            parse_completion("<html>Bad Gateway</html>"),
            Err(AIError::Parse(_))
        ));
    }

    #[test]
    fn timeout_seconds_saturate() {
        assert_eq!(timeout_secs(Duration::from_secs(30)), 30);
        assert_eq!(timeout_secs(Duration::from_millis(1500)), 1);
        assert_eq!(timeout_secs(Duration::from_secs(u64::from(u32::MAX) + 1)), u32::MAX);
        assert_eq!(timeout_secs(Duration::MAX), u32::MAX);
    }

    #[test]
    fn provider_info_names_openrouter() {
        let info = provider().provider_info();
        assert_eq!(info.name, "openrouter");
        assert_eq!(info.model, "openai/gpt-4o-mini");
    }
}
