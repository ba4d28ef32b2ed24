//! Mock AI Provider for testing.
//!
//! Provides a configurable mock implementation of the AIProvider port,
//! allowing the recommendation stage to run without calling a real API.
//!
//! # Features
//!
//! - Queued responses, consumed in call order
//! - Responses keyed by part number, for concurrent callers
//! - Simulated delays (global or per part number)
//! - Error injection
//! - Call tracking for verification
//!
//! # Example
//!
//! ```ignore
//! let provider = MockAIProvider::new()
//!     .with_response_for("PN-ENG-00001", r#"{"root_cause": ...}"#)
//!     .with_error_for("PN-AVI-00002", MockError::Timeout { timeout_secs: 30 });
//!
//! let response = provider.complete(request).await?;
//! ```

use async_trait::async_trait;
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;
use tokio::time::sleep;

use crate::ports::{
    AIError, AIProvider, CompletionRequest, CompletionResponse, FinishReason, ProviderInfo,
    TokenUsage,
};

/// Content returned when nothing was configured for a call.
pub const DEFAULT_MOCK_CONTENT: &str = "Mock response";

/// Mock AI provider for testing.
#[derive(Debug, Clone)]
pub struct MockAIProvider {
    /// Responses consumed in call order.
    responses: Arc<Mutex<VecDeque<MockResponse>>>,
    /// Responses selected by the request's part number; take precedence.
    keyed: Arc<Mutex<HashMap<String, MockResponse>>>,
    keyed_delays: HashMap<String, Duration>,
    info: ProviderInfo,
    delay: Duration,
    calls: Arc<Mutex<Vec<CompletionRequest>>>,
}

/// A configured mock response.
#[derive(Debug, Clone)]
pub enum MockResponse {
    Success {
        content: String,
        usage: TokenUsage,
        finish_reason: FinishReason,
    },
    Error(MockError),
}

impl MockResponse {
    fn success(content: impl Into<String>) -> Self {
        MockResponse::Success {
            content: content.into(),
            usage: TokenUsage::new(10, 20),
            finish_reason: FinishReason::Stop,
        }
    }
}

/// Mock error types for testing error handling.
#[derive(Debug, Clone)]
pub enum MockError {
    RateLimited { retry_after_secs: u32 },
    Unavailable { message: String },
    AuthenticationFailed,
    Network { message: String },
    /// Envelope could not be decoded.
    Parse { message: String },
    UnexpectedStatus { status: u16 },
    Timeout { timeout_secs: u32 },
}

impl From<MockError> for AIError {
    fn from(err: MockError) -> Self {
        match err {
            MockError::RateLimited { retry_after_secs } => AIError::rate_limited(retry_after_secs),
            MockError::Unavailable { message } => AIError::unavailable(message),
            MockError::AuthenticationFailed => AIError::AuthenticationFailed,
            MockError::Network { message } => AIError::network(message),
            MockError::Parse { message } => AIError::parse(message),
            MockError::UnexpectedStatus { status } => {
                AIError::unexpected_status(status, "mock status")
            }
            MockError::Timeout { timeout_secs } => AIError::Timeout { timeout_secs },
        }
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

impl Default for MockAIProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl MockAIProvider {
    pub fn new() -> Self {
        Self {
            responses: Arc::new(Mutex::new(VecDeque::new())),
            keyed: Arc::new(Mutex::new(HashMap::new())),
            keyed_delays: HashMap::new(),
            info: ProviderInfo::new("mock", "mock-model-1"),
            delay: Duration::ZERO,
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Queues a successful response.
    pub fn with_response(self, content: impl Into<String>) -> Self {
        lock(&self.responses).push_back(MockResponse::success(content));
        self
    }

    /// Queues a successful response with full configuration.
    pub fn with_response_full(
        self,
        content: impl Into<String>,
        usage: TokenUsage,
        finish_reason: FinishReason,
    ) -> Self {
        lock(&self.responses).push_back(MockResponse::Success {
            content: content.into(),
            usage,
            finish_reason,
        });
        self
    }

    /// Queues an error.
    pub fn with_error(self, error: MockError) -> Self {
        lock(&self.responses).push_back(MockResponse::Error(error));
        self
    }

    /// Answers every request about `part_number` with `content`.
    pub fn with_response_for(self, part_number: impl Into<String>, content: impl Into<String>) -> Self {
        lock(&self.keyed).insert(part_number.into(), MockResponse::success(content));
        self
    }

    /// Fails every request about `part_number` with `error`.
    pub fn with_error_for(self, part_number: impl Into<String>, error: MockError) -> Self {
        lock(&self.keyed).insert(part_number.into(), MockResponse::Error(error));
        self
    }

    /// Sets simulated latency per request.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Sets simulated latency for requests about `part_number`.
    pub fn with_delay_for(mut self, part_number: impl Into<String>, delay: Duration) -> Self {
        self.keyed_delays.insert(part_number.into(), delay);
        self
    }

    pub fn with_provider_info(mut self, info: ProviderInfo) -> Self {
        self.info = info;
        self
    }

    pub fn call_count(&self) -> usize {
        lock(&self.calls).len()
    }

    pub fn get_calls(&self) -> Vec<CompletionRequest> {
        lock(&self.calls).clone()
    }

    pub fn clear_calls(&self) {
        lock(&self.calls).clear();
    }

    fn next_response(&self, part_number: Option<&str>) -> MockResponse {
        if let Some(response) = part_number.and_then(|key| lock(&self.keyed).get(key).cloned()) {
            return response;
        }
        lock(&self.responses)
            .pop_front()
            .unwrap_or_else(|| MockResponse::success(DEFAULT_MOCK_CONTENT))
    }

    fn delay_for(&self, part_number: Option<&str>) -> Duration {
        part_number
            .and_then(|key| self.keyed_delays.get(key).copied())
            .unwrap_or(self.delay)
    }
}

#[async_trait]
impl AIProvider for MockAIProvider {
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse, AIError> {
        let part_number = request
            .metadata
            .part_number
            .as_ref()
            .map(|p| p.as_str().to_string());
        lock(&self.calls).push(request);

        let delay = self.delay_for(part_number.as_deref());
        if !delay.is_zero() {
            sleep(delay).await;
        }

        match self.next_response(part_number.as_deref()) {
            MockResponse::Success {
                content,
                usage,
                finish_reason,
            } => Ok(CompletionResponse {
                content,
                usage,
                model: self.info.model.clone(),
                finish_reason,
            }),
            MockResponse::Error(err) => Err(err.into()),
        }
    }

    fn provider_info(&self) -> ProviderInfo {
        self.info.clone()
    }
}
