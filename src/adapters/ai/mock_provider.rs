//! Mock Text Generator for testing.
//!
//! Returns queued replies or errors in order, records every request and can
//! simulate latency for timeout tests.
//!
//! # Example
//!
//! ```ignore
//! let generator = MockTextGenerator::new()
//!     .with_response("How long has this been going on?")
//!     .with_error(GenerationError::RateLimited);
//! ```

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tokio::time::sleep;

use crate::ports::{
    GenerationError, GenerationRequest, GenerationResponse, ProviderInfo, TextGenerator,
};

/// Reply used once the queue is exhausted.
pub const DEFAULT_MOCK_REPLY: &str = "Mock response";

/// A configured mock outcome.
#[derive(Debug, Clone)]
pub enum MockResponse {
    Success(String),
    Error(GenerationError),
}

/// Mock text generator.
#[derive(Debug, Clone)]
pub struct MockTextGenerator {
    responses: Arc<Mutex<VecDeque<MockResponse>>>,
    calls: Arc<Mutex<Vec<GenerationRequest>>>,
    delay: Duration,
    configured: bool,
    info: ProviderInfo,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

impl Default for MockTextGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl MockTextGenerator {
    pub fn new() -> Self {
        Self {
            responses: Arc::new(Mutex::new(VecDeque::new())),
            calls: Arc::new(Mutex::new(Vec::new())),
            delay: Duration::ZERO,
            configured: true,
            info: ProviderInfo::new("mock", "mock-model-1"),
        }
    }

    /// Queues a successful reply.
    pub fn with_response(self, content: impl Into<String>) -> Self {
        lock(&self.responses).push_back(MockResponse::Success(content.into()));
        self
    }

    /// Queues an error.
    pub fn with_error(self, error: GenerationError) -> Self {
        lock(&self.responses).push_back(MockResponse::Error(error));
        self
    }

    /// Sets simulated latency per request.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Marks the generator as missing its credential.
    ///
    /// Calls then fail with `MissingCredential` regardless of the queue.
    pub fn unconfigured(mut self) -> Self {
        self.configured = false;
        self
    }

    /// Queues a reply on an existing (possibly shared) mock.
    pub fn push_response(&self, content: impl Into<String>) {
        lock(&self.responses).push_back(MockResponse::Success(content.into()));
    }

    /// Queues an error on an existing (possibly shared) mock.
    pub fn push_error(&self, error: GenerationError) {
        lock(&self.responses).push_back(MockResponse::Error(error));
    }

    pub fn call_count(&self) -> usize {
        lock(&self.calls).len()
    }

    pub fn calls(&self) -> Vec<GenerationRequest> {
        lock(&self.calls).clone()
    }

    /// Prompt of the most recent call.
    pub fn last_prompt(&self) -> Option<String> {
        lock(&self.calls).last().map(|request| request.prompt.clone())
    }

    fn next_response(&self) -> MockResponse {
        lock(&self.responses)
            .pop_front()
            .unwrap_or_else(|| MockResponse::Success(DEFAULT_MOCK_REPLY.to_string()))
    }
}

#[async_trait]
impl TextGenerator for MockTextGenerator {
    async fn generate(&self, request: GenerationRequest) -> Result<GenerationResponse, GenerationError> {
        lock(&self.calls).push(request);

        if !self.delay.is_zero() {
            sleep(self.delay).await;
        }

        if !self.configured {
            return Err(GenerationError::missing_credential("mock_api_key"));
        }

        match self.next_response() {
            MockResponse::Success(content) => {
                Ok(GenerationResponse::new(content, self.info.model.clone()))
            }
            MockResponse::Error(err) => Err(err),
        }
    }

    fn is_configured(&self) -> bool {
        self.configured
    }

    fn provider_info(&self) -> ProviderInfo {
        self.info.clone()
    }
}
