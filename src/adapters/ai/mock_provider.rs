//! Mock AI provider for testing.
//!
//! Configurable implementation of the `AiProvider` port so tests run without
//! calling the real Groq API. Responses are consumed in order; every call is
//! recorded for verification.
//!
//! # Example
//!
//! ```ignore
//! let provider = MockAiProvider::new()
//!     .with_response(r#"["1", "2"]"#)
//!     .with_response("Short explanation.");
//!
//! let response = provider.complete(request).await?;
//! ```

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use crate::ports::{AiError, AiProvider, CompletionRequest, CompletionResponse};

/// A configured mock reply.
#[derive(Debug)]
enum MockReply {
    Success(String),
    Failure(AiError),
}

/// Mock AI provider for tests.
#[derive(Debug, Default)]
pub struct MockAiProvider {
    /// Pre-configured replies, consumed in order.
    replies: Arc<Mutex<VecDeque<MockReply>>>,
    /// Call history for verification.
    calls: Arc<Mutex<Vec<CompletionRequest>>>,
}

impl MockAiProvider {
    /// Creates a mock provider with no configured replies.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a successful reply.
    pub fn with_response(self, content: impl Into<String>) -> Self {
        self.replies
            .lock()
            .unwrap()
            .push_back(MockReply::Success(content.into()));
        self
    }

    /// Queues an error reply.
    pub fn with_error(self, error: AiError) -> Self {
        self.replies
            .lock()
            .unwrap()
            .push_back(MockReply::Failure(error));
        self
    }

    /// Queues a timeout error reply.
    pub fn with_timeout_error(self, timeout_secs: u32) -> Self {
        self.with_error(AiError::Timeout { timeout_secs })
    }

    /// Returns a handle to the recorded calls.
    ///
    /// The handle stays valid after the provider has been moved into an
    /// analyzer or router, so tests can inspect calls afterwards.
    pub fn call_log(&self) -> Arc<Mutex<Vec<CompletionRequest>>> {
        Arc::clone(&self.calls)
    }

    /// Returns the number of calls made so far.
    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl AiProvider for MockAiProvider {
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse, AiError> {
        self.calls.lock().unwrap().push(request);

        let reply = self.replies.lock().unwrap().pop_front();
        match reply {
            Some(MockReply::Success(content)) => Ok(CompletionResponse {
                content,
                model: "mock-model".to_string(),
            }),
            Some(MockReply::Failure(error)) => Err(error),
            None => Err(AiError::unavailable("no mock reply configured")),
        }
    }
}
