//! Fake text generator for testing.
//!
//! Replies are scripted up front, so tests run without network access and can
//! assert exactly how many generation calls were made and with which prompts.

use std::collections::VecDeque;
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;

use crate::generator::TextGenerator;
use crate::service::{AIServiceError, AIServiceResult};

#[derive(Debug, Clone)]
enum Reply {
    Text(String),
    Failure(String),
}

#[derive(Debug, Default)]
struct State {
    queued: VecDeque<Reply>,
    prompts: Vec<String>,
}

/// A scripted [`TextGenerator`].
///
/// Queued replies are returned first, in order; once the queue is empty the
/// default reply (if any) is returned for every call.
#[derive(Debug, Default)]
pub struct FakeGenerator {
    state: Mutex<State>,
    default_reply: Option<Reply>,
}

impl FakeGenerator {
    /// Create a FakeGenerator with nothing scripted; every call fails
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a FakeGenerator that returns `text` for every call
    pub fn with_response(text: &str) -> Self {
        Self {
            default_reply: Some(Reply::Text(text.to_string())),
            ..Self::default()
        }
    }

    /// Create a FakeGenerator whose every call fails like an upstream outage
    pub fn failing(message: &str) -> Self {
        Self {
            default_reply: Some(Reply::Failure(message.to_string())),
            ..Self::default()
        }
    }

    /// Queue a reply for the next unanswered call
    pub fn push_response(&self, text: &str) {
        self.lock().queued.push_back(Reply::Text(text.to_string()));
    }

    /// Queue a failure for the next unanswered call
    pub fn push_failure(&self, message: &str) {
        self.lock()
            .queued
            .push_back(Reply::Failure(message.to_string()));
    }

    /// Number of generation calls made so far
    pub fn call_count(&self) -> usize {
        self.lock().prompts.len()
    }

    /// Every prompt received, in call order
    pub fn prompts(&self) -> Vec<String> {
        self.lock().prompts.clone()
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        // Poisoning is ignored; the recorded state stays readable
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }
}

#[async_trait]
impl TextGenerator for FakeGenerator {
    async fn generate(&self, prompt: &str, _system_prompt: Option<&str>) -> AIServiceResult<String> {
        let reply = {
            let mut state = self.lock();
            state.prompts.push(prompt.to_string());
            state.queued.pop_front().or_else(|| self.default_reply.clone())
        };

        match reply {
            Some(Reply::Text(text)) => Ok(text),
            Some(Reply::Failure(message)) => Err(AIServiceError::ApiError(message)),
            None => Err(AIServiceError::ApiError(format!(
                "FakeGenerator: no response configured for prompt (first 100 chars): {}",
                guilted_core::truncate(prompt, 100)
            ))),
        }
    }

    fn model(&self) -> &str {
        "fake-model"
    }
}
