use async_trait::async_trait;

use crate::service::AIServiceResult;

/// The single external operation: submit prompt text, receive completion text.
///
/// Implementations must be thread-safe; the HTTP server shares one instance
/// across all requests.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Send a prompt (and optional system prompt) and return the raw completion text
    async fn generate(&self, prompt: &str, system_prompt: Option<&str>) -> AIServiceResult<String>;

    /// Model name, for logging
    fn model(&self) -> &str;
}
