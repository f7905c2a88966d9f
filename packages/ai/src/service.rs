// ABOUTME: AI service for making text generation calls to OpenAI or Anthropic
// ABOUTME: Handles API requests, provider-specific response parsing, and usage logging

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use async_trait::async_trait;
use guilted_core::truncate;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, error, info, warn};

use crate::generator::TextGenerator;

const OPENAI_API_URL: &str = "https://api.openai.com/v1";
const ANTHROPIC_API_URL: &str = "https://api.anthropic.com/v1";
const OPENAI_DEFAULT_MODEL: &str = "gpt-4o";
const ANTHROPIC_DEFAULT_MODEL: &str = "claude-sonnet-4-20250514";
const ANTHROPIC_VERSION: &str = "2023-06-01";
const DEFAULT_MAX_TOKENS: u32 = 4096;
const DEFAULT_TEMPERATURE: f32 = 0.7;
const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Longest slice of an upstream error body kept in error messages
const ERROR_BODY_LIMIT: usize = 500;

#[derive(Debug, Error)]
pub enum AIServiceError {
    #[error("HTTP request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    #[error("API error: {0}")]
    ApiError(String),

    #[error("Failed to parse response: {0}")]
    ParseError(String),

    #[error("No API key configured")]
    NoApiKey,

    #[error("Invalid response format")]
    InvalidResponse,

    #[error("Unknown provider: {0}")]
    UnknownProvider(String),
}

pub type AIServiceResult<T> = Result<T, AIServiceError>;

/// Which text-generation API to call
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Provider {
    #[default]
    #[serde(rename = "openai")]
    OpenAI,
    Anthropic,
}

impl Provider {
    pub fn default_model(&self) -> &'static str {
        match self {
            Provider::OpenAI => OPENAI_DEFAULT_MODEL,
            Provider::Anthropic => ANTHROPIC_DEFAULT_MODEL,
        }
    }

    pub fn default_base_url(&self) -> &'static str {
        match self {
            Provider::OpenAI => OPENAI_API_URL,
            Provider::Anthropic => ANTHROPIC_API_URL,
        }
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Provider::OpenAI => f.write_str("openai"),
            Provider::Anthropic => f.write_str("anthropic"),
        }
    }
}

impl FromStr for Provider {
    type Err = AIServiceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "openai" => Ok(Provider::OpenAI),
            "anthropic" | "claude" => Ok(Provider::Anthropic),
            other => Err(AIServiceError::UnknownProvider(other.to_string())),
        }
    }
}

/// Everything needed to construct an [`AIService`]; the credential is injected
/// here rather than read from the process environment.
#[derive(Debug, Clone)]
pub struct AIServiceConfig {
    pub provider: Provider,
    pub api_key: Option<String>,
    /// Falls back to the provider's default model
    pub model: Option<String>,
    /// Falls back to the provider's public endpoint
    pub base_url: Option<String>,
    pub timeout: Duration,
}

impl AIServiceConfig {
    pub fn new(provider: Provider, api_key: Option<String>) -> Self {
        Self {
            provider,
            api_key,
            model: None,
            base_url: None,
            timeout: Duration::from_secs(120),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct Message {
    role: String,
    content: String,
}

#[derive(Debug, Serialize)]
struct OpenAIRequest {
    model: String,
    messages: Vec<Message>,
    temperature: f32,
}

#[derive(Debug, Deserialize)]
struct OpenAIResponse {
    choices: Vec<OpenAIChoice>,
    #[serde(default)]
    usage: Option<OpenAIUsage>,
}

#[derive(Debug, Deserialize)]
struct OpenAIChoice {
    message: OpenAIMessage,
}

#[derive(Debug, Deserialize)]
struct OpenAIMessage {
    #[serde(default)]
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OpenAIUsage {
    prompt_tokens: u32,
    completion_tokens: u32,
}

#[derive(Debug, Serialize)]
struct AnthropicRequest {
    model: String,
    max_tokens: u32,
    temperature: f32,
    messages: Vec<Message>,
    #[serde(skip_serializing_if = "Option::is_none")]
    system: Option<String>,
}

#[derive(Debug, Deserialize)]
struct AnthropicResponse {
    content: Vec<ContentBlock>,
    usage: Usage,
}

#[derive(Debug, Deserialize)]
struct ContentBlock {
    #[serde(default)]
    text: Option<String>,
}

#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq, Eq)]
pub struct Usage {
    pub input_tokens: u32,
    pub output_tokens: u32,
}

impl Usage {
    pub fn total_tokens(&self) -> u32 {
        self.input_tokens.saturating_add(self.output_tokens)
    }
}

#[derive(Debug)]
pub struct AIResponse<T> {
    pub data: T,
    pub usage: Usage,
}

/// HTTP client for the configured text-generation provider
pub struct AIService {
    client: Client,
    provider: Provider,
    api_key: Option<String>,
    model: String,
    base_url: String,
}

impl AIService {
    /// Create a service from explicit configuration
    pub fn new(config: AIServiceConfig) -> AIServiceResult<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .connect_timeout(CONNECT_TIMEOUT)
            .build()?;

        let model = config
            .model
            .unwrap_or_else(|| config.provider.default_model().to_string());
        let base_url = config
            .base_url
            .unwrap_or_else(|| config.provider.default_base_url().to_string())
            .trim_end_matches('/')
            .to_string();

        if config.api_key.is_none() {
            warn!(
                "No API key configured for provider {}; generation calls will fail",
                config.provider
            );
        }

        Ok(Self {
            client,
            provider: config.provider,
            api_key: config.api_key,
            model,
            base_url,
        })
    }

    /// Get the provider being used by this service
    pub fn provider(&self) -> Provider {
        self.provider
    }

    /// Get the model being used by this service
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Makes a text generation call and returns the raw completion
    pub async fn generate_text(
        &self,
        prompt: String,
        system_prompt: Option<String>,
    ) -> AIServiceResult<AIResponse<String>> {
        let api_key = self.api_key.as_deref().ok_or(AIServiceError::NoApiKey)?;

        info!(
            "Making {} text generation request: model={}",
            self.provider, self.model
        );

        let response = match self.provider {
            Provider::OpenAI => self.openai_completion(api_key, prompt, system_prompt).await?,
            Provider::Anthropic => {
                self.anthropic_completion(api_key, prompt, system_prompt)
                    .await?
            }
        };

        info!(
            "Generation complete: input_tokens={}, output_tokens={}, total={}",
            response.usage.input_tokens,
            response.usage.output_tokens,
            response.usage.total_tokens()
        );
        debug!(
            "Raw completion (first 500 chars): {}",
            truncate(&response.data, 500)
        );

        Ok(response)
    }

    async fn openai_completion(
        &self,
        api_key: &str,
        prompt: String,
        system_prompt: Option<String>,
    ) -> AIServiceResult<AIResponse<String>> {
        let mut messages = Vec::with_capacity(2);
        if let Some(system) = system_prompt {
            messages.push(Message {
                role: "system".to_string(),
                content: system,
            });
        }
        messages.push(Message {
            role: "user".to_string(),
            content: prompt,
        });

        let request = OpenAIRequest {
            model: self.model.clone(),
            messages,
            temperature: DEFAULT_TEMPERATURE,
        };

        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(api_key)
            .json(&request)
            .send()
            .await
            .map_err(map_send_error)?;

        let response = check_status(response).await?;

        let body: OpenAIResponse = response
            .json()
            .await
            .map_err(|e| AIServiceError::ParseError(e.to_string()))?;

        let text = body
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or(AIServiceError::InvalidResponse)?;

        let usage = body
            .usage
            .map(|u| Usage {
                input_tokens: u.prompt_tokens,
                output_tokens: u.completion_tokens,
            })
            .unwrap_or_default();

        Ok(AIResponse { data: text, usage })
    }

    async fn anthropic_completion(
        &self,
        api_key: &str,
        prompt: String,
        system_prompt: Option<String>,
    ) -> AIServiceResult<AIResponse<String>> {
        let request = AnthropicRequest {
            model: self.model.clone(),
            max_tokens: DEFAULT_MAX_TOKENS,
            temperature: DEFAULT_TEMPERATURE,
            messages: vec![Message {
                role: "user".to_string(),
                content: prompt,
            }],
            system: system_prompt,
        };

        let response = self
            .client
            .post(format!("{}/messages", self.base_url))
            .header("x-api-key", api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .header("content-type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(map_send_error)?;

        let response = check_status(response).await?;

        let body: AnthropicResponse = response
            .json()
            .await
            .map_err(|e| AIServiceError::ParseError(e.to_string()))?;

        // Extract text from the first content block
        let text = body
            .content
            .into_iter()
            .find_map(|block| block.text)
            .ok_or(AIServiceError::InvalidResponse)?;

        Ok(AIResponse {
            data: text,
            usage: body.usage,
        })
    }
}

fn map_send_error(e: reqwest::Error) -> AIServiceError {
    if e.is_timeout() {
        error!("Generation request timed out: {}", e);
        AIServiceError::ApiError(
            "Request timed out. The AI service may be overloaded or unavailable.".to_string(),
        )
    } else if e.is_connect() {
        error!("Failed to connect to generation API: {}", e);
        AIServiceError::ApiError(format!("Connection failed: {}", e))
    } else {
        error!("Generation request failed: {}", e);
        AIServiceError::RequestFailed(e)
    }
}

async fn check_status(response: reqwest::Response) -> AIServiceResult<reqwest::Response> {
    info!(
        "Received response from generation API: status={}",
        response.status()
    );

    if response.status().is_success() {
        return Ok(response);
    }

    let status = response.status();
    let error_text = response
        .text()
        .await
        .unwrap_or_else(|_| "Unknown error".to_string());
    let error_text = truncate(&error_text, ERROR_BODY_LIMIT);
    error!("Generation API error: {} - {}", status, error_text);
    Err(AIServiceError::ApiError(format!(
        "API returned {}: {}",
        status, error_text
    )))
}

#[async_trait]
impl TextGenerator for AIService {
    async fn generate(&self, prompt: &str, system_prompt: Option<&str>) -> AIServiceResult<String> {
        let response = self
            .generate_text(prompt.to_string(), system_prompt.map(str::to_string))
            .await?;
        Ok(response.data)
    }

    fn model(&self) -> &str {
        &self.model
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{bearer_token, body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn service(provider: Provider, server: &MockServer, api_key: Option<&str>) -> AIService {
        let mut config = AIServiceConfig::new(provider, api_key.map(str::to_string));
        config.base_url = Some(server.uri());
        AIService::new(config).unwrap()
    }

    #[tokio::test]
    async fn test_openai_completion() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .and(bearer_token("sk-test"))
            .and(body_partial_json(json!({
                "model": "gpt-4o",
                "messages": [
                    { "role": "system", "content": "Be helpful" },
                    { "role": "user", "content": "Suggest a gift" }
                ]
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "choices": [{ "message": { "role": "assistant", "content": "[]" } }],
                "usage": { "prompt_tokens": 12, "completion_tokens": 3 }
            })))
            .expect(1)
            .mount(&server)
            .await;

        let svc = service(Provider::OpenAI, &server, Some("sk-test"));
        let response = svc
            .generate_text("Suggest a gift".to_string(), Some("Be helpful".to_string()))
            .await
            .unwrap();

        assert_eq!(response.data, "[]");
        assert_eq!(response.usage.total_tokens(), 15);
    }

    #[test]
    fn test_total_tokens_saturates() {
        let usage = Usage {
            input_tokens: u32::MAX,
            output_tokens: 10,
        };
        assert_eq!(usage.total_tokens(), u32::MAX);
    }

    #[tokio::test]
    async fn test_anthropic_completion() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/messages"))
            .and(header("x-api-key", "ak-test"))
            .and(header("anthropic-version", ANTHROPIC_VERSION))
            .and(body_partial_json(json!({ "system": "Be helpful" })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": "msg_1",
                "content": [{ "type": "text", "text": "{\"title\":\"Mug\"}" }],
                "usage": { "input_tokens": 20, "output_tokens": 5 }
            })))
            .expect(1)
            .mount(&server)
            .await;

        let svc = service(Provider::Anthropic, &server, Some("ak-test"));
        assert_eq!(svc.model(), ANTHROPIC_DEFAULT_MODEL);

        let text = svc.generate("Recipe please", Some("Be helpful")).await.unwrap();
        assert_eq!(text, "{\"title\":\"Mug\"}");
    }

    #[tokio::test]
    async fn test_error_status_becomes_api_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(429).set_body_string("rate limited"))
            .mount(&server)
            .await;

        let svc = service(Provider::OpenAI, &server, Some("sk-test"));
        let err = svc.generate("prompt", None).await.unwrap_err();
        match err {
            AIServiceError::ApiError(msg) => {
                assert!(msg.contains("429"));
                assert!(msg.contains("rate limited"));
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_missing_key_makes_no_request() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let svc = service(Provider::OpenAI, &server, None);
        let err = svc.generate("prompt", None).await.unwrap_err();
        assert!(matches!(err, AIServiceError::NoApiKey));
    }

    #[tokio::test]
    async fn test_empty_choices_is_invalid_response() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "choices": [] })))
            .mount(&server)
            .await;

        let svc = service(Provider::OpenAI, &server, Some("sk-test"));
        let err = svc.generate("prompt", None).await.unwrap_err();
        assert!(matches!(err, AIServiceError::InvalidResponse));
    }

    #[test]
    fn test_provider_parsing() {
        assert_eq!("OpenAI".parse::<Provider>().unwrap(), Provider::OpenAI);
        assert_eq!("claude".parse::<Provider>().unwrap(), Provider::Anthropic);
        assert!(matches!(
            "gemini".parse::<Provider>(),
            Err(AIServiceError::UnknownProvider(_))
        ));
    }

    #[test]
    fn test_base_url_trailing_slash_is_trimmed() {
        let mut config = AIServiceConfig::new(Provider::OpenAI, Some("k".to_string()));
        config.base_url = Some("http://localhost:9999/v1/".to_string());
        config.model = Some("gpt-4o-mini".to_string());
        let svc = AIService::new(config).unwrap();
        assert_eq!(svc.base_url, "http://localhost:9999/v1");
        assert_eq!(svc.model(), "gpt-4o-mini");
    }
}
