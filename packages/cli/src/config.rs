// ABOUTME: Server and client configuration read from environment variables
// ABOUTME: Parses and validates every GUILTED_* setting with documented defaults

use std::fmt;
use std::num::ParseIntError;
use std::path::PathBuf;
use std::time::Duration;

use guilted_ai::{AIServiceConfig, Provider};
use guilted_config::constants::*;
use guilted_config::env::{env_var, env_var_with_fallback};
use guilted_core::MAX_IDEA_COUNT;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid port number: {0}")]
    InvalidPort(#[from] ParseIntError),
    #[error("Port {0} is out of valid range (1-65535)")]
    PortOutOfRange(u16),
    #[error("Invalid AI provider: {0} (expected 'openai' or 'anthropic')")]
    InvalidProvider(String),
    #[error("Invalid value for {name}: {value}")]
    InvalidNumber { name: &'static str, value: String },
    #[error("Idea count {0} is out of valid range (1-{max})", max = MAX_IDEA_COUNT)]
    IdeaCountOutOfRange(usize),
}

#[derive(Clone)]
pub struct Config {
    pub port: u16,
    pub host: String,
    pub cors_origin: String,
    pub provider: Provider,
    pub api_key: Option<String>,
    pub model: Option<String>,
    pub ai_base_url: Option<String>,
    pub ai_timeout: Duration,
    pub idea_count: usize,
    pub prompts_dir: Option<PathBuf>,
    pub server_url: String,
}

fn parse_number<T: std::str::FromStr>(
    name: &'static str,
    value: String,
) -> Result<T, ConfigError> {
    value
        .parse::<T>()
        .map_err(|_| ConfigError::InvalidNumber { name, value })
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        let port_str = env_var_with_fallback(GUILTED_API_PORT, PORT)
            .unwrap_or_else(|| DEFAULT_API_PORT.to_string());

        let port = port_str.parse::<u16>()?;

        // Validate port is in valid range
        if port == 0 {
            return Err(ConfigError::PortOutOfRange(port));
        }

        let host = env_var(GUILTED_HOST).unwrap_or_else(|| DEFAULT_HOST.to_string());

        let cors_origin = env_var_with_fallback(GUILTED_CORS_ORIGIN, CORS_ORIGIN)
            .unwrap_or_else(|| DEFAULT_CORS_ORIGIN.to_string());

        let provider = match env_var(GUILTED_AI_PROVIDER) {
            Some(value) => value
                .parse::<Provider>()
                .map_err(|_| ConfigError::InvalidProvider(value))?,
            None => Provider::default(),
        };

        let api_key = match provider {
            Provider::OpenAI => env_var(OPENAI_API_KEY),
            Provider::Anthropic => env_var(ANTHROPIC_API_KEY),
        };

        let ai_timeout = match env_var(GUILTED_AI_TIMEOUT_SECS) {
            Some(value) => Duration::from_secs(parse_number(GUILTED_AI_TIMEOUT_SECS, value)?),
            None => Duration::from_secs(DEFAULT_AI_TIMEOUT_SECS),
        };

        let idea_count = match env_var(GUILTED_IDEA_COUNT) {
            Some(value) => parse_number(GUILTED_IDEA_COUNT, value)?,
            None => guilted_core::DEFAULT_IDEA_COUNT,
        };
        if !(1..=MAX_IDEA_COUNT).contains(&idea_count) {
            return Err(ConfigError::IdeaCountOutOfRange(idea_count));
        }

        Ok(Config {
            port,
            host,
            cors_origin,
            provider,
            api_key,
            model: env_var(GUILTED_MODEL),
            ai_base_url: env_var(GUILTED_AI_BASE_URL),
            ai_timeout,
            idea_count,
            prompts_dir: env_var(GUILTED_PROMPTS_DIR).map(PathBuf::from),
            server_url: env_var(GUILTED_SERVER_URL)
                .unwrap_or_else(|| DEFAULT_SERVER_URL.to_string()),
        })
    }

    /// Provider client settings; the credential is handed over here
    pub fn ai_service_config(&self) -> AIServiceConfig {
        AIServiceConfig {
            provider: self.provider,
            api_key: self.api_key.clone(),
            model: self.model.clone(),
            base_url: self.ai_base_url.clone(),
            timeout: self.ai_timeout,
        }
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("port", &self.port)
            .field("host", &self.host)
            .field("cors_origin", &self.cors_origin)
            .field("provider", &self.provider)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("model", &self.model)
            .field("ai_base_url", &self.ai_base_url)
            .field("ai_timeout", &self.ai_timeout)
            .field("idea_count", &self.idea_count)
            .field("prompts_dir", &self.prompts_dir)
            .field("server_url", &self.server_url)
            .finish()
    }
}
