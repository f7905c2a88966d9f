// ABOUTME: HTTP client for a running Guilted server
// ABOUTME: Implements GiftBackend so the terminal session can run against a remote service

use std::time::Duration;

use async_trait::async_trait;
use guilted_api::error::ErrorResponse;
use guilted_core::{GiftIdea, GiftRecipe, Preferences};
use guilted_gifts::{GiftBackend, GiftError, Result};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::{debug, warn};

/// Idea replies: the current `{giftIdeas}` envelope or an older bare array
#[derive(Deserialize)]
#[serde(untagged)]
enum IdeasEnvelope {
    Wrapped {
        #[serde(rename = "giftIdeas")]
        gift_ideas: Vec<GiftIdea>,
    },
    Bare(Vec<GiftIdea>),
}

/// Recipe replies: the current `{recipe}` envelope or an older bare object
#[derive(Deserialize)]
#[serde(untagged)]
enum RecipeEnvelope {
    Wrapped { recipe: GiftRecipe },
    Bare(GiftRecipe),
}

/// Longer than the server's own upstream timeout, so slow generations still land
const REQUEST_TIMEOUT: Duration = Duration::from_secs(150);
const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Clone)]
pub struct GiftClient {
    http: reqwest::Client,
    base_url: String,
}

impl GiftClient {
    pub fn new(base_url: &str) -> Result<Self> {
        Self::with_timeout(base_url, REQUEST_TIMEOUT)
    }

    /// Create a client whose requests give up after `timeout`
    pub fn with_timeout(base_url: &str, timeout: Duration) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .connect_timeout(CONNECT_TIMEOUT)
            .build()
            .map_err(|e| GiftError::Transport(e.to_string()))?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn post<T: DeserializeOwned>(&self, path: &str, body: &Value) -> Result<T> {
        let url = format!("{}{}", self.base_url, path);
        debug!("POST {}", url);

        let response = self
            .http
            .post(&url)
            .json(body)
            .send()
            .await
            .map_err(|e| GiftError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let message = match response.json::<ErrorResponse>().await {
                Ok(ErrorResponse {
                    error,
                    details: Some(details),
                }) => format!("{} ({})", error, details),
                Ok(ErrorResponse { error, .. }) => error,
                Err(_) => status
                    .canonical_reason()
                    .unwrap_or("Request failed")
                    .to_string(),
            };
            warn!("Gift server returned {}: {}", status, message);
            return Err(GiftError::Remote {
                status: status.as_u16(),
                message,
            });
        }

        response
            .json::<T>()
            .await
            .map_err(|e| GiftError::Transport(format!("Unexpected response body: {}", e)))
    }
}

#[async_trait]
impl GiftBackend for GiftClient {
    async fn generate_ideas(&self, prefs: &Preferences) -> Result<Vec<GiftIdea>> {
        let body = json!({ "friendPreferences": prefs });
        let envelope: IdeasEnvelope = self.post("/api/generate-gifts", &body).await?;
        Ok(match envelope {
            IdeasEnvelope::Wrapped { gift_ideas } => gift_ideas,
            IdeasEnvelope::Bare(ideas) => ideas,
        })
    }

    async fn generate_recipe(&self, gift_title: &str, prefs: &Preferences) -> Result<GiftRecipe> {
        let body = json!({ "giftTitle": gift_title, "friendPreferences": prefs });
        let envelope: RecipeEnvelope = self.post("/api/generate-recipe", &body).await?;
        Ok(match envelope {
            RecipeEnvelope::Wrapped { recipe } => recipe,
            RecipeEnvelope::Bare(recipe) => recipe,
        })
    }
}
