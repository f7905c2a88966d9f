// ABOUTME: Guilted server assembly and terminal client support
// ABOUTME: Wires configuration, the AI provider and the gift service into the HTTP app

use std::sync::Arc;

use anyhow::Context;
use axum::http::{HeaderValue, Method};
use axum::Router;
use colored::*;
use guilted_ai::AIService;
use guilted_api::{create_router, AppState};
use guilted_gifts::GiftService;
use guilted_prompts::PromptManager;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

pub mod client;
pub mod config;
pub mod logging;
pub mod views;

#[cfg(test)]
mod tests;

use config::Config;

/// Build the gift service from configuration.
///
/// A missing credential is not fatal; every generation call fails instead.
pub fn build_service(config: &Config) -> anyhow::Result<GiftService> {
    let prompts = PromptManager::new(config.prompts_dir.as_deref())
        .context("Failed to load prompt templates")?;

    let ai = AIService::new(config.ai_service_config())
        .context("Failed to create AI service client")?;
    info!("Using {} model {}", config.provider, ai.model());

    let service = GiftService::new(Arc::new(ai), prompts).with_idea_count(config.idea_count)?;
    Ok(service)
}

/// Wrap the API router with CORS and request tracing
pub fn build_app(config: &Config, service: GiftService) -> anyhow::Result<Router> {
    let origin = config
        .cors_origin
        .parse::<HeaderValue>()
        .with_context(|| format!("Invalid CORS origin: {}", config.cors_origin))?;

    let cors = CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers(Any);

    Ok(create_router(AppState::new(service))
        .layer(cors)
        .layer(TraceLayer::new_for_http()))
}

pub async fn run_server(config: Config) -> anyhow::Result<()> {
    let service = build_service(&config)?;
    let app = build_app(&config, service)?;

    let listener = tokio::net::TcpListener::bind((config.host.as_str(), config.port))
        .await
        .with_context(|| format!("Failed to bind {}:{}", config.host, config.port))?;
    let addr = listener.local_addr()?;

    println!("{} http://{}", "✅ Server listening on".green().bold(), addr);
    println!("{} {}", "🔗 CORS origin:".cyan(), config.cors_origin);
    info!("Server listening on {}", addr);

    // Start the server
    axum::serve(listener, app).await?;

    Ok(())
}
