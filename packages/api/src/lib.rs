// ABOUTME: HTTP API layer for Guilted providing the gift endpoints and routing
// ABOUTME: Integration layer between axum and the gift service

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use guilted_gifts::GiftService;

pub mod error;
pub mod gift_handlers;
pub mod health;

#[cfg(test)]
mod tests;

pub use error::{ApiError, ApiResult, Operation};
pub use gift_handlers::{IdeasRequest, IdeasResponse, RecipeResponse};

/// Shared handler state; immutable after startup
#[derive(Clone)]
pub struct AppState {
    pub gifts: Arc<GiftService>,
}

impl AppState {
    pub fn new(gifts: GiftService) -> Self {
        Self {
            gifts: Arc::new(gifts),
        }
    }
}

/// Creates the gift generation router (nested under /api)
pub fn create_gifts_router() -> Router<AppState> {
    Router::new()
        .route("/generate-gifts", post(gift_handlers::generate_gifts))
        .route("/generate-recipe", post(gift_handlers::generate_recipe))
}

/// Creates the full API router
pub fn create_router(state: AppState) -> Router {
    let api = create_gifts_router().route("/health", get(health::health_check));

    Router::new().nest("/api", api).with_state(state)
}
