// ABOUTME: HTTP request handlers for gift idea and gift recipe generation
// ABOUTME: Validates preferences before any upstream call and wraps results in response envelopes

use axum::{extract::rejection::JsonRejection, extract::State, Json};
use guilted_core::{GiftIdea, GiftRecipe, PreferencesInput, RecipeInput};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::{ApiError, ApiResult, Operation};
use crate::AppState;

/// Request body for idea generation.
///
/// The canonical shape nests the preferences under `friendPreferences`; the
/// fields may also be sent flat at the top level. When `friendPreferences` is
/// present it wins and its own type errors are reported as-is.
#[derive(Debug, Deserialize)]
pub struct IdeasRequest {
    #[serde(rename = "friendPreferences")]
    friend_preferences: Option<PreferencesInput>,
    #[serde(flatten)]
    flat: PreferencesInput,
}

impl IdeasRequest {
    pub fn into_preferences(self) -> PreferencesInput {
        self.friend_preferences.unwrap_or(self.flat)
    }
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IdeasResponse {
    pub gift_ideas: Vec<GiftIdea>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RecipeResponse {
    pub recipe: GiftRecipe,
}

/// Generate gift ideas for a friend's preferences
pub async fn generate_gifts(
    State(state): State<AppState>,
    payload: Result<Json<IdeasRequest>, JsonRejection>,
) -> ApiResult<Json<IdeasResponse>> {
    let Json(request) = payload?;
    let prefs = request.into_preferences().validate()?;

    info!(
        "Generating gift ideas (occasion: {}, type: {})",
        prefs.occasion, prefs.gift_type
    );

    let gift_ideas = state
        .gifts
        .generate_ideas(&prefs)
        .await
        .map_err(|e| ApiError::generation(Operation::Ideas, e))?;

    Ok(Json(IdeasResponse { gift_ideas }))
}

/// Generate the recipe for one chosen gift
pub async fn generate_recipe(
    State(state): State<AppState>,
    payload: Result<Json<RecipeInput>, JsonRejection>,
) -> ApiResult<Json<RecipeResponse>> {
    let Json(request) = payload?;
    let (gift_title, prefs) = request.validate()?;

    info!("Generating gift recipe for '{}'", gift_title);

    let recipe = state
        .gifts
        .generate_recipe(&gift_title, &prefs)
        .await
        .map_err(|e| ApiError::generation(Operation::Recipe, e))?;

    Ok(Json(RecipeResponse { recipe }))
}
