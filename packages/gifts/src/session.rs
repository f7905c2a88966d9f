// ABOUTME: Client-side gift session: form, idea list and recipe view state
// ABOUTME: Drives any GiftBackend through submit, regenerate, select and back

use async_trait::async_trait;
use guilted_core::{GiftIdea, GiftRecipe, Preferences};
use tracing::{info, warn};

use crate::error::{GiftError, Result};
use crate::service::GiftService;

/// Where gift ideas and recipes come from.
///
/// Implemented in-process by [`GiftService`] and over HTTP by the terminal
/// client.
#[async_trait]
pub trait GiftBackend: Send + Sync {
    async fn generate_ideas(&self, prefs: &Preferences) -> Result<Vec<GiftIdea>>;

    async fn generate_recipe(&self, gift_title: &str, prefs: &Preferences) -> Result<GiftRecipe>;
}

#[async_trait]
impl GiftBackend for GiftService {
    async fn generate_ideas(&self, prefs: &Preferences) -> Result<Vec<GiftIdea>> {
        GiftService::generate_ideas(self, prefs).await
    }

    async fn generate_recipe(&self, gift_title: &str, prefs: &Preferences) -> Result<GiftRecipe> {
        GiftService::generate_recipe(self, gift_title, prefs).await
    }
}

/// Load state of one kind of result (ideas or recipe)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum LoadState {
    #[default]
    Idle,
    Loading,
    Loaded,
    Failed(String),
}

impl LoadState {
    pub fn is_loading(&self) -> bool {
        matches!(self, LoadState::Loading)
    }
}

/// Screen the client should show
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Form,
    Ideas,
    Recipe,
}

/// State of one user's gift search.
///
/// Operations take `&mut self` across the request, so only one request is in
/// flight at a time.
#[derive(Debug)]
pub struct GiftSession<B> {
    backend: B,
    preferences: Option<Preferences>,
    ideas: Vec<GiftIdea>,
    selected: Option<GiftIdea>,
    recipe: Option<GiftRecipe>,
    ideas_state: LoadState,
    recipe_state: LoadState,
}

impl<B: GiftBackend> GiftSession<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            preferences: None,
            ideas: Vec::new(),
            selected: None,
            recipe: None,
            ideas_state: LoadState::Idle,
            recipe_state: LoadState::Idle,
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn preferences(&self) -> Option<&Preferences> {
        self.preferences.as_ref()
    }

    pub fn ideas(&self) -> &[GiftIdea] {
        &self.ideas
    }

    pub fn selected(&self) -> Option<&GiftIdea> {
        self.selected.as_ref()
    }

    pub fn recipe(&self) -> Option<&GiftRecipe> {
        self.recipe.as_ref()
    }

    pub fn ideas_state(&self) -> &LoadState {
        &self.ideas_state
    }

    pub fn recipe_state(&self) -> &LoadState {
        &self.recipe_state
    }

    pub fn view(&self) -> View {
        if self.selected.is_some() {
            View::Recipe
        } else if self.preferences.is_some() {
            View::Ideas
        } else {
            View::Form
        }
    }

    /// Store new preferences and load ideas for them
    pub async fn submit(&mut self, preferences: Preferences) -> Result<&[GiftIdea]> {
        self.preferences = Some(preferences);
        self.load_ideas().await
    }

    /// Ask again with the stored preferences
    pub async fn regenerate(&mut self) -> Result<&[GiftIdea]> {
        info!("Regenerating gift ideas");
        self.load_ideas().await
    }

    /// Select the idea at `index` and load its recipe
    pub async fn select(&mut self, index: usize) -> Result<&GiftRecipe> {
        let idea = self
            .ideas
            .get(index)
            .cloned()
            .ok_or(GiftError::IdeaNotFound(index))?;
        let prefs = self.preferences.as_ref().ok_or(GiftError::NoPreferences)?;

        self.recipe = None;
        self.recipe_state = LoadState::Loading;
        let title = idea.title.clone();
        self.selected = Some(idea);

        match self.backend.generate_recipe(&title, prefs).await {
            Ok(recipe) => {
                self.recipe_state = LoadState::Loaded;
                Ok(self.recipe.insert(recipe))
            }
            Err(e) => {
                warn!("Failed to generate gift recipe: {}", e);
                self.recipe_state = LoadState::Failed(e.to_string());
                Err(e)
            }
        }
    }

    /// Leave the recipe view and return to the idea list
    pub fn back(&mut self) {
        self.selected = None;
        self.recipe = None;
        self.recipe_state = LoadState::Idle;
    }

    /// Discard everything and return to the form
    pub fn reset(&mut self) {
        self.back();
        self.preferences = None;
        self.ideas.clear();
        self.ideas_state = LoadState::Idle;
    }

    async fn load_ideas(&mut self) -> Result<&[GiftIdea]> {
        let prefs = self.preferences.as_ref().ok_or(GiftError::NoPreferences)?;

        self.selected = None;
        self.recipe = None;
        self.recipe_state = LoadState::Idle;
        self.ideas.clear();
        self.ideas_state = LoadState::Loading;

        match self.backend.generate_ideas(prefs).await {
            Ok(ideas) => {
                self.ideas = ideas;
                self.ideas_state = LoadState::Loaded;
                Ok(&self.ideas)
            }
            Err(e) => {
                warn!("Failed to generate gift ideas: {}", e);
                self.ideas_state = LoadState::Failed(e.to_string());
                Err(e)
            }
        }
    }
}
