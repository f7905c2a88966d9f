// ABOUTME: Gift service that turns friend preferences into gift ideas and recipes
// ABOUTME: Formats the prompt, calls the text generator, sanitizes and validates the reply

use std::sync::Arc;

use guilted_ai::{strip_code_fences, TextGenerator};
use guilted_core::{
    parse_gift_ideas, parse_gift_recipe, truncate, GiftIdea, GiftRecipe, Preferences,
    DEFAULT_IDEA_COUNT, MAX_IDEA_COUNT,
};
use guilted_prompts::PromptManager;
use tracing::{debug, error, info, warn};

use crate::error::{GiftError, Result};
use crate::prompts;

/// Longest slice of a model reply written to the log
const LOG_SNIPPET_CHARS: usize = 200;

/// Stateless gift generation pipeline.
///
/// Every call is independent: no caching, no retry. Shared across requests
/// behind an `Arc`.
#[derive(Clone)]
pub struct GiftService {
    generator: Arc<dyn TextGenerator>,
    prompts: Arc<PromptManager>,
    idea_count: usize,
}

impl GiftService {
    pub fn new(generator: Arc<dyn TextGenerator>, prompts: PromptManager) -> Self {
        Self {
            generator,
            prompts: Arc::new(prompts),
            idea_count: DEFAULT_IDEA_COUNT,
        }
    }

    /// Set how many ideas each idea request asks for (1..=10)
    pub fn with_idea_count(mut self, count: usize) -> Result<Self> {
        if !(1..=MAX_IDEA_COUNT).contains(&count) {
            return Err(GiftError::InvalidIdeaCount {
                count,
                max: MAX_IDEA_COUNT,
            });
        }
        self.idea_count = count;
        Ok(self)
    }

    pub fn idea_count(&self) -> usize {
        self.idea_count
    }

    pub fn model(&self) -> &str {
        self.generator.model()
    }

    /// Generate gift ideas for validated preferences
    pub async fn generate_ideas(&self, prefs: &Preferences) -> Result<Vec<GiftIdea>> {
        let prompt = prompts::ideas_prompt(&self.prompts, prefs, self.idea_count)?;
        let system = prompts::system_prompt(&self.prompts)?;

        info!(
            "Generating {} gift ideas (occasion: {}, type: {})",
            self.idea_count, prefs.occasion, prefs.gift_type
        );
        let text = self.complete(&prompt, &system).await?;

        let ideas = parse_gift_ideas(strip_code_fences(&text)).map_err(|e| {
            error!("Invalid gift ideas format: {}", e);
            debug!("Rejected reply: {}", truncate(&text, LOG_SNIPPET_CHARS));
            e
        })?;

        if ideas.len() != self.idea_count {
            warn!(
                "Asked for {} gift ideas, model returned {}",
                self.idea_count,
                ideas.len()
            );
        }
        info!("Generated {} gift ideas", ideas.len());
        Ok(ideas)
    }

    /// Generate the recipe for one chosen gift
    pub async fn generate_recipe(
        &self,
        gift_title: &str,
        prefs: &Preferences,
    ) -> Result<GiftRecipe> {
        let prompt = prompts::recipe_prompt(&self.prompts, gift_title, prefs)?;
        let system = prompts::system_prompt(&self.prompts)?;

        info!("Generating recipe for '{}'", gift_title);
        let text = self.complete(&prompt, &system).await?;

        let recipe = parse_gift_recipe(strip_code_fences(&text)).map_err(|e| {
            error!("Invalid gift recipe format: {}", e);
            debug!("Rejected reply: {}", truncate(&text, LOG_SNIPPET_CHARS));
            e
        })?;

        info!(
            "Generated recipe '{}' with {} materials and {} steps",
            recipe.title,
            recipe.materials.len(),
            recipe.steps.len()
        );
        Ok(recipe)
    }

    async fn complete(&self, prompt: &str, system: &str) -> Result<String> {
        debug!("Prompt: {}", truncate(prompt, LOG_SNIPPET_CHARS));
        self.generator
            .generate(prompt, Some(system))
            .await
            .map_err(|e| {
                error!("Text generation failed ({}): {}", self.generator.model(), e);
                GiftError::from(e)
            })
    }
}

impl std::fmt::Debug for GiftService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GiftService")
            .field("model", &self.generator.model())
            .field("idea_count", &self.idea_count)
            .finish()
    }
}
