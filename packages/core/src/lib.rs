// ABOUTME: Core types, validation, and model-output parsing for Guilted
// ABOUTME: Foundational package shared by the gift service, the API, and the CLI

pub mod constants;
pub mod response;
pub mod types;
pub mod validation;

// Re-export main types
pub use types::{
    GiftIdea, GiftRecipe, GiftType, LoveLanguages, Preferences, PreferencesInput, RecipeInput,
};

// Re-export constants
pub use constants::{DEFAULT_IDEA_COUNT, LOVE_LANGUAGES, MAX_IDEA_COUNT};

// Re-export model-output parsing
pub use response::{parse_gift_ideas, parse_gift_recipe, ResponseFormatError};

// Re-export validation
pub use validation::{truncate, ValidationError};
