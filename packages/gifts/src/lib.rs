// ABOUTME: Guilted gifts library - idea and recipe generation
// ABOUTME: Provides the gift service, its prompts, and the client-side session state machine

pub mod error;
pub mod prompts;
pub mod service;
pub mod session;

pub use error::{GiftError, Result};
pub use service::GiftService;
pub use session::{GiftBackend, GiftSession, LoadState, View};

/// Re-export commonly used types
pub mod prelude {
    pub use crate::error::{GiftError, Result};
    pub use crate::service::GiftService;
    pub use crate::session::{GiftBackend, GiftSession, LoadState};
    pub use guilted_core::{GiftIdea, GiftRecipe, Preferences, PreferencesInput, RecipeInput};
}
