// ABOUTME: Error types for the gifts package
// ABOUTME: Defines all error variants for idea and recipe generation

use guilted_ai::AIServiceError;
use guilted_core::{ResponseFormatError, ValidationError};
use guilted_prompts::PromptError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GiftError {
    #[error("Invalid input: {0}")]
    InvalidInput(#[from] ValidationError),

    #[error("AI service error: {0}")]
    AIService(#[from] AIServiceError),

    #[error("Malformed AI response: {0}")]
    MalformedResponse(#[from] ResponseFormatError),

    #[error("Prompt error: {0}")]
    Prompt(#[from] PromptError),

    #[error("Idea count must be between 1 and {max}, got {count}")]
    InvalidIdeaCount { count: usize, max: usize },

    #[error("No preferences have been submitted yet")]
    NoPreferences,

    #[error("Gift idea not found at position {0}")]
    IdeaNotFound(usize),

    #[error("Gift server returned {status}: {message}")]
    Remote { status: u16, message: String },

    #[error("Could not reach gift server: {0}")]
    Transport(String),
}

impl GiftError {
    /// True when the error was caused by the caller's input rather than by
    /// the generation pipeline
    pub fn is_client_error(&self) -> bool {
        match self {
            GiftError::InvalidInput(_) | GiftError::NoPreferences | GiftError::IdeaNotFound(_) => {
                true
            }
            GiftError::Remote { status, .. } => (400..500).contains(status),
            _ => false,
        }
    }
}

pub type Result<T> = std::result::Result<T, GiftError>;
