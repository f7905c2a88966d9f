// ABOUTME: Text-generation provider integration
// ABOUTME: Provider HTTP client, the generation trait, the response sanitizer, and a fake for tests

pub mod fake;
pub mod generator;
pub mod sanitize;
pub mod service;

// Re-export service types
pub use service::{
    AIResponse, AIService, AIServiceConfig, AIServiceError, AIServiceResult, Provider, Usage,
};

pub use fake::FakeGenerator;
pub use generator::TextGenerator;
pub use sanitize::strip_code_fences;
