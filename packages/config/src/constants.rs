// ABOUTME: Environment variable name constants and defaults
// ABOUTME: Centralized definitions of every environment variable Guilted reads

// Server Configuration
pub const GUILTED_API_PORT: &str = "GUILTED_API_PORT";
pub const PORT: &str = "PORT"; // Legacy
pub const GUILTED_HOST: &str = "GUILTED_HOST";

// CORS Configuration
pub const GUILTED_CORS_ORIGIN: &str = "GUILTED_CORS_ORIGIN";
pub const CORS_ORIGIN: &str = "CORS_ORIGIN"; // Legacy

// Generation Provider
pub const GUILTED_AI_PROVIDER: &str = "GUILTED_AI_PROVIDER";
pub const GUILTED_MODEL: &str = "GUILTED_MODEL";
pub const GUILTED_AI_BASE_URL: &str = "GUILTED_AI_BASE_URL";
pub const GUILTED_AI_TIMEOUT_SECS: &str = "GUILTED_AI_TIMEOUT_SECS";
pub const OPENAI_API_KEY: &str = "OPENAI_API_KEY";
pub const ANTHROPIC_API_KEY: &str = "ANTHROPIC_API_KEY";

// Gift Generation
pub const GUILTED_IDEA_COUNT: &str = "GUILTED_IDEA_COUNT";
pub const GUILTED_PROMPTS_DIR: &str = "GUILTED_PROMPTS_DIR";

// Terminal Client
pub const GUILTED_SERVER_URL: &str = "GUILTED_SERVER_URL";

// Logging
pub const RUST_LOG: &str = "RUST_LOG";

// Defaults
pub const DEFAULT_API_PORT: u16 = 4001;
pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_CORS_ORIGIN: &str = "http://localhost:3000";
pub const DEFAULT_AI_TIMEOUT_SECS: u64 = 120;
pub const DEFAULT_SERVER_URL: &str = "http://localhost:4001";
pub const DEFAULT_LOG_FILTER: &str = "info";
