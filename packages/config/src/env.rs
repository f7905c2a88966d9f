// ABOUTME: Environment variable lookup with legacy-name fallback
// ABOUTME: Blank values are treated the same as unset ones

use std::env;
use tracing::debug;

/// Read a variable, trimmed; empty values count as unset
pub fn env_var(name: &str) -> Option<String> {
    env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Read `primary`, falling back to the legacy name `fallback`
pub fn env_var_with_fallback(primary: &str, fallback: &str) -> Option<String> {
    env_var(primary).or_else(|| {
        let value = env_var(fallback)?;
        debug!("{} not set, using legacy {}", primary, fallback);
        Some(value)
    })
}
