// ABOUTME: Rust implementation of centralized prompt management
// ABOUTME: Provides type-safe prompt loading and parameter substitution from JSON files

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use thiserror::Error;
use tracing::info;

/// Prompt files compiled into the binary, keyed by their path for error messages
const BUILTIN_PROMPTS: [(&str, &str); 3] = [
    ("gifts/ideas.json", include_str!("../gifts/ideas.json")),
    ("gifts/recipe.json", include_str!("../gifts/recipe.json")),
    ("system/gifts.json", include_str!("../system/gifts.json")),
];

/// Category used by system prompts
const SYSTEM_CATEGORY: &str = "system";

#[derive(Error, Debug)]
pub enum PromptError {
    #[error("Prompt not found: {0}")]
    NotFound(String),

    #[error("Missing required parameter: {0}")]
    MissingParameter(String),

    #[error("Failed to read prompt file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to parse prompt JSON: {0}")]
    ParseError(#[from] serde_json::Error),

    #[error("Invalid prompt format: {0}")]
    InvalidFormat(String),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PromptMetadata {
    pub version: String,
    #[serde(rename = "lastModified")]
    pub last_modified: String,
    pub description: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Prompt {
    pub id: String,
    pub name: String,
    pub category: String,
    pub template: String,
    pub parameters: Vec<String>,
    #[serde(rename = "outputSchema", skip_serializing_if = "Option::is_none")]
    pub output_schema: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<PromptMetadata>,
}

/// Immutable set of prompts, keyed by id.
///
/// Built-in prompts are always loaded; an overrides directory may replace any
/// of them (or add new ones) by id.
#[derive(Debug, Clone)]
pub struct PromptManager {
    prompts: HashMap<String, Prompt>,
}

impl PromptManager {
    /// Create a PromptManager with the built-in prompts only
    pub fn builtin() -> Result<Self, PromptError> {
        let mut prompts = HashMap::new();
        for (source, content) in BUILTIN_PROMPTS {
            let prompt = parse_prompt(content, source)?;
            prompts.insert(prompt.id.clone(), prompt);
        }
        Ok(Self { prompts })
    }

    /// Create a PromptManager with the built-in prompts plus overrides.
    ///
    /// Every `*.json` file directly inside `overrides_dir` or one of its
    /// category subdirectories is loaded and replaces the built-in prompt with
    /// the same id.
    pub fn new(overrides_dir: Option<&Path>) -> Result<Self, PromptError> {
        let mut manager = Self::builtin()?;

        if let Some(dir) = overrides_dir {
            let mut files = json_files(dir)?;
            for entry in fs::read_dir(dir)? {
                let path = entry?.path();
                if path.is_dir() {
                    files.extend(json_files(&path)?);
                }
            }

            for path in files {
                let content = fs::read_to_string(&path)?;
                let prompt = parse_prompt(&content, &path.display().to_string())?;
                info!("Loaded prompt override '{}' from {}", prompt.id, path.display());
                manager.prompts.insert(prompt.id.clone(), prompt);
            }
        }

        Ok(manager)
    }

    /// Get a prompt by ID with parameter substitution
    pub fn get_prompt(
        &self,
        prompt_id: &str,
        parameters: &[(&str, &str)],
    ) -> Result<String, PromptError> {
        let prompt = self.get_prompt_metadata(prompt_id)?;

        // Always validate required parameters, even if empty list provided
        substitute_parameters(&prompt.template, parameters, &prompt.parameters)
    }

    /// Get a system prompt by id
    pub fn get_system_prompt(&self, prompt_id: &str) -> Result<String, PromptError> {
        self.prompts
            .get(prompt_id)
            .filter(|p| p.category == SYSTEM_CATEGORY)
            .map(|p| p.template.clone())
            .ok_or_else(|| PromptError::NotFound(format!("{}/{}", SYSTEM_CATEGORY, prompt_id)))
    }

    /// Get prompt metadata without substitution
    pub fn get_prompt_metadata(&self, prompt_id: &str) -> Result<&Prompt, PromptError> {
        self.prompts
            .get(prompt_id)
            .ok_or_else(|| PromptError::NotFound(prompt_id.to_string()))
    }

    /// List the ids of all prompts in a category, sorted
    pub fn list_prompts(&self, category: &str) -> Vec<String> {
        let mut ids: Vec<String> = self
            .prompts
            .values()
            .filter(|p| p.category == category)
            .map(|p| p.id.clone())
            .collect();
        ids.sort();
        ids
    }
}

fn json_files(dir: &Path) -> Result<Vec<std::path::PathBuf>, PromptError> {
    let mut files = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if path.extension().and_then(|s| s.to_str()) == Some("json") {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

fn parse_prompt(content: &str, source: &str) -> Result<Prompt, PromptError> {
    let prompt: Prompt = serde_json::from_str(content)?;

    // Basic validation
    if prompt.id.is_empty() || prompt.template.is_empty() || prompt.category.is_empty() {
        return Err(PromptError::InvalidFormat(format!(
            "Invalid prompt format in {}",
            source
        )));
    }

    Ok(prompt)
}

/// Substitute `{{parameter}}` placeholders in a template
fn substitute_parameters(
    template: &str,
    parameters: &[(&str, &str)],
    required_params: &[String],
) -> Result<String, PromptError> {
    let param_map: HashMap<&str, &str> = parameters.iter().copied().collect();

    for required in required_params {
        if !param_map.contains_key(required.as_str()) {
            return Err(PromptError::MissingParameter(required.clone()));
        }
    }

    // Single pass over the template; substituted values are never rescanned
    let mut result = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(start) = rest.find("{{") {
        result.push_str(&rest[..start]);
        let after = &rest[start + 2..];
        let value = after
            .find("}}")
            .and_then(|end| param_map.get(&after[..end]).map(|value| (end, *value)));

        match value {
            Some((end, value)) => {
                result.push_str(value);
                rest = &after[end + 2..];
            }
            None => {
                result.push('{');
                rest = &rest[start + 1..];
            }
        }
    }
    result.push_str(rest);

    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gift_params<'a>(extra: (&'a str, &'a str)) -> Vec<(&'a str, &'a str)> {
        vec![
            extra,
            ("interests", "pottery"),
            ("loveLanguage", "Quality Time"),
            ("budget", "$40"),
            ("occasion", "Birthday"),
            ("gifterPreferences", "I like painting"),
            ("timeAvailable", "Two weekends"),
            ("giftType", "solo"),
        ]
    }

    #[test]
    fn test_load_system_prompt() {
        let manager = PromptManager::builtin().unwrap();
        let prompt = manager.get_system_prompt("gifts").unwrap();
        assert!(prompt.contains("gift advisor"));
        assert!(prompt.contains("valid JSON"));
    }

    #[test]
    fn test_ideas_prompt_substitution() {
        let manager = PromptManager::builtin().unwrap();
        let prompt = manager
            .get_prompt("ideas", &gift_params(("count", "3")))
            .unwrap();
        assert!(prompt.starts_with("Generate 3 personalized"));
        assert!(prompt.contains("Interests: pottery"));
        assert!(prompt.contains("Gift Type: solo"));
        assert!(prompt.contains("\"description\": \"Short description of the gift\""));
        assert!(!prompt.contains("{{"));
    }

    #[test]
    fn test_recipe_prompt_substitution() {
        let manager = PromptManager::builtin().unwrap();
        let prompt = manager
            .get_prompt("recipe", &gift_params(("giftTitle", "Clay Mug")))
            .unwrap();
        assert!(prompt.contains("titled \"Clay Mug\""));
        assert!(prompt.contains("\"title\": \"Clay Mug\""));
        assert!(prompt.contains("estimatedDuration"));
        assert!(!prompt.contains("{{"));
    }

    #[test]
    fn test_values_are_inserted_literally() {
        let manager = PromptManager::builtin().unwrap();
        let mut params = gift_params(("count", "3"));
        params[1] = ("interests", "templates like {{budget}} and {{count}}");
        let prompt = manager.get_prompt("ideas", &params).unwrap();
        assert!(prompt.contains("Interests: templates like {{budget}} and {{count}}"));
        assert!(prompt.contains("Budget: $40"));
    }

    #[test]
    fn test_unknown_placeholders_are_kept() {
        let params = [("name", "Ada")];
        let result = substitute_parameters("{{{name}}} {{other}} {{", &params, &[]).unwrap();
        assert_eq!(result, "{Ada} {{other}} {{");
    }

    #[test]
    fn test_missing_parameter_error() {
        let manager = PromptManager::builtin().unwrap();
        let result = manager.get_prompt("ideas", &[("count", "3")]);
        assert!(matches!(result, Err(PromptError::MissingParameter(_))));
    }

    #[test]
    fn test_prompt_not_found() {
        let manager = PromptManager::builtin().unwrap();
        let result = manager.get_prompt("nonexistent", &[]);
        assert!(matches!(result, Err(PromptError::NotFound(_))));
    }

    #[test]
    fn test_system_prompt_lookup_checks_category() {
        let manager = PromptManager::builtin().unwrap();
        assert!(matches!(
            manager.get_system_prompt("ideas"),
            Err(PromptError::NotFound(_))
        ));
    }

    #[test]
    fn test_list_prompts() {
        let manager = PromptManager::builtin().unwrap();
        assert_eq!(manager.list_prompts("gifts"), vec!["ideas", "recipe"]);
        assert_eq!(manager.list_prompts("system"), vec!["gifts"]);
    }

    #[test]
    fn test_overrides_replace_builtin_by_id() {
        let dir = tempfile::tempdir().unwrap();
        let gifts_dir = dir.path().join("gifts");
        fs::create_dir(&gifts_dir).unwrap();
        fs::write(
            gifts_dir.join("ideas.json"),
            r#"{"id":"ideas","name":"Short","category":"gifts","template":"Give {{count}} ideas","parameters":["count"]}"#,
        )
        .unwrap();

        let manager = PromptManager::new(Some(dir.path())).unwrap();
        let prompt = manager.get_prompt("ideas", &[("count", "2")]).unwrap();
        assert_eq!(prompt, "Give 2 ideas");
        // Untouched prompts keep their built-in template
        assert!(manager.get_prompt_metadata("recipe").is_ok());
    }

    #[test]
    fn test_invalid_override_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("broken.json"),
            r#"{"id":"","name":"x","category":"gifts","template":"t","parameters":[]}"#,
        )
        .unwrap();

        let result = PromptManager::new(Some(dir.path()));
        assert!(matches!(result, Err(PromptError::InvalidFormat(_))));
    }
}
