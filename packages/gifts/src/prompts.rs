// ABOUTME: Gift prompts built from friend preferences via the centralized PromptManager
// ABOUTME: Wrapper functions that fill the idea and recipe templates

use guilted_core::Preferences;
use guilted_prompts::{PromptError, PromptManager};

pub const SYSTEM_PROMPT_ID: &str = "gifts";
pub const IDEAS_PROMPT_ID: &str = "ideas";
pub const RECIPE_PROMPT_ID: &str = "recipe";

/// Get the system prompt shared by both generation calls
pub fn system_prompt(manager: &PromptManager) -> Result<String, PromptError> {
    manager.get_system_prompt(SYSTEM_PROMPT_ID)
}

/// Ask for `count` gift ideas as a JSON array
pub fn ideas_prompt(
    manager: &PromptManager,
    prefs: &Preferences,
    count: usize,
) -> Result<String, PromptError> {
    let count = count.to_string();
    let love_language = prefs.love_language.to_string();

    let mut params = preference_params(prefs, &love_language);
    params.push(("count", &count));
    manager.get_prompt(IDEAS_PROMPT_ID, &params)
}

/// Ask for a single recipe object for the chosen gift
pub fn recipe_prompt(
    manager: &PromptManager,
    gift_title: &str,
    prefs: &Preferences,
) -> Result<String, PromptError> {
    let love_language = prefs.love_language.to_string();

    let mut params = preference_params(prefs, &love_language);
    params.push(("giftTitle", gift_title));
    manager.get_prompt(RECIPE_PROMPT_ID, &params)
}

fn preference_params<'a>(
    prefs: &'a Preferences,
    love_language: &'a str,
) -> Vec<(&'static str, &'a str)> {
    vec![
        ("interests", prefs.interests.as_str()),
        ("loveLanguage", love_language),
        ("budget", prefs.budget.as_str()),
        ("occasion", prefs.occasion.as_str()),
        ("gifterPreferences", prefs.gifter_preferences.as_str()),
        ("timeAvailable", prefs.time_available.as_str()),
        ("giftType", prefs.gift_type.as_str()),
    ]
}
