// ABOUTME: Terminal views for the gift session: preference form, idea list and recipe
// ABOUTME: Prompts use inquire; rendering returns plain strings so it can be tested

use std::fmt;

use colored::*;
use comfy_table::{modifiers::UTF8_ROUND_CORNERS, presets::UTF8_FULL, ContentArrangement, Table};
use guilted_core::{
    GiftIdea, GiftRecipe, GiftType, LoveLanguages, Preferences, PreferencesInput, LOVE_LANGUAGES,
};
use guilted_gifts::GiftError;
use inquire::{InquireError, MultiSelect, Select, Text};

/// Ask for every preference that was not given on the command line
pub fn prompt_preferences(prefilled: PreferencesInput) -> anyhow::Result<Preferences> {
    println!("{}", "🎁 Tell us about your friend".blue().bold());
    println!();

    let input = PreferencesInput {
        interests: Some(text_field(
            prefilled.interests,
            "Interests:",
            "Hobbies, favourite things, what they talk about",
        )?),
        love_language: Some(love_language_field(prefilled.love_language)?),
        budget: Some(text_field(prefilled.budget, "Budget:", "e.g. $40")?),
        occasion: Some(text_field(
            prefilled.occasion,
            "Occasion:",
            "Birthday, anniversary, just because...",
        )?),
        gifter_preferences: Some(text_field(
            prefilled.gifter_preferences,
            "Your skills and preferences:",
            "What you enjoy making",
        )?),
        time_available: Some(text_field(
            prefilled.time_available,
            "Time available:",
            "e.g. two weekends",
        )?),
        gift_type: Some(gift_type_field(prefilled.gift_type)?),
    };

    Ok(input.validate()?)
}

fn text_field(
    prefilled: Option<String>,
    label: &str,
    help: &str,
) -> Result<String, InquireError> {
    match prefilled.filter(|v| !v.trim().is_empty()) {
        Some(value) => Ok(value),
        None => Text::new(label)
            .with_help_message(help)
            .with_validator(inquire::required!("This field is required"))
            .prompt(),
    }
}

fn love_language_field(prefilled: Option<LoveLanguages>) -> Result<LoveLanguages, InquireError> {
    if let Some(languages) = prefilled.filter(|l| !l.is_empty()) {
        return Ok(languages);
    }

    loop {
        let picked = MultiSelect::new("Love language(s):", LOVE_LANGUAGES.to_vec())
            .with_help_message("Space to toggle, enter to confirm")
            .prompt()?;
        if !picked.is_empty() {
            return Ok(LoveLanguages::new(picked));
        }
        println!("{}", "Pick at least one love language".yellow());
    }
}

fn gift_type_field(prefilled: Option<String>) -> Result<String, InquireError> {
    match prefilled.filter(|v| !v.trim().is_empty()) {
        Some(value) => Ok(value),
        None => Select::new("Gift type:", vec![GiftType::Solo, GiftType::Group])
            .prompt()
            .map(|gift_type| gift_type.as_str().to_string()),
    }
}

/// Render the idea list as a table
pub fn render_ideas(ideas: &[GiftIdea]) -> String {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic);

    table.set_header(vec!["ID", "Title", "Description"]);

    for idea in ideas {
        table.add_row(vec![
            idea.id.to_string(),
            idea.title.clone(),
            idea.description.clone(),
        ]);
    }

    table.to_string()
}

/// Follow-up line printed under a failed request
pub fn error_hint(err: &GiftError) -> &'static str {
    match err {
        GiftError::Transport(_) => "Is the server running? Start it with 'guilted serve'",
        e if e.is_client_error() => "Check the gift details and try again",
        _ => "The gift service had a problem; try again in a moment",
    }
}

/// Render a recipe with numbered materials and steps
pub fn render_recipe(recipe: &GiftRecipe) -> String {
    let mut lines = vec![format!("🧶 {}", recipe.title).blue().bold().to_string()];

    if let Some(description) = &recipe.description {
        lines.push(description.dimmed().to_string());
    }
    lines.push(String::new());
    lines.push(format!("{} {}", "Estimated price:".cyan(), recipe.estimated_price));
    lines.push(format!("{} {}", "Estimated time:".cyan(), recipe.estimated_duration));

    lines.push(String::new());
    lines.push("Materials".bold().to_string());
    lines.extend(numbered(&recipe.materials));

    lines.push(String::new());
    lines.push("Steps".bold().to_string());
    lines.extend(numbered(&recipe.steps));

    lines.join("\n")
}

fn numbered(items: &[String]) -> impl Iterator<Item = String> + '_ {
    items
        .iter()
        .enumerate()
        .map(|(i, item)| format!("  {}. {}", i + 1, item))
}

/// What the user wants to do from the idea list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdeaAction {
    Select(usize),
    Regenerate,
    StartOver,
    Quit,
}

/// What the user wants to do from the recipe view
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecipeAction {
    Back,
    StartOver,
    Quit,
}

struct Choice<A> {
    label: String,
    action: A,
}

impl<A> fmt::Display for Choice<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label)
    }
}

/// Menu entries for the idea list, one per idea followed by the fixed actions
pub fn idea_choices(ideas: &[GiftIdea]) -> Vec<(String, IdeaAction)> {
    let mut choices: Vec<(String, IdeaAction)> = ideas
        .iter()
        .enumerate()
        .map(|(i, idea)| (format!("Make \"{}\"", idea.title), IdeaAction::Select(i)))
        .collect();

    choices.push(("Regenerate ideas".to_string(), IdeaAction::Regenerate));
    choices.push(("Start over".to_string(), IdeaAction::StartOver));
    choices.push(("Quit".to_string(), IdeaAction::Quit));
    choices
}

pub fn choose_idea_action(ideas: &[GiftIdea]) -> Result<IdeaAction, InquireError> {
    let options = idea_choices(ideas)
        .into_iter()
        .map(|(label, action)| Choice { label, action })
        .collect();

    Select::new("What next?", options)
        .prompt()
        .map(|choice| choice.action)
}

pub fn choose_recipe_action() -> Result<RecipeAction, InquireError> {
    let options = vec![
        Choice {
            label: "Back to gift ideas".to_string(),
            action: RecipeAction::Back,
        },
        Choice {
            label: "Start over".to_string(),
            action: RecipeAction::StartOver,
        },
        Choice {
            label: "Quit".to_string(),
            action: RecipeAction::Quit,
        },
    ];

    Select::new("What next?", options)
        .prompt()
        .map(|choice| choice.action)
}
