// ABOUTME: Data model shared across Guilted packages
// ABOUTME: Friend preferences (raw and validated), gift ideas, and gift recipes

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::validation::ValidationError;

/// Whether the gift comes from one person or a group
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GiftType {
    Solo,
    Group,
}

impl GiftType {
    pub fn as_str(&self) -> &'static str {
        match self {
            GiftType::Solo => "solo",
            GiftType::Group => "group",
        }
    }
}

impl fmt::Display for GiftType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GiftType {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "solo" => Ok(GiftType::Solo),
            "group" => Ok(GiftType::Group),
            _ => Err(ValidationError::InvalidGiftType(s.to_string())),
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum OneOrMany {
    One(String),
    Many(Vec<String>),
}

/// One or more love languages.
///
/// Older form versions send a single string, newer ones a list; both
/// deserialize into the same ordered, de-duplicated set. Always serializes as
/// a list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "OneOrMany", into = "Vec<String>")]
pub struct LoveLanguages(Vec<String>);

impl LoveLanguages {
    pub fn new<I, S>(languages: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut set: Vec<String> = Vec::new();
        for language in languages {
            let language = language.into();
            if language.trim().is_empty() || set.contains(&language) {
                continue;
            }
            set.push(language);
        }
        Self(set)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

impl From<OneOrMany> for LoveLanguages {
    fn from(value: OneOrMany) -> Self {
        match value {
            OneOrMany::One(language) => LoveLanguages::new([language]),
            OneOrMany::Many(languages) => LoveLanguages::new(languages),
        }
    }
}

impl From<LoveLanguages> for Vec<String> {
    fn from(value: LoveLanguages) -> Self {
        value.0
    }
}

impl fmt::Display for LoveLanguages {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.join(", "))
    }
}

/// Friend preferences exactly as they arrive on the wire.
///
/// Every field is optional here so that presence can be checked field by field
/// and reported together; see [`PreferencesInput::validate`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PreferencesInput {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub interests: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub love_language: Option<LoveLanguages>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub budget: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub occasion: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gifter_preferences: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_available: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gift_type: Option<String>,
}

/// Validated friend preferences. All fields are present and non-blank.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Preferences {
    pub interests: String,
    pub love_language: LoveLanguages,
    pub budget: String,
    pub occasion: String,
    pub gifter_preferences: String,
    pub time_available: String,
    pub gift_type: GiftType,
}

impl From<Preferences> for PreferencesInput {
    fn from(prefs: Preferences) -> Self {
        PreferencesInput {
            interests: Some(prefs.interests),
            love_language: Some(prefs.love_language),
            budget: Some(prefs.budget),
            occasion: Some(prefs.occasion),
            gifter_preferences: Some(prefs.gifter_preferences),
            time_available: Some(prefs.time_available),
            gift_type: Some(prefs.gift_type.as_str().to_string()),
        }
    }
}

/// Recipe request body as it arrives on the wire.
///
/// `occasion`, `timeAvailable` and `giftType` may also be sent beside
/// `friendPreferences`; when present they take precedence over the nested
/// values.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeInput {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gift_title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub friend_preferences: Option<PreferencesInput>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub occasion: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_available: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gift_type: Option<String>,
}

/// A gift suggestion returned by the idea generation call
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GiftIdea {
    pub id: u64,
    pub title: String,
    pub description: String,
}

/// Step-by-step instructions for making a chosen gift
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GiftRecipe {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub estimated_price: String,
    pub estimated_duration: String,
    pub materials: Vec<String>,
    pub steps: Vec<String>,
}
