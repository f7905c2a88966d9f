// ABOUTME: Presence validation for incoming gift requests
// ABOUTME: Turns raw wire input into validated preferences or a list of missing fields

use thiserror::Error;

use crate::types::{GiftType, Preferences, PreferencesInput, RecipeInput};

/// Wire names of the preference fields every generation request must carry
pub const REQUIRED_FIELDS: [&str; 7] = [
    "interests",
    "loveLanguage",
    "budget",
    "occasion",
    "gifterPreferences",
    "timeAvailable",
    "giftType",
];

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Missing required fields: {}", .0.join(", "))]
    MissingFields(Vec<&'static str>),

    #[error("Invalid gift type '{0}': expected 'solo' or 'group'")]
    InvalidGiftType(String),
}

/// Keep a string only if it has non-whitespace content
fn present(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

impl PreferencesInput {
    /// Check that every required field is present and non-blank.
    ///
    /// All missing fields are reported at once, in [`REQUIRED_FIELDS`] order.
    pub fn validate(self) -> Result<Preferences, ValidationError> {
        let interests = present(self.interests);
        let love_language = self.love_language.filter(|l| !l.is_empty());
        let budget = present(self.budget);
        let occasion = present(self.occasion);
        let gifter_preferences = present(self.gifter_preferences);
        let time_available = present(self.time_available);
        let gift_type = present(self.gift_type);

        match (
            interests,
            love_language,
            budget,
            occasion,
            gifter_preferences,
            time_available,
            gift_type,
        ) {
            (
                Some(interests),
                Some(love_language),
                Some(budget),
                Some(occasion),
                Some(gifter_preferences),
                Some(time_available),
                Some(gift_type),
            ) => Ok(Preferences {
                interests,
                love_language,
                budget,
                occasion,
                gifter_preferences,
                time_available,
                gift_type: gift_type.parse::<GiftType>()?,
            }),
            (a, b, c, d, e, f, g) => {
                let presence = [
                    a.is_some(),
                    b.is_some(),
                    c.is_some(),
                    d.is_some(),
                    e.is_some(),
                    f.is_some(),
                    g.is_some(),
                ];
                let missing = REQUIRED_FIELDS
                    .iter()
                    .zip(presence)
                    .filter(|(_, is_present)| !is_present)
                    .map(|(field, _)| *field)
                    .collect();
                Err(ValidationError::MissingFields(missing))
            }
        }
    }
}

impl RecipeInput {
    /// Merge top-level overrides into the nested preferences and validate.
    ///
    /// Returns the gift title and the validated preferences. A missing title
    /// is reported together with any missing preference fields.
    pub fn validate(self) -> Result<(String, Preferences), ValidationError> {
        let mut prefs = self.friend_preferences.unwrap_or_default();
        if let Some(occasion) = present(self.occasion) {
            prefs.occasion = Some(occasion);
        }
        if let Some(time_available) = present(self.time_available) {
            prefs.time_available = Some(time_available);
        }
        if let Some(gift_type) = present(self.gift_type) {
            prefs.gift_type = Some(gift_type);
        }

        let title = present(self.gift_title);
        match (title, prefs.validate()) {
            (Some(title), Ok(prefs)) => Ok((title, prefs)),
            (None, Err(ValidationError::MissingFields(mut missing))) => {
                missing.insert(0, "giftTitle");
                Err(ValidationError::MissingFields(missing))
            }
            (None, _) => Err(ValidationError::MissingFields(vec!["giftTitle"])),
            (Some(_), Err(e)) => Err(e),
        }
    }
}

/// Truncate to at most `max_chars` characters without splitting a code point
pub fn truncate(s: &str, max_chars: usize) -> &str {
    match s.char_indices().nth(max_chars) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}
