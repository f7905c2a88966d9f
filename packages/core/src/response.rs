// ABOUTME: Structural validation of the model's JSON replies
// ABOUTME: Parses sanitized model text into gift ideas and gift recipes, rejecting partial data

use serde_json::{Map, Value};
use thiserror::Error;

use crate::types::{GiftIdea, GiftRecipe};

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ResponseFormatError {
    #[error("Response is not valid JSON: {0}")]
    InvalidJson(String),

    #[error("Expected a JSON {expected}, got {found}")]
    WrongShape {
        expected: &'static str,
        found: &'static str,
    },

    #[error("Response contained no gift ideas")]
    NoIdeas,

    #[error("Gift idea {index} is not an object")]
    IdeaNotObject { index: usize },

    #[error("Gift idea {index} has a missing or invalid '{field}'")]
    InvalidIdea { index: usize, field: &'static str },

    #[error("Recipe has a missing or invalid '{field}'")]
    InvalidRecipe { field: &'static str },
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn parse_json(text: &str) -> Result<Value, ResponseFormatError> {
    serde_json::from_str(text).map_err(|e| ResponseFormatError::InvalidJson(e.to_string()))
}

fn non_empty_str(obj: &Map<String, Value>, field: &str) -> Option<String> {
    obj.get(field)
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

/// Parse the idea reply: a non-empty JSON array of `{id, title, description}`.
///
/// The whole reply is rejected if any element is invalid. An `id` sent as a
/// numeric string is accepted.
pub fn parse_gift_ideas(text: &str) -> Result<Vec<GiftIdea>, ResponseFormatError> {
    let value = parse_json(text)?;
    let items = value.as_array().ok_or(ResponseFormatError::WrongShape {
        expected: "array",
        found: kind(&value),
    })?;

    if items.is_empty() {
        return Err(ResponseFormatError::NoIdeas);
    }

    items
        .iter()
        .enumerate()
        .map(|(index, item)| {
            let obj = item
                .as_object()
                .ok_or(ResponseFormatError::IdeaNotObject { index })?;

            let id = match obj.get("id") {
                Some(Value::Number(n)) => n.as_u64(),
                Some(Value::String(s)) => s.trim().parse::<u64>().ok(),
                _ => None,
            }
            .ok_or(ResponseFormatError::InvalidIdea { index, field: "id" })?;

            let title = non_empty_str(obj, "title").ok_or(ResponseFormatError::InvalidIdea {
                index,
                field: "title",
            })?;
            let description =
                non_empty_str(obj, "description").ok_or(ResponseFormatError::InvalidIdea {
                    index,
                    field: "description",
                })?;

            Ok(GiftIdea {
                id,
                title,
                description,
            })
        })
        .collect()
}

fn string_list(
    obj: &Map<String, Value>,
    field: &'static str,
) -> Result<Vec<String>, ResponseFormatError> {
    let invalid = ResponseFormatError::InvalidRecipe { field };
    let items = obj
        .get(field)
        .and_then(Value::as_array)
        .filter(|items| !items.is_empty())
        .ok_or_else(|| invalid.clone())?;

    items
        .iter()
        .map(|item| {
            item.as_str()
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .ok_or_else(|| invalid.clone())
        })
        .collect()
}

/// Parse the recipe reply: a JSON object with every recipe field populated.
///
/// `estimatedPrice` may be a bare number; `description` is optional.
pub fn parse_gift_recipe(text: &str) -> Result<GiftRecipe, ResponseFormatError> {
    let value = parse_json(text)?;
    let obj = value.as_object().ok_or(ResponseFormatError::WrongShape {
        expected: "object",
        found: kind(&value),
    })?;

    let title =
        non_empty_str(obj, "title").ok_or(ResponseFormatError::InvalidRecipe { field: "title" })?;

    let estimated_price = match obj.get("estimatedPrice") {
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => non_empty_str(obj, "estimatedPrice"),
    }
    .ok_or(ResponseFormatError::InvalidRecipe {
        field: "estimatedPrice",
    })?;

    let estimated_duration =
        non_empty_str(obj, "estimatedDuration").ok_or(ResponseFormatError::InvalidRecipe {
            field: "estimatedDuration",
        })?;

    Ok(GiftRecipe {
        title,
        description: non_empty_str(obj, "description"),
        estimated_price,
        estimated_duration,
        materials: string_list(obj, "materials")?,
        steps: string_list(obj, "steps")?,
    })
}
