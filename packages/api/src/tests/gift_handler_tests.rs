use std::sync::Arc;

use axum::http::StatusCode;
use guilted_ai::FakeGenerator;
use pretty_assertions::assert_eq;
use serde_json::json;

use super::{app, body_json, post_json};
use crate::error::REQUEST_ID_HEADER;

const IDEAS_JSON: &str = r#"[
    {"id": 1, "title": "Pottery Class Voucher", "description": "A hand-drawn voucher for a class together"},
    {"id": 2, "title": "Glazed Mug", "description": "A mug thrown and glazed at home"}
]"#;

const RECIPE_JSON: &str = r#"{
    "title": "Glazed Mug",
    "description": "A mug thrown and glazed at home",
    "estimatedPrice": "$35",
    "estimatedDuration": "2 weekends",
    "materials": ["Clay", "Glaze"],
    "steps": ["Throw the mug", "Bisque fire", "Glaze and fire"]
}"#;

fn preferences() -> serde_json::Value {
    json!({
        "interests": "pottery, gardening",
        "loveLanguage": ["Quality Time", "Receiving Gifts"],
        "budget": "$40",
        "occasion": "Birthday",
        "gifterPreferences": "I enjoy ceramics",
        "timeAvailable": "Two weekends",
        "giftType": "solo"
    })
}

#[tokio::test]
async fn test_generate_gifts_returns_envelope() {
    let generator = Arc::new(FakeGenerator::with_response(IDEAS_JSON));
    let body = json!({ "friendPreferences": preferences() }).to_string();

    let response = post_json(app(&generator), "/api/generate-gifts", &body).await;

    assert_eq!(response.status(), StatusCode::OK);
    let value = body_json(response).await;
    let ideas = value["giftIdeas"].as_array().unwrap();
    assert_eq!(ideas.len(), 2);
    assert_eq!(ideas[1]["title"], "Glazed Mug");
    assert_eq!(generator.call_count(), 1);
}

#[tokio::test]
async fn test_generate_gifts_accepts_flat_preferences() {
    let generator = Arc::new(FakeGenerator::with_response(IDEAS_JSON));

    let response = post_json(
        app(&generator),
        "/api/generate-gifts",
        &preferences().to_string(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(generator.call_count(), 1);
}

#[tokio::test]
async fn test_generate_gifts_strips_code_fences() {
    let generator = Arc::new(FakeGenerator::with_response(
        "```json\n[{\"id\":1,\"title\":\"T\",\"description\":\"D\"}]\n```",
    ));
    let body = json!({ "friendPreferences": preferences() }).to_string();

    let response = post_json(app(&generator), "/api/generate-gifts", &body).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        body_json(response).await,
        json!({ "giftIdeas": [{ "id": 1, "title": "T", "description": "D" }] })
    );
}

#[tokio::test]
async fn test_missing_field_is_rejected_without_upstream_call() {
    let generator = Arc::new(FakeGenerator::with_response(IDEAS_JSON));
    let mut prefs = preferences();
    prefs.as_object_mut().unwrap().remove("budget");
    prefs["occasion"] = json!("   ");
    let body = json!({ "friendPreferences": prefs }).to_string();

    let response = post_json(app(&generator), "/api/generate-gifts", &body).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(response.headers().contains_key(REQUEST_ID_HEADER));
    assert_eq!(
        body_json(response).await,
        json!({ "error": "Missing required fields", "details": "budget, occasion" })
    );
    assert_eq!(generator.call_count(), 0);
}

#[tokio::test]
async fn test_empty_love_language_is_missing() {
    let generator = Arc::new(FakeGenerator::with_response(IDEAS_JSON));
    let mut prefs = preferences();
    prefs["loveLanguage"] = json!([]);
    let body = json!({ "friendPreferences": prefs }).to_string();

    let response = post_json(app(&generator), "/api/generate-gifts", &body).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["details"], "loveLanguage");
    assert_eq!(generator.call_count(), 0);
}

#[tokio::test]
async fn test_invalid_gift_type_is_rejected() {
    let generator = Arc::new(FakeGenerator::with_response(IDEAS_JSON));
    let mut prefs = preferences();
    prefs["giftType"] = json!("team");
    let body = json!({ "friendPreferences": prefs }).to_string();

    let response = post_json(app(&generator), "/api/generate-gifts", &body).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["error"], "Invalid gift type");
    assert_eq!(generator.call_count(), 0);
}

#[tokio::test]
async fn test_malformed_body_is_bad_request() {
    let generator = Arc::new(FakeGenerator::with_response(IDEAS_JSON));

    let response = post_json(app(&generator), "/api/generate-gifts", "{not json").await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["error"], "Invalid request body");
    assert_eq!(generator.call_count(), 0);
}

#[tokio::test]
async fn test_nested_type_error_is_reported_as_body_error() {
    let generator = Arc::new(FakeGenerator::with_response(IDEAS_JSON));
    let mut prefs = preferences();
    prefs["loveLanguage"] = json!(5);
    let body = json!({ "friendPreferences": prefs }).to_string();

    let response = post_json(app(&generator), "/api/generate-gifts", &body).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["error"], "Invalid request body");
    assert!(json["details"].is_string());
    assert_eq!(generator.call_count(), 0);
}

#[tokio::test]
async fn test_upstream_failure_hides_cause() {
    let generator = Arc::new(FakeGenerator::failing("invalid api key sk-123"));
    let body = json!({ "friendPreferences": preferences() }).to_string();

    let response = post_json(app(&generator), "/api/generate-gifts", &body).await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        body_json(response).await,
        json!({ "error": "Failed to generate gift ideas" })
    );
}

#[tokio::test]
async fn test_invalid_ideas_format() {
    let generator = Arc::new(FakeGenerator::with_response(r#"{"ideas": []}"#));
    let body = json!({ "friendPreferences": preferences() }).to_string();

    let response = post_json(app(&generator), "/api/generate-gifts", &body).await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let value = body_json(response).await;
    assert_eq!(value["error"], "Invalid gift ideas format received from AI");
    assert!(value["details"].is_string());
}

#[tokio::test]
async fn test_generate_recipe_returns_envelope() {
    let generator = Arc::new(FakeGenerator::with_response(RECIPE_JSON));
    let body = json!({ "giftTitle": "Glazed Mug", "friendPreferences": preferences() }).to_string();

    let response = post_json(app(&generator), "/api/generate-recipe", &body).await;

    assert_eq!(response.status(), StatusCode::OK);
    let value = body_json(response).await;
    assert_eq!(value["recipe"]["estimatedPrice"], "$35");
    assert_eq!(value["recipe"]["steps"].as_array().unwrap().len(), 3);
    assert!(generator.prompts()[0].contains("\"Glazed Mug\""));
}

#[tokio::test]
async fn test_recipe_top_level_fields_override_nested() {
    let generator = Arc::new(FakeGenerator::with_response(RECIPE_JSON));
    let body = json!({
        "giftTitle": "Glazed Mug",
        "friendPreferences": preferences(),
        "occasion": "Graduation",
        "giftType": "group"
    })
    .to_string();

    let response = post_json(app(&generator), "/api/generate-recipe", &body).await;

    assert_eq!(response.status(), StatusCode::OK);
    let prompts = generator.prompts();
    let prompt = &prompts[0];
    assert!(prompt.contains("Occasion: Graduation"));
    assert!(prompt.contains("Gift Type: group"));
}

#[tokio::test]
async fn test_recipe_requires_gift_title() {
    let generator = Arc::new(FakeGenerator::with_response(RECIPE_JSON));
    let body = json!({ "friendPreferences": preferences() }).to_string();

    let response = post_json(app(&generator), "/api/generate-recipe", &body).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["details"], "giftTitle");
    assert_eq!(generator.call_count(), 0);
}

#[tokio::test]
async fn test_recipe_upstream_failure() {
    let generator = Arc::new(FakeGenerator::failing("connection reset"));
    let body = json!({ "giftTitle": "Glazed Mug", "friendPreferences": preferences() }).to_string();

    let response = post_json(app(&generator), "/api/generate-recipe", &body).await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        body_json(response).await,
        json!({ "error": "Failed to generate gift recipe" })
    );
}

#[tokio::test]
async fn test_invalid_recipe_format() {
    let generator = Arc::new(FakeGenerator::with_response(
        r#"["not", "a", "recipe"]"#,
    ));
    let body = json!({ "giftTitle": "Glazed Mug", "friendPreferences": preferences() }).to_string();

    let response = post_json(app(&generator), "/api/generate-recipe", &body).await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let value = body_json(response).await;
    assert_eq!(value["error"], "Invalid gift recipe format received from AI");
    assert_eq!(value["details"], "Expected a JSON object, got array");
}
