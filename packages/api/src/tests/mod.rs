mod gift_handler_tests;

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::Router;
use guilted_ai::FakeGenerator;
use guilted_gifts::GiftService;
use guilted_prompts::PromptManager;
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

use crate::{create_router, AppState};

fn app(generator: &Arc<FakeGenerator>) -> Router {
    let service = GiftService::new(generator.clone(), PromptManager::builtin().unwrap());
    create_router(AppState::new(service))
}

async fn post_json(app: Router, uri: &str, body: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();

    app.oneshot(request).await.unwrap()
}

async fn body_json(response: Response<Body>) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
