mod common;

use common::{mock_providers, TestApp};
use recipe_service::services::providers::mock::{
    MockImageProvider, MockTextProvider, MockTranslator,
};
use reqwest::StatusCode;
use serde_json::json;

const FENCED_REPLY: &str = "```json\n{\"ingredients\": [\"tomato\", \"onion\"]}\n```";

#[tokio::test]
async fn detects_and_translates_fenced_ingredients() {
    let app = TestApp::spawn(mock_providers(
        MockTextProvider::replying(FENCED_REPLY),
        MockTranslator::with_entries(&[("tomato", "トマト"), ("onion", "オニオン")]),
        MockImageProvider::empty(),
    ))
    .await;

    let response = app
        .client
        .post(format!("{}/ingredients/detect", app.address))
        .json(&json!({ "image": "aGVsbG8=", "mime_type": "image/png" }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), StatusCode::OK);

    let text = response.text().await.expect("Failed to read body");
    assert_eq!(
        text,
        "{\n  \"ingredients\": [\n    \"トマト\",\n    \"オニオン\"\n  ]\n}"
    );
}

#[tokio::test]
async fn missing_image_is_rejected() {
    let app = TestApp::spawn(mock_providers(
        MockTextProvider::replying(FENCED_REPLY),
        MockTranslator::new(),
        MockImageProvider::empty(),
    ))
    .await;

    let response = app
        .client
        .post(format!("{}/ingredients/detect", app.address))
        .json(&json!({ "mime_type": "image/png" }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body: serde_json::Value = response.json().await.expect("Failed to parse JSON");
    assert_eq!(body["error"], "Image is required");
}

#[tokio::test]
async fn missing_mime_type_is_rejected_before_any_upstream_call() {
    // A failing text provider proves validation short-circuits.
    let app = TestApp::spawn(mock_providers(
        MockTextProvider::failing(),
        MockTranslator::new(),
        MockImageProvider::empty(),
    ))
    .await;

    let response = app
        .client
        .post(format!("{}/ingredients/detect", app.address))
        .json(&json!({ "image": "aGVsbG8=" }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body: serde_json::Value = response.json().await.expect("Failed to parse JSON");
    assert_eq!(body["error"], "Mime_type is required");
}

#[tokio::test]
async fn unstructured_reply_falls_back_to_line_items() {
    let app = TestApp::spawn(mock_providers(
        MockTextProvider::replying("tomato\nonion"),
        MockTranslator::new(),
        MockImageProvider::empty(),
    ))
    .await;

    let response = app
        .client
        .post(format!("{}/ingredients/detect", app.address))
        .json(&json!({ "image": "aGVsbG8=", "mime_type": "image/png" }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), StatusCode::OK);

    let body: serde_json::Value = response.json().await.expect("Failed to parse JSON");
    assert_eq!(body["ingredients"], json!(["ja:tomato", "ja:onion"]));
}

#[tokio::test]
async fn bracket_fallback_is_translated_in_order() {
    let app = TestApp::spawn(mock_providers(
        MockTextProvider::replying("Here you go:\n[\ntomato\nonion\n]"),
        MockTranslator::new(),
        MockImageProvider::empty(),
    ))
    .await;

    let response = app
        .client
        .post(format!("{}/ingredients/detect", app.address))
        .json(&json!({ "image": "aGVsbG8=", "mime_type": "image/png" }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), StatusCode::OK);

    let body: serde_json::Value = response.json().await.expect("Failed to parse JSON");
    assert_eq!(body["ingredients"], json!(["ja:tomato", "ja:onion"]));
}

#[tokio::test]
async fn translation_failure_maps_to_server_error() {
    let app = TestApp::spawn(mock_providers(
        MockTextProvider::replying(FENCED_REPLY),
        MockTranslator::failing(),
        MockImageProvider::empty(),
    ))
    .await;

    let response = app
        .client
        .post(format!("{}/ingredients/detect", app.address))
        .json(&json!({ "image": "aGVsbG8=", "mime_type": "image/png" }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let body: serde_json::Value = response.json().await.expect("Failed to parse JSON");
    let message = body["error"].as_str().expect("error should be a string");
    assert!(message.contains("translation backend unavailable"));
}

#[tokio::test]
async fn upstream_failure_maps_to_server_error() {
    let app = TestApp::spawn(mock_providers(
        MockTextProvider::failing(),
        MockTranslator::new(),
        MockImageProvider::empty(),
    ))
    .await;

    let response = app
        .client
        .post(format!("{}/ingredients/detect", app.address))
        .json(&json!({ "image": "aGVsbG8=", "mime_type": "image/png" }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let body: serde_json::Value = response.json().await.expect("Failed to parse JSON");
    let message = body["error"].as_str().expect("error should be a string");
    assert!(message.contains("mock text provider failure"));
}

#[tokio::test]
async fn malformed_fenced_json_maps_to_server_error() {
    let app = TestApp::spawn(mock_providers(
        MockTextProvider::replying("```json\n{\"ingredients\": [\"tomato\",]}\n```"),
        MockTranslator::new(),
        MockImageProvider::empty(),
    ))
    .await;

    let response = app
        .client
        .post(format!("{}/ingredients/detect", app.address))
        .json(&json!({ "image": "aGVsbG8=", "mime_type": "image/png" }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let body: serde_json::Value = response.json().await.expect("Failed to parse JSON");
    let message = body["error"].as_str().expect("error should be a string");
    assert!(message.contains("not valid JSON"));
}
