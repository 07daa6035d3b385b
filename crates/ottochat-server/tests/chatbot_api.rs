use std::sync::Arc;

use serde_json::json;
use wiremock::matchers::{body_partial_json, method};
use wiremock::{Mock, MockServer, ResponseTemplate};

use ottochat_server::{build_router, AppState, UpstreamClient};

/// Bind the chatbot API on an ephemeral port; returns its base URL.
async fn spawn_app(upstream_url: String, lead_webhook_url: Option<String>) -> String {
    let state = Arc::new(AppState::new(
        UpstreamClient::new(upstream_url, "test-key"),
        lead_webhook_url,
    ));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, build_router(state)).await.unwrap();
    });

    format!("http://{}", addr)
}

fn upstream_reply(content: &str) -> serde_json::Value {
    json!({ "choices": [{"message": {"role": "assistant", "content": content}}] })
}

#[tokio::test]
async fn test_chat_turn_round_trip() {
    let upstream = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(upstream_reply("Hi! Ask me anything.")))
        .mount(&upstream)
        .await;

    let base = spawn_app(upstream.uri(), None).await;
    let client = reqwest::Client::new();

    let response = client
        .post(format!("{}/api/chatbot", base))
        .json(&json!({
            "message": "Hello",
            "conversation_history": [
                {"role": "assistant", "content": "Welcome!"},
            ],
        }))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 200);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["response"], "Hi! Ask me anything.");
}

#[tokio::test]
async fn test_missing_message_is_bad_request() {
    let upstream = MockServer::start().await;
    let base = spawn_app(upstream.uri(), None).await;
    let client = reqwest::Client::new();

    let response = client
        .post(format!("{}/api/chatbot", base))
        .json(&json!({ "conversation_history": [] }))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 400);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["error"], "Message is required and must be a string.");
}

#[tokio::test]
async fn test_malformed_history_is_bad_request() {
    let upstream = MockServer::start().await;
    let base = spawn_app(upstream.uri(), None).await;
    let client = reqwest::Client::new();

    let response = client
        .post(format!("{}/api/chatbot", base))
        .json(&json!({
            "message": "Hello",
            "conversation_history": [{"role": "user"}],
        }))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 400);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["error"], "Invalid conversation_history format.");
}

#[tokio::test]
async fn test_upstream_failure_is_internal_error_with_fixed_body() {
    let upstream = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&upstream)
        .await;

    let base = spawn_app(upstream.uri(), None).await;
    let client = reqwest::Client::new();

    let response = client
        .post(format!("{}/api/chatbot", base))
        .json(&json!({ "message": "Hello" }))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 500);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(
        body["error"],
        "Sorry, I'm having trouble connecting to my brain right now."
    );
}

#[tokio::test]
async fn test_lead_marker_forwards_lead_and_strips_marker() {
    let upstream = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(upstream_reply(
            "You're all set, Jane!\n[LEAD_INFO_COLLECTED] FirstName: Jane, Email: jane@x.com, \
             Message: Hi Reid",
        )))
        .mount(&upstream)
        .await;

    let workflow = MockServer::start().await;
    Mock::given(method("POST"))
        .and(body_partial_json(json!({
            "FirstName": "Jane",
            "LastName": "N/A",
            "Email": "jane@x.com",
            "Phone": "N/A",
            "InquiryType": "AI Chat Lead",
            "Message": "Hi Reid",
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "ok": true })))
        .expect(1)
        .mount(&workflow)
        .await;

    let base = spawn_app(upstream.uri(), Some(workflow.uri())).await;
    let client = reqwest::Client::new();

    let response = client
        .post(format!("{}/api/chatbot", base))
        .json(&json!({ "message": "yes, that's right" }))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 200);
    let body: serde_json::Value = response.json().await.unwrap();
    // The marker line never reaches the user
    assert_eq!(body["response"], "You're all set, Jane!");
}

#[tokio::test]
async fn test_lead_webhook_failure_never_surfaces_to_the_user() {
    let upstream = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(upstream_reply(
            "Consider it delivered!\n[LEAD_INFO_COLLECTED] FirstName: Jane, Email: jane@x.com, \
             Message: Hi",
        )))
        .mount(&upstream)
        .await;

    let workflow = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&workflow)
        .await;

    let base = spawn_app(upstream.uri(), Some(workflow.uri())).await;
    let client = reqwest::Client::new();

    let response = client
        .post(format!("{}/api/chatbot", base))
        .json(&json!({ "message": "yes" }))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 200);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["response"], "Consider it delivered!");
}

#[tokio::test]
async fn test_greeting_endpoint() {
    let upstream = MockServer::start().await;
    let base = spawn_app(upstream.uri(), None).await;

    let response = reqwest::get(format!("{}/api/chatbot/greeting", base))
        .await
        .unwrap();

    assert_eq!(response.status(), 200);
    let body: serde_json::Value = response.json().await.unwrap();
    assert!(body["greeting"].as_str().unwrap().contains("Otto"));
}
