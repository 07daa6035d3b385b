use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;

/// Errors the chatbot endpoint reports to callers.
///
/// The response bodies are fixed strings: callers (the widget) substitute
/// their own apology text anyway, and nothing about the upstream failure
/// should leak to the browser.
#[derive(Debug, Error)]
pub enum ChatbotError {
    #[error("message is required and must be a string")]
    MissingMessage,

    #[error("invalid conversation_history format")]
    InvalidHistory,

    #[error("upstream assistant call failed: {0}")]
    Upstream(anyhow::Error),
}

impl IntoResponse for ChatbotError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            ChatbotError::MissingMessage => (
                StatusCode::BAD_REQUEST,
                "Message is required and must be a string.",
            ),
            ChatbotError::InvalidHistory => (
                StatusCode::BAD_REQUEST,
                "Invalid conversation_history format.",
            ),
            ChatbotError::Upstream(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Sorry, I'm having trouble connecting to my brain right now.",
            ),
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}
