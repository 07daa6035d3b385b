use std::sync::Arc;

use axum::extract::State;
use axum::routing::{get, post};
use axum::{Json, Router};
use colored::Colorize;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tower_http::cors::CorsLayer;
use uuid::Uuid;

use ottochat_models::HistoryEntry;

use crate::error::ChatbotError;
use crate::lead::{parse_lead_details, send_chat_lead, split_lead_marker};
use crate::upstream::UpstreamClient;

/// Fixed opening line for clients that fetch their greeting from the server
const CHAT_GREETING: &str = "Hi there! I'm Otto, the AI assistant for Fluxstream. You can ask me \
                             about AI topics, our services in general, or I can help you get in \
                             touch with Reid. What's on your mind?";

/// Shared state behind the chatbot routes.
pub struct AppState {
    upstream: UpstreamClient,
    lead_webhook_url: Option<String>,
    http: reqwest::Client,
}

impl AppState {
    pub fn new(upstream: UpstreamClient, lead_webhook_url: Option<String>) -> Self {
        Self {
            upstream,
            lead_webhook_url,
            http: reqwest::Client::new(),
        }
    }
}

/// Success body of `POST /api/chatbot`.
#[derive(Debug, Serialize, Deserialize)]
pub struct ChatbotReply {
    pub response: String,
}

pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/chatbot", post(chatbot))
        .route("/api/chatbot/greeting", get(greeting))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn chatbot(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<Value>,
) -> Result<Json<ChatbotReply>, ChatbotError> {
    let request_id = Uuid::new_v4();

    let message = payload
        .get("message")
        .and_then(|m| m.as_str())
        .ok_or(ChatbotError::MissingMessage)?;

    let history: Vec<HistoryEntry> = match payload.get("conversation_history") {
        None | Some(Value::Null) => Vec::new(),
        Some(raw) => {
            serde_json::from_value(raw.clone()).map_err(|_| ChatbotError::InvalidHistory)?
        }
    };

    println!(
        "{} [{}] chat turn, {} prior entries",
        "📨".cyan(),
        request_id,
        history.len()
    );

    let sanitized = escape_html(message);

    let assistant_text = state
        .upstream
        .complete(&sanitized, &history)
        .await
        .map_err(|e| {
            eprintln!("{} [{}] upstream call failed: {:#}", "⚠️".yellow(), request_id, e);
            ChatbotError::Upstream(e)
        })?;

    let reply = match split_lead_marker(&assistant_text) {
        Some((user_facing, marker_line)) => {
            let chat_lead = parse_lead_details(&marker_line);
            match &state.lead_webhook_url {
                Some(url) => {
                    if send_chat_lead(&state.http, url, &chat_lead).await {
                        println!(
                            "{} [{}] chat lead forwarded for {}",
                            "✅".green(),
                            request_id,
                            chat_lead.email
                        );
                    }
                }
                None => {
                    eprintln!(
                        "{} [{}] lead webhook not configured; dropping chat lead",
                        "⚠️".yellow(),
                        request_id
                    );
                }
            }
            user_facing
        }
        None => assistant_text,
    };

    Ok(Json(ChatbotReply { response: reply }))
}

async fn greeting() -> Json<Value> {
    Json(json!({ "greeting": CHAT_GREETING }))
}

/// Minimal HTML escaping applied to user input before it reaches the model
fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}
