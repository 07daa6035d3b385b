//! # ottochat-server
//!
//! The site's own assistant endpoint: an axum service exposing
//! `POST /api/chatbot` (and the fixed `GET /api/chatbot/greeting`). It
//! forwards each turn to an OpenAI-compatible upstream chat-completions API
//! under the Otto persona, watches the model output for the in-band
//! lead-capture marker, and hands parsed leads to the workflow webhook.
//!
//! The upstream provider and the workflow service stay opaque: both are plain
//! HTTP collaborators configured by URL.

pub mod error;
pub mod lead;
pub mod prompt;
pub mod routes;
pub mod upstream;

use std::env;
use std::sync::Arc;

use anyhow::{Context, Result};
use colored::Colorize;

pub use error::ChatbotError;
pub use routes::{build_router, AppState, ChatbotReply};
pub use upstream::{UpstreamClient, DEEPSEEK_API_URL};

/// Environment-derived settings for the chatbot service.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub upstream_api_url: String,
    /// Bearer key for the upstream provider; empty means unconfigured.
    pub upstream_api_key: String,
    /// Workflow webhook for leads captured in-conversation.
    pub lead_webhook_url: Option<String>,
}

impl ServerConfig {
    pub fn from_env() -> Self {
        Self {
            upstream_api_url: env::var("DEEPSEEK_API_URL")
                .unwrap_or_else(|_| DEEPSEEK_API_URL.to_string()),
            upstream_api_key: env::var("DEEPSEEK_API_KEY").unwrap_or_default(),
            lead_webhook_url: env::var("N8N_CHAT_LEAD_WEBHOOK_URL").ok(),
        }
    }
}

/// Bind and serve the chatbot API until the process is stopped.
pub async fn serve(config: ServerConfig, bind: &str, port: u16) -> Result<()> {
    if config.upstream_api_key.is_empty() {
        eprintln!(
            "{} DEEPSEEK_API_KEY is not set; chatbot turns will fail until it is",
            "⚠️".yellow()
        );
    }
    if config.lead_webhook_url.is_none() {
        eprintln!(
            "{} N8N_CHAT_LEAD_WEBHOOK_URL is not set; captured leads will be dropped",
            "⚠️".yellow()
        );
    }

    let state = Arc::new(AppState::new(
        UpstreamClient::new(config.upstream_api_url, config.upstream_api_key),
        config.lead_webhook_url,
    ));

    let addr = format!("{}:{}", bind, port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    println!("{} Chatbot API listening on http://{}", "🌐".cyan(), addr);

    axum::serve(listener, build_router(state))
        .await
        .context("Web server error")?;

    Ok(())
}
