use anyhow::Result;
use serde::Serialize;
use std::time::Duration;

use ottochat_models::HistoryEntry;

use crate::prompt::system_prompt;

/// Default upstream chat-completions endpoint
pub const DEEPSEEK_API_URL: &str = "https://api.deepseek.com/v1/chat/completions";

const UPSTREAM_MODEL: &str = "deepseek-chat";
const UPSTREAM_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Serialize)]
struct UpstreamMessage {
    role: String,
    content: String,
}

/// Client for the OpenAI-compatible provider behind the chatbot endpoint
pub struct UpstreamClient {
    api_url: String,
    api_key: String,
    client: reqwest::Client,
}

impl UpstreamClient {
    pub fn new(api_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            api_url: api_url.into(),
            api_key: api_key.into(),
            client: reqwest::Client::new(),
        }
    }

    /// One completion under the Otto persona: system prompt, then the prior
    /// history, then the current user message.
    pub async fn complete(&self, user_message: &str, history: &[HistoryEntry]) -> Result<String> {
        if self.api_key.is_empty() {
            return Err(anyhow::anyhow!("Upstream API key not configured"));
        }

        let mut messages = vec![UpstreamMessage {
            role: "system".to_string(),
            content: system_prompt().to_string(),
        }];
        messages.extend(history.iter().map(|entry| UpstreamMessage {
            role: entry.role.as_str().to_string(),
            content: entry.content.clone(),
        }));
        messages.push(UpstreamMessage {
            role: "user".to_string(),
            content: user_message.to_string(),
        });

        let request = serde_json::json!({
            "model": UPSTREAM_MODEL,
            "messages": messages,
            "temperature": 0.7,
            "max_tokens": 500
        });

        let response = self
            .client
            .post(&self.api_url)
            .timeout(UPSTREAM_TIMEOUT)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(anyhow::anyhow!(
                "Upstream API error: {} - {}",
                status,
                error_text
            ));
        }

        let response_text = response.text().await?;
        let chat_response: serde_json::Value = serde_json::from_str(&response_text)?;

        if let Some(content) = chat_response["choices"][0]["message"]["content"].as_str() {
            Ok(content.to_string())
        } else {
            Err(anyhow::anyhow!("No content in upstream response"))
        }
    }
}
