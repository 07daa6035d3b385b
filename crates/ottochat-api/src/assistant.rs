use anyhow::{Context, Result};
use std::time::Duration;

use ottochat_models::{AssistantRequest, AssistantResponse, HistoryEntry};

/// How long to wait for the assistant endpoint before giving up
const ASSISTANT_TIMEOUT: Duration = Duration::from_secs(30);

/// Client for the site assistant endpoint
pub struct AssistantClient {
    api_url: String,
    client: reqwest::Client,
}

impl AssistantClient {
    pub fn new(api_url: impl Into<String>) -> Self {
        Self {
            api_url: api_url.into(),
            client: reqwest::Client::new(),
        }
    }

    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    /// Send one message plus the prior conversation history; returns the
    /// assistant's reply text.
    ///
    /// A non-2xx status or a body that doesn't parse as an assistant response
    /// is an error; the caller decides what the user sees instead.
    pub async fn chat(&self, message: &str, history: &[HistoryEntry]) -> Result<String> {
        let request = AssistantRequest::new(message, history.to_vec());

        let response = self
            .client
            .post(&self.api_url)
            .timeout(ASSISTANT_TIMEOUT)
            .json(&request)
            .send()
            .await
            .context("Failed to reach assistant endpoint")?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(anyhow::anyhow!(
                "Assistant endpoint error: {} - {}",
                status,
                error_text
            ));
        }

        let body: AssistantResponse = response
            .json()
            .await
            .context("Malformed assistant endpoint response")?;

        Ok(body.response)
    }
}
