use anyhow::{Context, Result};
use std::time::Duration;

use ottochat_models::ContactFormFields;

/// How long to wait for the workflow webhook before giving up
const WEBHOOK_TIMEOUT: Duration = Duration::from_secs(15);

/// Client for the lead-capture workflow webhook
pub struct LeadWebhookClient {
    webhook_url: String,
    client: reqwest::Client,
}

impl LeadWebhookClient {
    pub fn new(webhook_url: impl Into<String>) -> Self {
        Self {
            webhook_url: webhook_url.into(),
            client: reqwest::Client::new(),
        }
    }

    pub fn webhook_url(&self) -> &str {
        &self.webhook_url
    }

    /// Submit the contact form as a lead.
    ///
    /// Success is any 2xx carrying a JSON body. The workflow's acknowledgement
    /// payload is not otherwise consumed.
    pub async fn submit(&self, lead: &ContactFormFields) -> Result<()> {
        let response = self
            .client
            .post(&self.webhook_url)
            .timeout(WEBHOOK_TIMEOUT)
            .json(lead)
            .send()
            .await
            .context("Failed to reach lead webhook")?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(anyhow::anyhow!(
                "Lead webhook error: {} - {}",
                status,
                error_text
            ));
        }

        let _ack: serde_json::Value = response
            .json()
            .await
            .context("Lead webhook returned a non-JSON body")?;

        Ok(())
    }
}
