//! # ottochat-api
//!
//! HTTP clients for the two external collaborators of the chat widget:
//!
//! - the **site assistant endpoint** (`POST /api/chatbot`), which turns a user
//!   message plus conversation history into an assistant reply;
//! - the **lead-capture webhook**, which receives the contact form as JSON and
//!   hands it to the workflow automation behind it.
//!
//! Both clients are plain structs around a shared `reqwest::Client`; the
//! endpoint URL is supplied at construction so tests can point them at a mock
//! server.

pub mod assistant;
pub mod webhook;

pub use assistant::AssistantClient;
pub use webhook::LeadWebhookClient;

/// Default site assistant endpoint
pub const DEFAULT_ASSISTANT_API_URL: &str = "https://fluxstream.app/api/chatbot";

/// Default workflow webhook for chat-captured leads
pub const DEFAULT_LEAD_WEBHOOK_URL: &str =
    "https://rreusch2.app.n8n.cloud/webhook/62851cb6-e2f5-4e47-8cf8-c9a88a3ad270";
