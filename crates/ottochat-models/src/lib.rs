//! Core types and wire structures for ottochat
//!
//! This crate provides the foundational types used across all ottochat crates:
//! the conversation message model, the contact-form lead payload, and the
//! request/response bodies exchanged with the site assistant endpoint.

pub mod types;

pub use types::{
    AssistantRequest,
    AssistantResponse,
    ChatMessage,
    ContactFormFields,
    ContactMethod,
    FormField,
    HistoryEntry,
    Role,
};
