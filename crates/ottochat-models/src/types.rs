use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

// ============================================================================
// Conversation Types
// ============================================================================

/// Author of a conversation turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Assistant => "assistant",
        }
    }
}

/// One turn in the widget conversation.
///
/// `content` may be empty when the message is solely a form placeholder:
/// a message with `is_form` set marks the slot where the contact-capture
/// form is rendered instead of text.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
    pub timestamp: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "is_false")]
    pub is_form: bool,
}

fn is_false(b: &bool) -> bool {
    !*b
}

impl ChatMessage {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
            timestamp: Utc::now(),
            is_form: false,
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
            timestamp: Utc::now(),
            is_form: false,
        }
    }

    /// Assistant message whose visual slot renders the contact form.
    pub fn form_placeholder() -> Self {
        Self {
            role: Role::Assistant,
            content: String::new(),
            timestamp: Utc::now(),
            is_form: true,
        }
    }
}

/// The `{role, content}` pair sent as conversation history.
///
/// This is the only message shape that ever crosses the wire; timestamps and
/// form flags stay local to the session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub role: Role,
    pub content: String,
}

impl From<&ChatMessage> for HistoryEntry {
    fn from(msg: &ChatMessage) -> Self {
        Self {
            role: msg.role,
            content: msg.content.clone(),
        }
    }
}

// ============================================================================
// Contact Form Types
// ============================================================================

/// Preferred way for the team to reach a lead back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContactMethod {
    #[default]
    Email,
    Phone,
}

impl ContactMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            ContactMethod::Email => "email",
            ContactMethod::Phone => "phone",
        }
    }

    pub fn from_str(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "phone" => ContactMethod::Phone,
            _ => ContactMethod::Email,
        }
    }
}

/// The structured lead payload composed in the in-chat contact form.
///
/// Serializes with the exact field names the workflow webhook expects
/// (`name`, `contactMethod`, `contactDetails`, `message`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactFormFields {
    pub name: String,
    pub contact_method: ContactMethod,
    pub contact_details: String,
    pub message: String,
}

impl ContactFormFields {
    /// Display names of required fields that are still empty after trimming.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.name.trim().is_empty() {
            missing.push("Name");
        }
        if self.contact_details.trim().is_empty() {
            missing.push("Contact Details");
        }
        if self.message.trim().is_empty() {
            missing.push("Message");
        }
        missing
    }

    pub fn is_complete(&self) -> bool {
        self.missing_fields().is_empty()
    }

    /// Set a single field. Validation is deferred to submit time.
    pub fn set_field(&mut self, field: FormField, value: &str) {
        match field {
            FormField::Name => self.name = value.to_string(),
            FormField::ContactMethod => self.contact_method = ContactMethod::from_str(value),
            FormField::ContactDetails => self.contact_details = value.to_string(),
            FormField::Message => self.message = value.to_string(),
        }
    }

    /// Clear all fields back to their empty defaults.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Field selector for contact-form updates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Name,
    ContactMethod,
    ContactDetails,
    Message,
}

impl FormField {
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "name" => Some(FormField::Name),
            "contactMethod" | "contact_method" => Some(FormField::ContactMethod),
            "contactDetails" | "contact_details" => Some(FormField::ContactDetails),
            "message" => Some(FormField::Message),
            _ => None,
        }
    }
}

// ============================================================================
// Assistant Endpoint Wire Types
// ============================================================================

/// Request body for the site assistant endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssistantRequest {
    pub message: String,
    pub conversation_history: Vec<HistoryEntry>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub lead_capture_mode: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub lead_data: Option<HashMap<String, String>>,
}

impl AssistantRequest {
    pub fn new(message: impl Into<String>, conversation_history: Vec<HistoryEntry>) -> Self {
        Self {
            message: message.into(),
            conversation_history,
            lead_capture_mode: None,
            lead_data: None,
        }
    }
}

/// Response body from the site assistant endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssistantResponse {
    pub response: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub lead_capture_mode: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub lead_data: Option<HashMap<String, String>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Role::User).unwrap(), "\"user\"");
        assert_eq!(serde_json::to_string(&Role::Assistant).unwrap(), "\"assistant\"");
    }

    #[test]
    fn test_form_placeholder_shape() {
        let msg = ChatMessage::form_placeholder();
        assert_eq!(msg.role, Role::Assistant);
        assert!(msg.content.is_empty());
        assert!(msg.is_form);
    }

    #[test]
    fn test_history_entry_from_message() {
        let msg = ChatMessage::user("hello");
        let entry = HistoryEntry::from(&msg);
        assert_eq!(entry.role, Role::User);
        assert_eq!(entry.content, "hello");
    }

    #[test]
    fn test_contact_form_webhook_keys() {
        let mut form = ContactFormFields::default();
        form.name = "Jane".to_string();
        form.contact_details = "jane@x.com".to_string();
        form.message = "Hello".to_string();

        let value = serde_json::to_value(&form).unwrap();
        assert_eq!(value["name"], "Jane");
        assert_eq!(value["contactMethod"], "email");
        assert_eq!(value["contactDetails"], "jane@x.com");
        assert_eq!(value["message"], "Hello");
    }

    #[test]
    fn test_contact_method_from_str() {
        assert_eq!(ContactMethod::from_str("phone"), ContactMethod::Phone);
        assert_eq!(ContactMethod::from_str("Phone"), ContactMethod::Phone);
        assert_eq!(ContactMethod::from_str("email"), ContactMethod::Email);
        // Anything unrecognized falls back to the default
        assert_eq!(ContactMethod::from_str("carrier pigeon"), ContactMethod::Email);
    }

    #[test]
    fn test_missing_fields() {
        let mut form = ContactFormFields::default();
        assert_eq!(form.missing_fields(), vec!["Name", "Contact Details", "Message"]);

        form.set_field(FormField::Name, "Jane");
        form.set_field(FormField::ContactDetails, "jane@x.com");
        assert_eq!(form.missing_fields(), vec!["Message"]);

        // Whitespace-only values still count as missing
        form.set_field(FormField::Message, "   ");
        assert!(!form.is_complete());

        form.set_field(FormField::Message, "Hello");
        assert!(form.is_complete());
    }

    #[test]
    fn test_form_field_from_str_accepts_wire_and_rust_keys() {
        assert_eq!(FormField::from_str("name"), Some(FormField::Name));
        assert_eq!(FormField::from_str("contactMethod"), Some(FormField::ContactMethod));
        assert_eq!(FormField::from_str("contact_details"), Some(FormField::ContactDetails));
        assert_eq!(FormField::from_str("message"), Some(FormField::Message));
        assert_eq!(FormField::from_str("unknown"), None);
    }

    #[test]
    fn test_form_reset() {
        let mut form = ContactFormFields {
            name: "Jane".to_string(),
            contact_method: ContactMethod::Phone,
            contact_details: "555-1234".to_string(),
            message: "Hi".to_string(),
        };
        form.reset();
        assert_eq!(form, ContactFormFields::default());
        assert_eq!(form.contact_method, ContactMethod::Email);
    }

    #[test]
    fn test_assistant_request_skips_optional_fields() {
        let request = AssistantRequest::new("hi", vec![]);
        let json = serde_json::to_string(&request).unwrap();
        assert!(!json.contains("lead_capture_mode"));
        assert!(!json.contains("lead_data"));
    }

    #[test]
    fn test_assistant_response_without_optional_fields() {
        let parsed: AssistantResponse = serde_json::from_str(r#"{"response":"hi there"}"#).unwrap();
        assert_eq!(parsed.response, "hi there");
        assert!(parsed.lead_capture_mode.is_none());
        assert!(parsed.lead_data.is_none());
    }
}
