use colored::Colorize;
use regex::Regex;
use serde::Serialize;
use std::collections::HashMap;
use std::time::Duration;

/// Marker the upstream model emits once a lead has been confirmed
pub const LEAD_MARKER: &str = "[LEAD_INFO_COLLECTED]";

/// Placeholder for lead fields the conversation never collected
const DEFAULT_FIELD: &str = "N/A";

/// Shown when the model put the marker first and left no user-facing text
const GENERIC_LEAD_CONFIRMATION: &str =
    "Thanks! I've noted your information and Reid will be in touch.";

const LEAD_WEBHOOK_TIMEOUT: Duration = Duration::from_secs(15);

/// Lead payload in the shape the workflow's field mapping expects.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChatLead {
    #[serde(rename = "FirstName")]
    pub first_name: String,
    #[serde(rename = "LastName")]
    pub last_name: String,
    #[serde(rename = "Email")]
    pub email: String,
    #[serde(rename = "Phone")]
    pub phone: String,
    #[serde(rename = "InquiryType")]
    pub inquiry_type: String,
    #[serde(rename = "Message")]
    pub message: String,
}

/// Split assistant text around the lead marker.
///
/// Returns `(user-facing reply, marker line)` when the marker is present.
/// The model is instructed to put its conversational text before the marker;
/// if it put the marker first, the user gets a generic confirmation instead
/// of an empty bubble.
pub fn split_lead_marker(text: &str) -> Option<(String, String)> {
    let (before, after) = text.split_once(LEAD_MARKER)?;

    let user_facing = before.trim();
    let user_facing = if user_facing.is_empty() {
        GENERIC_LEAD_CONFIRMATION.to_string()
    } else {
        user_facing.to_string()
    };

    Some((user_facing, after.trim().to_string()))
}

/// Parse `FirstName: ..., Email: ..., Message: ...` out of the marker line.
///
/// The regex keeps commas inside the message intact; if the model deviated
/// from the format, a simple `", "` split recovers what it can. Absent fields
/// become `"N/A"` so the workflow's field expressions never hit a missing key.
pub fn parse_lead_details(marker_line: &str) -> ChatLead {
    let mut fields: HashMap<&str, String> = HashMap::new();

    let pattern = Regex::new(
        r"FirstName: (?P<FirstName>[^,]+)(?:,\s*LastName: (?P<LastName>[^,]+))?,\s*Email: (?P<Email>[^,]+)(?:,\s*Phone: (?P<Phone>[^,]+))?,\s*Message: (?P<Message>.+)",
    )
    .ok();

    if let Some(caps) = pattern.as_ref().and_then(|re| re.captures(marker_line)) {
        for key in ["FirstName", "LastName", "Email", "Phone", "Message"] {
            if let Some(value) = caps.name(key) {
                fields.insert(key, value.as_str().trim().to_string());
            }
        }
    } else {
        // Fallback for off-format output; less robust for messages with commas
        for part in marker_line.split(", ") {
            if let Some((key, value)) = part.split_once(':') {
                let standardized = match key.trim().to_lowercase().as_str() {
                    "firstname" => "FirstName",
                    "lastname" => "LastName",
                    "email" => "Email",
                    "phone" => "Phone",
                    "message" => "Message",
                    _ => continue,
                };
                fields.insert(standardized, value.trim().to_string());
            }
        }
    }

    let get = |key: &str| {
        fields
            .get(key)
            .filter(|value| !value.is_empty())
            .cloned()
            .unwrap_or_else(|| DEFAULT_FIELD.to_string())
    };

    ChatLead {
        first_name: get("FirstName"),
        last_name: get("LastName"),
        email: get("Email"),
        phone: get("Phone"),
        inquiry_type: "AI Chat Lead".to_string(),
        message: get("Message"),
    }
}

/// Forward a parsed lead to the workflow webhook.
///
/// Returns whether the workflow accepted it. Failures are logged and never
/// surfaced to the chat user - they already saw the model's confirmation.
pub async fn send_chat_lead(client: &reqwest::Client, webhook_url: &str, lead: &ChatLead) -> bool {
    let result = client
        .post(webhook_url)
        .timeout(LEAD_WEBHOOK_TIMEOUT)
        .json(lead)
        .send()
        .await;

    match result {
        Ok(response) if response.status().is_success() => true,
        Ok(response) => {
            eprintln!(
                "{} Lead webhook returned {} for {}",
                "⚠️".yellow(),
                response.status(),
                lead.email
            );
            false
        }
        Err(e) => {
            eprintln!("{} Failed to send chat lead: {}", "⚠️".yellow(), e);
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_split_marker_prefers_text_before_marker() {
        let text = "All set, Jane!\n[LEAD_INFO_COLLECTED] FirstName: Jane, Email: jane@x.com, Message: Hi";
        let (reply, marker_line) = split_lead_marker(text).unwrap();

        assert_eq!(reply, "All set, Jane!");
        assert!(marker_line.starts_with("FirstName: Jane"));
    }

    #[test]
    fn test_split_marker_at_start_uses_generic_confirmation() {
        let text = "[LEAD_INFO_COLLECTED] FirstName: Jane, Email: jane@x.com, Message: Hi";
        let (reply, _) = split_lead_marker(text).unwrap();

        assert_eq!(reply, GENERIC_LEAD_CONFIRMATION);
    }

    #[test]
    fn test_split_marker_absent() {
        assert!(split_lead_marker("Just a normal reply.").is_none());
    }

    #[test]
    fn test_parse_full_marker_line() {
        let lead = parse_lead_details(
            "FirstName: Jane, LastName: Doe, Email: jane.doe@example.com, Phone: 555-1234, \
             Message: Please tell him the new design is fantastic, and I'd like to discuss a project.",
        );

        assert_eq!(lead.first_name, "Jane");
        assert_eq!(lead.last_name, "Doe");
        assert_eq!(lead.email, "jane.doe@example.com");
        assert_eq!(lead.phone, "555-1234");
        assert_eq!(lead.inquiry_type, "AI Chat Lead");
        // Commas inside the message survive the regex path
        assert_eq!(
            lead.message,
            "Please tell him the new design is fantastic, and I'd like to discuss a project."
        );
    }

    #[test]
    fn test_parse_optional_fields_default_to_na() {
        let lead =
            parse_lead_details("FirstName: Jane, Email: jane@x.com, Message: Hello there");

        assert_eq!(lead.first_name, "Jane");
        assert_eq!(lead.last_name, "N/A");
        assert_eq!(lead.phone, "N/A");
        assert_eq!(lead.message, "Hello there");
    }

    #[test]
    fn test_parse_off_format_line_uses_split_fallback() {
        // No Email field, so the strict pattern can't match
        let lead = parse_lead_details("firstname: Bob, message: Call me maybe");

        assert_eq!(lead.first_name, "Bob");
        assert_eq!(lead.email, "N/A");
        assert_eq!(lead.message, "Call me maybe");
    }

    #[test]
    fn test_lead_serializes_with_workflow_keys() {
        let lead = parse_lead_details("FirstName: Jane, Email: jane@x.com, Message: Hi");
        let value = serde_json::to_value(&lead).unwrap();

        assert_eq!(value["FirstName"], "Jane");
        assert_eq!(value["LastName"], "N/A");
        assert_eq!(value["Email"], "jane@x.com");
        assert_eq!(value["InquiryType"], "AI Chat Lead");
        assert_eq!(value["Message"], "Hi");
    }
}
