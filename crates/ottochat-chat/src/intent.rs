/// Classification of a user message before anything is sent over the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageIntent {
    /// Ordinary chat input; goes to the assistant endpoint.
    FreeText,
    /// The user wants to reach a human; activates the contact form instead.
    ContactIntent,
}

/// Detects contact intent in user input.
///
/// A message is contact intent when, lowercased and trimmed, it equals one of
/// the canonical phrases or contains one of the trigger fragments. The
/// trigger list is configurable; the defaults are the phrases the widget's
/// "Message Reid" flow has always recognized.
#[derive(Debug, Clone)]
pub struct IntentClassifier {
    exact_phrases: Vec<String>,
    fragments: Vec<String>,
}

impl Default for IntentClassifier {
    fn default() -> Self {
        Self::new(
            vec!["i'd like to send a message to reid, please.".to_string()],
            vec!["message reid".to_string(), "contact reid".to_string()],
        )
    }
}

impl IntentClassifier {
    pub fn new(exact_phrases: Vec<String>, fragments: Vec<String>) -> Self {
        Self {
            exact_phrases: exact_phrases.into_iter().map(|p| p.to_lowercase()).collect(),
            fragments: fragments.into_iter().map(|f| f.to_lowercase()).collect(),
        }
    }

    pub fn classify(&self, text: &str) -> MessageIntent {
        let lowered = text.trim().to_lowercase();

        if self.exact_phrases.iter().any(|p| lowered == *p) {
            return MessageIntent::ContactIntent;
        }
        if self.fragments.iter().any(|f| lowered.contains(f.as_str())) {
            return MessageIntent::ContactIntent;
        }

        MessageIntent::FreeText
    }
}
