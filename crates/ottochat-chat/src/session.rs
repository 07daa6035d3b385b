use colored::Colorize;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

use ottochat_api::{AssistantClient, LeadWebhookClient};
use ottochat_logging::{safe_truncate, ConversationLogger};
use ottochat_models::{ChatMessage, ContactFormFields, FormField, HistoryEntry};

use crate::greetings::pick_greeting;
use crate::intent::{IntentClassifier, MessageIntent};
use crate::starters::ConversationStarter;

/// Cosmetic pause before the greeting appears, so the typing indicator is
/// briefly visible.
const GREETING_DELAY: Duration = Duration::from_millis(500);

/// How many prior turns accompany the lead-confirmation request
const CONFIRMATION_CONTEXT_TURNS: usize = 3;

/// Longest lead-message preview embedded in the confirmation prompt
const MESSAGE_PREVIEW_CHARS: usize = 100;

/// Fixed reply when an ordinary assistant call fails
pub const ASSISTANT_FAILURE_REPLY: &str = "Sorry, I encountered an issue. Please try again.";

/// Hand-off text shown right before the contact form
pub const FORM_HANDOFF_REPLY: &str =
    "Got it! I'd be happy to help you get in touch with Reid. Please fill out the details below:";

/// Settings for one widget session.
pub struct SessionConfig {
    pub assistant_url: String,
    pub webhook_url: String,
    /// Seed for greeting selection; `None` uses OS entropy.
    pub greeting_seed: Option<u64>,
    /// Pause before the greeting appears.
    pub greeting_delay: Duration,
}

impl SessionConfig {
    pub fn new(assistant_url: impl Into<String>, webhook_url: impl Into<String>) -> Self {
        Self {
            assistant_url: assistant_url.into(),
            webhook_url: webhook_url.into(),
            greeting_seed: None,
            greeting_delay: GREETING_DELAY,
        }
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self::new(
            ottochat_api::DEFAULT_ASSISTANT_API_URL,
            ottochat_api::DEFAULT_LEAD_WEBHOOK_URL,
        )
    }
}

/// The conversation controller behind the floating chat widget.
///
/// Owns the message sequence, the `is_typing` / `is_contact_form_active`
/// flags that gate user input, and the two HTTP clients. Every state change
/// goes through the methods below; nothing else mutates a session.
///
/// `is_typing` is a soft gate: the surface rendering the session is expected
/// to disable its input control while it is set, but nothing here queues or
/// rejects overlapping calls.
pub struct ChatSession {
    assistant: AssistantClient,
    webhook: LeadWebhookClient,
    classifier: IntentClassifier,
    messages: Vec<ChatMessage>,
    is_typing: bool,
    is_contact_form_active: bool,
    contact_form: ContactFormFields,
    greeting_delay: Duration,
    rng: StdRng,
    cancel: CancellationToken,
    logger: Option<ConversationLogger>,
}

impl ChatSession {
    pub fn new(config: SessionConfig) -> Self {
        let rng = match config.greeting_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        Self {
            assistant: AssistantClient::new(config.assistant_url),
            webhook: LeadWebhookClient::new(config.webhook_url),
            classifier: IntentClassifier::default(),
            messages: Vec::new(),
            is_typing: false,
            is_contact_form_active: false,
            contact_form: ContactFormFields::default(),
            greeting_delay: config.greeting_delay,
            rng,
            cancel: CancellationToken::new(),
            logger: None,
        }
    }

    /// Replace the default trigger set.
    pub fn with_classifier(mut self, classifier: IntentClassifier) -> Self {
        self.classifier = classifier;
        self
    }

    /// Attach a transcript logger; every appended message is mirrored to it.
    pub fn set_logger(&mut self, logger: ConversationLogger) {
        self.logger = Some(logger);
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn is_typing(&self) -> bool {
        self.is_typing
    }

    pub fn is_contact_form_active(&self) -> bool {
        self.is_contact_form_active
    }

    pub fn contact_form(&self) -> &ContactFormFields {
        &self.contact_form
    }

    /// Token tied to this session's lifetime; cancelled by [`close`].
    ///
    /// [`close`]: ChatSession::close
    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    /// Tear the session down. Any in-flight network call resolves into a
    /// no-op instead of mutating a session nobody is looking at anymore.
    pub fn close(&self) {
        self.cancel.cancel();
    }

    /// Seed a fresh conversation with the opening assistant message.
    ///
    /// Exactly one greeting is appended, drawn from the fixed pool; no
    /// network call is made. Calling this on a non-empty session does
    /// nothing.
    pub async fn initialize(&mut self) {
        if !self.messages.is_empty() {
            return;
        }

        self.is_typing = true;
        let greeting = pick_greeting(&mut self.rng);

        // Brief pause so the typing indicator registers before the greeting
        tokio::time::sleep(self.greeting_delay).await;

        self.push_message(ChatMessage::assistant(greeting)).await;
        self.is_typing = false;
    }

    /// Handle one submission from the input box.
    ///
    /// Empty (after trimming) input is ignored. While the contact form is
    /// pending, ordinary chat input is refused: the call clears `is_typing`
    /// and returns without appending anything.
    pub async fn submit_user_message(&mut self, text: &str) {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return;
        }

        if self.is_contact_form_active {
            self.is_typing = false;
            return;
        }

        self.push_message(ChatMessage::user(trimmed)).await;
        self.is_typing = true;

        if self.classifier.classify(trimmed) == MessageIntent::ContactIntent {
            self.activate_contact_form().await;
            return;
        }

        // Every prior turn, excluding the message just appended
        let history: Vec<HistoryEntry> = self.messages[..self.messages.len() - 1]
            .iter()
            .map(HistoryEntry::from)
            .collect();

        let cancel = self.cancel.clone();
        let outcome = tokio::select! {
            result = self.assistant.chat(trimmed, &history) => Some(result),
            _ = cancel.cancelled() => None,
        };

        match outcome {
            Some(Ok(reply)) => {
                self.push_message(ChatMessage::assistant(reply)).await;
            }
            Some(Err(e)) => {
                eprintln!("{} Assistant call failed: {:#}", "⚠️".yellow(), e);
                self.push_message(ChatMessage::assistant(ASSISTANT_FAILURE_REPLY)).await;
            }
            // Session was closed mid-flight; drop the response
            None => {}
        }

        self.is_typing = false;
    }

    /// Submit a canned starter exactly as if the user had typed it.
    ///
    /// A starter that itself signals contact intent activates the form
    /// directly; no assistant round trip is made for it.
    pub async fn select_conversation_starter(&mut self, starter: &ConversationStarter) {
        self.submit_user_message(&starter.submit_text).await;
    }

    /// Mutate one contact-form field. Validation is deferred to submit time.
    pub fn update_form_field(&mut self, field: FormField, value: &str) {
        self.contact_form.set_field(field, value);
    }

    /// Submit the contact form: the lead goes to the workflow webhook, then a
    /// personalized confirmation is requested from the assistant.
    ///
    /// Missing required fields keep the form open. Once the webhook has
    /// accepted the lead, the user always gets a confirmation, AI-written or
    /// not. Every post-validation path closes the form and resets its fields.
    pub async fn submit_contact_form(&mut self) {
        self.is_typing = true;

        let missing = self.contact_form.missing_fields();
        if !missing.is_empty() {
            // Form stays open so the user can correct it
            self.push_message(ChatMessage::assistant(format!(
                "Please fill out all required fields: {}.",
                missing.join(", ")
            )))
            .await;
            self.is_typing = false;
            return;
        }

        let lead = self.contact_form.clone();
        let cancel = self.cancel.clone();

        let submitted = tokio::select! {
            result = self.webhook.submit(&lead) => Some(result),
            _ = cancel.cancelled() => None,
        };

        let submitted = match submitted {
            Some(result) => result,
            None => {
                self.is_typing = false;
                return;
            }
        };

        if let Err(e) = submitted {
            eprintln!("{} Lead webhook call failed: {:#}", "⚠️".yellow(), e);
            self.push_message(ChatMessage::assistant(format!(
                "Sorry, {}, there was an issue sending your message through our system. \
                 Please try again shortly.",
                lead.name
            )))
            .await;
            self.finish_form_submission();
            return;
        }

        // The lead is safely in the workflow; ask for a personalized
        // confirmation, with the fixed sentence as the safety net.
        let prompt = confirmation_prompt(&lead);
        let start = self.messages.len().saturating_sub(CONFIRMATION_CONTEXT_TURNS);
        let history: Vec<HistoryEntry> =
            self.messages[start..].iter().map(HistoryEntry::from).collect();

        let confirmation = tokio::select! {
            result = self.assistant.chat(&prompt, &history) => Some(result),
            _ = cancel.cancelled() => None,
        };

        match confirmation {
            Some(Ok(reply)) => {
                self.push_message(ChatMessage::assistant(reply)).await;
            }
            Some(Err(e)) => {
                eprintln!("{} Confirmation call failed: {:#}", "⚠️".yellow(), e);
                self.push_message(ChatMessage::assistant(fallback_confirmation(&lead.name)))
                    .await;
            }
            None => {}
        }

        self.finish_form_submission();
    }

    /// Retire the form: deactivate, reset fields, stop the typing indicator.
    fn finish_form_submission(&mut self) {
        self.is_contact_form_active = false;
        self.contact_form.reset();
        self.is_typing = false;
    }

    /// Two assistant messages: the hand-off text and the form placeholder.
    async fn activate_contact_form(&mut self) {
        self.push_message(ChatMessage::assistant(FORM_HANDOFF_REPLY)).await;
        self.push_message(ChatMessage::form_placeholder()).await;
        self.contact_form.reset();
        self.is_contact_form_active = true;
        self.is_typing = false;
    }

    async fn push_message(&mut self, msg: ChatMessage) {
        if let Some(logger) = &mut self.logger {
            logger.log_message(&msg).await;
        }
        self.messages.push(msg);
    }
}

/// Fixed confirmation used when the AI confirmation call fails after the
/// webhook has already accepted the lead.
pub fn fallback_confirmation(name: &str) -> String {
    format!(
        "Thanks, {}! Your message has been successfully sent to Reid. I'll make sure he sees it!",
        name
    )
}

/// Build the prompt that asks the assistant for a personalized confirmation
/// once a lead has been accepted by the workflow.
pub(crate) fn confirmation_prompt(lead: &ContactFormFields) -> String {
    let preview = safe_truncate(&lead.message, MESSAGE_PREVIEW_CHARS);
    format!(
        "You are Otto, a helpful and friendly AI assistant for Fluxstream. \
         A user named \"{name}\" has just submitted a message for Reid. \
         Their message summary is: \"{preview}\" \
         (Their full contact method is {method} at {details}) \
         Please craft a reassuring and slightly personalized confirmation message for \"{name}\". \
         Acknowledge their message has been sent to Reid. \
         You can be a little witty, smart, or professional, adapting your tone. \
         Conclude by assuring them Reid will get the message.",
        name = lead.name,
        preview = preview,
        method = lead.contact_method.as_str(),
        details = lead.contact_details,
    )
}
