//! # ottochat-chat
//!
//! The conversation controller behind the Fluxstream site's floating chat
//! widget. A [`ChatSession`] owns a linear message history and the two flags
//! that gate user input (`is_typing`, `is_contact_form_active`), toggles
//! between free-form chat and the inline contact-capture form, and drives the
//! two sequential network calls a lead submission needs (workflow webhook,
//! then AI confirmation) with fallbacks when either fails.
//!
//! State lives in the session instance and nowhere else; a fresh session
//! starts with a randomly chosen greeting and dies with the widget.

pub mod greetings;
pub mod intent;
pub mod session;
pub mod starters;


pub use intent::{IntentClassifier, MessageIntent};
pub use session::{ChatSession, SessionConfig, ASSISTANT_FAILURE_REPLY, FORM_HANDOFF_REPLY};
pub use starters::{default_starters, ConversationStarter};
