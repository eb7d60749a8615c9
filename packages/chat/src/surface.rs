//! Host-surface seam between the controller and whatever renders it
//!
//! The controller owns conversation state and pushes explicit notifications
//! through [`ChatSurface`]; nothing in the core ever touches a screen.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use baac_client::ChatSummary;

use crate::form::RequestForm;
use crate::limits::{LimitLedger, ResetCountdown};

/// Who authored a transcript entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Author {
    User,
    Assistant,
}

/// One rendered line of conversation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranscriptEntry {
    pub id: String,
    pub body: String,
    pub author: Author,
    pub posted_at: DateTime<Utc>,
}

impl TranscriptEntry {
    /// Create an entry for the person typing
    pub fn user(body: impl Into<String>) -> Self {
        Self::new(body.into(), Author::User)
    }

    /// Create an entry for the assistant
    pub fn assistant(body: impl Into<String>) -> Self {
        Self::new(body.into(), Author::Assistant)
    }

    fn new(body: String, author: Author) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            body,
            author,
            posted_at: Utc::now(),
        }
    }

    /// Display-friendly author label
    pub fn author_label(&self) -> &'static str {
        match self.author {
            Author::User => "You",
            Author::Assistant => "BAAC",
        }
    }
}

/// Interactive affordance the backend can ask the page to show
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Card {
    /// Offer to open the request form for one document
    FormSuggestion {
        document_type: String,
        /// Today's quota for that document is already spent
        limit_reached: bool,
    },
    /// Offer the full list of requestable documents
    AllDocuments,
    /// The viewer must sign in before requesting this document
    AuthRequired { document_type: String },
}

/// Toast severity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notice {
    Success,
    Error,
    Info,
}

/// Rendering and session facilities provided by the hosting surface
///
/// Methods are notifications, not questions: the controller has already
/// updated its state when they fire. The one exception is
/// [`is_signed_in`](ChatSurface::is_signed_in), which reads the host
/// session marker this component never sets.
pub trait ChatSurface {
    /// Whether the viewer is signed in, per the host session
    fn is_signed_in(&self) -> bool;

    /// A transcript entry was appended and should scroll into view
    fn message_appended(&mut self, entry: &TranscriptEntry);

    /// An affordance card should render after the latest message
    fn card_shown(&mut self, card: &Card);

    /// Blocking alert that demands acknowledgement
    fn alert(&mut self, text: &str);

    /// Non-blocking toast
    fn notify(&mut self, kind: Notice, text: &str);

    /// The open form changed and should re-render
    fn form_updated(&mut self, form: &RequestForm, ledger: &LimitLedger);

    /// The form closed; tear down anything showing it
    fn form_closed(&mut self);

    /// Cached allowances changed; refresh any limit displays
    fn limits_refreshed(&mut self, ledger: &LimitLedger);

    /// A quota reset countdown should start ticking
    fn countdown_started(&mut self, countdown: ResetCountdown);

    /// Navigate away to the admin dashboard
    fn admin_redirect(&mut self, url: &str);

    /// A different chat became the active one
    fn chat_opened(&mut self, chat_id: i64);

    /// The cached chat list changed
    fn chat_list_updated(&mut self, chats: &[ChatSummary]);

    /// The visible transcript should clear
    fn transcript_cleared(&mut self);
}
