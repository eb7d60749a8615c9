//! Chat session core for the Barangay Amungan Assistant Chatbot
//!
//! Everything the chat page decides locally lives here: the document
//! catalog, the interrogative-aware intent classifier, the copy-limit
//! ledger, the multi-document request form, and the [`ChatController`]
//! that drives a session against a [`baac_client::BaacClient`]. Rendering
//! stays behind the [`ChatSurface`] trait so terminal and test hosts plug
//! in the same way.

pub mod catalog;
pub mod form;
pub mod intent;
pub mod limits;
pub mod session;
pub mod surface;

// Re-export commonly used types
pub use catalog::{Catalog, DocumentType};
pub use form::{
    CopiesInput, CopiesOutcome, DocumentDraft, FormError, RequestForm, SubmitControl,
    ToggleOutcome,
};
pub use intent::{classify, IntentDescriptor, INTERROGATIVE_WORDS};
pub use limits::{DayRollover, LimitLedger, ResetCountdown, MAX_COPIES_PER_REQUEST};
pub use session::{
    ChatController, PromptOutcome, SubmitOutcome, DEFAULT_CHAT_TITLE, GREETING_PRIMARY,
    GREETING_SECONDARY,
};
pub use surface::{Author, Card, ChatSurface, Notice, TranscriptEntry};
