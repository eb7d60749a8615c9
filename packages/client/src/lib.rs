//! BAAC Backend Client Package
//!
//! Thin async wrapper over the Barangay Amungan Assistant Chatbot backend:
//! the chat endpoint, document request submission, per-day copy limits, and
//! chat thread management.

pub mod api;
pub mod client;
pub mod error;

// Re-export commonly used types
pub use api::{
    ChatQuery, ChatReply, ChatSummary, CopyAllowance, DocumentSubmission, LimitNotice,
    MessageRecord, NewChat,
};
pub use client::BaacClient;
pub use error::{ClientError, ClientResult};
