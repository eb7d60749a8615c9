//! API request and response models for the BAAC backend
//!
//! Field names follow the backend's JSON contract, which mixes snake_case
//! and camelCase; serde renames keep the Rust side uniform.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Classified chat prompt sent to the chat endpoint
#[derive(Debug, Clone, Serialize)]
pub struct ChatQuery {
    pub prompt: String,
    /// Serialized as `null` when no chat is active, matching the backend contract.
    pub chat_id: Option<i64>,
    #[serde(rename = "isDirectDocumentRequest")]
    pub is_direct_document_request: bool,
    #[serde(rename = "containsDocumentType")]
    pub contains_document_type: bool,
    #[serde(rename = "containsDocumentWord")]
    pub contains_document_word: bool,
    #[serde(rename = "containsInterrogative")]
    pub contains_interrogative: bool,
    #[serde(rename = "startsWithInterrogative")]
    pub starts_with_interrogative: bool,
    #[serde(rename = "requestedDocType")]
    pub requested_doc_type: Option<String>,
}

/// Reply from the chat endpoint
///
/// Every field is optional on the wire; the backend only sets the flags
/// relevant to the affordance it wants shown.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChatReply {
    #[serde(default)]
    pub response: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(rename = "showFormButton", default)]
    pub show_form_button: bool,
    #[serde(rename = "formType", default)]
    pub form_type: Option<String>,
    #[serde(rename = "suggestForm", default)]
    pub suggest_form: bool,
    #[serde(rename = "suggestAllDocuments", default)]
    pub suggest_all_documents: bool,
    #[serde(rename = "requiresAuth", default)]
    pub requires_auth: bool,
    #[serde(rename = "documentType", default)]
    pub document_type: Option<String>,
}

/// One document request form submission
#[derive(Debug, Clone, Serialize)]
pub struct DocumentSubmission {
    pub document_types: Vec<String>,
    pub date: String,
    pub purpose: String,
    #[serde(rename = "copyC")]
    pub clearance_copies: u32,
    #[serde(rename = "copyI")]
    pub indigency_copies: u32,
    #[serde(rename = "copyR")]
    pub residency_copies: u32,
    /// Unlike `ChatQuery`, the backend expects this key to be absent when
    /// the request is not tied to a chat.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chat_id: Option<i64>,
}

/// Rate-limit details attached to an HTTP 429 reply
#[derive(Debug, Clone, Deserialize)]
pub struct LimitNotice {
    pub document_type: String,
    pub used: u32,
    pub limit: u32,
    #[serde(default, deserialize_with = "flexible_time::deserialize_opt")]
    pub reset_time: Option<DateTime<Utc>>,
}

/// Per-document daily quota as reported by the backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct CopyAllowance {
    pub used: u32,
    pub limit: u32,
    pub remaining: u32,
}

/// One conversation thread owned by the signed-in user
#[derive(Debug, Clone, Deserialize)]
pub struct ChatSummary {
    pub id: i64,
    pub title: String,
    #[serde(default, deserialize_with = "flexible_time::deserialize_opt")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// One stored message inside a chat
#[derive(Debug, Clone, Deserialize)]
pub struct MessageRecord {
    pub message: String,
    #[serde(deserialize_with = "deserialize_truthy")]
    pub is_user: bool,
}

/// Identity of a freshly created chat
#[derive(Debug, Clone)]
pub struct NewChat {
    pub id: i64,
    pub title: String,
}

/// Reply from the copy-limits endpoint
#[derive(Debug, Deserialize)]
pub struct LimitReply {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub limits: HashMap<String, CopyAllowance>,
    #[serde(default)]
    pub error: Option<String>,
}

/// Reply from the document submission endpoint
#[derive(Debug, Deserialize)]
pub struct SubmitReply {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub response: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub limit_info: Option<LimitNotice>,
}

/// Reply from the today-date endpoint
#[derive(Debug, Deserialize)]
pub struct TodayReply {
    pub date: String,
}

/// Reply from the chat list endpoint
#[derive(Debug, Deserialize)]
pub struct ChatListReply {
    #[serde(default)]
    pub chats: Vec<ChatSummary>,
}

/// Reply from the new-chat endpoint
#[derive(Debug, Deserialize)]
pub struct NewChatReply {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub chat_id: Option<i64>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

/// Reply from the chat messages endpoint
#[derive(Debug, Deserialize)]
pub struct MessagesReply {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub messages: Vec<MessageRecord>,
}

/// Bare acknowledgement reply used by rename and delete
#[derive(Debug, Deserialize)]
pub struct AckReply {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub error: Option<String>,
}

/// Body for the rename endpoint
#[derive(Debug, Serialize)]
pub struct TitlePayload {
    pub title: String,
}

/// Accepts SQLite-style integers where the backend reports booleans.
fn deserialize_truthy<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: serde::Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Flag(bool),
        Count(i64),
    }

    Ok(match Raw::deserialize(deserializer)? {
        Raw::Flag(flag) => flag,
        Raw::Count(count) => count != 0,
    })
}

/// Tolerant timestamp parsing for backend-supplied times.
///
/// The backend emits RFC 3339 in newer builds, SQLite `CURRENT_TIMESTAMP`
/// strings elsewhere, and epoch milliseconds from one legacy route. Naive
/// strings are interpreted in local time, which is how the original web
/// client displayed them.
mod flexible_time {
    use chrono::{DateTime, Local, NaiveDateTime, TimeZone, Utc};
    use serde::{Deserialize, Deserializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Millis(i64),
    }

    pub fn deserialize_opt<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Option::<Raw>::deserialize(deserializer)?;
        Ok(raw.and_then(|raw| match raw {
            Raw::Text(text) => parse_text(&text),
            Raw::Millis(millis) => Utc.timestamp_millis_opt(millis).single(),
        }))
    }

    fn parse_text(text: &str) -> Option<DateTime<Utc>> {
        if let Ok(parsed) = DateTime::parse_from_rfc3339(text) {
            return Some(parsed.with_timezone(&Utc));
        }
        if let Ok(parsed) = DateTime::parse_from_rfc2822(text) {
            return Some(parsed.with_timezone(&Utc));
        }
        NaiveDateTime::parse_from_str(text, "%Y-%m-%d %H:%M:%S")
            .ok()
            .and_then(|naive| Local.from_local_datetime(&naive).single())
            .map(|local| local.with_timezone(&Utc))
    }
}
