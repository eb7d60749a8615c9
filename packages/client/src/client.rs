use reqwest::{Client, StatusCode};
use std::collections::HashMap;
use std::time::Duration;

use crate::api::{
    AckReply, ChatListReply, ChatQuery, ChatReply, ChatSummary, CopyAllowance, DocumentSubmission,
    LimitReply, MessageRecord, MessagesReply, NewChat, NewChatReply, SubmitReply, TitlePayload,
    TodayReply,
};
use crate::error::{ClientError, ClientResult};

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Main client for the BAAC backend
///
/// One instance per session; cloning shares the underlying connection pool.
#[derive(Clone)]
pub struct BaacClient {
    http_client: Client,
    base_url: String,
}

impl BaacClient {
    /// Create a client with the default request timeout
    pub fn new(base_url: impl Into<String>) -> ClientResult<Self> {
        Self::with_timeout(base_url, DEFAULT_TIMEOUT)
    }

    /// Create a client with an explicit request timeout
    pub fn with_timeout(base_url: impl Into<String>, timeout: Duration) -> ClientResult<Self> {
        let http_client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ClientError::Network(e.to_string()))?;

        Ok(Self {
            http_client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    /// Base URL this client talks to
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Send a classified prompt to the chat endpoint
    ///
    /// The reply is returned as-is even for non-2xx statuses; the backend
    /// reports problems through the `error` field of the same JSON shape.
    pub async fn send_prompt(&self, query: &ChatQuery) -> ClientResult<ChatReply> {
        let url = format!("{}/get_response", self.base_url);

        let response = self
            .http_client
            .post(&url)
            .json(query)
            .send()
            .await
            .map_err(|e| ClientError::Network(e.to_string()))?;

        response
            .json::<ChatReply>()
            .await
            .map_err(|e| ClientError::invalid("/get_response", e.to_string()))
    }

    /// Submit a document request form
    ///
    /// Returns the confirmation text on success. A spent daily quota (HTTP
    /// 429 with limit details) maps to [`ClientError::LimitExceeded`]; any
    /// other backend refusal maps to [`ClientError::Rejected`] carrying the
    /// server-supplied text.
    pub async fn submit_document(&self, submission: &DocumentSubmission) -> ClientResult<String> {
        let url = format!("{}/submit_document", self.base_url);

        let response = self
            .http_client
            .post(&url)
            .json(submission)
            .send()
            .await
            .map_err(|e| ClientError::Network(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| ClientError::Network(e.to_string()))?;
        let reply: SubmitReply = serde_json::from_str(&body).map_err(|e| {
            if status.is_success() {
                ClientError::invalid("/submit_document", e.to_string())
            } else {
                // Proxies and crashed handlers answer with plain text.
                ClientError::Http {
                    status: status.as_u16(),
                    message: body.trim().to_string(),
                }
            }
        })?;

        if status == StatusCode::TOO_MANY_REQUESTS {
            if let Some(notice) = reply.limit_info {
                return Err(ClientError::LimitExceeded(notice));
            }
        }

        if reply.success {
            return Ok(reply.response.unwrap_or_default());
        }

        Err(ClientError::Rejected(reply.error.or(reply.message).unwrap_or_else(
            || "Failed to submit document request".to_string(),
        )))
    }

    /// Fetch today's per-document copy allowances
    pub async fn copy_limits(&self) -> ClientResult<HashMap<String, CopyAllowance>> {
        let url = format!("{}/user/copy-limits", self.base_url);

        let response = self
            .http_client
            .get(&url)
            .send()
            .await
            .map_err(|e| ClientError::Network(e.to_string()))?;

        let reply: LimitReply = response
            .json()
            .await
            .map_err(|e| ClientError::invalid("/user/copy-limits", e.to_string()))?;

        if reply.success {
            Ok(reply.limits)
        } else {
            Err(ClientError::Rejected(
                reply
                    .error
                    .unwrap_or_else(|| "Failed to load copy limits".to_string()),
            ))
        }
    }

    /// Fetch the backend's notion of today's date
    ///
    /// The value is an opaque string compared only for equality by the
    /// day-rollover watch.
    pub async fn today(&self) -> ClientResult<String> {
        let url = format!("{}/api/today-date", self.base_url);

        let response = self
            .http_client
            .get(&url)
            .send()
            .await
            .map_err(|e| ClientError::Network(e.to_string()))?;

        let reply: TodayReply = response
            .json()
            .await
            .map_err(|e| ClientError::invalid("/api/today-date", e.to_string()))?;

        Ok(reply.date)
    }

    /// List the user's chats, most recently updated first
    pub async fn list_chats(&self) -> ClientResult<Vec<ChatSummary>> {
        let url = format!("{}/user/chats", self.base_url);

        let response = self
            .http_client
            .get(&url)
            .send()
            .await
            .map_err(|e| ClientError::Network(e.to_string()))?;

        let reply: ChatListReply = response
            .json()
            .await
            .map_err(|e| ClientError::invalid("/user/chats", e.to_string()))?;

        Ok(reply.chats)
    }

    /// Create a new chat thread
    pub async fn create_chat(&self, title: &str) -> ClientResult<NewChat> {
        let url = format!("{}/user/chats/new", self.base_url);

        let response = self
            .http_client
            .post(&url)
            .json(&TitlePayload {
                title: title.to_string(),
            })
            .send()
            .await
            .map_err(|e| ClientError::Network(e.to_string()))?;

        let reply: NewChatReply = response
            .json()
            .await
            .map_err(|e| ClientError::invalid("/user/chats/new", e.to_string()))?;

        if !reply.success {
            return Err(ClientError::Rejected(
                reply
                    .error
                    .unwrap_or_else(|| "Failed to create new chat".to_string()),
            ));
        }

        let id = reply
            .chat_id
            .ok_or_else(|| ClientError::invalid("/user/chats/new", "missing chat_id"))?;

        Ok(NewChat {
            id,
            title: reply.title.unwrap_or_else(|| title.to_string()),
        })
    }

    /// Fetch all stored messages for a chat
    ///
    /// A `success: false` reply carries no history and renders the same as a
    /// brand-new chat, so it maps to an empty list rather than an error.
    pub async fn chat_messages(&self, chat_id: i64) -> ClientResult<Vec<MessageRecord>> {
        let url = format!("{}/user/chats/{}/messages", self.base_url, chat_id);

        let response = self
            .http_client
            .get(&url)
            .send()
            .await
            .map_err(|e| ClientError::Network(e.to_string()))?;

        let reply: MessagesReply = response
            .json()
            .await
            .map_err(|e| ClientError::invalid("/user/chats/:id/messages", e.to_string()))?;

        if reply.success {
            Ok(reply.messages)
        } else {
            Ok(Vec::new())
        }
    }

    /// Rename a chat thread
    pub async fn rename_chat(&self, chat_id: i64, title: &str) -> ClientResult<()> {
        let url = format!("{}/user/chats/{}/rename", self.base_url, chat_id);

        let response = self
            .http_client
            .post(&url)
            .json(&TitlePayload {
                title: title.to_string(),
            })
            .send()
            .await
            .map_err(|e| ClientError::Network(e.to_string()))?;

        let reply: AckReply = response
            .json()
            .await
            .map_err(|e| ClientError::invalid("/user/chats/:id/rename", e.to_string()))?;

        if reply.success {
            Ok(())
        } else {
            Err(ClientError::Rejected(
                reply
                    .error
                    .unwrap_or_else(|| "Failed to rename chat".to_string()),
            ))
        }
    }

    /// Delete a chat thread
    pub async fn delete_chat(&self, chat_id: i64) -> ClientResult<()> {
        let url = format!("{}/user/chats/{}/delete", self.base_url, chat_id);

        let response = self
            .http_client
            .post(&url)
            .send()
            .await
            .map_err(|e| ClientError::Network(e.to_string()))?;

        let reply: AckReply = response
            .json()
            .await
            .map_err(|e| ClientError::invalid("/user/chats/:id/delete", e.to_string()))?;

        if reply.success {
            Ok(())
        } else {
            Err(ClientError::Rejected(
                reply
                    .error
                    .unwrap_or_else(|| "Failed to delete chat".to_string()),
            ))
        }
    }

    /// URL of the printable preview for a submitted document
    pub fn preview_url(&self, document_id: i64) -> String {
        format!("{}/document/preview/{}", self.base_url, document_id)
    }

    /// URL of the admin dashboard the chat sentinel redirects to
    pub fn admin_url(&self) -> String {
        format!("{}/admin", self.base_url)
    }
}
