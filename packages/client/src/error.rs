//! Client error types

use thiserror::Error;

use crate::api::LimitNotice;

/// Result type for backend operations
pub type ClientResult<T> = Result<T, ClientError>;

/// Errors produced while talking to the BAAC backend
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Invalid response from {endpoint}: {detail}")]
    InvalidResponse { endpoint: String, detail: String },

    #[error("HTTP {status}: {message}")]
    Http { status: u16, message: String },

    /// The backend answered but refused the operation (`success: false`).
    #[error("Request rejected: {0}")]
    Rejected(String),

    /// The daily copy quota for a document type is spent (HTTP 429).
    #[error("Daily copy limit reached for {}", .0.document_type)]
    LimitExceeded(LimitNotice),
}

impl ClientError {
    /// Create an invalid-response error for a given endpoint
    pub fn invalid(endpoint: impl Into<String>, detail: impl Into<String>) -> Self {
        Self::InvalidResponse {
            endpoint: endpoint.into(),
            detail: detail.into(),
        }
    }

    /// Create a rejection error carrying server-supplied text
    pub fn rejected(msg: impl Into<String>) -> Self {
        Self::Rejected(msg.into())
    }

    /// Check if this is a network-related error
    pub fn is_network_error(&self) -> bool {
        matches!(self, ClientError::Network(_))
    }

    /// Check if this is a daily-limit error
    pub fn is_limit_error(&self) -> bool {
        matches!(self, ClientError::LimitExceeded(_))
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        Self::Network(err.to_string())
    }
}
