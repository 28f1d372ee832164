//! Gateway error taxonomy.

use thiserror::Error;

use stockdesk_core::DomainError;

/// Fallback shown when the backend supplies no message of its own.
pub const GENERIC_ERROR_MESSAGE: &str = "The operation could not be completed";

/// Errors produced by the gateway and everything built on it.
#[derive(Debug, Error)]
pub enum ApiError {
    /// A local precondition failed; no request was dispatched.
    #[error("{0}")]
    Validation(#[from] DomainError),

    /// The backend rejected the current credentials (401/403). The gateway
    /// broadcasts the forced-logout signal before returning this.
    #[error("authorization rejected (status {status})")]
    Authorization {
        status: u16,
        message: Option<String>,
    },

    /// Any other non-2xx response.
    #[error("backend error (status {status}): {message}")]
    Backend { status: u16, message: String },

    /// The request never completed (DNS, connect, timeout, ...).
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// A 2xx response that did not match the expected envelope shape.
    #[error("malformed response: {0}")]
    Decode(String),
}

impl ApiError {
    /// Message suitable for direct display to the user.
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Validation(err) => err.to_string(),
            ApiError::Authorization { message, .. } => message
                .clone()
                .unwrap_or_else(|| GENERIC_ERROR_MESSAGE.to_string()),
            ApiError::Backend { message, .. } => message.clone(),
            ApiError::Transport(_) | ApiError::Decode(_) => GENERIC_ERROR_MESSAGE.to_string(),
        }
    }
}
