//! Core error types for the subscription watcher.
//!
//! Adapter crates (HTTP catalog, gist storage, mail relay) convert their
//! transport-specific errors into these types at the trait boundary, so the
//! core stays free of any HTTP or storage dependency.

use thiserror::Error;

/// Type alias for Result using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Root error type for a monitoring run.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Failed to fetch subscriptions: {0}")]
    Fetch(#[from] FetchError),

    #[error("Failed to send notification: {0}")]
    Send(#[from] SendError),
}

/// Errors raised while fetching the subscription listing.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    /// The request never produced a response (DNS, TLS, timeout, ...).
    #[error("Request failed: {0}")]
    Transport(String),

    /// The API answered with a non-success status.
    #[error("API returned status {status}")]
    Api { status: u16, body: String },

    /// The response body did not match the expected subscription shape.
    #[error("Invalid subscription payload: {0}")]
    InvalidPayload(String),
}

impl FetchError {
    pub fn api(status: u16, body: impl Into<String>) -> Self {
        Self::Api {
            status,
            body: body.into(),
        }
    }

    pub fn invalid_payload(message: impl Into<String>) -> Self {
        Self::InvalidPayload(message.into())
    }

    /// HTTP status of the failed response, when there was one.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Response body of the failed request, when there was one.
    pub fn body(&self) -> Option<&str> {
        match self {
            Self::Api { body, .. } if !body.is_empty() => Some(body.as_str()),
            _ => None,
        }
    }
}

/// Backend-agnostic storage errors.
///
/// Every detail is kept as a string so that gist, file and in-memory
/// backends can all report through the same type.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StorageError {
    #[error("Failed to read '{key}': {message}")]
    ReadFailed { key: String, message: String },

    #[error("Failed to write '{key}': {message}")]
    WriteFailed { key: String, message: String },

    #[error("Failed to (de)serialize '{key}': {message}")]
    Serialization { key: String, message: String },

    #[error("Storage backend unavailable: {0}")]
    Unavailable(String),
}

impl StorageError {
    pub fn read(key: &str, message: impl ToString) -> Self {
        Self::ReadFailed {
            key: key.to_string(),
            message: message.to_string(),
        }
    }

    pub fn write(key: &str, message: impl ToString) -> Self {
        Self::WriteFailed {
            key: key.to_string(),
            message: message.to_string(),
        }
    }

    pub fn serialization(key: &str, message: impl ToString) -> Self {
        Self::Serialization {
            key: key.to_string(),
            message: message.to_string(),
        }
    }
}

/// Errors raised by the outbound mail relay.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SendError {
    #[error("Mail relay unreachable: {0}")]
    Transport(String),

    #[error("Mail relay rejected the message ({status}): {message}")]
    Rejected { status: u16, message: String },

    #[error("Invalid message: {0}")]
    InvalidMessage(String),
}

impl SendError {
    pub fn rejected(status: u16, message: impl Into<String>) -> Self {
        Self::Rejected {
            status,
            message: message.into(),
        }
    }
}
