//! Error types for the mailer.

use stepin_core::errors::SendError;
use thiserror::Error;

/// Result type alias for mailer operations.
pub type Result<T> = std::result::Result<T, MailerError>;

#[derive(Debug, Error)]
pub enum MailerError {
    /// HTTP client error
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The relay answered with a non-success status
    #[error("Relay error ({status}): {message}")]
    Relay { status: u16, message: String },

    /// The message cannot be sent as built
    #[error("Invalid message: {0}")]
    InvalidMessage(String),

    /// Missing API key or base URL
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl From<MailerError> for SendError {
    fn from(err: MailerError) -> Self {
        match err {
            MailerError::Http(e) => SendError::Transport(e.to_string()),
            MailerError::Relay { status, message } => SendError::rejected(status, message),
            MailerError::InvalidMessage(message) => SendError::InvalidMessage(message),
            MailerError::InvalidConfig(message) => SendError::Transport(message),
        }
    }
}
