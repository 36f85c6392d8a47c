//! Error types for the catalog client.

use stepin_core::errors::FetchError;
use thiserror::Error;

/// Result type alias for catalog operations.
pub type Result<T> = std::result::Result<T, CatalogError>;

/// Errors that can occur while talking to the listing API.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// HTTP client error
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Non-success response from the API
    #[error("API error ({status}): {body}")]
    Api { status: u16, body: String },

    /// Invalid client configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl From<CatalogError> for FetchError {
    fn from(err: CatalogError) -> Self {
        match err {
            CatalogError::Http(e) => FetchError::Transport(e.to_string()),
            CatalogError::Api { status, body } => FetchError::api(status, body),
            CatalogError::InvalidConfig(message) => FetchError::Transport(message),
        }
    }
}
