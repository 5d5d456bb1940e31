//! Error types for the client.

use thiserror::Error;

/// Client error type.
///
/// Service calls never translate errors: whatever the HTTP layer produces is
/// what the caller (and the dispatcher) sees.
#[derive(Error, Debug)]
pub enum Error {
    /// HTTP request failed before a response was received.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Invalid URL.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// API returned a non-2xx response.
    #[error("API error ({status}): {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Error message from the API.
        message: String,
    },

    /// A successful auth response did not carry a token payload.
    #[error("Response did not contain a token payload")]
    MissingToken,

    /// Credential or session storage failure.
    #[error("Storage error: {0}")]
    Storage(String),

    /// Filesystem error from a file-backed store.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl Error {
    /// Message suitable for a user-facing notification.
    pub fn user_message(&self) -> String {
        match self {
            Self::Api { message, .. } => message.clone(),
            other => other.to_string(),
        }
    }

    /// HTTP status of an API error, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            Self::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

impl From<config::ConfigError> for Error {
    fn from(e: config::ConfigError) -> Self {
        Self::Config(e.to_string())
    }
}

/// Result type alias for client operations.
pub type Result<T> = std::result::Result<T, Error>;
