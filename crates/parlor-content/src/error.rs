//! Error types for content store access.

use thiserror::Error;

/// Result type alias using `ContentError`.
pub type Result<T> = std::result::Result<T, ContentError>;

/// Errors raised while querying the content store.
#[derive(Error, Debug)]
pub enum ContentError {
    /// Transport failure (connect, TLS, timeout).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The content store answered with a non-success status.
    #[error("Content API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// Response body was not valid JSON.
    #[error("Decode error: {0}")]
    Decode(#[from] serde_json::Error),

    /// Response JSON did not have the expected shape.
    #[error("Unexpected response shape: {0}")]
    UnexpectedShape(String),
}

impl ContentError {
    /// Create an API error.
    pub fn api(status: u16, message: impl Into<String>) -> Self {
        Self::Api {
            status,
            message: message.into(),
        }
    }

    /// Create an unexpected-shape error.
    pub fn unexpected_shape(message: impl Into<String>) -> Self {
        Self::UnexpectedShape(message.into())
    }
}
