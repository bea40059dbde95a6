//! Error types for the API client crate.

use thiserror::Error;

/// Result type alias for API client operations.
pub type Result<T> = std::result::Result<T, ApiClientError>;

/// Errors that can occur while talking to the order summary API.
#[derive(Debug, Error)]
pub enum ApiClientError {
    /// HTTP client error
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Error response from the API (error envelope or non-2xx status)
    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// Authentication error (malformed bearer token)
    #[error("Authentication error: {0}")]
    Auth(String),
}

impl ApiClientError {
    /// Create an API error from status and message
    pub fn api(status: u16, message: impl Into<String>) -> Self {
        Self::Api {
            status,
            message: message.into(),
        }
    }

    /// Create an auth error
    pub fn auth(message: impl Into<String>) -> Self {
        Self::Auth(message.into())
    }
}

impl From<ApiClientError> for ordersync_core::Error {
    /// Maps client errors into the core taxonomy: a server-supplied
    /// message becomes a server error, everything else is transport
    /// level.
    fn from(err: ApiClientError) -> Self {
        match err {
            ApiClientError::Api { message, .. } => ordersync_core::Error::server(message),
            other => ordersync_core::Error::transport(other.to_string()),
        }
    }
}
