//! Core error types for order summary synchronization.
//!
//! This module defines transport-agnostic error types. Transport-specific
//! errors (from reqwest, a websocket client, etc.) are converted to these
//! types by the adapter crates.

use thiserror::Error;

/// Type alias for Result using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Root error type for order summary synchronization.
///
/// Every failure in the sync pipeline is terminal at the component
/// boundary: the loader, dispatcher, and service surface these as user
/// notifications or log entries and never propagate them to callers.
/// Only the trait seams (`SummaryFetcher`, `PubSubClient`, `SecretStore`)
/// return this type.
#[derive(Error, Debug)]
pub enum Error {
    /// No bearer token is available from the configured secret store.
    #[error("Authentication token not found")]
    AuthMissing,

    /// Network or connection level failure; the server was never reached
    /// or did not produce a well-formed response.
    #[error("Network error: {0}")]
    Transport(String),

    /// The server answered with a well-formed error envelope.
    #[error("Server error: {message}")]
    Server { message: String },

    /// Failure while attaching to or detaching from the push channel.
    #[error("Subscription error: {0}")]
    Subscription(String),

    /// Secret store access failed.
    #[error("Secret store error: {0}")]
    Secret(String),
}

impl Error {
    /// Create a transport error.
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport(message.into())
    }

    /// Create a server error from an error envelope message.
    pub fn server(message: impl Into<String>) -> Self {
        Self::Server {
            message: message.into(),
        }
    }

    /// Create a subscription error.
    pub fn subscription(message: impl Into<String>) -> Self {
        Self::Subscription(message.into())
    }

    /// Create a secret store error.
    pub fn secret(message: impl Into<String>) -> Self {
        Self::Secret(message.into())
    }
}

impl From<Error> for String {
    fn from(err: Error) -> Self {
        err.to_string()
    }
}
