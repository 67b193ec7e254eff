//! Error taxonomy for REST calls.
//!
//! ERROR HANDLING
//! ==============
//! Transport, HTTP, and envelope failures collapse into one `ApiError` so
//! mutation handlers can pick a toast message with `user_message` and the
//! session validator can tell authentication failures apart.

use thiserror::Error;

/// Failure from a backend call.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ApiError {
    /// The request never produced a response.
    #[error("network error: {0}")]
    Network(String),
    /// The backend rejected the bearer token.
    #[error("unauthorized")]
    Unauthorized,
    /// Non-success HTTP status with an optional server message.
    #[error("request failed ({status})")]
    Http { status: u16, message: Option<String> },
    /// The envelope reported `success: false`.
    #[error("request rejected: {0}")]
    Envelope(String),
    /// Body did not match the expected shape.
    #[error("decode error: {0}")]
    Decode(String),
    /// HTTP is only available in the browser build.
    #[error("not available on server")]
    Unavailable,
}

impl ApiError {
    /// Best-effort human-readable message; `fallback` when the server gave none.
    #[must_use]
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            Self::Envelope(message) | Self::Http { message: Some(message), .. } if !message.trim().is_empty() => {
                message.clone()
            }
            Self::Unauthorized => "Your session has expired. Please sign in again.".to_owned(),
            _ => fallback.to_owned(),
        }
    }

    /// Whether this failure invalidates the session.
    #[must_use]
    pub fn is_auth_failure(&self) -> bool {
        matches!(self, Self::Unauthorized | Self::Http { status: 401 | 403, .. })
    }
}
