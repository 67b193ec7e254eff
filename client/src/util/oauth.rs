//! Social-login redirect callback parsing.
//!
//! The backend finishes the provider handshake and redirects to
//! `/auth/callback` with tokens and profile fields as query parameters.
//! `parse_callback` turns them into a session-ready `(User, Tokens)` pair.

#[cfg(test)]
#[path = "oauth_test.rs"]
mod oauth_test;

use std::collections::HashMap;

use thiserror::Error;

use crate::net::types::{Role, Tokens, User, UserStatus};

/// Query parameters the callback reads; anything else is ignored.
pub const CALLBACK_PARAMS: [&str; 11] = [
    "error",
    "error_description",
    "access_token",
    "refresh_token",
    "role",
    "user_id",
    "email",
    "full_name",
    "status",
    "is_verified",
    "avatar_url",
];

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum OAuthCallbackError {
    /// The provider or backend reported a failure.
    #[error("sign-in failed: {0}")]
    Provider(String),
    #[error("missing callback parameter `{0}`")]
    Missing(&'static str),
    #[error("unknown role `{0}`")]
    InvalidRole(String),
}

fn required(params: &HashMap<String, String>, name: &'static str) -> Result<String, OAuthCallbackError> {
    params
        .get(name)
        .map(|v| v.trim())
        .filter(|v| !v.is_empty())
        .map(str::to_owned)
        .ok_or(OAuthCallbackError::Missing(name))
}

fn optional(params: &HashMap<String, String>, name: &str) -> Option<String> {
    params.get(name).map(|v| v.trim()).filter(|v| !v.is_empty()).map(str::to_owned)
}

/// Build the session payload from callback query parameters.
///
/// # Errors
///
/// Returns [`OAuthCallbackError`] when the redirect carries an `error`, a
/// required field is missing, or the role is not recognized.
pub fn parse_callback(params: &HashMap<String, String>) -> Result<(User, Tokens), OAuthCallbackError> {
    if let Some(error) = optional(params, "error") {
        let detail = optional(params, "error_description").unwrap_or(error);
        return Err(OAuthCallbackError::Provider(detail));
    }

    let tokens = Tokens {
        access_token: required(params, "access_token")?,
        refresh_token: required(params, "refresh_token")?,
    };
    let raw_role = required(params, "role")?;
    let role = Role::parse(&raw_role).ok_or(OAuthCallbackError::InvalidRole(raw_role))?;
    let user = User {
        id: required(params, "user_id")?,
        email: required(params, "email")?,
        full_name: optional(params, "full_name").unwrap_or_default(),
        role,
        status: optional(params, "status")
            .and_then(|s| UserStatus::parse(&s))
            .unwrap_or_default(),
        is_verified: optional(params, "is_verified").is_some_and(|v| v == "true" || v == "1"),
        avatar_url: optional(params, "avatar_url"),
    };
    Ok((user, tokens))
}
