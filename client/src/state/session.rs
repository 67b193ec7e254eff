//! Persisted auth-session state for the current browser user.
//!
//! SYSTEM CONTEXT
//! ==============
//! Used by the auth provider, route guards, and user-aware components. One
//! implementation serves both the end-user session and the administrator
//! session; `SessionKind` selects the storage key.
//!
//! INVARIANTS
//! ==========
//! - `is_authenticated` implies both tokens are present.
//! - Only `PersistedSession` fields reach storage; `has_hydrated` never does.
//! - `logout` removes the storage key before resetting memory and writes
//!   nothing afterward, so a stale projection cannot be re-persisted.

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use serde::{Deserialize, Serialize};

use super::storage::{DefaultStorage, KeyValueStorage, load_json, save_json};
use crate::net::types::{Tokens, User};

/// Which independent session a store holds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SessionKind {
    User,
    Admin,
}

impl SessionKind {
    /// Fixed `localStorage` key for this session.
    #[must_use]
    pub fn storage_key(self) -> &'static str {
        match self {
            Self::User => "auth-storage",
            Self::Admin => "admin-auth-storage",
        }
    }
}

/// In-memory session snapshot.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SessionState {
    pub user: Option<User>,
    pub access_token: Option<String>,
    pub refresh_token: Option<String>,
    pub is_authenticated: bool,
    pub has_hydrated: bool,
}

impl SessionState {
    /// Both tokens present and non-empty.
    #[must_use]
    pub fn has_tokens(&self) -> bool {
        self.access_token.as_deref().is_some_and(|t| !t.is_empty())
            && self.refresh_token.as_deref().is_some_and(|t| !t.is_empty())
    }
}

/// Projection written to storage.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersistedSession {
    pub user: Option<User>,
    pub access_token: Option<String>,
    pub refresh_token: Option<String>,
    pub is_authenticated: bool,
}

impl From<&SessionState> for PersistedSession {
    fn from(state: &SessionState) -> Self {
        Self {
            user: state.user.clone(),
            access_token: state.access_token.clone(),
            refresh_token: state.refresh_token.clone(),
            is_authenticated: state.is_authenticated,
        }
    }
}

/// Session state bound to its storage backend.
#[derive(Clone, Debug)]
pub struct SessionStore<S = DefaultStorage> {
    kind: SessionKind,
    storage: S,
    state: SessionState,
}

impl<S: KeyValueStorage> SessionStore<S> {
    /// Empty, not-yet-hydrated store.
    pub fn new(kind: SessionKind, storage: S) -> Self {
        Self { kind, storage, state: SessionState::default() }
    }

    pub fn kind(&self) -> SessionKind {
        self.kind
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn user(&self) -> Option<&User> {
        self.state.user.as_ref()
    }

    pub fn access_token(&self) -> Option<&str> {
        self.state.access_token.as_deref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.state.is_authenticated
    }

    pub fn has_hydrated(&self) -> bool {
        self.state.has_hydrated
    }

    /// Store identity and tokens from a successful sign-in.
    pub fn login(&mut self, user: User, tokens: Tokens) {
        leptos::logging::log!("session[{:?}]: login as {:?}", self.kind, user.role);
        self.state.user = Some(user);
        self.apply_tokens(tokens);
        self.persist();
    }

    /// Clear persisted storage, then reset memory. Stays hydrated.
    pub fn logout(&mut self) {
        self.storage.remove(self.kind.storage_key());
        self.state = SessionState { has_hydrated: true, ..SessionState::default() };
        leptos::logging::log!("session[{:?}]: logged out", self.kind);
    }

    /// Replace the cached identity.
    pub fn set_user(&mut self, user: User) {
        self.state.user = Some(user);
        self.persist();
    }

    /// Replace the token pair, e.g. after an OAuth redirect or a refresh.
    pub fn set_tokens(&mut self, tokens: Tokens) {
        self.apply_tokens(tokens);
        self.persist();
    }

    pub fn set_has_hydrated(&mut self, hydrated: bool) {
        self.state.has_hydrated = hydrated;
    }

    /// Mark the current access token as accepted by the backend.
    pub fn confirm(&mut self, user: User) {
        self.state.user = Some(user);
        self.state.is_authenticated = self.state.has_tokens();
        self.persist();
    }

    /// Restore the persisted projection and signal hydration.
    ///
    /// A corrupt blob is discarded and the session starts empty.
    pub fn rehydrate(&mut self) {
        let key = self.kind.storage_key();
        match load_json::<PersistedSession, _>(&self.storage, key) {
            Ok(Some(persisted)) => {
                self.state.user = persisted.user;
                self.state.access_token = persisted.access_token;
                self.state.refresh_token = persisted.refresh_token;
                self.state.is_authenticated = persisted.is_authenticated && self.state.has_tokens();
            }
            Ok(None) => {}
            Err(_) => {
                leptos::logging::warn!("session[{:?}]: discarding corrupt persisted blob", self.kind);
                self.storage.remove(key);
            }
        }
        self.state.has_hydrated = true;
    }

    fn apply_tokens(&mut self, tokens: Tokens) {
        let Tokens { access_token, refresh_token } = tokens;
        self.state.access_token = Some(access_token).filter(|t| !t.is_empty());
        self.state.refresh_token = Some(refresh_token).filter(|t| !t.is_empty());
        self.state.is_authenticated = self.state.has_tokens();
    }

    fn persist(&self) {
        save_json(&self.storage, self.kind.storage_key(), &PersistedSession::from(&self.state));
    }
}
