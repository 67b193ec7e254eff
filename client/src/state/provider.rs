//! Session validation lifecycle behind the `AuthProvider` component.
//!
//! ARCHITECTURE
//! ============
//! `SessionGate` is the pure state machine
//! `Unmounted → AwaitingHydration → Validating → Ready`. The component wires
//! its steps to browser events: mount, the hydration fallback timer, the
//! store's hydration signal, and the "who am I" response.
//!
//! INVARIANTS
//! ==========
//! - Validation starts at most once per mount.
//! - A rejected token clears the session exactly once; late or duplicate
//!   responses are ignored.

#[cfg(test)]
#[path = "provider_test.rs"]
mod provider_test;

use std::future::Future;

use super::session::SessionStore;
use super::storage::KeyValueStorage;
use crate::net::error::ApiError;
use crate::net::types::User;

/// Delay after mount before hydration is forced on.
pub const HYDRATION_FALLBACK_MS: u64 = 50;

/// Validation lifecycle phase.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AuthPhase {
    #[default]
    Unmounted,
    AwaitingHydration,
    Validating,
    Ready,
}

/// Result of one validation step.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ValidationOutcome {
    /// No access token stored; nothing to validate.
    NoToken,
    /// Backend accepted the token; the cached user was replaced.
    Confirmed,
    /// Backend rejected the token; the session was cleared.
    Cleared(ApiError),
    /// Step arrived out of order and was ignored.
    Skipped,
}

/// Per-provider validation state machine.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SessionGate {
    phase: AuthPhase,
}

impl SessionGate {
    #[must_use]
    pub fn phase(&self) -> AuthPhase {
        self.phase
    }

    #[must_use]
    pub fn is_mounted(&self) -> bool {
        self.phase != AuthPhase::Unmounted
    }

    #[must_use]
    pub fn is_ready(&self) -> bool {
        self.phase == AuthPhase::Ready
    }

    /// Before mount children always render so SSR and the first hydrate pass
    /// produce identical markup; after mount they wait for `Ready`.
    #[must_use]
    pub fn renders_children(&self) -> bool {
        matches!(self.phase, AuthPhase::Unmounted | AuthPhase::Ready)
    }

    /// Client mount. Later calls are no-ops.
    pub fn mount(&mut self) {
        if self.phase == AuthPhase::Unmounted {
            self.phase = AuthPhase::AwaitingHydration;
        }
    }

    /// Fallback timer fired: force hydration if storage never signaled.
    ///
    /// Returns `true` when the flag had to be forced.
    pub fn on_fallback_timer<S: KeyValueStorage>(&mut self, store: &mut SessionStore<S>) -> bool {
        if self.phase != AuthPhase::AwaitingHydration || store.has_hydrated() {
            return false;
        }
        leptos::logging::warn!("session[{:?}]: hydration not signaled, forcing", store.kind());
        store.set_has_hydrated(true);
        true
    }

    /// Store reports hydration. Returns the token to validate, if any.
    ///
    /// With no token stored the gate goes straight to `Ready`.
    pub fn on_hydrated<S: KeyValueStorage>(&mut self, store: &SessionStore<S>) -> Option<String> {
        if self.phase != AuthPhase::AwaitingHydration || !store.has_hydrated() {
            return None;
        }
        match store.access_token().filter(|t| !t.is_empty()) {
            Some(token) => {
                self.phase = AuthPhase::Validating;
                Some(token.to_owned())
            }
            None => {
                self.phase = AuthPhase::Ready;
                None
            }
        }
    }

    /// Apply the "who am I" response. Any failure clears the session.
    pub fn finish<S: KeyValueStorage>(
        &mut self,
        store: &mut SessionStore<S>,
        result: Result<User, ApiError>,
    ) -> ValidationOutcome {
        if self.phase != AuthPhase::Validating {
            return ValidationOutcome::Skipped;
        }
        self.phase = AuthPhase::Ready;
        match result {
            Ok(user) => {
                store.confirm(user);
                ValidationOutcome::Confirmed
            }
            Err(error) => {
                leptos::logging::warn!("session[{:?}]: token rejected: {error}", store.kind());
                store.logout();
                ValidationOutcome::Cleared(error)
            }
        }
    }
}

/// Run hydration and validation to completion against `store`.
///
/// `who_am_i` receives the stored access token. Used where the store is owned
/// by the caller for the whole run, e.g. a sign-in flow that must confirm a
/// freshly issued token before navigating.
pub async fn validate<S, F, Fut>(
    gate: &mut SessionGate,
    store: &mut SessionStore<S>,
    who_am_i: F,
) -> ValidationOutcome
where
    S: KeyValueStorage,
    F: FnOnce(String) -> Fut,
    Fut: Future<Output = Result<User, ApiError>>,
{
    gate.mount();
    if !store.has_hydrated() {
        store.rehydrate();
    }
    let Some(token) = gate.on_hydrated(store) else {
        return if gate.is_ready() { ValidationOutcome::NoToken } else { ValidationOutcome::Skipped };
    };
    let result = who_am_i(token).await;
    gate.finish(store, result)
}
