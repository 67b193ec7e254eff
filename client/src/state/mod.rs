//! Shared client-side state modules.
//!
//! DESIGN
//! ======
//! State is split by concern (`session`, `toast`, ...) so components depend
//! on small focused models. Plain structs hold the logic; `Sessions` bundles
//! the reactive signals that `App` provides through context.

pub mod provider;
pub mod session;
pub mod storage;
pub mod toast;

use leptos::prelude::*;

use session::{SessionKind, SessionStore};
use storage::DefaultStorage;

/// Both independent session stores as reactive signals.
#[derive(Clone, Copy, Debug)]
pub struct Sessions {
    pub user: RwSignal<SessionStore>,
    pub admin: RwSignal<SessionStore>,
}

impl Sessions {
    #[must_use]
    pub fn new() -> Self {
        Self {
            user: RwSignal::new(SessionStore::new(SessionKind::User, DefaultStorage::default())),
            admin: RwSignal::new(SessionStore::new(SessionKind::Admin, DefaultStorage::default())),
        }
    }

    #[must_use]
    pub fn for_kind(&self, kind: SessionKind) -> RwSignal<SessionStore> {
        match kind {
            SessionKind::User => self.user,
            SessionKind::Admin => self.admin,
        }
    }
}

impl Default for Sessions {
    fn default() -> Self {
        Self::new()
    }
}
