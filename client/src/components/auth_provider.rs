//! Session validator wrapping the routed app.
//!
//! SYSTEM CONTEXT
//! ==============
//! Drives `SessionGate` from browser events. Effects never run during server
//! rendering, so the gate stays `Unmounted` there and children render; on the
//! client the first effect mounts the gate, starts the hydration fallback
//! timer, and restores the persisted session.

use leptos::prelude::*;

use crate::components::spinner::Spinner;
use crate::net::api::{ApiConfig, send};
use crate::net::endpoints;
use crate::net::types::User;
use crate::state::Sessions;
use crate::state::provider::SessionGate;
use crate::state::session::{SessionKind, SessionStore};

/// Validates the `kind` session once per mount before rendering children.
#[component]
pub fn AuthProvider(kind: SessionKind, children: ChildrenFn) -> impl IntoView {
    let sessions = expect_context::<Sessions>();
    let config = expect_context::<ApiConfig>();
    let session = sessions.for_kind(kind);
    let gate = RwSignal::new(SessionGate::default());

    // Mount: fallback timer first, then restore from storage.
    Effect::new(move || {
        if gate.with_untracked(SessionGate::is_mounted) {
            return;
        }
        gate.update(SessionGate::mount);

        #[cfg(feature = "hydrate")]
        leptos::task::spawn_local(async move {
            #[allow(clippy::cast_possible_truncation)]
            let delay = crate::state::provider::HYDRATION_FALLBACK_MS as u32;
            gloo_timers::future::TimeoutFuture::new(delay).await;
            gate.update(|g| {
                session.update(|s| {
                    g.on_fallback_timer(s);
                });
            });
        });

        session.update(SessionStore::rehydrate);
    });

    // Hydrated: validate the stored token at most once.
    Effect::new(move || {
        if !session.with(SessionStore::has_hydrated) {
            return;
        }
        let token = gate
            .try_update(|g| session.with_untracked(|s| g.on_hydrated(s)))
            .flatten();
        let Some(token) = token else {
            return;
        };
        let request = match kind {
            SessionKind::User => endpoints::auth::me(&token),
            SessionKind::Admin => endpoints::admin_auth::me(&token),
        };
        let config = config.clone();
        leptos::task::spawn_local(async move {
            let result = send::<User>(&config, request).await;
            gate.update(|g| {
                session.update(|s| {
                    g.finish(s, result);
                });
            });
        });
    });

    view! {
        <Show
            when=move || gate.with(SessionGate::renders_children)
            fallback=|| view! { <Spinner label="Checking your session..."/> }
        >
            {children()}
        </Show>
    }
}
