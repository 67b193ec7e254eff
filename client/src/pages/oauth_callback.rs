//! Social sign-in landing route.
//!
//! SYSTEM CONTEXT
//! ==============
//! The backend redirects here after the provider handshake. The page stores
//! the issued tokens, confirms them against `/auth/me`, then sends the user to
//! their role home. Any failure lands back on `/login` with an error toast.

use std::collections::HashMap;

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::{use_navigate, use_query_map};

use crate::components::spinner::Spinner;
use crate::net::api::{ApiConfig, send};
use crate::net::endpoints;
use crate::net::types::User;
use crate::state::Sessions;
use crate::state::provider::{SessionGate, ValidationOutcome, validate};
use crate::state::toast::ToastState;
use crate::util::guard::LOGIN_PATH;
use crate::util::oauth::{CALLBACK_PARAMS, parse_callback};

#[component]
pub fn OAuthCallbackPage() -> impl IntoView {
    let sessions = expect_context::<Sessions>();
    let toasts = expect_context::<RwSignal<ToastState>>();
    let config = expect_context::<ApiConfig>();
    let query = use_query_map();
    let navigate = use_navigate();

    let destination = RwSignal::new(None::<&'static str>);
    let started = StoredValue::new(false);

    Effect::new(move || {
        if let Some(path) = destination.get() {
            navigate(path, NavigateOptions { replace: true, ..NavigateOptions::default() });
        }
    });

    Effect::new(move || {
        if started.get_value() {
            return;
        }
        started.set_value(true);

        let params: HashMap<String, String> = query.with_untracked(|q| {
            CALLBACK_PARAMS
                .iter()
                .filter_map(|name| q.get(name).map(|value| ((*name).to_owned(), value)))
                .collect()
        });

        let (user, tokens) = match parse_callback(&params) {
            Ok(parsed) => parsed,
            Err(e) => {
                leptos::logging::warn!("oauth callback rejected: {e}");
                toasts.update(|t| {
                    t.error(e.to_string());
                });
                destination.set(Some(LOGIN_PATH));
                return;
            }
        };

        let mut store = sessions.user.get_untracked();
        store.set_tokens(tokens);
        store.set_user(user);
        let config = config.clone();
        leptos::task::spawn_local(async move {
            let mut gate = SessionGate::default();
            let outcome = validate(&mut gate, &mut store, move |token| async move {
                send::<User>(&config, endpoints::auth::me(&token)).await
            })
            .await;
            let home = store.user().map(|u| u.role.home_path());
            sessions.user.set(store);

            match (outcome, home) {
                (ValidationOutcome::Confirmed, Some(home)) => {
                    toasts.update(|t| {
                        t.success("Signed in");
                    });
                    destination.set(Some(home));
                }
                (outcome, _) => {
                    leptos::logging::warn!("oauth session not confirmed: {outcome:?}");
                    toasts.update(|t| {
                        t.error("Social sign-in could not be completed. Please try again.");
                    });
                    destination.set(Some(LOGIN_PATH));
                }
            }
        });
    });

    view! {
        <div class="login-page">
            <Spinner label="Completing sign-in..."/>
        </div>
    }
}
