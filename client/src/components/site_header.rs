//! Top navigation bar with session-aware links.

#[cfg(test)]
#[path = "site_header_test.rs"]
mod site_header_test;

use leptos::prelude::*;

use crate::net::api::{ApiConfig, ApiRequest, send};
use crate::net::endpoints;
use crate::net::query::QueryCache;
use crate::state::Sessions;
use crate::state::session::{SessionKind, SessionStore};

/// Backend sign-out call for the `kind` session.
pub(crate) fn logout_request(kind: SessionKind, token: Option<&str>) -> ApiRequest {
    match kind {
        SessionKind::User => endpoints::auth::logout(token),
        SessionKind::Admin => endpoints::admin_auth::logout(token),
    }
}

#[component]
pub fn SiteHeader() -> impl IntoView {
    let sessions = expect_context::<Sessions>();
    let cache = expect_context::<RwSignal<QueryCache>>();
    let config = expect_context::<ApiConfig>();

    let user = move || sessions.user.with(|s| s.user().cloned().filter(|_| s.is_authenticated()));
    let admin_signed_in = move || sessions.admin.with(SessionStore::is_authenticated);

    let sign_out = move |kind: SessionKind| {
        let session = sessions.for_kind(kind);
        let token = session.with_untracked(|s| s.access_token().map(str::to_owned));
        let config = config.clone();
        // Best effort: the local session is cleared regardless of the response.
        leptos::task::spawn_local(async move {
            let request = logout_request(kind, token.as_deref());
            let _ = send::<serde_json::Value>(&config, request).await;
        });
        session.update(SessionStore::logout);
        cache.update(QueryCache::clear);
        #[cfg(feature = "hydrate")]
        if let Some(w) = web_sys::window() {
            let _ = w.location().set_href("/login");
        }
    };
    let sign_out_admin = sign_out.clone();

    view! {
        <header class="site-header">
            <a class="site-header__brand" href="/">"Hireboard"</a>
            <nav class="site-header__nav">
                <a href="/jobs">"Jobs"</a>
                {move || match user() {
                    Some(user) => {
                        let sign_out = sign_out.clone();
                        view! {
                            <a href=user.role.home_path()>{user.role.label()}</a>
                            <span class="site-header__user">{user.full_name.clone()}</span>
                            <button class="link-button" on:click=move |_| sign_out(SessionKind::User)>
                                "Sign out"
                            </button>
                        }
                            .into_any()
                    }
                    None => view! {
                        <a href="/login">"Sign in"</a>
                        <a href="/register">"Create account"</a>
                    }
                        .into_any(),
                }}
                <Show when=admin_signed_in>
                    {
                        let sign_out_admin = sign_out_admin.clone();
                        view! {
                            <a href="/admin">"Admin"</a>
                            <button class="link-button" on:click=move |_| sign_out_admin(SessionKind::Admin)>
                                "Admin sign out"
                            </button>
                        }
                    }
                </Show>
            </nav>
        </header>
    }
}
