//! Login page: email + password for users and administrators, plus social
//! sign-in.
//!
//! The same form serves both sessions. The administrator toggle (also set by
//! `?portal=admin`) routes the request to the admin endpoint and stores the
//! result in the admin session.

#[cfg(test)]
#[path = "login_test.rs"]
mod login_test;

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::{use_navigate, use_query_map};

use crate::net::api::{ApiConfig, send};
use crate::net::endpoints;
use crate::net::types::{AuthPayload, LoginRequest, Role};
use crate::state::Sessions;
use crate::state::session::SessionKind;
use crate::state::toast::ToastState;

pub(crate) fn looks_like_email(raw: &str) -> bool {
    let Some((local, domain)) = raw.split_once('@') else {
        return false;
    };
    !local.is_empty() && domain.contains('.') && !domain.starts_with('.') && !domain.ends_with('.')
}

/// Trim and check the login form.
pub(crate) fn validate_login_input(email: &str, password: &str) -> Result<LoginRequest, &'static str> {
    let email = email.trim();
    if !looks_like_email(email) {
        return Err("Enter a valid email address.");
    }
    if password.is_empty() {
        return Err("Enter your password.");
    }
    Ok(LoginRequest { email: email.to_owned(), password: password.to_owned() })
}

/// An administrator sign-in must yield an administrator account.
pub(crate) fn check_portal(kind: SessionKind, payload: &AuthPayload) -> Result<(), &'static str> {
    if kind == SessionKind::Admin && payload.user.role != Role::Admin {
        return Err("This account does not have administrator access.");
    }
    Ok(())
}

#[component]
pub fn LoginPage() -> impl IntoView {
    let sessions = expect_context::<Sessions>();
    let toasts = expect_context::<RwSignal<ToastState>>();
    let config = expect_context::<ApiConfig>();
    let query = use_query_map();
    let navigate = use_navigate();

    let email = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let as_admin = RwSignal::new(query.with_untracked(|q| q.get("portal").as_deref() == Some("admin")));
    let info = RwSignal::new(String::new());
    let busy = RwSignal::new(false);
    let destination = RwSignal::new(None::<&'static str>);

    Effect::new(move || {
        if let Some(path) = destination.get() {
            navigate(path, NavigateOptions { replace: true, ..NavigateOptions::default() });
        }
    });

    let oauth_config = config.clone();
    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get() {
            return;
        }
        let credentials = match validate_login_input(&email.get(), &password.get()) {
            Ok(c) => c,
            Err(msg) => {
                info.set(msg.to_owned());
                return;
            }
        };
        let kind = if as_admin.get() { SessionKind::Admin } else { SessionKind::User };
        let request = match kind {
            SessionKind::User => endpoints::auth::login(&credentials),
            SessionKind::Admin => endpoints::admin_auth::login(&credentials),
        };
        busy.set(true);
        info.set(String::new());

        let config = config.clone();
        leptos::task::spawn_local(async move {
            match send::<AuthPayload>(&config, request).await {
                Ok(payload) => {
                    if let Err(msg) = check_portal(kind, &payload) {
                        info.set(msg.to_owned());
                        busy.set(false);
                        return;
                    }
                    let home = payload.user.role.home_path();
                    sessions.for_kind(kind).update(|s| s.login(payload.user, payload.tokens));
                    toasts.update(|t| {
                        t.success("Signed in");
                    });
                    destination.set(Some(home));
                }
                Err(e) => {
                    info.set(e.user_message("Sign-in failed. Check your email and password."));
                    busy.set(false);
                }
            }
        });
    };

    view! {
        <div class="login-page">
            <div class="login-card">
                <h1>"Sign in"</h1>
                <p class="login-card__subtitle">
                    {move || if as_admin.get() { "Administrator portal" } else { "Welcome back" }}
                </p>
                <form class="login-form" on:submit=on_submit>
                    <input
                        class="login-input"
                        type="email"
                        placeholder="you@example.com"
                        prop:value=move || email.get()
                        on:input=move |ev| email.set(event_target_value(&ev))
                    />
                    <input
                        class="login-input"
                        type="password"
                        placeholder="Password"
                        prop:value=move || password.get()
                        on:input=move |ev| password.set(event_target_value(&ev))
                    />
                    <label class="login-toggle">
                        <input
                            type="checkbox"
                            prop:checked=move || as_admin.get()
                            on:change=move |ev| as_admin.set(event_target_checked(&ev))
                        />
                        "Sign in as administrator"
                    </label>
                    <button class="login-button" type="submit" disabled=move || busy.get()>
                        {move || if busy.get() { "Signing in..." } else { "Sign in" }}
                    </button>
                </form>
                <Show when=move || !info.get().is_empty()>
                    <p class="login-message">{move || info.get()}</p>
                </Show>
                <Show when=move || !as_admin.get()>
                    <div class="login-divider"></div>
                    <p class="login-card__subtitle">"Or"</p>
                    <a
                        href=oauth_config.url(&endpoints::auth::oauth_start_path("google"))
                        class="login-button login-button--secondary"
                    >
                        "Continue with Google"
                    </a>
                    <p class="login-card__footer">
                        "New here? "
                        <a href="/register">"Create an account"</a>
                    </p>
                </Show>
            </div>
        </div>
    }
}
