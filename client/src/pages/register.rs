//! Registration page for job seekers and employers.

#[cfg(test)]
#[path = "register_test.rs"]
mod register_test;

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::use_navigate;

use crate::net::api::{ApiConfig, send};
use crate::net::endpoints;
use crate::net::types::{AuthPayload, RegisterRequest, Role};
use crate::pages::login::looks_like_email;
use crate::state::Sessions;
use crate::state::toast::ToastState;

pub(crate) const MIN_PASSWORD_LEN: usize = 8;

/// Raw form fields as typed.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub(crate) struct RegisterForm {
    pub full_name: String,
    pub email: String,
    pub password: String,
    pub confirm: String,
    pub role: Option<Role>,
}

pub(crate) fn validate_register_input(form: &RegisterForm) -> Result<RegisterRequest, &'static str> {
    let full_name = form.full_name.trim();
    if full_name.is_empty() {
        return Err("Enter your full name.");
    }
    let email = form.email.trim();
    if !looks_like_email(email) {
        return Err("Enter a valid email address.");
    }
    if form.password.chars().count() < MIN_PASSWORD_LEN {
        return Err("Password must be at least 8 characters.");
    }
    if form.password != form.confirm {
        return Err("Passwords do not match.");
    }
    let role = match form.role {
        Some(role @ (Role::JobSeeker | Role::Employer)) => role,
        _ => return Err("Choose whether you are looking for work or hiring."),
    };
    Ok(RegisterRequest {
        email: email.to_owned(),
        password: form.password.clone(),
        full_name: full_name.to_owned(),
        role,
    })
}

#[component]
pub fn RegisterPage() -> impl IntoView {
    let sessions = expect_context::<Sessions>();
    let toasts = expect_context::<RwSignal<ToastState>>();
    let config = expect_context::<ApiConfig>();
    let navigate = use_navigate();

    let form = RwSignal::new(RegisterForm { role: Some(Role::JobSeeker), ..RegisterForm::default() });
    let info = RwSignal::new(String::new());
    let busy = RwSignal::new(false);
    let destination = RwSignal::new(None::<&'static str>);

    Effect::new(move || {
        if let Some(path) = destination.get() {
            navigate(path, NavigateOptions { replace: true, ..NavigateOptions::default() });
        }
    });

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get() {
            return;
        }
        let payload = match form.with(validate_register_input) {
            Ok(p) => p,
            Err(msg) => {
                info.set(msg.to_owned());
                return;
            }
        };
        busy.set(true);
        info.set(String::new());

        let config = config.clone();
        leptos::task::spawn_local(async move {
            match send::<AuthPayload>(&config, endpoints::auth::register(&payload)).await {
                Ok(auth) => {
                    let home = auth.user.role.home_path();
                    sessions.user.update(|s| s.login(auth.user, auth.tokens));
                    toasts.update(|t| {
                        t.success("Account created");
                    });
                    destination.set(Some(home));
                }
                Err(e) => {
                    info.set(e.user_message("Could not create your account."));
                    busy.set(false);
                }
            }
        });
    };

    view! {
        <div class="login-page">
            <div class="login-card">
                <h1>"Create an account"</h1>
                <form class="login-form" on:submit=on_submit>
                    <input
                        class="login-input"
                        type="text"
                        placeholder="Full name"
                        prop:value=move || form.with(|f| f.full_name.clone())
                        on:input=move |ev| form.update(|f| f.full_name = event_target_value(&ev))
                    />
                    <input
                        class="login-input"
                        type="email"
                        placeholder="you@example.com"
                        prop:value=move || form.with(|f| f.email.clone())
                        on:input=move |ev| form.update(|f| f.email = event_target_value(&ev))
                    />
                    <input
                        class="login-input"
                        type="password"
                        placeholder="Password"
                        prop:value=move || form.with(|f| f.password.clone())
                        on:input=move |ev| form.update(|f| f.password = event_target_value(&ev))
                    />
                    <input
                        class="login-input"
                        type="password"
                        placeholder="Confirm password"
                        prop:value=move || form.with(|f| f.confirm.clone())
                        on:input=move |ev| form.update(|f| f.confirm = event_target_value(&ev))
                    />
                    <select
                        class="login-input"
                        on:change=move |ev| form.update(|f| f.role = Role::parse(&event_target_value(&ev)))
                    >
                        <option value="job_seeker" selected=true>"I'm looking for work"</option>
                        <option value="employer">"I'm hiring"</option>
                    </select>
                    <button class="login-button" type="submit" disabled=move || busy.get()>
                        {move || if busy.get() { "Creating..." } else { "Create account" }}
                    </button>
                </form>
                <Show when=move || !info.get().is_empty()>
                    <p class="login-message">{move || info.get()}</p>
                </Show>
                <p class="login-card__footer">
                    "Already registered? "
                    <a href="/login">"Sign in"</a>
                </p>
            </div>
        </div>
    }
}
