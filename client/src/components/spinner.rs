//! Loading indicator shared by the auth provider, guards, and pages.

use leptos::prelude::*;

#[component]
pub fn Spinner(#[prop(into, optional)] label: Option<String>) -> impl IntoView {
    let label = label.unwrap_or_else(|| "Loading...".to_owned());
    view! {
        <div class="spinner" role="status" aria-live="polite">
            <span class="spinner__dot" aria-hidden="true"></span>
            <span class="spinner__label">{label}</span>
        </div>
    }
}
