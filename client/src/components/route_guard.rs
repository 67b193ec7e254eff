//! Layout-level guard for role-restricted areas.

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::use_navigate;

use crate::components::spinner::Spinner;
use crate::state::Sessions;
use crate::util::guard::{Area, GuardDecision, RedirectLatch, decide};

/// Renders `children` only when the session may enter `area`; otherwise shows
/// a spinner (not hydrated) or redirects once to the login or role home.
#[component]
pub fn RouteGuard(area: Area, children: ChildrenFn) -> impl IntoView {
    let sessions = expect_context::<Sessions>();
    let session = sessions.for_kind(area.session_kind());
    let navigate = use_navigate();

    let decision = Memo::new(move |_| session.with(|s| decide(area, s.state())));
    let latch = StoredValue::new(RedirectLatch::default());

    Effect::new(move || {
        let current = decision.get();
        let mut target = None;
        latch.update_value(|l| target = l.take(current));
        if let Some(target) = target {
            navigate(target, NavigateOptions { replace: true, ..NavigateOptions::default() });
        }
    });

    view! {
        <Show
            when=move || decision.get() == GuardDecision::Render
            fallback=|| view! { <Spinner/> }
        >
            {children()}
        </Show>
    }
}
