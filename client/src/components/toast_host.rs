//! Renders the toast queue and schedules auto-dismissal.

use leptos::prelude::*;

use crate::state::toast::ToastState;

#[component]
pub fn ToastHost() -> impl IntoView {
    let toasts = expect_context::<RwSignal<ToastState>>();

    #[cfg(feature = "hydrate")]
    {
        let scheduled = StoredValue::new(0_u64);
        Effect::new(move || {
            let newest = toasts.with(|t| t.items.back().map_or(0, |toast| toast.id));
            if newest <= scheduled.get_value() {
                return;
            }
            scheduled.set_value(newest);
            leptos::task::spawn_local(async move {
                gloo_timers::future::TimeoutFuture::new(crate::state::toast::TOAST_TTL_MS).await;
                toasts.update(|t| t.dismiss(newest));
            });
        });
    }

    view! {
        <div class="toast-host" aria-live="assertive">
            <For
                each=move || toasts.with(|t| t.items.iter().cloned().collect::<Vec<_>>())
                key=|toast| toast.id
                children=move |toast| {
                    let id = toast.id;
                    view! {
                        <div class=toast.kind.class() role="alert">
                            <span class="toast__message">{toast.message}</span>
                            <button
                                class="toast__close"
                                aria-label="Dismiss"
                                on:click=move |_| toasts.update(|t| t.dismiss(id))
                            >
                                "✕"
                            </button>
                        </div>
                    }
                }
            />
        </div>
    }
}
