//! Administrator console: platform counters, job moderation, and accounts.
//!
//! Runs entirely on the admin session, which is stored and validated
//! separately from the regular user session.

#[cfg(test)]
#[path = "admin_test.rs"]
mod admin_test;

use leptos::prelude::*;

use crate::components::spinner::Spinner;
use crate::net::endpoints;
use crate::net::query::QueryKey;
use crate::net::types::{AnalyticsSummary, Job, JobStatus, Paginated, User, UserStatus};
use crate::state::Sessions;
use crate::state::session::SessionKind;
use crate::util::fetch::{Mutation, spawn_mutation, use_query, with_token};

/// Status an administrator toggles an account to, with the button label.
pub(crate) fn status_toggle(current: UserStatus) -> (UserStatus, &'static str) {
    match current {
        UserStatus::Suspended => (UserStatus::Active, "Reactivate"),
        UserStatus::Active | UserStatus::Inactive | UserStatus::Pending => (UserStatus::Suspended, "Suspend"),
    }
}

pub(crate) fn status_label(status: UserStatus) -> &'static str {
    match status {
        UserStatus::Active => "Active",
        UserStatus::Inactive => "Inactive",
        UserStatus::Suspended => "Suspended",
        UserStatus::Pending => "Pending",
    }
}

/// Counter tiles in display order.
pub(crate) fn summary_tiles(summary: &AnalyticsSummary) -> [(&'static str, u64); 5] {
    [
        ("Users", summary.total_users),
        ("Jobs", summary.total_jobs),
        ("Active jobs", summary.active_jobs),
        ("Applications", summary.total_applications),
        ("Awaiting review", summary.pending_moderation),
    ]
}

fn admin_token(sessions: Sessions) -> Option<String> {
    sessions.admin.with_untracked(|s| s.access_token().map(str::to_owned))
}

#[component]
pub fn AdminPage() -> impl IntoView {
    view! {
        <div class="admin-page">
            <h1>"Administration"</h1>
            <AnalyticsPanel/>
            <ModerationPanel/>
            <UsersPanel/>
        </div>
    }
}

#[component]
fn AnalyticsPanel() -> impl IntoView {
    let summary = use_query::<AnalyticsSummary, _, _>(
        endpoints::admin::analytics_key,
        with_token(SessionKind::Admin, |t| endpoints::admin::analytics(Some(t))),
    );

    view! {
        <section class="panel">
            <h2>"Overview"</h2>
            {move || match summary.get() {
                None => view! { <Spinner/> }.into_any(),
                Some(Err(e)) => {
                    view! { <p class="page-error">{e.user_message("Could not load platform counters.")}</p> }
                        .into_any()
                }
                Some(Ok(summary)) => {
                    view! {
                        <div class="tiles">
                            {summary_tiles(&summary)
                                .into_iter()
                                .map(|(label, value)| {
                                    view! {
                                        <div class="tile">
                                            <span class="tile__value">{value}</span>
                                            <span class="tile__label">{label}</span>
                                        </div>
                                    }
                                })
                                .collect_view()}
                        </div>
                    }
                        .into_any()
                }
            }}
        </section>
    }
}

#[component]
fn ModerationPanel() -> impl IntoView {
    let sessions = expect_context::<Sessions>();
    let pending = use_query::<Vec<Job>, _, _>(
        endpoints::admin::pending_jobs_key,
        with_token(SessionKind::Admin, |t| endpoints::admin::pending_jobs(Some(t))),
    );

    let moderate = move |job_id: String, status: JobStatus| {
        let message = if status == JobStatus::Active { "Job approved" } else { "Job rejected" };
        spawn_mutation::<serde_json::Value, _>(
            Mutation::new(SessionKind::Admin, "Could not update the job.")
                .with_success(message)
                .invalidating(endpoints::admin::pending_jobs_key())
                .invalidating(endpoints::admin::analytics_key())
                .invalidating(QueryKey::new("jobs")),
            endpoints::admin::moderate_job(&job_id, status, admin_token(sessions).as_deref()),
            |_| {},
        );
    };

    view! {
        <section class="panel">
            <h2>"Jobs awaiting review"</h2>
            {move || match pending.get() {
                None => view! { <Spinner/> }.into_any(),
                Some(Err(e)) => {
                    view! { <p class="page-error">{e.user_message("Could not load the review queue.")}</p> }
                        .into_any()
                }
                Some(Ok(jobs)) if jobs.is_empty() => {
                    view! { <p class="empty-state">"Nothing to review."</p> }.into_any()
                }
                Some(Ok(jobs)) => {
                    view! {
                        <table class="table">
                            <tbody>
                                {jobs
                                    .into_iter()
                                    .map(|job| {
                                        let approve_id = job.id.clone();
                                        let reject_id = job.id.clone();
                                        view! {
                                            <tr>
                                                <td>
                                                    <a href=format!("/jobs/{}", job.id)>{job.title.clone()}</a>
                                                </td>
                                                <td>{job.company_name.clone().unwrap_or_default()}</td>
                                                <td>
                                                    <button
                                                        class="btn btn--primary"
                                                        on:click=move |_| moderate(approve_id.clone(), JobStatus::Active)
                                                    >
                                                        "Approve"
                                                    </button>
                                                    <button
                                                        class="btn btn--danger"
                                                        on:click=move |_| moderate(reject_id.clone(), JobStatus::Rejected)
                                                    >
                                                        "Reject"
                                                    </button>
                                                </td>
                                            </tr>
                                        }
                                    })
                                    .collect_view()}
                            </tbody>
                        </table>
                    }
                        .into_any()
                }
            }}
        </section>
    }
}

#[component]
fn UsersPanel() -> impl IntoView {
    let sessions = expect_context::<Sessions>();
    let page = RwSignal::new(1_u32);
    let users = use_query::<Paginated<User>, _, _>(
        move || endpoints::admin::users_key(page.get()),
        with_token(SessionKind::Admin, move |t| endpoints::admin::users(page.get(), Some(t))),
    );

    let set_status = move |user_id: String, status: UserStatus| {
        spawn_mutation::<serde_json::Value, _>(
            Mutation::new(SessionKind::Admin, "Could not update the account.")
                .with_success("Account updated")
                .invalidating(QueryKey::new("admin-users"))
                .invalidating(endpoints::admin::analytics_key()),
            endpoints::admin::set_user_status(&user_id, status, admin_token(sessions).as_deref()),
            |_| {},
        );
    };

    view! {
        <section class="panel">
            <h2>"Accounts"</h2>
            {move || match users.get() {
                None => view! { <Spinner/> }.into_any(),
                Some(Err(e)) => {
                    view! { <p class="page-error">{e.user_message("Could not load accounts.")}</p> }.into_any()
                }
                Some(Ok(result)) => {
                    let pages = result.page_count();
                    view! {
                        <table class="table">
                            <thead>
                                <tr>
                                    <th>"Name"</th>
                                    <th>"Email"</th>
                                    <th>"Role"</th>
                                    <th>"Status"</th>
                                    <th></th>
                                </tr>
                            </thead>
                            <tbody>
                                {result
                                    .items
                                    .into_iter()
                                    .map(|user| {
                                        let (next, action) = status_toggle(user.status);
                                        let id = user.id.clone();
                                        view! {
                                            <tr>
                                                <td>{user.full_name.clone()}</td>
                                                <td>{user.email.clone()}</td>
                                                <td>{user.role.label()}</td>
                                                <td class="status">{status_label(user.status)}</td>
                                                <td>
                                                    <button class="link-button" on:click=move |_| set_status(id.clone(), next)>
                                                        {action}
                                                    </button>
                                                </td>
                                            </tr>
                                        }
                                    })
                                    .collect_view()}
                            </tbody>
                        </table>
                        <nav class="pager">
                            <button
                                class="btn"
                                disabled=move || page.get() <= 1
                                on:click=move |_| page.update(|p| *p = p.saturating_sub(1).max(1))
                            >
                                "Previous"
                            </button>
                            <span class="pager__status">{move || format!("Page {} of {pages}", page.get())}</span>
                            <button
                                class="btn"
                                disabled=move || page.get() >= pages
                                on:click=move |_| page.update(|p| *p = (*p + 1).min(pages))
                            >
                                "Next"
                            </button>
                        </nav>
                    }
                        .into_any()
                }
            }}
        </section>
    }
}
