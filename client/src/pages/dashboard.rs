//! Job-seeker dashboard: submitted applications and resumes.
//!
//! SYSTEM CONTEXT
//! ==============
//! Mounted under the `/dashboard` route guard, so a job-seeker session with a
//! token is present. Withdrawals are applied optimistically to the cached
//! application list before the request settles; the follow-up invalidation
//! reconciles with the server either way.

#[cfg(test)]
#[path = "dashboard_test.rs"]
mod dashboard_test;

use leptos::prelude::*;

use crate::components::spinner::Spinner;
use crate::net::endpoints;
use crate::net::query::QueryCache;
use crate::net::types::{Application, ApplicationStatus, Resume};
use crate::state::Sessions;
use crate::state::session::SessionKind;
use crate::util::fetch::{Mutation, spawn_mutation, use_query, with_token};

/// Mark application `id` withdrawn in a cached list.
pub(crate) fn mark_withdrawn(applications: &mut [Application], id: &str) {
    for application in applications.iter_mut().filter(|a| a.id == id) {
        application.status = ApplicationStatus::Withdrawn;
    }
}

/// Make resume `id` the only default in a cached list.
pub(crate) fn mark_default(resumes: &mut [Resume], id: &str) {
    for resume in resumes.iter_mut() {
        resume.is_default = resume.id == id;
    }
}

/// Trimmed title and link for a new resume, or the reason it was rejected.
pub(crate) fn validate_resume_input(title: &str, file_url: &str) -> Result<(String, String), &'static str> {
    let title = title.trim();
    let file_url = file_url.trim();
    if title.is_empty() {
        return Err("Give the resume a title.");
    }
    if !(file_url.starts_with("https://") || file_url.starts_with("http://")) {
        return Err("Enter a link to the resume file.");
    }
    Ok((title.to_owned(), file_url.to_owned()))
}

fn user_token(sessions: Sessions) -> Option<String> {
    sessions.user.with_untracked(|s| s.access_token().map(str::to_owned))
}

#[component]
pub fn DashboardPage() -> impl IntoView {
    let sessions = expect_context::<Sessions>();
    let name = move || sessions.user.with(|s| s.user().map(|u| u.full_name.clone()).unwrap_or_default());

    view! {
        <div class="dashboard-page">
            <h1>{move || format!("Welcome, {}", name())}</h1>
            <ApplicationsPanel/>
            <ResumesPanel/>
        </div>
    }
}

#[component]
fn ApplicationsPanel() -> impl IntoView {
    let sessions = expect_context::<Sessions>();
    let cache = expect_context::<RwSignal<QueryCache>>();
    let applications = use_query::<Vec<Application>, _, _>(
        endpoints::applications::mine_key,
        with_token(SessionKind::User, |t| endpoints::applications::mine(Some(t))),
    );

    let withdraw = move |id: String| {
        let key = endpoints::applications::mine_key();
        cache.update(|c| {
            c.patch::<Vec<Application>, _>(&key, |list| mark_withdrawn(list, &id));
        });
        spawn_mutation::<serde_json::Value, _>(
            Mutation::new(SessionKind::User, "Could not withdraw the application.")
                .with_success("Application withdrawn")
                .invalidating(key),
            endpoints::applications::withdraw(&id, user_token(sessions).as_deref()),
            |_| {},
        );
    };

    view! {
        <section class="panel">
            <h2>"My applications"</h2>
            {move || match applications.get() {
                None => view! { <Spinner/> }.into_any(),
                Some(Err(e)) => {
                    view! { <p class="page-error">{e.user_message("Could not load your applications.")}</p> }
                        .into_any()
                }
                Some(Ok(list)) if list.is_empty() => {
                    view! {
                        <p class="empty-state">
                            "No applications yet. " <a href="/jobs">"Find a job"</a>
                        </p>
                    }
                        .into_any()
                }
                Some(Ok(list)) => {
                    view! {
                        <table class="table">
                            <thead>
                                <tr>
                                    <th>"Job"</th>
                                    <th>"Status"</th>
                                    <th>"Applied"</th>
                                    <th></th>
                                </tr>
                            </thead>
                            <tbody>
                                {list
                                    .into_iter()
                                    .map(|a| {
                                        let id = a.id.clone();
                                        view! {
                                            <tr>
                                                <td>
                                                    <a href=format!("/jobs/{}", a.job_id)>
                                                        {a.job_title.clone().unwrap_or_else(|| "Untitled".to_owned())}
                                                    </a>
                                                </td>
                                                <td class="status">{a.status.label()}</td>
                                                <td>{a.created_at.clone().unwrap_or_default()}</td>
                                                <td>
                                                    {a
                                                        .status
                                                        .is_open()
                                                        .then(|| {
                                                            view! {
                                                                <button class="link-button" on:click=move |_| withdraw(id.clone())>
                                                                    "Withdraw"
                                                                </button>
                                                            }
                                                        })}
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
fn ResumesPanel() -> impl IntoView {
    let sessions = expect_context::<Sessions>();
    let cache = expect_context::<RwSignal<QueryCache>>();
    let resumes = use_query::<Vec<Resume>, _, _>(
        endpoints::resumes::key,
        with_token(SessionKind::User, |t| endpoints::resumes::list(Some(t))),
    );
    let title = RwSignal::new(String::new());
    let file_url = RwSignal::new(String::new());
    let info = RwSignal::new(String::new());

    let set_default = move |id: String| {
        let key = endpoints::resumes::key();
        cache.update(|c| {
            c.patch::<Vec<Resume>, _>(&key, |list| mark_default(list, &id));
        });
        spawn_mutation::<serde_json::Value, _>(
            Mutation::new(SessionKind::User, "Could not update your default resume.").invalidating(key),
            endpoints::resumes::set_default(&id, user_token(sessions).as_deref()),
            |_| {},
        );
    };
    let remove = move |id: String| {
        spawn_mutation::<serde_json::Value, _>(
            Mutation::new(SessionKind::User, "Could not delete the resume.")
                .with_success("Resume deleted")
                .invalidating(endpoints::resumes::key()),
            endpoints::resumes::delete(&id, user_token(sessions).as_deref()),
            |_| {},
        );
    };
    let on_add = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let (new_title, new_url) = match validate_resume_input(&title.get(), &file_url.get()) {
            Ok(fields) => fields,
            Err(msg) => {
                info.set(msg.to_owned());
                return;
            }
        };
        info.set(String::new());
        spawn_mutation::<Resume, _>(
            Mutation::new(SessionKind::User, "Could not add the resume.")
                .with_success("Resume added")
                .invalidating(endpoints::resumes::key()),
            endpoints::resumes::create(&new_title, &new_url, user_token(sessions).as_deref()),
            move |_| {
                title.set(String::new());
                file_url.set(String::new());
            },
        );
    };

    view! {
        <section class="panel">
            <h2>"Resumes"</h2>
            {move || match resumes.get() {
                None => view! { <Spinner/> }.into_any(),
                Some(Err(e)) => {
                    view! { <p class="page-error">{e.user_message("Could not load your resumes.")}</p> }.into_any()
                }
                Some(Ok(list)) => {
                    view! {
                        <ul class="resume-list">
                            {list
                                .into_iter()
                                .map(|r| {
                                    let default_id = r.id.clone();
                                    let delete_id = r.id.clone();
                                    view! {
                                        <li class="resume-list__item">
                                            <a href=r.file_url.clone() target="_blank" rel="noopener">
                                                {r.title.clone()}
                                            </a>
                                            {if r.is_default {
                                                view! { <span class="tag">"Default"</span> }.into_any()
                                            } else {
                                                view! {
                                                    <button
                                                        class="link-button"
                                                        on:click=move |_| set_default(default_id.clone())
                                                    >
                                                        "Make default"
                                                    </button>
                                                }
                                                    .into_any()
                                            }}
                                            <button class="link-button" on:click=move |_| remove(delete_id.clone())>
                                                "Delete"
                                            </button>
                                        </li>
                                    }
                                })
                                .collect_view()}
                        </ul>
                    }
                        .into_any()
                }
            }}
            <form class="inline-form" on:submit=on_add>
                <input
                    type="text"
                    placeholder="Title"
                    prop:value=move || title.get()
                    on:input=move |ev| title.set(event_target_value(&ev))
                />
                <input
                    type="url"
                    placeholder="https://..."
                    prop:value=move || file_url.get()
                    on:input=move |ev| file_url.set(event_target_value(&ev))
                />
                <button class="btn" type="submit">"Add resume"</button>
            </form>
            <Show when=move || !info.get().is_empty()>
                <p class="form-message">{move || info.get()}</p>
            </Show>
        </section>
    }
}
