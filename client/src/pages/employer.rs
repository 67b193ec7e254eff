//! Employer workspace: company profile, postings, and applicant review.
//!
//! SYSTEM CONTEXT
//! ==============
//! Mounted under the `/employer` route guard. Every call carries the user
//! session token; an expired token surfaces through `spawn_mutation`, which
//! logs the session out and the guard then redirects to `/login`.

#[cfg(test)]
#[path = "employer_test.rs"]
mod employer_test;

use leptos::prelude::*;

use crate::components::job_card::JobCard;
use crate::components::spinner::Spinner;
use crate::net::endpoints;
use crate::net::query::QueryKey;
use crate::net::types::{Application, ApplicationStatus, Company, Job, JobDraft, JobType};
use crate::state::Sessions;
use crate::state::session::SessionKind;
use crate::util::fetch::{Mutation, spawn_mutation, use_query, with_token};

/// Stages an employer can move an application into.
pub(crate) const REVIEW_STAGES: [ApplicationStatus; 6] = [
    ApplicationStatus::Pending,
    ApplicationStatus::Reviewed,
    ApplicationStatus::Shortlisted,
    ApplicationStatus::Interview,
    ApplicationStatus::Rejected,
    ApplicationStatus::Hired,
];

pub(crate) fn parse_stage(raw: &str) -> Option<ApplicationStatus> {
    REVIEW_STAGES.into_iter().find(|s| s.label() == raw)
}

/// Posting form fields as typed.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub(crate) struct JobForm {
    pub title: String,
    pub description: String,
    pub location: String,
    pub job_type: Option<JobType>,
    pub salary_min: String,
    pub salary_max: String,
    pub skills: String,
}

fn parse_salary(raw: &str) -> Result<Option<i64>, &'static str> {
    let raw = raw.trim().replace(',', "");
    if raw.is_empty() {
        return Ok(None);
    }
    match raw.parse::<i64>() {
        Ok(v) if v >= 0 => Ok(Some(v)),
        _ => Err("Salary must be a whole number."),
    }
}

/// Comma-separated skills, trimmed and de-duplicated in input order.
pub(crate) fn parse_skills(raw: &str) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for skill in raw.split(',').map(str::trim).filter(|s| !s.is_empty()) {
        if !out.iter().any(|s| s.eq_ignore_ascii_case(skill)) {
            out.push(skill.to_owned());
        }
    }
    out
}

impl JobForm {
    /// Prefill for editing an existing posting.
    pub(crate) fn from_job(job: &Job) -> Self {
        Self {
            title: job.title.clone(),
            description: job.description.clone(),
            location: job.location.clone(),
            job_type: Some(job.job_type),
            salary_min: job.salary_min.map(|v| v.to_string()).unwrap_or_default(),
            salary_max: job.salary_max.map(|v| v.to_string()).unwrap_or_default(),
            skills: job.skills.join(", "),
        }
    }
}

pub(crate) fn parse_job_form(form: &JobForm) -> Result<JobDraft, &'static str> {
    let title = form.title.trim();
    if title.is_empty() {
        return Err("Enter a job title.");
    }
    let description = form.description.trim();
    if description.is_empty() {
        return Err("Describe the role.");
    }
    let location = form.location.trim();
    if location.is_empty() {
        return Err("Enter a location.");
    }
    let Some(job_type) = form.job_type else {
        return Err("Choose a job type.");
    };
    let salary_min = parse_salary(&form.salary_min)?;
    let salary_max = parse_salary(&form.salary_max)?;
    if let (Some(min), Some(max)) = (salary_min, salary_max)
        && min > max
    {
        return Err("Minimum salary cannot exceed the maximum.");
    }
    Ok(JobDraft {
        title: title.to_owned(),
        description: description.to_owned(),
        location: location.to_owned(),
        job_type: Some(job_type),
        salary_min,
        salary_max,
        skills: parse_skills(&form.skills),
    })
}

fn user_token(sessions: Sessions) -> Option<String> {
    sessions.user.with_untracked(|s| s.access_token().map(str::to_owned))
}

#[component]
pub fn EmployerPage() -> impl IntoView {
    let selected = RwSignal::new(None::<(String, String)>);
    let form = RwSignal::new(JobForm::default());
    let editing = RwSignal::new(None::<String>);

    view! {
        <div class="employer-page">
            <h1>"Employer workspace"</h1>
            <CompanyPanel/>
            <PostingsPanel selected=selected form=form editing=editing/>
            {move || {
                selected.get().map(|(job_id, title)| view! { <ApplicantsPanel job_id=job_id title=title/> })
            }}
            <PostingForm form=form editing=editing/>
        </div>
    }
}

#[component]
fn CompanyPanel() -> impl IntoView {
    let sessions = expect_context::<Sessions>();
    let company = use_query::<Company, _, _>(
        endpoints::companies::mine_key,
        with_token(SessionKind::User, |t| endpoints::companies::mine(Some(t))),
    );
    let description = RwSignal::new(String::new());
    let website = RwSignal::new(String::new());
    let editing = RwSignal::new(false);

    let start_edit = move |current: &Company| {
        description.set(current.description.clone().unwrap_or_default());
        website.set(current.website.clone().unwrap_or_default());
        editing.set(true);
    };
    let save = move |id: String| {
        let body = serde_json::json!({
            "description": description.get_untracked().trim(),
            "website": website.get_untracked().trim(),
        });
        spawn_mutation::<Company, _>(
            Mutation::new(SessionKind::User, "Could not update the company profile.")
                .with_success("Company profile saved")
                .invalidating(endpoints::companies::mine_key()),
            endpoints::companies::update(&id, &body, user_token(sessions).as_deref()),
            move |_| editing.set(false),
        );
    };

    view! {
        <section class="panel">
            <h2>"Company"</h2>
            {move || match company.get() {
                None => view! { <Spinner/> }.into_any(),
                Some(Err(e)) => {
                    view! { <p class="page-error">{e.user_message("Could not load your company profile.")}</p> }
                        .into_any()
                }
                Some(Ok(c)) if editing.get() => {
                    let id = c.id.clone();
                    view! {
                        <form
                            class="inline-form"
                            on:submit=move |ev: leptos::ev::SubmitEvent| {
                                ev.prevent_default();
                                save(id.clone());
                            }
                        >
                            <textarea
                                prop:value=move || description.get()
                                on:input=move |ev| description.set(event_target_value(&ev))
                            ></textarea>
                            <input
                                type="url"
                                placeholder="https://"
                                prop:value=move || website.get()
                                on:input=move |ev| website.set(event_target_value(&ev))
                            />
                            <button class="btn btn--primary" type="submit">"Save"</button>
                            <button class="btn" type="button" on:click=move |_| editing.set(false)>
                                "Cancel"
                            </button>
                        </form>
                    }
                        .into_any()
                }
                Some(Ok(c)) => {
                    let current = c.clone();
                    view! {
                        <div class="company">
                            <h3>
                                {c.name.clone()}
                                {c.is_verified.then(|| view! { <span class="tag">"Verified"</span> })}
                            </h3>
                            <p>{c.description.clone().unwrap_or_default()}</p>
                            {c.website.clone().map(|w| {
                                let href = w.clone();
                                view! { <a href=href target="_blank" rel="noopener">{w}</a> }
                            })}
                            <button class="link-button" on:click=move |_| start_edit(&current)>
                                "Edit profile"
                            </button>
                        </div>
                    }
                        .into_any()
                }
            }}
        </section>
    }
}

#[component]
fn PostingsPanel(
    selected: RwSignal<Option<(String, String)>>,
    form: RwSignal<JobForm>,
    editing: RwSignal<Option<String>>,
) -> impl IntoView {
    let sessions = expect_context::<Sessions>();
    let postings = use_query::<Vec<Job>, _, _>(
        endpoints::jobs::mine_key,
        with_token(SessionKind::User, |t| endpoints::jobs::mine(Some(t))),
    );

    let remove = move |id: String| {
        if selected.with_untracked(|s| s.as_ref().is_some_and(|(sel, _)| *sel == id)) {
            selected.set(None);
        }
        if editing.with_untracked(|e| e.as_deref() == Some(id.as_str())) {
            editing.set(None);
            form.set(JobForm::default());
        }
        spawn_mutation::<serde_json::Value, _>(
            Mutation::new(SessionKind::User, "Could not delete the posting.")
                .with_success("Posting deleted")
                .invalidating(QueryKey::new("jobs")),
            endpoints::jobs::delete(&id, user_token(sessions).as_deref()),
            |_| {},
        );
    };

    view! {
        <section class="panel">
            <h2>"My postings"</h2>
            {move || match postings.get() {
                None => view! { <Spinner/> }.into_any(),
                Some(Err(e)) => {
                    view! { <p class="page-error">{e.user_message("Could not load your postings.")}</p> }.into_any()
                }
                Some(Ok(jobs)) if jobs.is_empty() => {
                    view! { <p class="empty-state">"You have not posted any jobs yet."</p> }.into_any()
                }
                Some(Ok(jobs)) => {
                    jobs.into_iter()
                        .map(|job| {
                            let pick = (job.id.clone(), job.title.clone());
                            let delete_id = job.id.clone();
                            let prefill = (job.id.clone(), JobForm::from_job(&job));
                            let footer: ChildrenFn = std::sync::Arc::new(move || {
                                let pick = pick.clone();
                                let delete_id = delete_id.clone();
                                let (edit_id, edit_form) = prefill.clone();
                                view! {
                                    <button class="link-button" on:click=move |_| selected.set(Some(pick.clone()))>
                                        "View applicants"
                                    </button>
                                    <button
                                        class="link-button"
                                        on:click=move |_| {
                                            form.set(edit_form.clone());
                                            editing.set(Some(edit_id.clone()));
                                        }
                                    >
                                        "Edit"
                                    </button>
                                    <button class="link-button" on:click=move |_| remove(delete_id.clone())>
                                        "Delete"
                                    </button>
                                }
                                    .into_any()
                            });
                            view! { <JobCard job=job footer=footer/> }
                        })
                        .collect_view()
                        .into_any()
                }
            }}
        </section>
    }
}

#[component]
fn ApplicantsPanel(job_id: String, title: String) -> impl IntoView {
    let sessions = expect_context::<Sessions>();
    let key_id = job_id.clone();
    let applicants = use_query::<Vec<Application>, _, _>(
        move || endpoints::applications::for_job_key(&key_id),
        with_token(SessionKind::User, move |t| endpoints::applications::for_job(&job_id, Some(t))),
    );

    let move_to = move |application: Application, stage: ApplicationStatus| {
        spawn_mutation::<Application, _>(
            Mutation::new(SessionKind::User, "Could not update the application.")
                .with_success("Application updated")
                .invalidating(endpoints::applications::for_job_key(&application.job_id)),
            endpoints::applications::update_status(&application.id, stage, user_token(sessions).as_deref()),
            |_| {},
        );
    };

    view! {
        <section class="panel">
            <h2>{format!("Applicants for {title}")}</h2>
            {move || match applicants.get() {
                None => view! { <Spinner/> }.into_any(),
                Some(Err(e)) => {
                    view! { <p class="page-error">{e.user_message("Could not load applicants.")}</p> }.into_any()
                }
                Some(Ok(list)) if list.is_empty() => {
                    view! { <p class="empty-state">"No applications yet."</p> }.into_any()
                }
                Some(Ok(list)) => {
                    view! {
                        <table class="table">
                            <tbody>
                                {list
                                    .into_iter()
                                    .map(|a| {
                                        let current = a.status;
                                        let row = a.clone();
                                        view! {
                                            <tr>
                                                <td>{a.applicant_name.clone().unwrap_or_else(|| a.applicant_id.clone())}</td>
                                                <td>{a.cover_letter.clone().unwrap_or_default()}</td>
                                                <td>
                                                    <select on:change=move |ev| {
                                                        if let Some(stage) = parse_stage(&event_target_value(&ev)) {
                                                            move_to(row.clone(), stage);
                                                        }
                                                    }>
                                                        {REVIEW_STAGES
                                                            .into_iter()
                                                            .map(|s| {
                                                                let is_current = s == current;
                                                                view! {
                                                                    <option value=s.label() selected=is_current>
                                                                        {s.label()}
                                                                    </option>
                                                                }
                                                            })
                                                            .collect_view()}
                                                    </select>
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
fn PostingForm(form: RwSignal<JobForm>, editing: RwSignal<Option<String>>) -> impl IntoView {
    let sessions = expect_context::<Sessions>();
    let info = RwSignal::new(String::new());

    let reset = move || {
        form.set(JobForm::default());
        editing.set(None);
        info.set(String::new());
    };

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let draft = match form.with(parse_job_form) {
            Ok(d) => d,
            Err(msg) => {
                info.set(msg.to_owned());
                return;
            }
        };
        info.set(String::new());
        let token = user_token(sessions);
        match editing.get_untracked() {
            Some(id) => spawn_mutation::<Job, _>(
                Mutation::new(SessionKind::User, "Could not update the posting.")
                    .with_success("Posting updated")
                    .invalidating(QueryKey::new("jobs")),
                endpoints::jobs::update(&id, &draft, token.as_deref()),
                move |_| reset(),
            ),
            None => spawn_mutation::<Job, _>(
                Mutation::new(SessionKind::User, "Could not publish the posting.")
                    .with_success("Job posted")
                    .invalidating(QueryKey::new("jobs")),
                endpoints::jobs::create(&draft, token.as_deref()),
                move |_| reset(),
            ),
        }
    };

    view! {
        <section class="panel">
            <h2>{move || if editing.with(Option::is_some) { "Edit posting" } else { "Post a job" }}</h2>
            <form class="stacked-form" on:submit=on_submit>
                <input
                    type="text"
                    placeholder="Title"
                    prop:value=move || form.with(|f| f.title.clone())
                    on:input=move |ev| form.update(|f| f.title = event_target_value(&ev))
                />
                <textarea
                    placeholder="Description"
                    prop:value=move || form.with(|f| f.description.clone())
                    on:input=move |ev| form.update(|f| f.description = event_target_value(&ev))
                ></textarea>
                <input
                    type="text"
                    placeholder="Location"
                    prop:value=move || form.with(|f| f.location.clone())
                    on:input=move |ev| form.update(|f| f.location = event_target_value(&ev))
                />
                <select
                    prop:value=move || form.with(|f| f.job_type.map_or("", JobType::as_str))
                    on:change=move |ev| form.update(|f| f.job_type = JobType::parse(&event_target_value(&ev)))
                >
                    <option value="">"Job type"</option>
                    {JobType::ALL
                        .into_iter()
                        .map(|t| view! { <option value=t.as_str()>{t.label()}</option> })
                        .collect_view()}
                </select>
                <input
                    type="text"
                    inputmode="numeric"
                    placeholder="Minimum salary"
                    prop:value=move || form.with(|f| f.salary_min.clone())
                    on:input=move |ev| form.update(|f| f.salary_min = event_target_value(&ev))
                />
                <input
                    type="text"
                    inputmode="numeric"
                    placeholder="Maximum salary"
                    prop:value=move || form.with(|f| f.salary_max.clone())
                    on:input=move |ev| form.update(|f| f.salary_max = event_target_value(&ev))
                />
                <input
                    type="text"
                    placeholder="Skills, comma separated"
                    prop:value=move || form.with(|f| f.skills.clone())
                    on:input=move |ev| form.update(|f| f.skills = event_target_value(&ev))
                />
                <button class="btn btn--primary" type="submit">
                    {move || if editing.with(Option::is_some) { "Save changes" } else { "Publish" }}
                </button>
                <Show when=move || editing.with(Option::is_some)>
                    <button class="link-button" type="button" on:click=move |_| reset()>
                        "Cancel"
                    </button>
                </Show>
            </form>
            <Show when=move || !info.get().is_empty()>
                <p class="form-message">{move || info.get()}</p>
            </Show>
        </section>
    }
}
