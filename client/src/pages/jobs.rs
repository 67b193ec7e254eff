//! Job browsing: filterable list and listing detail with apply form.
//!
//! SYSTEM CONTEXT
//! ==============
//! Both routes are public. The search box is debounced so typing does not
//! issue a request per keystroke; the location and type filters apply
//! immediately. Applying requires a job-seeker session.

use leptos::prelude::*;
use leptos_router::hooks::{use_params_map, use_query_map};

use crate::components::job_card::{JobCard, format_salary};
use crate::components::spinner::Spinner;
use crate::net::endpoints;
use crate::net::types::{Application, ApplyRequest, Job, JobFilters, JobType, Paginated, Resume, Role};
use crate::state::Sessions;
use crate::state::session::SessionKind;
use crate::util::debounce::{Debouncer, SEARCH_DEBOUNCE_MS, now_ms};
use crate::util::fetch::{Mutation, spawn_mutation, use_query, with_token};

const PAGE_SIZE: u32 = 20;

#[component]
pub fn JobsPage() -> impl IntoView {
    let query = use_query_map();
    let initial = query.with_untracked(|q| q.get("search").unwrap_or_default());

    let search_input = RwSignal::new(initial.clone());
    let search = RwSignal::new(initial);
    let location = RwSignal::new(String::new());
    let job_type = RwSignal::new(None::<JobType>);
    let page = RwSignal::new(1_u32);
    let debouncer = StoredValue::new(Debouncer::<String>::new(SEARCH_DEBOUNCE_MS));

    let filters = move || JobFilters {
        search: Some(search.get()),
        location: Some(location.get()),
        job_type: job_type.get(),
        page: page.get(),
        per_page: PAGE_SIZE,
    };
    let listing = use_query::<Paginated<Job>, _, _>(
        move || endpoints::jobs::key(&filters()),
        move || Ok(endpoints::jobs::list(&filters())),
    );

    view! {
        <div class="jobs-page">
            <h1>"Jobs"</h1>
            <div class="filters">
                <input
                    class="filters__search"
                    type="search"
                    placeholder="Search title, skill, or company"
                    prop:value=move || search_input.get()
                    on:input=move |ev| {
                        let value = event_target_value(&ev);
                        search_input.set(value.clone());
                        settle_search(debouncer, search, page, value);
                    }
                />
                <input
                    class="filters__location"
                    type="text"
                    placeholder="Location"
                    prop:value=move || location.get()
                    on:change=move |ev| {
                        location.set(event_target_value(&ev));
                        page.set(1);
                    }
                />
                <select
                    class="filters__type"
                    on:change=move |ev| {
                        job_type.set(JobType::parse(&event_target_value(&ev)));
                        page.set(1);
                    }
                >
                    <option value="">"Any type"</option>
                    {JobType::ALL
                        .into_iter()
                        .map(|t| view! { <option value=t.as_str()>{t.label()}</option> })
                        .collect_view()}
                </select>
            </div>
            {move || match listing.get() {
                None => view! { <Spinner label="Loading jobs..."/> }.into_any(),
                Some(Err(e)) => {
                    view! { <p class="page-error">{e.user_message("Could not load jobs.")}</p> }.into_any()
                }
                Some(Ok(result)) if result.items.is_empty() => {
                    view! { <p class="empty-state">"No jobs match your filters."</p> }.into_any()
                }
                Some(Ok(result)) => {
                    let pages = result.page_count();
                    view! {
                        <p class="jobs-page__count">{format!("{} jobs", result.total)}</p>
                        <div class="job-list">
                            {result.items.into_iter().map(|job| view! { <JobCard job=job/> }).collect_view()}
                        </div>
                        <Pager page=page pages=pages/>
                    }
                        .into_any()
                }
            }}
        </div>
    }
}

/// Queue `value` on the debouncer and apply it once the quiet period passes
/// without newer input.
fn settle_search(debouncer: StoredValue<Debouncer<String>>, search: RwSignal<String>, page: RwSignal<u32>, value: String) {
    let ticket = debouncer.try_update_value(|d| d.input(value, now_ms())).unwrap_or_default();

    #[cfg(feature = "hydrate")]
    leptos::task::spawn_local(async move {
        let wait = u32::try_from(SEARCH_DEBOUNCE_MS + 1).unwrap_or(u32::MAX);
        gloo_timers::future::TimeoutFuture::new(wait).await;
        if let Some(term) = debouncer.try_update_value(|d| d.settle(ticket, now_ms())).flatten() {
            search.set(term);
            page.set(1);
        }
    });
    #[cfg(not(feature = "hydrate"))]
    let _ = (ticket, search, page);
}

#[component]
fn Pager(page: RwSignal<u32>, pages: u32) -> impl IntoView {
    view! {
        <nav class="pager">
            <button class="btn" disabled=move || page.get() <= 1 on:click=move |_| page.update(|p| *p = p.saturating_sub(1).max(1))>
                "Previous"
            </button>
            <span class="pager__status">{move || format!("Page {} of {pages}", page.get())}</span>
            <button class="btn" disabled=move || page.get() >= pages on:click=move |_| page.update(|p| *p = (*p + 1).min(pages))>
                "Next"
            </button>
        </nav>
    }
}

#[component]
pub fn JobDetailPage() -> impl IntoView {
    let params = use_params_map();
    let sessions = expect_context::<Sessions>();
    let job_id = move || params.with(|p| p.get("id").unwrap_or_default());

    let job = use_query::<Job, _, _>(
        move || endpoints::jobs::detail_key(&job_id()),
        move || Ok(endpoints::jobs::get(&job_id())),
    );
    let viewer_role = move || sessions.user.with(|s| s.user().filter(|_| s.is_authenticated()).map(|u| u.role));

    view! {
        <div class="job-detail">
            {move || match job.get() {
                None => view! { <Spinner label="Loading job..."/> }.into_any(),
                Some(Err(e)) => {
                    view! { <p class="page-error">{e.user_message("This job could not be found.")}</p> }.into_any()
                }
                Some(Ok(job)) => {
                    let salary = format_salary(job.salary_min, job.salary_max);
                    let id = job.id.clone();
                    view! {
                        <h1>{job.title.clone()}</h1>
                        <p class="job-detail__meta">
                            {job.company_name.clone().unwrap_or_default()} " · " {job.location.clone()} " · "
                            {job.job_type.label()}
                        </p>
                        {salary.map(|s| view! { <p class="job-detail__salary">{s}</p> })}
                        <ul class="job-card__skills">
                            {job.skills.iter().map(|s| view! { <li class="tag">{s.clone()}</li> }).collect_view()}
                        </ul>
                        <div class="job-detail__description">{job.description.clone()}</div>
                        {move || match viewer_role() {
                            Some(Role::JobSeeker) => view! { <ApplyForm job_id=id.clone()/> }.into_any(),
                            Some(_) => ().into_any(),
                            None => {
                                view! {
                                    <p class="job-detail__signin">
                                        <a href="/login">"Sign in"</a>
                                        " as a job seeker to apply."
                                    </p>
                                }
                                    .into_any()
                            }
                        }}
                    }
                        .into_any()
                }
            }}
        </div>
    }
}

#[component]
fn ApplyForm(job_id: String) -> impl IntoView {
    let sessions = expect_context::<Sessions>();
    let resumes = use_query::<Vec<Resume>, _, _>(
        endpoints::resumes::key,
        with_token(SessionKind::User, |t| endpoints::resumes::list(Some(t))),
    );
    let resume_id = RwSignal::new(None::<String>);
    let cover_letter = RwSignal::new(String::new());
    let applied = RwSignal::new(false);

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let default_resume = || {
            resumes.get().and_then(Result::ok).and_then(|list| list.into_iter().find(|r| r.is_default).map(|r| r.id))
        };
        let body = ApplyRequest {
            job_id: job_id.clone(),
            resume_id: resume_id.get().or_else(default_resume),
            cover_letter: Some(cover_letter.get().trim().to_owned()).filter(|c| !c.is_empty()),
        };
        let token = sessions.user.with_untracked(|s| s.access_token().map(str::to_owned));
        spawn_mutation::<Application, _>(
            Mutation::new(SessionKind::User, "Could not submit your application.")
                .with_success("Application submitted")
                .invalidating(endpoints::applications::mine_key()),
            endpoints::applications::apply(&body, token.as_deref()),
            move |_| applied.set(true),
        );
    };

    view! {
        <Show
            when=move || !applied.get()
            fallback=|| view! { <p class="job-detail__applied">"You applied to this job."</p> }
        >
            <form class="apply-form" on:submit=on_submit.clone()>
                <h2>"Apply"</h2>
                <select on:change=move |ev| resume_id.set(Some(event_target_value(&ev)).filter(|v| !v.is_empty()))>
                    <option value="">"Default resume"</option>
                    {move || {
                        resumes
                            .get()
                            .and_then(Result::ok)
                            .unwrap_or_default()
                            .into_iter()
                            .map(|r| view! { <option value=r.id.clone()>{r.title.clone()}</option> })
                            .collect_view()
                    }}
                </select>
                <textarea
                    placeholder="Cover letter (optional)"
                    prop:value=move || cover_letter.get()
                    on:input=move |ev| cover_letter.set(event_target_value(&ev))
                ></textarea>
                <button class="btn btn--primary" type="submit">
                    "Submit application"
                </button>
            </form>
        </Show>
    }
}
