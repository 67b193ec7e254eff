//! Public landing page: search entry point and latest listings.

use leptos::prelude::*;

use crate::components::job_card::JobCard;
use crate::components::spinner::Spinner;
use crate::net::endpoints;
use crate::net::types::{Job, JobFilters, Paginated};
use crate::util::fetch::use_query;

const LATEST_COUNT: u32 = 6;

fn latest_filters() -> JobFilters {
    JobFilters { page: 1, per_page: LATEST_COUNT, ..JobFilters::default() }
}

#[component]
pub fn HomePage() -> impl IntoView {
    let latest = use_query::<Paginated<Job>, _, _>(
        || endpoints::jobs::key(&latest_filters()),
        || Ok(endpoints::jobs::list(&latest_filters())),
    );

    view! {
        <div class="home-page">
            <section class="hero">
                <h1>"Find work you care about"</h1>
                <form class="hero__search" action="/jobs" method="get">
                    <input class="hero__input" type="search" name="search" placeholder="Title, skill, or company"/>
                    <button class="btn btn--primary" type="submit">"Search jobs"</button>
                </form>
                <p class="hero__cta">
                    "Hiring? "
                    <a href="/register">"Post your first job"</a>
                </p>
            </section>
            <section class="home-page__latest">
                <h2>"Latest openings"</h2>
                {move || match latest.get() {
                    None => view! { <Spinner/> }.into_any(),
                    Some(Err(_)) => view! { <p class="empty-state">"Listings are unavailable right now."</p> }.into_any(),
                    Some(Ok(page)) => {
                        view! {
                            <div class="job-list">
                                {page.items.into_iter().map(|job| view! { <JobCard job=job/> }).collect_view()}
                            </div>
                        }
                            .into_any()
                    }
                }}
                <a class="btn" href="/jobs">"Browse all jobs"</a>
            </section>
        </div>
    }
}
