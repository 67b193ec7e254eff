//! Card for one job listing in browse and employer lists.

#[cfg(test)]
#[path = "job_card_test.rs"]
mod job_card_test;

use leptos::prelude::*;

use crate::net::types::Job;

/// Human-readable salary range, or `None` when neither bound is known.
pub fn format_salary(min: Option<i64>, max: Option<i64>) -> Option<String> {
    match (min, max) {
        (Some(min), Some(max)) if min == max => Some(format!("${}", group_thousands(min))),
        (Some(min), Some(max)) => Some(format!("${} - ${}", group_thousands(min), group_thousands(max))),
        (Some(min), None) => Some(format!("From ${}", group_thousands(min))),
        (None, Some(max)) => Some(format!("Up to ${}", group_thousands(max))),
        (None, None) => None,
    }
}

fn group_thousands(value: i64) -> String {
    let digits = value.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    if value < 0 { format!("-{out}") } else { out }
}

#[component]
pub fn JobCard(job: Job, #[prop(optional)] footer: Option<ChildrenFn>) -> impl IntoView {
    let href = format!("/jobs/{}", job.id);
    let salary = format_salary(job.salary_min, job.salary_max);
    let company = job.company_name.clone().unwrap_or_default();
    let skills = job.skills.clone();

    view! {
        <article class="job-card">
            <a class="job-card__title" href=href>{job.title.clone()}</a>
            <p class="job-card__meta">
                <span class="job-card__company">{company}</span>
                <span class="job-card__location">{job.location.clone()}</span>
                <span class="job-card__type">{job.job_type.label()}</span>
            </p>
            {salary.map(|s| view! { <p class="job-card__salary">{s}</p> })}
            <ul class="job-card__skills">
                {skills.into_iter().map(|s| view! { <li class="tag">{s}</li> }).collect_view()}
            </ul>
            {footer.map(|f| view! { <div class="job-card__footer">{f()}</div> })}
        </article>
    }
}
