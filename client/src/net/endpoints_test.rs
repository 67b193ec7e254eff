use super::*;
use crate::net::api::Method;
use crate::net::types::{JobType, Role};

#[test]
fn me_carries_bearer_token() {
    let req = auth::me("tok");
    assert_eq!(req.method, Method::Get);
    assert_eq!(req.path, "/auth/me");
    assert_eq!(req.bearer.as_deref(), Some("tok"));
}

#[test]
fn admin_me_uses_admin_path() {
    assert_eq!(admin_auth::me("tok").path, "/admin/auth/me");
}

#[test]
fn register_serializes_role() {
    let req = auth::register(&RegisterRequest {
        email: "e@x.com".to_owned(),
        password: "pw".to_owned(),
        full_name: "E".to_owned(),
        role: Role::Employer,
    });
    assert_eq!(req.body.unwrap()["role"], "employer");
}

#[test]
fn job_list_key_and_query_share_params() {
    let filters = JobFilters { search: Some("rust".to_owned()), job_type: Some(JobType::Remote), ..JobFilters::default() };
    let req = jobs::list(&filters);
    assert_eq!(req.query, filters.params());
    assert_eq!(jobs::key(&filters).to_string(), "jobs?search=rust&job_type=remote&page=1&per_page=20");
}

#[test]
fn job_keys_share_invalidation_prefix() {
    let prefix = QueryKey::new("jobs");
    assert!(jobs::key(&JobFilters::default()).starts_with(&prefix));
    assert!(jobs::detail_key("j1").starts_with(&prefix));
    assert!(jobs::mine_key().starts_with(&prefix));
}

#[test]
fn application_status_update_body() {
    let req = applications::update_status("a1", ApplicationStatus::Shortlisted, Some("t"));
    assert_eq!(req.method, Method::Patch);
    assert_eq!(req.path, "/applications/a1/status");
    assert_eq!(req.body.unwrap()["status"], "shortlisted");
}

#[test]
fn skills_key_omits_blank_search() {
    assert_eq!(skills::key("  ").to_string(), "skills");
    assert_eq!(skills::key(" go ").to_string(), "skills?q=go");
    assert!(skills::list("").query.is_empty());
}

#[test]
fn moderate_job_body() {
    let req = admin::moderate_job("j9", JobStatus::Rejected, Some("adm"));
    assert_eq!(req.path, "/admin/jobs/j9/status");
    assert_eq!(req.body.unwrap()["status"], "rejected");
    assert_eq!(req.bearer.as_deref(), Some("adm"));
}

#[test]
fn oauth_start_path_names_provider() {
    assert_eq!(auth::oauth_start_path("google"), "/auth/oauth/google");
}

#[test]
fn job_update_puts_draft_to_item_path() {
    let draft = crate::net::types::JobDraft { title: "Lead".to_owned(), ..Default::default() };
    let req = jobs::update("j-9", &draft, Some("tok"));
    assert_eq!(req.method, Method::Put);
    assert_eq!(req.path, "/jobs/j-9");
    assert_eq!(req.body.unwrap()["title"], "Lead");
    assert_eq!(req.bearer.as_deref(), Some("tok"));
}
