//! Request builders for every backend resource.
//!
//! Builders are pure: they only describe the call. Pages pair them with
//! `api::send` and a `query::QueryKey` so requests and cache keys stay in
//! one place per resource.

#[cfg(test)]
#[path = "endpoints_test.rs"]
mod endpoints_test;

use super::api::ApiRequest;
use super::query::QueryKey;
use super::types::{
    ApplicationStatus, ApplyRequest, JobDraft, JobFilters, JobStatus, LoginRequest, RegisterRequest, UserStatus,
};

/// Session and identity calls for end users.
pub mod auth {
    use super::*;

    #[must_use]
    pub fn login(credentials: &LoginRequest) -> ApiRequest {
        ApiRequest::post("/auth/login").with_json(credentials)
    }

    #[must_use]
    pub fn register(payload: &RegisterRequest) -> ApiRequest {
        ApiRequest::post("/auth/register").with_json(payload)
    }

    /// "Who am I" validation of an access token.
    #[must_use]
    pub fn me(access_token: &str) -> ApiRequest {
        ApiRequest::get("/auth/me").with_bearer(Some(access_token))
    }

    #[must_use]
    pub fn logout(access_token: Option<&str>) -> ApiRequest {
        ApiRequest::post("/auth/logout").with_bearer(access_token)
    }

    /// Start URL of the redirect-based social login flow.
    #[must_use]
    pub fn oauth_start_path(provider: &str) -> String {
        format!("/auth/oauth/{provider}")
    }
}

/// Administrator session calls; separate from end-user auth.
pub mod admin_auth {
    use super::*;

    #[must_use]
    pub fn login(credentials: &LoginRequest) -> ApiRequest {
        ApiRequest::post("/admin/auth/login").with_json(credentials)
    }

    #[must_use]
    pub fn me(access_token: &str) -> ApiRequest {
        ApiRequest::get("/admin/auth/me").with_bearer(Some(access_token))
    }

    #[must_use]
    pub fn logout(access_token: Option<&str>) -> ApiRequest {
        ApiRequest::post("/admin/auth/logout").with_bearer(access_token)
    }
}

pub mod jobs {
    use super::*;

    #[must_use]
    pub fn key(filters: &JobFilters) -> QueryKey {
        QueryKey::new("jobs").with_params(filters.params())
    }

    #[must_use]
    pub fn list(filters: &JobFilters) -> ApiRequest {
        ApiRequest::get("/jobs").with_query(filters.params())
    }

    #[must_use]
    pub fn detail_key(id: &str) -> QueryKey {
        QueryKey::new("jobs").with_param("id", id)
    }

    #[must_use]
    pub fn get(id: &str) -> ApiRequest {
        ApiRequest::get(format!("/jobs/{id}"))
    }

    #[must_use]
    pub fn mine_key() -> QueryKey {
        QueryKey::new("jobs").with_param("scope", "mine")
    }

    #[must_use]
    pub fn mine(token: Option<&str>) -> ApiRequest {
        ApiRequest::get("/employer/jobs").with_bearer(token)
    }

    #[must_use]
    pub fn create(draft: &JobDraft, token: Option<&str>) -> ApiRequest {
        ApiRequest::post("/jobs").with_json(draft).with_bearer(token)
    }

    #[must_use]
    pub fn update(id: &str, draft: &JobDraft, token: Option<&str>) -> ApiRequest {
        ApiRequest::put(format!("/jobs/{id}")).with_json(draft).with_bearer(token)
    }

    #[must_use]
    pub fn delete(id: &str, token: Option<&str>) -> ApiRequest {
        ApiRequest::delete(format!("/jobs/{id}")).with_bearer(token)
    }
}

pub mod companies {
    use super::*;

    #[must_use]
    pub fn list(page: u32) -> ApiRequest {
        ApiRequest::get("/companies").with_query(vec![("page".to_owned(), page.max(1).to_string())])
    }

    #[must_use]
    pub fn get(id: &str) -> ApiRequest {
        ApiRequest::get(format!("/companies/{id}"))
    }

    #[must_use]
    pub fn mine_key() -> QueryKey {
        QueryKey::new("companies").with_param("scope", "mine")
    }

    #[must_use]
    pub fn mine(token: Option<&str>) -> ApiRequest {
        ApiRequest::get("/companies/me").with_bearer(token)
    }

    #[must_use]
    pub fn update(id: &str, body: &serde_json::Value, token: Option<&str>) -> ApiRequest {
        ApiRequest::patch(format!("/companies/{id}")).with_json(body).with_bearer(token)
    }
}

pub mod applications {
    use super::*;

    #[must_use]
    pub fn mine_key() -> QueryKey {
        QueryKey::new("applications").with_param("scope", "mine")
    }

    #[must_use]
    pub fn mine(token: Option<&str>) -> ApiRequest {
        ApiRequest::get("/applications/me").with_bearer(token)
    }

    #[must_use]
    pub fn for_job_key(job_id: &str) -> QueryKey {
        QueryKey::new("applications").with_param("job_id", job_id)
    }

    #[must_use]
    pub fn for_job(job_id: &str, token: Option<&str>) -> ApiRequest {
        ApiRequest::get(format!("/jobs/{job_id}/applications")).with_bearer(token)
    }

    #[must_use]
    pub fn apply(body: &ApplyRequest, token: Option<&str>) -> ApiRequest {
        ApiRequest::post("/applications").with_json(body).with_bearer(token)
    }

    #[must_use]
    pub fn update_status(id: &str, status: ApplicationStatus, token: Option<&str>) -> ApiRequest {
        ApiRequest::patch(format!("/applications/{id}/status"))
            .with_json(&serde_json::json!({ "status": status }))
            .with_bearer(token)
    }

    #[must_use]
    pub fn withdraw(id: &str, token: Option<&str>) -> ApiRequest {
        ApiRequest::post(format!("/applications/{id}/withdraw")).with_bearer(token)
    }
}

pub mod resumes {
    use super::*;

    #[must_use]
    pub fn key() -> QueryKey {
        QueryKey::new("resumes")
    }

    #[must_use]
    pub fn list(token: Option<&str>) -> ApiRequest {
        ApiRequest::get("/resumes").with_bearer(token)
    }

    /// Register an already-uploaded file with the resume list.
    #[must_use]
    pub fn create(title: &str, file_url: &str, token: Option<&str>) -> ApiRequest {
        ApiRequest::post("/resumes")
            .with_json(&serde_json::json!({ "title": title, "file_url": file_url }))
            .with_bearer(token)
    }

    #[must_use]
    pub fn set_default(id: &str, token: Option<&str>) -> ApiRequest {
        ApiRequest::post(format!("/resumes/{id}/default")).with_bearer(token)
    }

    #[must_use]
    pub fn delete(id: &str, token: Option<&str>) -> ApiRequest {
        ApiRequest::delete(format!("/resumes/{id}")).with_bearer(token)
    }
}

pub mod skills {
    use super::*;

    #[must_use]
    pub fn key(search: &str) -> QueryKey {
        let search = search.trim();
        if search.is_empty() { QueryKey::new("skills") } else { QueryKey::new("skills").with_param("q", search) }
    }

    #[must_use]
    pub fn list(search: &str) -> ApiRequest {
        let search = search.trim();
        let query = if search.is_empty() { Vec::new() } else { vec![("q".to_owned(), search.to_owned())] };
        ApiRequest::get("/skills").with_query(query)
    }
}

/// Moderation and analytics calls; all require the admin session token.
pub mod admin {
    use super::*;

    #[must_use]
    pub fn users_key(page: u32) -> QueryKey {
        QueryKey::new("admin-users").with_param("page", &page.max(1).to_string())
    }

    #[must_use]
    pub fn users(page: u32, token: Option<&str>) -> ApiRequest {
        ApiRequest::get("/admin/users")
            .with_query(vec![("page".to_owned(), page.max(1).to_string())])
            .with_bearer(token)
    }

    #[must_use]
    pub fn set_user_status(user_id: &str, status: UserStatus, token: Option<&str>) -> ApiRequest {
        ApiRequest::patch(format!("/admin/users/{user_id}/status"))
            .with_json(&serde_json::json!({ "status": status }))
            .with_bearer(token)
    }

    #[must_use]
    pub fn pending_jobs_key() -> QueryKey {
        QueryKey::new("admin-jobs").with_param("status", "pending")
    }

    #[must_use]
    pub fn pending_jobs(token: Option<&str>) -> ApiRequest {
        ApiRequest::get("/admin/jobs")
            .with_query(vec![("status".to_owned(), "pending".to_owned())])
            .with_bearer(token)
    }

    #[must_use]
    pub fn moderate_job(job_id: &str, status: JobStatus, token: Option<&str>) -> ApiRequest {
        ApiRequest::patch(format!("/admin/jobs/{job_id}/status"))
            .with_json(&serde_json::json!({ "status": status }))
            .with_bearer(token)
    }

    #[must_use]
    pub fn analytics_key() -> QueryKey {
        QueryKey::new("admin-analytics")
    }

    #[must_use]
    pub fn analytics(token: Option<&str>) -> ApiRequest {
        ApiRequest::get("/admin/analytics/summary").with_bearer(token)
    }
}
