//! Shared wire DTOs for the client/backend boundary.
//!
//! DESIGN
//! ======
//! These types mirror backend JSON payloads so serde decoding stays lossless.
//! The client never interprets domain records beyond rendering them; only
//! `User` and `Tokens` feed session logic.

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use serde::{Deserialize, Serialize};

/// Account role. Drives route guards and role home redirects.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    JobSeeker,
    Employer,
    Admin,
}

impl Role {
    /// Landing route for a signed-in user of this role.
    #[must_use]
    pub fn home_path(self) -> &'static str {
        match self {
            Self::JobSeeker => "/dashboard",
            Self::Employer => "/employer",
            Self::Admin => "/admin",
        }
    }

    /// Parse the wire form (`job_seeker`, `employer`, `admin`).
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim() {
            "job_seeker" => Some(Self::JobSeeker),
            "employer" => Some(Self::Employer),
            "admin" => Some(Self::Admin),
            _ => None,
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::JobSeeker => "Job seeker",
            Self::Employer => "Employer",
            Self::Admin => "Administrator",
        }
    }
}

/// Account moderation status.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserStatus {
    #[default]
    Active,
    Inactive,
    Suspended,
    Pending,
}

impl UserStatus {
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim() {
            "active" => Some(Self::Active),
            "inactive" => Some(Self::Inactive),
            "suspended" => Some(Self::Suspended),
            "pending" => Some(Self::Pending),
            _ => None,
        }
    }
}

/// Authenticated account as returned by `/auth/me`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub email: String,
    pub full_name: String,
    pub role: Role,
    #[serde(default)]
    pub status: UserStatus,
    #[serde(default)]
    pub is_verified: bool,
    #[serde(default)]
    pub avatar_url: Option<String>,
}

/// Bearer token pair issued at login.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tokens {
    pub access_token: String,
    pub refresh_token: String,
}

/// Login response payload: identity plus tokens.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthPayload {
    pub user: User,
    #[serde(flatten)]
    pub tokens: Tokens,
}

/// Credentials submitted by the login form.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Payload submitted by the registration form.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    pub full_name: String,
    pub role: Role,
}

/// Employment arrangement of a listing.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JobType {
    FullTime,
    PartTime,
    Contract,
    Internship,
    Remote,
}

impl JobType {
    pub const ALL: [Self; 5] = [Self::FullTime, Self::PartTime, Self::Contract, Self::Internship, Self::Remote];

    /// Wire form, e.g. `full_time`.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::FullTime => "full_time",
            Self::PartTime => "part_time",
            Self::Contract => "contract",
            Self::Internship => "internship",
            Self::Remote => "remote",
        }
    }

    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.as_str() == raw.trim())
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::FullTime => "Full time",
            Self::PartTime => "Part time",
            Self::Contract => "Contract",
            Self::Internship => "Internship",
            Self::Remote => "Remote",
        }
    }
}

/// Moderation state of a job listing.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JobStatus {
    Draft,
    #[default]
    Active,
    Closed,
    Rejected,
}

/// A job listing.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Job {
    pub id: String,
    pub title: String,
    pub description: String,
    pub company_id: String,
    #[serde(default)]
    pub company_name: Option<String>,
    pub location: String,
    pub job_type: JobType,
    #[serde(default)]
    pub status: JobStatus,
    #[serde(default)]
    pub salary_min: Option<i64>,
    #[serde(default)]
    pub salary_max: Option<i64>,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub created_at: Option<String>,
}

/// Fields an employer submits when creating or editing a posting.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct JobDraft {
    pub title: String,
    pub description: String,
    pub location: String,
    pub job_type: Option<JobType>,
    pub salary_min: Option<i64>,
    pub salary_max: Option<i64>,
    pub skills: Vec<String>,
}

/// Browse filters; empty fields are omitted from the request and cache key.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct JobFilters {
    pub search: Option<String>,
    pub location: Option<String>,
    pub job_type: Option<JobType>,
    pub page: u32,
    pub per_page: u32,
}

impl JobFilters {
    /// Ordered, non-empty query parameters for the request and cache key.
    #[must_use]
    pub fn params(&self) -> Vec<(String, String)> {
        let mut out = Vec::new();
        if let Some(search) = self.search.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
            out.push(("search".to_owned(), search.to_owned()));
        }
        if let Some(location) = self.location.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
            out.push(("location".to_owned(), location.to_owned()));
        }
        if let Some(job_type) = self.job_type {
            out.push(("job_type".to_owned(), job_type.as_str().to_owned()));
        }
        out.push(("page".to_owned(), self.page.max(1).to_string()));
        out.push(("per_page".to_owned(), if self.per_page == 0 { 20 } else { self.per_page }.to_string()));
        out
    }
}

/// An employer profile.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Company {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub website: Option<String>,
    #[serde(default)]
    pub logo_url: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub is_verified: bool,
}

/// Pipeline stage of a job application.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApplicationStatus {
    #[default]
    Pending,
    Reviewed,
    Shortlisted,
    Interview,
    Rejected,
    Hired,
    Withdrawn,
}

impl ApplicationStatus {
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::Reviewed => "Reviewed",
            Self::Shortlisted => "Shortlisted",
            Self::Interview => "Interview",
            Self::Rejected => "Rejected",
            Self::Hired => "Hired",
            Self::Withdrawn => "Withdrawn",
        }
    }

    /// Whether the applicant may still withdraw.
    #[must_use]
    pub fn is_open(self) -> bool {
        !matches!(self, Self::Rejected | Self::Hired | Self::Withdrawn)
    }
}

/// A submitted application.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Application {
    pub id: String,
    pub job_id: String,
    #[serde(default)]
    pub job_title: Option<String>,
    pub applicant_id: String,
    #[serde(default)]
    pub applicant_name: Option<String>,
    #[serde(default)]
    pub resume_id: Option<String>,
    #[serde(default)]
    pub cover_letter: Option<String>,
    #[serde(default)]
    pub status: ApplicationStatus,
    #[serde(default)]
    pub created_at: Option<String>,
}

/// Body of an apply request.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ApplyRequest {
    pub job_id: String,
    pub resume_id: Option<String>,
    pub cover_letter: Option<String>,
}

/// An uploaded resume.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resume {
    pub id: String,
    pub title: String,
    pub file_url: String,
    #[serde(default)]
    pub is_default: bool,
}

/// A skill tag.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Skill {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub category: Option<String>,
}

/// One page of a paginated list.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Paginated<T> {
    pub items: Vec<T>,
    pub total: u64,
    pub page: u32,
    pub per_page: u32,
}

impl<T> Paginated<T> {
    /// Number of pages given `total` and `per_page`; at least one.
    #[must_use]
    pub fn page_count(&self) -> u32 {
        if self.per_page == 0 {
            return 1;
        }
        let pages = self.total.div_ceil(u64::from(self.per_page));
        u32::try_from(pages.max(1)).unwrap_or(u32::MAX)
    }
}

/// Admin dashboard counters.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalyticsSummary {
    pub total_users: u64,
    pub total_jobs: u64,
    pub total_applications: u64,
    pub active_jobs: u64,
    pub pending_moderation: u64,
}
