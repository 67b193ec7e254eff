//! Role-based route guard decisions.
//!
//! SYSTEM CONTEXT
//! ==============
//! Every protected layout (job seeker dashboard, employer, admin) applies the
//! same decision; only the required role and the session it reads differ.
//! `components::route_guard` turns the decision into a spinner, a redirect,
//! or the protected children.

#[cfg(test)]
#[path = "guard_test.rs"]
mod guard_test;

use crate::net::types::Role;
use crate::state::session::{SessionKind, SessionState};

/// Login route used for every unauthenticated redirect.
pub const LOGIN_PATH: &str = "/login";

/// A protected area of the app.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Area {
    Dashboard,
    Employer,
    Admin,
}

impl Area {
    #[must_use]
    pub fn required_role(self) -> Role {
        match self {
            Self::Dashboard => Role::JobSeeker,
            Self::Employer => Role::Employer,
            Self::Admin => Role::Admin,
        }
    }

    /// Which session store authorizes this area.
    #[must_use]
    pub fn session_kind(self) -> SessionKind {
        match self {
            Self::Admin => SessionKind::Admin,
            Self::Dashboard | Self::Employer => SessionKind::User,
        }
    }
}

/// What a guarded layout should do right now.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GuardDecision {
    /// Persisted state not loaded yet: show a spinner, never the children.
    Wait,
    Redirect(&'static str),
    Render,
}

/// Decide access to `area` for `session`.
#[must_use]
pub fn decide(area: Area, session: &SessionState) -> GuardDecision {
    if !session.has_hydrated {
        return GuardDecision::Wait;
    }
    let user = match &session.user {
        Some(user) if session.is_authenticated => user,
        _ => return GuardDecision::Redirect(LOGIN_PATH),
    };
    if user.role == area.required_role() {
        GuardDecision::Render
    } else {
        GuardDecision::Redirect(user.role.home_path())
    }
}

/// Remembers the last redirect issued so a guard navigates at most once
/// per target while its decision is unchanged.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RedirectLatch {
    last: Option<&'static str>,
}

impl RedirectLatch {
    /// Target to navigate to now, or `None` if already issued.
    pub fn take(&mut self, decision: GuardDecision) -> Option<&'static str> {
        match decision {
            GuardDecision::Redirect(target) if self.last != Some(target) => {
                self.last = Some(target);
                Some(target)
            }
            GuardDecision::Redirect(_) => None,
            GuardDecision::Wait | GuardDecision::Render => {
                self.last = None;
                None
            }
        }
    }
}
