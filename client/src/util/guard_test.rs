use super::*;
use crate::net::types::{Tokens, User, UserStatus};
use crate::state::session::SessionStore;
use crate::state::storage::MemoryStorage;

fn make_user(role: Role) -> User {
    User {
        id: "u-1".to_owned(),
        email: "u@example.com".to_owned(),
        full_name: "U".to_owned(),
        role,
        status: UserStatus::Active,
        is_verified: true,
        avatar_url: None,
    }
}

fn session(role: Option<Role>, hydrated: bool) -> SessionState {
    let mut store = SessionStore::new(SessionKind::User, MemoryStorage::new());
    if let Some(role) = role {
        store.login(make_user(role), Tokens { access_token: "a".to_owned(), refresh_token: "r".to_owned() });
    }
    store.set_has_hydrated(hydrated);
    store.state().clone()
}

// =============================================================
// decide
// =============================================================

#[test]
fn never_renders_before_hydration() {
    for area in [Area::Dashboard, Area::Employer, Area::Admin] {
        assert_eq!(decide(area, &session(None, false)), GuardDecision::Wait);
        let role = area.required_role();
        assert_eq!(decide(area, &session(Some(role), false)), GuardDecision::Wait);
    }
}

#[test]
fn empty_storage_redirects_every_area_to_login() {
    let storage = MemoryStorage::new();
    let mut store = SessionStore::new(SessionKind::User, storage);
    store.rehydrate();
    for area in [Area::Dashboard, Area::Employer, Area::Admin] {
        assert_eq!(decide(area, store.state()), GuardDecision::Redirect("/login"));
    }
}

#[test]
fn stored_employer_session_redirects_dashboard_to_employer() {
    let storage = MemoryStorage::new();
    SessionStore::new(SessionKind::User, storage.clone())
        .login(make_user(Role::Employer), Tokens { access_token: "a".to_owned(), refresh_token: "r".to_owned() });

    let mut store = SessionStore::new(SessionKind::User, storage);
    store.rehydrate();
    assert_eq!(decide(Area::Dashboard, store.state()), GuardDecision::Redirect("/employer"));
    assert_eq!(decide(Area::Employer, store.state()), GuardDecision::Render);
}

#[test]
fn matching_role_renders() {
    assert_eq!(decide(Area::Dashboard, &session(Some(Role::JobSeeker), true)), GuardDecision::Render);
    assert_eq!(decide(Area::Admin, &session(Some(Role::Admin), true)), GuardDecision::Render);
}

#[test]
fn job_seeker_in_employer_area_goes_to_dashboard() {
    assert_eq!(
        decide(Area::Employer, &session(Some(Role::JobSeeker), true)),
        GuardDecision::Redirect("/dashboard")
    );
}

#[test]
fn user_without_authentication_flag_goes_to_login() {
    let mut state = session(Some(Role::JobSeeker), true);
    state.is_authenticated = false;
    assert_eq!(decide(Area::Dashboard, &state), GuardDecision::Redirect("/login"));
}

#[test]
fn admin_area_uses_admin_session() {
    assert_eq!(Area::Admin.session_kind(), SessionKind::Admin);
    assert_eq!(Area::Dashboard.session_kind(), SessionKind::User);
    assert_eq!(Area::Employer.session_kind(), SessionKind::User);
}

// =============================================================
// RedirectLatch
// =============================================================

#[test]
fn latch_issues_each_redirect_once() {
    let mut latch = RedirectLatch::default();
    assert_eq!(latch.take(GuardDecision::Redirect("/login")), Some("/login"));
    assert_eq!(latch.take(GuardDecision::Redirect("/login")), None);
    assert_eq!(latch.take(GuardDecision::Redirect("/employer")), Some("/employer"));
}

#[test]
fn latch_resets_after_render() {
    let mut latch = RedirectLatch::default();
    latch.take(GuardDecision::Redirect("/login"));
    assert_eq!(latch.take(GuardDecision::Render), None);
    assert_eq!(latch.take(GuardDecision::Redirect("/login")), Some("/login"));
}

#[test]
fn latch_ignores_wait() {
    let mut latch = RedirectLatch::default();
    assert_eq!(latch.take(GuardDecision::Wait), None);
}
