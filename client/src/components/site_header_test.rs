use super::*;
use crate::net::api::Method;

#[test]
fn user_sign_out_hits_end_user_endpoint() {
    let req = logout_request(SessionKind::User, Some("user-tok"));
    assert_eq!(req.method, Method::Post);
    assert_eq!(req.path, "/auth/logout");
    assert_eq!(req.bearer.as_deref(), Some("user-tok"));
}

#[test]
fn admin_sign_out_hits_admin_endpoint() {
    let req = logout_request(SessionKind::Admin, Some("admin-tok"));
    assert_eq!(req.path, "/admin/auth/logout");
    assert_eq!(req.bearer.as_deref(), Some("admin-tok"));
}

#[test]
fn sign_out_without_token_sends_no_bearer() {
    assert!(logout_request(SessionKind::Admin, None).bearer.is_none());
}
