use super::*;

fn params(pairs: &[(&str, &str)]) -> HashMap<String, String> {
    pairs.iter().map(|(k, v)| ((*k).to_owned(), (*v).to_owned())).collect()
}

fn complete() -> Vec<(&'static str, &'static str)> {
    vec![
        ("access_token", "acc"),
        ("refresh_token", "ref"),
        ("user_id", "u-9"),
        ("email", "jo@example.com"),
        ("full_name", "Jo"),
        ("role", "employer"),
        ("is_verified", "true"),
        ("avatar_url", "https://cdn.example.com/jo.png"),
    ]
}

#[test]
fn parses_complete_callback() {
    let (user, tokens) = parse_callback(&params(&complete())).unwrap();
    assert_eq!(tokens.access_token, "acc");
    assert_eq!(tokens.refresh_token, "ref");
    assert_eq!(user.id, "u-9");
    assert_eq!(user.role, Role::Employer);
    assert!(user.is_verified);
    assert_eq!(user.status, UserStatus::Active);
    assert_eq!(user.avatar_url.as_deref(), Some("https://cdn.example.com/jo.png"));
}

#[test]
fn provider_error_wins() {
    let mut pairs = complete();
    pairs.push(("error", "access_denied"));
    pairs.push(("error_description", "User cancelled"));
    assert_eq!(
        parse_callback(&params(&pairs)),
        Err(OAuthCallbackError::Provider("User cancelled".to_owned()))
    );
}

#[test]
fn missing_token_is_reported() {
    let pairs: Vec<_> = complete().into_iter().filter(|(k, _)| *k != "refresh_token").collect();
    assert_eq!(parse_callback(&params(&pairs)), Err(OAuthCallbackError::Missing("refresh_token")));
}

#[test]
fn blank_field_counts_as_missing() {
    let mut pairs: Vec<_> = complete().into_iter().filter(|(k, _)| *k != "email").collect();
    pairs.push(("email", "  "));
    assert_eq!(parse_callback(&params(&pairs)), Err(OAuthCallbackError::Missing("email")));
}

#[test]
fn unknown_role_is_rejected() {
    let mut pairs: Vec<_> = complete().into_iter().filter(|(k, _)| *k != "role").collect();
    pairs.push(("role", "root"));
    assert_eq!(parse_callback(&params(&pairs)), Err(OAuthCallbackError::InvalidRole("root".to_owned())));
}

#[test]
fn optional_fields_default() {
    let pairs: Vec<_> = complete()
        .into_iter()
        .filter(|(k, _)| !matches!(*k, "full_name" | "is_verified" | "avatar_url"))
        .collect();
    let (user, _) = parse_callback(&params(&pairs)).unwrap();
    assert_eq!(user.full_name, "");
    assert!(!user.is_verified);
    assert!(user.avatar_url.is_none());
}

#[test]
fn every_field_read_by_the_parser_is_listed() {
    for (name, _) in complete() {
        assert!(CALLBACK_PARAMS.contains(&name), "{name} missing");
    }
    assert!(CALLBACK_PARAMS.contains(&"error"));
    assert!(CALLBACK_PARAMS.contains(&"status"));
}
