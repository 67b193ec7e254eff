use super::*;

#[derive(Debug, PartialEq, serde::Deserialize)]
struct Item {
    id: String,
}

// =============================================================
// ApiConfig
// =============================================================

#[test]
fn config_trims_trailing_slashes() {
    assert_eq!(ApiConfig::new("https://api.example.com/v1/").base_url, "https://api.example.com/v1");
}

#[test]
fn config_blank_falls_back_to_default() {
    assert_eq!(ApiConfig::new("  ").base_url, DEFAULT_API_BASE);
    assert_eq!(ApiConfig::default().url("/jobs"), "/api/jobs");
}

// =============================================================
// ApiRequest
// =============================================================

#[test]
fn with_bearer_ignores_empty_tokens() {
    assert_eq!(ApiRequest::get("/x").with_bearer(Some("")).bearer, None);
    assert_eq!(ApiRequest::get("/x").with_bearer(None).bearer, None);
    assert_eq!(ApiRequest::get("/x").with_bearer(Some("t")).bearer.as_deref(), Some("t"));
}

// =============================================================
// decode_envelope
// =============================================================

#[test]
fn decode_returns_data_on_success() {
    let item: Item = decode_envelope(200, r#"{"success":true,"data":{"id":"j1"}}"#).unwrap();
    assert_eq!(item, Item { id: "j1".to_owned() });
}

#[test]
fn decode_unit_payload_without_data() {
    let result: Result<(), ApiError> = decode_envelope(200, r#"{"success":true}"#);
    assert_eq!(result, Ok(()));
}

#[test]
fn decode_401_is_unauthorized() {
    let result: Result<Item, ApiError> = decode_envelope(401, "not json");
    assert_eq!(result, Err(ApiError::Unauthorized));
}

#[test]
fn decode_failed_envelope_uses_error_string() {
    let result: Result<Item, ApiError> = decode_envelope(200, r#"{"success":false,"error":"Job is closed"}"#);
    assert_eq!(result, Err(ApiError::Envelope("Job is closed".to_owned())));
}

#[test]
fn decode_http_error_uses_error_object_message() {
    let body = r#"{"success":false,"error":{"message":"Email already registered","code":"CONFLICT"}}"#;
    let result: Result<Item, ApiError> = decode_envelope(409, body);
    assert_eq!(
        result,
        Err(ApiError::Http { status: 409, message: Some("Email already registered".to_owned()) })
    );
}

#[test]
fn decode_http_error_with_unparseable_body() {
    let result: Result<Item, ApiError> = decode_envelope(502, "<html>bad gateway</html>");
    assert_eq!(result, Err(ApiError::Http { status: 502, message: None }));
}

#[test]
fn decode_shape_mismatch_is_decode_error() {
    let result: Result<Item, ApiError> = decode_envelope(200, r#"{"success":true,"data":{"name":"x"}}"#);
    assert!(matches!(result, Err(ApiError::Decode(_))));
}

#[test]
fn send_is_unavailable_off_browser() {
    let result: Result<Item, ApiError> =
        futures::executor::block_on(send(&ApiConfig::default(), ApiRequest::get("/jobs")));
    assert_eq!(result, Err(ApiError::Unavailable));
}

// =============================================================
// ApiError::user_message
// =============================================================

#[test]
fn user_message_prefers_server_text() {
    let err = ApiError::Http { status: 400, message: Some("Title is required".to_owned()) };
    assert_eq!(err.user_message("Something went wrong"), "Title is required");
}

#[test]
fn user_message_falls_back() {
    assert_eq!(ApiError::Network("x".to_owned()).user_message("Something went wrong"), "Something went wrong");
    let blank = ApiError::Envelope("  ".to_owned());
    assert_eq!(blank.user_message("fallback"), "fallback");
}

#[test]
fn auth_failures_are_detected() {
    assert!(ApiError::Unauthorized.is_auth_failure());
    assert!(ApiError::Http { status: 403, message: None }.is_auth_failure());
    assert!(!ApiError::Http { status: 500, message: None }.is_auth_failure());
    assert!(!ApiError::Unavailable.is_auth_failure());
}
