use super::*;
use crate::net::types::{Role, Tokens, User, UserStatus};
use crate::state::storage::MemoryStorage;
use crate::state::toast::ToastKind;

fn signed_in_store() -> SessionStore<MemoryStorage> {
    let mut store = SessionStore::new(SessionKind::User, MemoryStorage::new());
    store.login(
        User {
            id: "u-1".to_owned(),
            email: "e@x.com".to_owned(),
            full_name: "E".to_owned(),
            role: Role::Employer,
            status: UserStatus::Active,
            is_verified: true,
            avatar_url: None,
        },
        Tokens { access_token: "a".to_owned(), refresh_token: "r".to_owned() },
    );
    store
}

fn seed<T: serde::Serialize>(cache: &mut QueryCache, key: &QueryKey, data: &T) {
    let ticket = cache.begin_fetch(key).unwrap();
    assert!(cache.finish_ok(key, ticket, data));
}

fn jobs_mutation() -> Mutation {
    Mutation::new(SessionKind::User, "Could not save the job")
        .with_success("Job saved")
        .invalidating(QueryKey::new("jobs"))
}

#[test]
fn success_invalidates_and_toasts() {
    let mut cache = QueryCache::default();
    let key = QueryKey::new("jobs").with_param("page", "1");
    seed(&mut cache, &key, &0);
    let mut toasts = ToastState::default();
    let mut store = signed_in_store();

    let ok = settle_mutation(&jobs_mutation(), &Ok::<_, ApiError>(()), &mut cache, &mut toasts, &mut store);
    assert!(ok);
    assert_eq!(cache.version(&key), 1);
    assert_eq!(toasts.items[0].kind, ToastKind::Success);
    assert_eq!(toasts.items[0].message, "Job saved");
}

#[test]
fn failure_uses_server_message() {
    let mut cache = QueryCache::default();
    let mut toasts = ToastState::default();
    let mut store = signed_in_store();
    let result: Result<(), ApiError> = Err(ApiError::Envelope("Salary range is invalid".to_owned()));

    assert!(!settle_mutation(&jobs_mutation(), &result, &mut cache, &mut toasts, &mut store));
    assert_eq!(toasts.items[0].kind, ToastKind::Error);
    assert_eq!(toasts.items[0].message, "Salary range is invalid");
    assert!(store.is_authenticated());
}

#[test]
fn failure_without_message_uses_fallback() {
    let mut cache = QueryCache::default();
    let mut toasts = ToastState::default();
    let mut store = signed_in_store();
    let result: Result<(), ApiError> = Err(ApiError::Network("reset".to_owned()));

    settle_mutation(&jobs_mutation(), &result, &mut cache, &mut toasts, &mut store);
    assert_eq!(toasts.items[0].message, "Could not save the job");
}

#[test]
fn auth_failure_logs_out_and_clears_cache() {
    let mut cache = QueryCache::default();
    let key = QueryKey::new("jobs");
    seed(&mut cache, &key, &0);
    let mut toasts = ToastState::default();
    let mut store = signed_in_store();
    let result: Result<(), ApiError> = Err(ApiError::Unauthorized);

    settle_mutation(&jobs_mutation(), &result, &mut cache, &mut toasts, &mut store);
    assert!(!store.is_authenticated());
    assert!(cache.entry(&key).is_none());
}

#[test]
fn success_without_message_is_silent() {
    let mut cache = QueryCache::default();
    let mut toasts = ToastState::default();
    let mut store = signed_in_store();
    let mutation = Mutation::new(SessionKind::User, "failed");
    settle_mutation(&mutation, &Ok::<_, ApiError>(1), &mut cache, &mut toasts, &mut store);
    assert!(toasts.items.is_empty());
}

#[test]
fn failed_optimistic_write_is_refetched() {
    let mut cache = QueryCache::default();
    let key = QueryKey::new("applications").with_param("scope", "mine");
    seed(&mut cache, &key, &vec!["pending"]);
    cache.patch::<Vec<String>, _>(&key, |list| list[0] = "withdrawn".to_owned());
    let mut toasts = ToastState::default();
    let mut store = signed_in_store();
    let mutation = Mutation::new(SessionKind::User, "Could not withdraw").invalidating(key.clone());
    let result: Result<(), ApiError> = Err(ApiError::Http { status: 500, message: None });

    assert!(!settle_mutation(&mutation, &result, &mut cache, &mut toasts, &mut store));
    assert_eq!(cache.version(&key), 1);
    assert!(cache.fresh_data::<Vec<String>>(&key).is_none());
    assert!(cache.begin_fetch(&key).is_some());
}
