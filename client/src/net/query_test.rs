use super::*;

fn jobs_page(page: u32) -> QueryKey {
    QueryKey::new("jobs").with_param("page", &page.to_string())
}

fn seed<T: Serialize>(cache: &mut QueryCache, key: &QueryKey, data: &T) {
    let ticket = cache.begin_fetch(key).unwrap();
    assert!(cache.finish_ok(key, ticket, data));
}

// =============================================================
// QueryKey
// =============================================================

#[test]
fn key_display_joins_params() {
    let key = QueryKey::new("jobs").with_param("page", "1").with_param("search", "rust");
    assert_eq!(key.to_string(), "jobs?page=1&search=rust");
    assert_eq!(QueryKey::new("skills").to_string(), "skills");
}

#[test]
fn key_prefix_matches_same_resource_only() {
    let key = jobs_page(2);
    assert!(key.starts_with(&QueryKey::new("jobs")));
    assert!(key.starts_with(&jobs_page(2)));
    assert!(!key.starts_with(&jobs_page(3)));
    assert!(!key.starts_with(&QueryKey::new("companies")));
}

// =============================================================
// Fetch lifecycle
// =============================================================

#[test]
fn begin_fetch_deduplicates_in_flight_requests() {
    let mut cache = QueryCache::default();
    let key = jobs_page(1);
    let ticket = cache.begin_fetch(&key).unwrap();
    assert!(cache.begin_fetch(&key).is_none());
    assert_eq!(cache.entry(&key).unwrap().status, QueryStatus::Loading);

    assert!(cache.finish_ok(&key, ticket, &vec![1, 2, 3]));
    assert!(cache.begin_fetch(&key).is_some());
}

#[test]
fn finish_ok_last_write_wins() {
    let mut cache = QueryCache::default();
    let key = jobs_page(1);
    let first = cache.begin_fetch(&key).unwrap();
    let second = cache.restart_fetch(&key);
    cache.finish_ok(&key, second, &"second");
    cache.finish_ok(&key, first, &"first");
    assert_eq!(cache.data::<String>(&key).as_deref(), Some("first"));
}

#[test]
fn finish_err_keeps_previous_data() {
    let mut cache = QueryCache::default();
    let key = jobs_page(1);
    seed(&mut cache, &key, &vec!["a".to_owned()]);
    let ticket = cache.restart_fetch(&key);
    cache.finish_err(&key, ticket, ApiError::Network("offline".to_owned()));

    let entry = cache.entry(&key).unwrap();
    assert_eq!(entry.status, QueryStatus::Error);
    assert_eq!(entry.error, Some(ApiError::Network("offline".to_owned())));
    assert_eq!(cache.data::<Vec<String>>(&key), Some(vec!["a".to_owned()]));
}

#[test]
fn finish_after_clear_is_dropped() {
    let mut cache = QueryCache::default();
    let key = jobs_page(1);
    let ticket = cache.begin_fetch(&key).unwrap();
    cache.clear();
    assert!(!cache.finish_ok(&key, ticket, &1));
    assert!(cache.entry(&key).is_none());
}

// =============================================================
// Invalidation / patching
// =============================================================

#[test]
fn invalidate_prefix_bumps_matching_versions() {
    let mut cache = QueryCache::default();
    seed(&mut cache, &jobs_page(1), &0);
    seed(&mut cache, &jobs_page(2), &0);
    seed(&mut cache, &QueryKey::new("companies"), &0);

    assert_eq!(cache.invalidate_prefix(&QueryKey::new("jobs")), 2);
    assert_eq!(cache.version(&jobs_page(1)), 1);
    assert_eq!(cache.version(&jobs_page(2)), 1);
    assert_eq!(cache.version(&QueryKey::new("companies")), 0);
}

#[test]
fn invalidate_allows_a_fetch_for_the_new_version() {
    let mut cache = QueryCache::default();
    let key = jobs_page(1);
    assert!(cache.begin_fetch(&key).is_some());
    cache.invalidate_prefix(&key);
    assert!(!cache.is_in_flight(&key));
    assert!(cache.begin_fetch(&key).is_some());
    assert!(cache.begin_fetch(&key).is_none());
}

#[test]
fn response_started_before_invalidation_is_not_fresh() {
    let mut cache = QueryCache::default();
    let key = jobs_page(1);
    let before = cache.begin_fetch(&key).unwrap();
    cache.invalidate_prefix(&QueryKey::new("jobs"));
    let after = cache.begin_fetch(&key).unwrap();

    assert!(!cache.finish_ok(&key, before, &1_u32));
    assert!(cache.fresh_data::<u32>(&key).is_none());
    assert!(cache.data::<u32>(&key).is_none());
    assert!(cache.is_in_flight(&key));

    assert!(cache.finish_ok(&key, after, &2_u32));
    assert_eq!(cache.fresh_data::<u32>(&key), Some(2));
    assert!(!cache.is_in_flight(&key));
}

#[test]
fn patch_rewrites_cached_payload() {
    let mut cache = QueryCache::default();
    let key = QueryKey::new("applications");
    seed(&mut cache, &key, &vec![1, 2, 3]);

    assert!(cache.patch::<Vec<i32>, _>(&key, |items| items.retain(|i| *i != 2)));
    assert_eq!(cache.data::<Vec<i32>>(&key), Some(vec![1, 3]));
}

#[test]
fn patch_without_data_is_noop() {
    let mut cache = QueryCache::default();
    let key = QueryKey::new("applications");
    assert!(!cache.patch::<Vec<i32>, _>(&key, Vec::clear));
    seed(&mut cache, &key, &"not a list");
    assert!(!cache.patch::<Vec<i32>, _>(&key, Vec::clear));
}

#[test]
fn clear_drops_all_entries() {
    let mut cache = QueryCache::default();
    seed(&mut cache, &jobs_page(1), &0);
    cache.clear();
    assert!(cache.entry(&jobs_page(1)).is_none());
    assert_eq!(cache.version(&jobs_page(1)), 0);
}

// =============================================================
// Freshness
// =============================================================

#[test]
fn fresh_data_until_invalidated() {
    let mut cache = QueryCache::default();
    let key = jobs_page(1);
    assert!(cache.fresh_data::<u32>(&key).is_none());

    let ticket = cache.begin_fetch(&key).unwrap();
    assert!(cache.is_in_flight(&key));
    cache.finish_ok(&key, ticket, &7_u32);
    assert!(!cache.is_in_flight(&key));
    assert_eq!(cache.fresh_data::<u32>(&key), Some(7));

    cache.invalidate_prefix(&QueryKey::new("jobs"));
    assert!(cache.fresh_data::<u32>(&key).is_none());
    assert_eq!(cache.data::<u32>(&key), Some(7));
}

#[test]
fn optimistic_patch_stays_fresh() {
    let mut cache = QueryCache::default();
    let key = QueryKey::new("resumes");
    seed(&mut cache, &key, &vec![1_u32]);
    cache.patch::<Vec<u32>, _>(&key, |v| v.push(2));
    assert_eq!(cache.fresh_data::<Vec<u32>>(&key), Some(vec![1, 2]));
}
