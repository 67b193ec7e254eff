use super::*;

#[test]
fn memory_storage_clones_share_contents() {
    let a = MemoryStorage::new();
    let b = a.clone();
    a.set("k", "v");
    assert_eq!(b.get("k").as_deref(), Some("v"));
    b.remove("k");
    assert!(!a.contains("k"));
}

#[test]
fn load_json_missing_key_is_none() {
    let storage = MemoryStorage::new();
    assert_eq!(load_json::<u32, _>(&storage, "missing"), Ok(None));
}

#[test]
fn load_json_corrupt_value_returns_raw() {
    let storage = MemoryStorage::new();
    storage.set("k", "{not json");
    assert_eq!(load_json::<u32, _>(&storage, "k"), Err("{not json".to_owned()));
}

#[test]
fn save_then_load_json() {
    let storage = MemoryStorage::new();
    save_json(&storage, "k", &vec!["a", "b"]);
    assert_eq!(load_json::<Vec<String>, _>(&storage, "k"), Ok(Some(vec!["a".to_owned(), "b".to_owned()])));
}
