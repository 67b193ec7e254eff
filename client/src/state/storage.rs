//! Key-value storage backends for persisted client state.
//!
//! SYSTEM CONTEXT
//! ==============
//! The session store persists through `KeyValueStorage` so the same logic
//! runs against browser `localStorage` (hydrate) and an in-memory map (SSR and
//! native tests). Writes are best-effort: failures are swallowed because
//! browser storage is assumed reliable.

#[cfg(test)]
#[path = "storage_test.rs"]
mod storage_test;

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use serde::Serialize;
use serde::de::DeserializeOwned;

/// Minimal string key-value store.
pub trait KeyValueStorage {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str);
    fn remove(&self, key: &str);
}

/// Decoded JSON read of `key`.
///
/// Missing keys yield `Ok(None)`; unparseable values yield `Err` with the raw
/// text so callers can decide whether to discard the blob.
pub fn load_json<T: DeserializeOwned, S: KeyValueStorage + ?Sized>(
    storage: &S,
    key: &str,
) -> Result<Option<T>, String> {
    match storage.get(key) {
        None => Ok(None),
        Some(raw) => serde_json::from_str(&raw).map(Some).map_err(|_| raw),
    }
}

/// JSON write of `value` under `key`. Serialization failures are ignored.
pub fn save_json<T: Serialize, S: KeyValueStorage + ?Sized>(storage: &S, key: &str, value: &T) {
    let Ok(raw) = serde_json::to_string(value) else {
        return;
    };
    storage.set(key, &raw);
}

/// Shared in-memory map. Clones observe the same contents.
#[derive(Clone, Debug, Default)]
pub struct MemoryStorage {
    inner: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryStorage {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether anything is stored under `key`.
    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }
}

impl KeyValueStorage for MemoryStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.inner.lock().ok().and_then(|map| map.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) {
        if let Ok(mut map) = self.inner.lock() {
            map.insert(key.to_owned(), value.to_owned());
        }
    }

    fn remove(&self, key: &str) {
        if let Ok(mut map) = self.inner.lock() {
            map.remove(key);
        }
    }
}

/// Browser `window.localStorage`.
#[cfg(feature = "hydrate")]
#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserStorage;

#[cfg(feature = "hydrate")]
impl BrowserStorage {
    fn storage() -> Option<web_sys::Storage> {
        web_sys::window().and_then(|w| w.local_storage().ok().flatten())
    }
}

#[cfg(feature = "hydrate")]
impl KeyValueStorage for BrowserStorage {
    fn get(&self, key: &str) -> Option<String> {
        Self::storage()?.get_item(key).ok().flatten()
    }

    fn set(&self, key: &str, value: &str) {
        if let Some(storage) = Self::storage() {
            let _ = storage.set_item(key, value);
        }
    }

    fn remove(&self, key: &str) {
        if let Some(storage) = Self::storage() {
            let _ = storage.remove_item(key);
        }
    }
}

/// Storage used by the running app: `localStorage` in the browser, memory elsewhere.
#[cfg(feature = "hydrate")]
pub type DefaultStorage = BrowserStorage;

/// Storage used by the running app: `localStorage` in the browser, memory elsewhere.
#[cfg(not(feature = "hydrate"))]
pub type DefaultStorage = MemoryStorage;
