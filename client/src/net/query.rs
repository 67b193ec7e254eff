//! Keyed cache for backend query results.
//!
//! DESIGN
//! ======
//! Entries are stored as raw JSON so one cache serves every resource; typed
//! views are produced on read. Each key carries a `version` that pages read
//! reactively: bumping it via `invalidate_prefix` is what makes dependent
//! resources refetch.
//!
//! CONCURRENCY
//! ===========
//! `begin_fetch` de-duplicates in-flight requests by key and hands out a
//! `FetchTicket` stamped with the entry version. A completion whose ticket
//! predates the latest invalidation is dropped; otherwise completions are
//! applied in arrival order, so the last write wins.

#[cfg(test)]
#[path = "query_test.rs"]
mod query_test;

use std::collections::HashMap;
use std::fmt;

use serde::Serialize;
use serde::de::DeserializeOwned;

use super::error::ApiError;

/// Structured cache identifier: resource name plus ordered parameters.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct QueryKey {
    resource: String,
    params: Vec<(String, String)>,
}

impl QueryKey {
    #[must_use]
    pub fn new(resource: &str) -> Self {
        Self { resource: resource.to_owned(), params: Vec::new() }
    }

    #[must_use]
    pub fn with_param(mut self, name: &str, value: &str) -> Self {
        self.params.push((name.to_owned(), value.to_owned()));
        self
    }

    #[must_use]
    pub fn with_params(mut self, params: Vec<(String, String)>) -> Self {
        self.params.extend(params);
        self
    }

    #[must_use]
    pub fn resource(&self) -> &str {
        &self.resource
    }

    /// True when `prefix` names the same resource and its params lead ours.
    #[must_use]
    pub fn starts_with(&self, prefix: &QueryKey) -> bool {
        self.resource == prefix.resource && self.params.starts_with(&prefix.params)
    }
}

impl fmt::Display for QueryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.resource)?;
        for (i, (name, value)) in self.params.iter().enumerate() {
            let sep = if i == 0 { '?' } else { '&' };
            write!(f, "{sep}{name}={value}")?;
        }
        Ok(())
    }
}

/// Lifecycle of a cache entry.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum QueryStatus {
    #[default]
    Idle,
    Loading,
    Success,
    Error,
}

/// One cached query result.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct QueryEntry {
    pub status: QueryStatus,
    pub data: Option<serde_json::Value>,
    pub error: Option<ApiError>,
    /// Bumped on every invalidation; reactive readers refetch when it changes.
    pub version: u64,
    fetched_version: Option<u64>,
    in_flight: Option<FetchTicket>,
}

/// Proof of a started fetch: the entry version it was issued at plus a
/// cache-wide sequence number.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FetchTicket {
    version: u64,
    seq: u64,
}

/// Client-wide query cache, provided through Leptos context.
#[derive(Clone, Debug, Default)]
pub struct QueryCache {
    entries: HashMap<QueryKey, QueryEntry>,
    next_ticket: u64,
}

impl QueryCache {
    #[must_use]
    pub fn entry(&self, key: &QueryKey) -> Option<&QueryEntry> {
        self.entries.get(key)
    }

    /// Current version of `key`; zero for unknown keys.
    #[must_use]
    pub fn version(&self, key: &QueryKey) -> u64 {
        self.entries.get(key).map_or(0, |e| e.version)
    }

    /// Typed view of the cached payload for `key`.
    #[must_use]
    pub fn data<T: DeserializeOwned>(&self, key: &QueryKey) -> Option<T> {
        let raw = self.entries.get(key)?.data.clone()?;
        serde_json::from_value(raw).ok()
    }

    /// Cached payload if it was fetched at the current version.
    #[must_use]
    pub fn fresh_data<T: DeserializeOwned>(&self, key: &QueryKey) -> Option<T> {
        let entry = self.entries.get(key)?;
        if entry.status != QueryStatus::Success || entry.fetched_version != Some(entry.version) {
            return None;
        }
        serde_json::from_value(entry.data.clone()?).ok()
    }

    /// True while a fetch started at the current version is outstanding.
    #[must_use]
    pub fn is_in_flight(&self, key: &QueryKey) -> bool {
        self.entries.get(key).is_some_and(|e| e.in_flight.is_some_and(|t| t.version == e.version))
    }

    /// Mark `key` as loading. Returns `None` if a fetch for the current
    /// version is already in flight, in which case the caller should wait for
    /// that one instead.
    pub fn begin_fetch(&mut self, key: &QueryKey) -> Option<FetchTicket> {
        if self.is_in_flight(key) {
            return None;
        }
        Some(self.restart_fetch(key))
    }

    /// Issue a ticket for `key` even if another fetch is outstanding; that
    /// fetch's completion no longer clears the in-flight marker.
    pub fn restart_fetch(&mut self, key: &QueryKey) -> FetchTicket {
        self.next_ticket += 1;
        let entry = self.entries.entry(key.clone()).or_default();
        let ticket = FetchTicket { version: entry.version, seq: self.next_ticket };
        entry.in_flight = Some(ticket);
        entry.status = QueryStatus::Loading;
        ticket
    }

    /// Store a successful payload, replacing whatever was cached.
    ///
    /// Returns `false` and leaves the entry alone when `ticket` was issued
    /// before the last invalidation.
    pub fn finish_ok<T: Serialize>(&mut self, key: &QueryKey, ticket: FetchTicket, data: &T) -> bool {
        let Some(entry) = self.settle(key, ticket) else {
            return false;
        };
        entry.status = QueryStatus::Success;
        entry.fetched_version = Some(ticket.version);
        entry.data = serde_json::to_value(data).ok();
        entry.error = None;
        true
    }

    /// Record a failure. Previously cached data is kept for display.
    pub fn finish_err(&mut self, key: &QueryKey, ticket: FetchTicket, error: ApiError) -> bool {
        let Some(entry) = self.settle(key, ticket) else {
            return false;
        };
        entry.status = QueryStatus::Error;
        entry.error = Some(error);
        true
    }

    fn settle(&mut self, key: &QueryKey, ticket: FetchTicket) -> Option<&mut QueryEntry> {
        let entry = self.entries.get_mut(key)?;
        if entry.in_flight == Some(ticket) {
            entry.in_flight = None;
        }
        (entry.version == ticket.version).then_some(entry)
    }

    /// Mark every key under `prefix` stale. Returns the number of keys touched.
    ///
    /// Fetches already running keep their marker but can no longer land.
    pub fn invalidate_prefix(&mut self, prefix: &QueryKey) -> usize {
        let mut touched = 0;
        for (key, entry) in &mut self.entries {
            if key.starts_with(prefix) {
                entry.version += 1;
                touched += 1;
            }
        }
        touched
    }

    /// Optimistically rewrite the cached payload for `key`.
    ///
    /// Returns `false` when nothing is cached or the payload is not a `T`.
    pub fn patch<T, F>(&mut self, key: &QueryKey, apply: F) -> bool
    where
        T: Serialize + DeserializeOwned,
        F: FnOnce(&mut T),
    {
        let Some(entry) = self.entries.get_mut(key) else {
            return false;
        };
        let Some(mut value) = entry.data.clone().and_then(|raw| serde_json::from_value::<T>(raw).ok()) else {
            return false;
        };
        apply(&mut value);
        entry.data = serde_json::to_value(&value).ok();
        true
    }

    /// Drop every entry, e.g. after logout.
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
