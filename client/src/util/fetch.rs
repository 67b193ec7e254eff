//! Query and mutation glue between pages, the query cache, and toasts.
//!
//! SYSTEM CONTEXT
//! ==============
//! Pages call `use_query` for reads and `spawn_mutation` for writes. Reads are
//! keyed by `QueryKey` and served from `QueryCache` while fresh; writes
//! invalidate their keys whatever the outcome and surface a toast.
//!
//! ERROR HANDLING
//! ==============
//! Query failures are returned to the caller to render. Mutation failures
//! become error toasts; an authentication failure additionally logs the
//! owning session out.

#[cfg(test)]
#[path = "fetch_test.rs"]
mod fetch_test;

use leptos::prelude::*;
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::net::api::{ApiConfig, ApiRequest, send};
use crate::net::error::ApiError;
use crate::net::query::{QueryCache, QueryKey};
use crate::state::Sessions;
use crate::state::session::{SessionKind, SessionStore};
use crate::state::storage::KeyValueStorage;
use crate::state::toast::ToastState;

/// Description of a write: which session authorizes it, what to say, and
/// which cached queries it makes stale.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Mutation {
    pub session: SessionKind,
    pub success: Option<&'static str>,
    pub fallback: &'static str,
    pub invalidate: Vec<QueryKey>,
}

impl Mutation {
    #[must_use]
    pub fn new(session: SessionKind, fallback: &'static str) -> Self {
        Self { session, success: None, fallback, invalidate: Vec::new() }
    }

    #[must_use]
    pub fn with_success(mut self, message: &'static str) -> Self {
        self.success = Some(message);
        self
    }

    #[must_use]
    pub fn invalidating(mut self, key: QueryKey) -> Self {
        self.invalidate.push(key);
        self
    }
}

/// Apply a finished mutation to cache, toasts, and session. Returns `true`
/// on success.
pub fn settle_mutation<T, S: KeyValueStorage>(
    mutation: &Mutation,
    result: &Result<T, ApiError>,
    cache: &mut QueryCache,
    toasts: &mut ToastState,
    session: &mut SessionStore<S>,
) -> bool {
    // Failed writes invalidate too; optimistic patches are refetched away.
    for key in &mutation.invalidate {
        cache.invalidate_prefix(key);
    }
    match result {
        Ok(_) => {
            if let Some(message) = mutation.success {
                toasts.success(message);
            }
            true
        }
        Err(error) => {
            toasts.error(error.user_message(mutation.fallback));
            if error.is_auth_failure() {
                session.logout();
                cache.clear();
            }
            false
        }
    }
}

/// Current bearer token of `kind`, tracked reactively.
pub fn session_token(kind: SessionKind) -> Option<String> {
    let sessions = expect_context::<Sessions>();
    sessions.for_kind(kind).with(|s| s.access_token().map(str::to_owned))
}

/// Handle to a keyed, cached read.
///
/// `get` prefers the cache entry over the fetched value so optimistic patches
/// render immediately.
pub struct Query<T: 'static> {
    resource: LocalResource<Result<T, ApiError>>,
    key: Signal<QueryKey>,
    cache: RwSignal<QueryCache>,
}

impl<T: 'static> Clone for Query<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T: 'static> Copy for Query<T> {}

impl<T> Query<T>
where
    T: DeserializeOwned + Clone + 'static,
{
    /// `None` while loading, then the cached payload or the fetch error.
    pub fn get(&self) -> Option<Result<T, ApiError>> {
        match self.resource.get()? {
            Ok(fetched) => {
                let cached = self.key.with(|key| self.cache.with(|c| c.data::<T>(key)));
                Some(Ok(cached.unwrap_or(fetched)))
            }
            Err(error) => Some(Err(error)),
        }
    }

    pub fn key_untracked(&self) -> QueryKey {
        self.key.get_untracked()
    }
}

/// Keyed, cached read.
///
/// `request` returning `Err` (e.g. no token yet) short-circuits without a
/// network call. The resource refetches when the key's signals change or the
/// key is invalidated.
pub fn use_query<T, K, R>(key: K, request: R) -> Query<T>
where
    T: Serialize + DeserializeOwned + Clone + 'static,
    K: Fn() -> QueryKey + Send + Sync + 'static,
    R: Fn() -> Result<ApiRequest, ApiError> + 'static,
{
    let cache = expect_context::<RwSignal<QueryCache>>();
    let config = expect_context::<ApiConfig>();

    let key = Signal::derive(key);
    let version = Memo::new(move |_| key.with(|k| cache.with(|c| c.version(k))));

    let resource = LocalResource::new(move || {
        let key = key.get();
        version.track();
        let request = request();
        let config = config.clone();
        async move { fetch_cached(cache, &config, key, request).await }
    });
    Query { resource, key, cache }
}

/// Bearer-token request builder for `use_query`: fails with
/// `Unauthorized` while the `kind` session has no token.
pub fn with_token<F>(kind: SessionKind, build: F) -> impl Fn() -> Result<ApiRequest, ApiError> + 'static
where
    F: Fn(&str) -> ApiRequest + 'static,
{
    move || session_token(kind).map(|t| build(&t)).ok_or(ApiError::Unauthorized)
}

async fn fetch_cached<T>(
    cache: RwSignal<QueryCache>,
    config: &ApiConfig,
    key: QueryKey,
    request: Result<ApiRequest, ApiError>,
) -> Result<T, ApiError>
where
    T: Serialize + DeserializeOwned,
{
    let request = request?;
    if let Some(data) = cache.with_untracked(|c| c.fresh_data::<T>(&key)) {
        return Ok(data);
    }
    let ticket = match cache.try_update(|c| c.begin_fetch(&key)).flatten() {
        Some(ticket) => ticket,
        None => {
            wait_for_in_flight(cache, &key).await;
            if let Some(data) = cache.with_untracked(|c| c.fresh_data::<T>(&key)) {
                return Ok(data);
            }
            match cache.try_update(|c| c.restart_fetch(&key)) {
                Some(ticket) => ticket,
                None => return send::<T>(config, request).await,
            }
        }
    };

    let result = send::<T>(config, request).await;
    match &result {
        Ok(data) => cache.update(|c| {
            c.finish_ok(&key, ticket, data);
        }),
        Err(error) => cache.update(|c| {
            c.finish_err(&key, ticket, error.clone());
        }),
    }
    result
}

/// Poll until the in-flight fetch for `key` completes.
async fn wait_for_in_flight(cache: RwSignal<QueryCache>, key: &QueryKey) {
    #[cfg(feature = "hydrate")]
    {
        while cache.with_untracked(|c| c.is_in_flight(key)) {
            gloo_timers::future::TimeoutFuture::new(25).await;
        }
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (cache, key);
    }
}

/// Send a write in the background and settle it against shared state.
///
/// `on_success` runs after invalidation with the decoded payload.
pub fn spawn_mutation<T, F>(mutation: Mutation, request: ApiRequest, on_success: F)
where
    T: DeserializeOwned + 'static,
    F: FnOnce(T) + 'static,
{
    let cache = expect_context::<RwSignal<QueryCache>>();
    let toasts = expect_context::<RwSignal<ToastState>>();
    let sessions = expect_context::<Sessions>();
    let config = expect_context::<ApiConfig>();
    let session = sessions.for_kind(mutation.session);

    leptos::task::spawn_local(async move {
        let result = send::<T>(&config, request).await;
        let mut ok = false;
        toasts.update(|t| {
            cache.update(|c| {
                session.update(|s| ok = settle_mutation(&mutation, &result, c, t, s));
            });
        });
        if let (true, Ok(data)) = (ok, result) {
            on_success(data);
        }
    });
}
