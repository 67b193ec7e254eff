//! REST transport for the job-marketplace backend.
//!
//! Client-side (hydrate): real HTTP calls via `gloo-net`.
//! Server-side (SSR) and native tests: `send` returns `ApiError::Unavailable`
//! since these endpoints are only meaningful in the browser.
//!
//! ERROR HANDLING
//! ==============
//! Every response goes through `decode_envelope`, which maps the backend's
//! `{ success, data, error }` envelope and HTTP status onto `ApiError`.

#![allow(clippy::unused_async)]

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use serde::Deserialize;
use serde::Serialize;
use serde::de::DeserializeOwned;

use super::error::ApiError;

/// Base URL used when no override is configured.
pub const DEFAULT_API_BASE: &str = "/api";

/// Name of the `<meta>` tag the SSR shell uses to publish the API base URL.
pub const API_BASE_META: &str = "hireboard-api-base";

/// Backend location shared by every request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ApiConfig {
    pub base_url: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self::new(DEFAULT_API_BASE)
    }
}

impl ApiConfig {
    /// Normalize `raw`: trim whitespace and trailing slashes, empty means default.
    #[must_use]
    pub fn new(raw: &str) -> Self {
        let trimmed = raw.trim().trim_end_matches('/');
        let base_url = if trimmed.is_empty() { DEFAULT_API_BASE } else { trimmed };
        Self { base_url: base_url.to_owned() }
    }

    /// Read the base URL from the document's `<meta>` tag (browser only).
    #[must_use]
    pub fn from_document() -> Self {
        #[cfg(feature = "hydrate")]
        {
            use wasm_bindgen::JsCast;

            let selector = format!("meta[name=\"{API_BASE_META}\"]");
            let content = web_sys::window()
                .and_then(|w| w.document())
                .and_then(|d| d.query_selector(&selector).ok().flatten())
                .and_then(|el| el.dyn_into::<web_sys::HtmlMetaElement>().ok())
                .map(|meta| meta.content());
            content.map_or_else(Self::default, |raw| Self::new(&raw))
        }
        #[cfg(not(feature = "hydrate"))]
        {
            Self::default()
        }
    }

    /// Absolute URL for `path` (which must start with `/`).
    #[must_use]
    pub fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }
}

/// HTTP verb of an [`ApiRequest`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

/// A fully described backend call, built by the `endpoints` module.
#[derive(Clone, Debug, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    pub path: String,
    pub query: Vec<(String, String)>,
    pub body: Option<serde_json::Value>,
    pub bearer: Option<String>,
}

impl ApiRequest {
    fn new(method: Method, path: impl Into<String>) -> Self {
        Self { method, path: path.into(), query: Vec::new(), body: None, bearer: None }
    }

    #[must_use]
    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::Get, path)
    }

    #[must_use]
    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::Post, path)
    }

    #[must_use]
    pub fn put(path: impl Into<String>) -> Self {
        Self::new(Method::Put, path)
    }

    #[must_use]
    pub fn patch(path: impl Into<String>) -> Self {
        Self::new(Method::Patch, path)
    }

    #[must_use]
    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::Delete, path)
    }

    #[must_use]
    pub fn with_query(mut self, query: Vec<(String, String)>) -> Self {
        self.query = query;
        self
    }

    /// Attach a JSON body. Serialization failures leave the body empty.
    #[must_use]
    pub fn with_json<B: Serialize>(mut self, body: &B) -> Self {
        self.body = serde_json::to_value(body).ok();
        self
    }

    /// Attach a bearer token; `None` leaves the request anonymous.
    #[must_use]
    pub fn with_bearer(mut self, token: Option<&str>) -> Self {
        self.bearer = token.filter(|t| !t.is_empty()).map(str::to_owned);
        self
    }
}

#[derive(Debug, Deserialize)]
struct Envelope {
    #[serde(default)]
    success: Option<bool>,
    #[serde(default)]
    data: Option<serde_json::Value>,
    #[serde(default)]
    error: Option<EnvelopeError>,
    #[serde(default)]
    message: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum EnvelopeError {
    Text(String),
    Detail {
        #[serde(default)]
        message: Option<String>,
        #[serde(default)]
        code: Option<String>,
    },
}

impl EnvelopeError {
    fn message(&self) -> Option<String> {
        match self {
            Self::Text(text) => Some(text.clone()),
            Self::Detail { message, code } => message.clone().or_else(|| code.clone()),
        }
    }
}

/// Map an HTTP status and raw body onto the envelope's payload or an error.
pub(crate) fn decode_envelope<T: DeserializeOwned>(status: u16, body: &str) -> Result<T, ApiError> {
    if status == 401 {
        return Err(ApiError::Unauthorized);
    }
    let ok_status = (200..300).contains(&status);
    let envelope: Envelope = match serde_json::from_str(body) {
        Ok(envelope) => envelope,
        Err(_) if !ok_status => return Err(ApiError::Http { status, message: None }),
        Err(e) => return Err(ApiError::Decode(e.to_string())),
    };

    let message = envelope
        .error
        .as_ref()
        .and_then(EnvelopeError::message)
        .or(envelope.message);
    if !ok_status {
        return Err(ApiError::Http { status, message });
    }
    if envelope.success == Some(false) {
        return Err(ApiError::Envelope(message.unwrap_or_else(|| "request failed".to_owned())));
    }

    let data = envelope.data.unwrap_or(serde_json::Value::Null);
    serde_json::from_value(data).map_err(|e| ApiError::Decode(e.to_string()))
}

/// Send `request` and decode the envelope payload as `T`.
///
/// # Errors
///
/// Returns [`ApiError`] for transport failures, non-success statuses, rejected
/// envelopes, payload shape mismatches, and on non-browser builds.
pub async fn send<T: DeserializeOwned>(config: &ApiConfig, request: ApiRequest) -> Result<T, ApiError> {
    #[cfg(feature = "hydrate")]
    {
        use gloo_net::http::{Method as HttpMethod, RequestBuilder};

        let method = match request.method {
            Method::Get => HttpMethod::GET,
            Method::Post => HttpMethod::POST,
            Method::Put => HttpMethod::PUT,
            Method::Patch => HttpMethod::PATCH,
            Method::Delete => HttpMethod::DELETE,
        };
        let mut builder = RequestBuilder::new(&config.url(&request.path))
            .method(method)
            .header("Accept", "application/json");
        if !request.query.is_empty() {
            builder = builder.query(request.query.iter().map(|(k, v)| (k.as_str(), v.as_str())));
        }
        if let Some(token) = request.bearer.as_deref() {
            builder = builder.header("Authorization", &format!("Bearer {token}"));
        }
        let built = match &request.body {
            Some(body) => builder.json(body),
            None => builder.build(),
        }
        .map_err(|e| ApiError::Network(e.to_string()))?;

        let resp = built.send().await.map_err(|e| ApiError::Network(e.to_string()))?;
        let status = resp.status();
        let text = resp.text().await.map_err(|e| ApiError::Network(e.to_string()))?;
        let result = decode_envelope(status, &text);
        if let Err(e) = &result {
            leptos::logging::warn!("api {:?} {} failed: {e}", request.method, request.path);
        }
        result
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (config, request);
        Err(ApiError::Unavailable)
    }
}
