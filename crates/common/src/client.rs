//! HTTP client wrapper
//!
//! Issues one request per call against a base URL and normalizes the
//! response into an [`ApiResponse`] envelope:
//!
//! - header names are lowercased (last write wins)
//! - the body is always kept as text and sniffed for JSON
//! - elapsed time covers the full body read
//! - non-2xx statuses are data, never errors

use std::collections::BTreeMap;
use std::time::Instant;

use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::{Client, Method};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, trace};

use crate::error::{Error, Result};

/// Per-request options
#[derive(Debug, Clone, Default)]
pub struct RequestOptions {
    /// Request headers, sent as given
    pub headers: BTreeMap<String, String>,

    /// Query parameters; `Value::Null` entries are omitted
    pub query: BTreeMap<String, Value>,

    /// JSON request body
    pub data: Option<Value>,

    /// Auth token appended to the `Cookie` header as `token=<value>`
    pub cookie_token: Option<String>,
}

impl RequestOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    /// `Accept: application/json` and `Content-Type: application/json`
    pub fn json_headers(self) -> Self {
        self.header("Content-Type", "application/json")
            .header("Accept", "application/json")
    }

    /// Add a query parameter. `None` values are dropped at send time.
    pub fn query(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.query.insert(key.into(), value.into());
        self
    }

    /// Merge every entry of a JSON object into the query. Non-object values are ignored.
    pub fn query_object(mut self, object: Value) -> Self {
        if let Value::Object(map) = object {
            self.query.extend(map);
        }
        self
    }

    pub fn data(mut self, data: Value) -> Self {
        self.data = Some(data);
        self
    }

    pub fn cookie_token(mut self, token: impl Into<String>) -> Self {
        self.cookie_token = Some(token.into());
        self
    }
}

/// Normalized result of one HTTP call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiResponse {
    /// Status is in the 2xx range
    pub ok: bool,
    pub status: u16,
    /// Response headers keyed by lowercased name
    pub headers: BTreeMap<String, String>,
    /// Resolved request URL (without query string)
    pub url: String,
    /// Raw body; empty string when the response had no body
    pub body_text: String,
    /// Parsed body, present only when sniffing classified the body as JSON
    /// and it parsed
    pub body_json: Option<Value>,
    pub duration_ms: u64,
}

impl ApiResponse {
    /// Deserialize the structured body into `T`.
    ///
    /// Returns `None` when there is no structured body or it does not fit `T`.
    pub fn json<T: DeserializeOwned>(&self) -> Option<T> {
        self.body_json
            .as_ref()
            .and_then(|v| serde_json::from_value(v.clone()).ok())
    }

    /// Look up a header by name, case-insensitively
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(&name.to_ascii_lowercase())
            .map(String::as_str)
    }

    /// Classify the body the same way the envelope was built
    pub fn body(&self) -> SniffedBody {
        match (&self.body_json, self.body_text.is_empty()) {
            (Some(v), _) => SniffedBody::Json(v.clone()),
            (None, true) => SniffedBody::Empty,
            (None, false) => SniffedBody::Text,
        }
    }
}

/// Outcome of body sniffing
#[derive(Debug, Clone, PartialEq)]
pub enum SniffedBody {
    /// No body at all
    Empty,
    /// Body kept as text only: not JSON-looking, or it failed to parse
    Text,
    /// Body parsed as JSON
    Json(Value),
}

impl SniffedBody {
    pub fn into_json(self) -> Option<Value> {
        match self {
            SniffedBody::Json(v) => Some(v),
            _ => None,
        }
    }
}

/// Classify a response body.
///
/// A non-empty body is parsed when the content type is a JSON media type
/// (`application/json` or any `+json` suffix) or when the trimmed text starts
/// with `{` or `[`. The leading-character check is best effort: a text body
/// starting with a brace is attempted and simply falls back to `Text`.
pub fn sniff_body(content_type: &str, text: &str) -> SniffedBody {
    if text.is_empty() {
        return SniffedBody::Empty;
    }

    let ct = content_type.to_ascii_lowercase();
    let ct_json = ct.contains("application/json") || ct.contains("+json");
    let trimmed = text.trim_start();
    let looks_json = trimmed.starts_with('{') || trimmed.starts_with('[');

    if !(ct_json || looks_json) {
        return SniffedBody::Text;
    }

    match serde_json::from_str(text) {
        Ok(value) => SniffedBody::Json(value),
        Err(e) => {
            trace!("body not parsed as JSON: {}", e);
            SniffedBody::Text
        }
    }
}

/// Resolve a request path against the base URL.
///
/// Absolute `http://`/`https://` paths are used unchanged; anything else is
/// joined to the base with exactly one slash.
pub fn resolve_url(base_url: &str, path: &str) -> String {
    if path.starts_with("http://") || path.starts_with("https://") {
        return path.to_string();
    }
    format!(
        "{}/{}",
        base_url.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

/// Append `token=<token>` to the cookie header, keeping any existing cookies.
///
/// The existing header is found case-insensitively and rewritten as `Cookie`.
pub fn merge_cookie_token(headers: &mut BTreeMap<String, String>, token: &str) {
    let cookie_keys: Vec<String> = headers
        .keys()
        .filter(|k| k.eq_ignore_ascii_case("cookie"))
        .cloned()
        .collect();

    // Prefer the canonical spelling when several variants are present.
    let preferred = cookie_keys
        .iter()
        .find(|k| k.as_str() == "Cookie")
        .or_else(|| cookie_keys.first())
        .cloned();
    let existing = preferred
        .and_then(|k| headers.get(&k).cloned())
        .filter(|v| !v.is_empty());

    for key in &cookie_keys {
        headers.remove(key);
    }

    let token_cookie = format!("token={}", token);
    let value = match existing {
        Some(existing) => format!("{}; {}", existing, token_cookie),
        None => token_cookie,
    };
    headers.insert("Cookie".to_string(), value);
}

/// Stringify query values, dropping nulls
pub fn normalize_query(query: &BTreeMap<String, Value>) -> Vec<(String, String)> {
    query
        .iter()
        .filter_map(|(key, value)| {
            let text = match value {
                Value::Null => return None,
                Value::String(s) => s.clone(),
                Value::Bool(b) => b.to_string(),
                Value::Number(n) => n.to_string(),
                other => other.to_string(),
            };
            Some((key.clone(), text))
        })
        .collect()
}

fn to_header_map(headers: &BTreeMap<String, String>) -> Result<HeaderMap> {
    let mut map = HeaderMap::with_capacity(headers.len());
    for (name, value) in headers {
        let name = HeaderName::from_bytes(name.as_bytes())
            .map_err(|e| Error::InvalidHeader(format!("{}: {}", name, e)))?;
        let value = HeaderValue::from_str(value)
            .map_err(|e| Error::InvalidHeader(format!("{}: {}", name, e)))?;
        map.insert(name, value);
    }
    Ok(map)
}

fn normalize_headers(headers: &HeaderMap) -> BTreeMap<String, String> {
    let mut out = BTreeMap::new();
    for (name, value) in headers {
        out.insert(
            name.as_str().to_ascii_lowercase(),
            String::from_utf8_lossy(value.as_bytes()).into_owned(),
        );
    }
    out
}

/// Thin HTTP client bound to a base URL
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: Client,
    base_url: String,
}

impl ApiClient {
    /// Create a client for the given base URL
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let http = Client::builder()
            .user_agent(format!("booker-harness/{}", crate::VERSION))
            .build()?;
        Ok(Self::with_client(http, base_url))
    }

    /// Wrap an existing reqwest client
    pub fn with_client(http: Client, base_url: impl Into<String>) -> Self {
        Self {
            http,
            base_url: base_url.into(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub async fn get(&self, path: &str, options: RequestOptions) -> Result<ApiResponse> {
        self.send(Method::GET, path, options).await
    }

    pub async fn post(&self, path: &str, options: RequestOptions) -> Result<ApiResponse> {
        self.send(Method::POST, path, options).await
    }

    pub async fn put(&self, path: &str, options: RequestOptions) -> Result<ApiResponse> {
        self.send(Method::PUT, path, options).await
    }

    pub async fn patch(&self, path: &str, options: RequestOptions) -> Result<ApiResponse> {
        self.send(Method::PATCH, path, options).await
    }

    pub async fn delete(&self, path: &str, options: RequestOptions) -> Result<ApiResponse> {
        self.send(Method::DELETE, path, options).await
    }

    /// Issue a request and build the response envelope
    pub async fn send(
        &self,
        method: Method,
        path: &str,
        options: RequestOptions,
    ) -> Result<ApiResponse> {
        let url = resolve_url(&self.base_url, path);

        let mut headers = options.headers;
        if let Some(token) = options.cookie_token.as_deref().filter(|t| !t.is_empty()) {
            merge_cookie_token(&mut headers, token);
        }

        let mut request = self
            .http
            .request(method.clone(), &url)
            .headers(to_header_map(&headers)?);

        let params = normalize_query(&options.query);
        if !params.is_empty() {
            request = request.query(&params);
        }
        if let Some(data) = &options.data {
            request = request.json(data);
        }

        let start = Instant::now();
        let response = request.send().await?;
        let status = response.status();
        let response_headers = normalize_headers(response.headers());
        let body_text = response.text().await?;
        let duration_ms = start.elapsed().as_millis() as u64;

        let content_type = response_headers
            .get("content-type")
            .map(String::as_str)
            .unwrap_or("");
        let body_json = sniff_body(content_type, &body_text).into_json();

        debug!(
            method = %method,
            url = %url,
            status = status.as_u16(),
            duration_ms,
            "request completed"
        );

        Ok(ApiResponse {
            ok: status.is_success(),
            status: status.as_u16(),
            headers: response_headers,
            url,
            body_text,
            body_json,
            duration_ms,
        })
    }
}
