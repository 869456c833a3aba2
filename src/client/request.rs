//! Request description for scoped API calls.

use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::Method;
use serde::Serialize;
use serde_json::Value;
use url::Url;

use crate::client::error::{DakoraError, DakoraResult};

/// Header carrying the API key.
pub const X_API_KEY: &str = "x-api-key";

/// A request against the Dakora API, relative to the client's base URL.
#[derive(Debug, Clone)]
pub struct ApiRequest {
    method: Method,
    path: String,
    headers: HeaderMap,
    query: Vec<(String, String)>,
    body: Option<Value>,
}

impl ApiRequest {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            headers: HeaderMap::new(),
            query: Vec::new(),
            body: None,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::POST, path)
    }

    pub fn put(path: impl Into<String>) -> Self {
        Self::new(Method::PUT, path)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::DELETE, path)
    }

    /// Append a query parameter.
    pub fn query(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.query.push((key.into(), value.to_string()));
        self
    }

    /// Attach a JSON body.
    pub fn json<T: Serialize + ?Sized>(mut self, body: &T) -> DakoraResult<Self> {
        self.body = Some(serde_json::to_value(body)?);
        Ok(self)
    }

    /// Attach an already-built JSON body.
    pub fn body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    /// Add a header. An `X-API-Key` set here is discarded at send time.
    pub fn header(mut self, name: &str, value: &str) -> DakoraResult<Self> {
        let name = HeaderName::from_bytes(name.as_bytes()).map_err(|e| DakoraError::InvalidHeader(e.to_string()))?;
        let value = HeaderValue::from_str(value).map_err(|e| DakoraError::InvalidHeader(e.to_string()))?;
        self.headers.insert(name, value);
        Ok(self)
    }

    pub fn method(&self) -> &Method {
        &self.method
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub(crate) fn query_pairs(&self) -> &[(String, String)] {
        &self.query
    }

    pub(crate) fn json_body(&self) -> Option<&Value> {
        self.body.as_ref()
    }

    /// Resolve the full URL against `base_url`, rejecting absolute paths.
    pub(crate) fn url(&self, base_url: &str) -> DakoraResult<String> {
        let lower = self.path.trim_start().to_ascii_lowercase();
        if lower.starts_with("http://") || lower.starts_with("https://") || lower.starts_with("//") {
            return Err(DakoraError::InvalidPath(self.path.clone()));
        }

        if self.path.starts_with('/') {
            Ok(format!("{}{}", base_url, self.path))
        } else {
            Ok(format!("{}/{}", base_url, self.path))
        }
    }

    /// Caller headers with any `X-API-Key` removed.
    pub(crate) fn sanitized_headers(&self) -> HeaderMap {
        let mut headers = self.headers.clone();
        headers.remove(X_API_KEY);
        headers
    }
}

/// Percent-encode an identifier as a single path segment.
///
/// Empty ids, dot-segments and raw `/`, `?`, `#` are rejected. Everything
/// else is encoded so the segment cannot be reinterpreted as a separator
/// or a dot-segment when the URL is parsed (`%2e%2e`, `\`).
pub(crate) fn path_segment(id: &str) -> DakoraResult<String> {
    if id.is_empty() || id.contains(['/', '?', '#']) || id == "." || id == ".." {
        return Err(DakoraError::InvalidPath(id.to_string()));
    }

    let mut url = Url::parse("http://segment.invalid/").map_err(|e| DakoraError::InvalidPath(e.to_string()))?;
    url.path_segments_mut()
        .map_err(|_| DakoraError::InvalidPath(id.to_string()))?
        .pop_if_empty()
        .push(id);
    Ok(url.path().trim_start_matches('/').to_string())
}
