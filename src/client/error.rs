//! Error types for API calls.

use thiserror::Error;

use crate::config::ConfigError;

/// Errors that can occur while talking to the Dakora API.
#[derive(Debug, Error)]
pub enum DakoraError {
    /// The path was an absolute URL instead of a relative API path.
    #[error("path must be a relative Dakora API path, got '{0}'")]
    InvalidPath(String),

    /// The server answered with a non-success status.
    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    /// Transport failure (connect, timeout, TLS, body read).
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The response body did not match the expected shape.
    #[error("Invalid response body: {0}")]
    Decode(#[from] serde_json::Error),

    /// Render inputs did not serialize to a JSON object.
    #[error("Invalid inputs: {0}")]
    InvalidInputs(String),

    /// A header name or value could not be used.
    #[error("Invalid header: {0}")]
    InvalidHeader(String),

    /// Client configuration was rejected.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

/// Result type for API calls.
pub type DakoraResult<T> = Result<T, DakoraError>;

impl DakoraError {
    /// Build an `Api` error from a status code and raw body.
    ///
    /// The server reports failures as `{"detail": ...}`; the detail is used
    /// as the message when present, otherwise the raw body.
    pub fn from_status(status: u16, body: &str) -> Self {
        let detail = serde_json::from_str::<serde_json::Value>(body)
            .ok()
            .and_then(|v| v.get("detail").cloned())
            .map(|d| match d {
                serde_json::Value::String(s) => s,
                other => other.to_string(),
            });

        DakoraError::Api {
            status,
            message: detail.unwrap_or_else(|| body.trim().to_string()),
        }
    }

    /// The HTTP status, if the server answered.
    pub fn status(&self) -> Option<u16> {
        match self {
            DakoraError::Api { status, .. } => Some(*status),
            DakoraError::Network(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// True for 404 responses.
    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }

    /// True for 401 and 403 responses.
    pub fn is_unauthorized(&self) -> bool {
        matches!(self.status(), Some(401 | 403))
    }
}
