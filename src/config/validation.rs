//! Configuration validation.
//!
//! Returns every problem found, not just the first one.

use std::fmt;

use url::Url;

use crate::config::schema::ClientConfig;

/// A single semantic problem with a `ClientConfig`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// The base URL does not parse.
    InvalidBaseUrl { url: String, reason: String },
    /// The base URL uses something other than http or https.
    UnsupportedScheme(String),
    /// A timeout is zero.
    ZeroTimeout(&'static str),
    /// An explicit project id is blank.
    BlankProjectId,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::InvalidBaseUrl { url, reason } => {
                write!(f, "invalid base_url '{}': {}", url, reason)
            }
            ValidationError::UnsupportedScheme(scheme) => {
                write!(f, "base_url scheme must be http or https, got '{}'", scheme)
            }
            ValidationError::ZeroTimeout(field) => write!(f, "timeouts.{} must be greater than zero", field),
            ValidationError::BlankProjectId => write!(f, "project_id must not be blank"),
        }
    }
}

impl std::error::Error for ValidationError {}

/// Check a config for semantic errors.
pub fn validate_config(config: &ClientConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    let base_url = config.normalized_base_url();
    match Url::parse(&base_url) {
        Ok(url) if !matches!(url.scheme(), "http" | "https") => {
            errors.push(ValidationError::UnsupportedScheme(url.scheme().to_string()));
        }
        Ok(_) => {}
        Err(e) => errors.push(ValidationError::InvalidBaseUrl {
            url: config.base_url.clone(),
            reason: e.to_string(),
        }),
    }

    if config.timeouts.request_ms == 0 {
        errors.push(ValidationError::ZeroTimeout("request_ms"));
    }
    if config.timeouts.connect_ms == 0 {
        errors.push(ValidationError::ZeroTimeout("connect_ms"));
    }

    if matches!(&config.project_id, Some(id) if id.trim().is_empty()) {
        errors.push(ValidationError::BlankProjectId);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
