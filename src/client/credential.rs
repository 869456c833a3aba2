//! API key handling.

use std::fmt;

use serde::Deserialize;

/// An API key for the Dakora API.
///
/// The key is write-only from the outside: it can be handed to a client and
/// replaced later, but never read back through the public API. `Debug` and
/// `Display` print a redacted form.
#[derive(Clone, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct ApiKey(String);

impl ApiKey {
    /// Wrap a raw key.
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub(crate) fn expose(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ApiKey {
    fn from(key: &str) -> Self {
        Self::new(key)
    }
}

impl From<String> for ApiKey {
    fn from(key: String) -> Self {
        Self(key)
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiKey(***)")
    }
}

impl fmt::Display for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("***")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_redacted_formatting() {
        let key = ApiKey::new("dk_secret");
        assert_eq!(format!("{:?}", key), "ApiKey(***)");
        assert_eq!(key.to_string(), "***");
        assert_eq!(key.expose(), "dk_secret");
    }

    #[test]
    fn test_deserialize_transparent() {
        let key: ApiKey = serde_json::from_str("\"dk_json\"").unwrap();
        assert_eq!(key, ApiKey::from("dk_json"));
    }
}
