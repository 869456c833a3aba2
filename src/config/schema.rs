//! Configuration schema definitions.
//!
//! All types derive `Deserialize` so a client can be configured from a
//! TOML file. `ClientConfig` does not implement `Serialize` since it may carry
//! the API key.

use serde::Deserialize;

use crate::client::ApiKey;

/// Base URL used when neither the config nor the environment names one.
pub const DEFAULT_BASE_URL: &str = "https://api.dakora.io";

/// Environment variable holding the API key.
pub const ENV_API_KEY: &str = "DAKORA_API_KEY";

/// Environment variable holding the API base URL.
pub const ENV_BASE_URL: &str = "DAKORA_BASE_URL";

/// Environment variable holding an explicit project id.
pub const ENV_PROJECT_ID: &str = "DAKORA_PROJECT_ID";

/// Root configuration for a Dakora client.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Base URL of the Dakora API (e.g., "https://api.dakora.io").
    pub base_url: String,

    /// API key sent as `X-API-Key`. Requests go out unauthenticated when unset.
    pub api_key: Option<ApiKey>,

    /// Project to operate on. Resolved from `/api/me/context` when unset.
    pub project_id: Option<String>,

    /// Honor `HTTP_PROXY`/`HTTPS_PROXY` from the environment.
    pub use_system_proxy: bool,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: None,
            project_id: None,
            use_system_proxy: true,
            timeouts: TimeoutConfig::default(),
            observability: ObservabilityConfig::default(),
        }
    }
}

impl ClientConfig {
    /// Defaults overlaid with the `DAKORA_*` environment variables.
    pub fn from_env() -> Self {
        Self::default().with_env_overrides(|name| std::env::var(name).ok())
    }

    /// Overlay values found through `lookup` onto this config.
    ///
    /// Empty values are treated as unset.
    pub fn with_env_overrides<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let lookup = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        if let Some(key) = lookup(ENV_API_KEY) {
            self.api_key = Some(ApiKey::new(key));
        }
        if let Some(url) = lookup(ENV_BASE_URL) {
            self.base_url = url;
        }
        if let Some(project_id) = lookup(ENV_PROJECT_ID) {
            self.project_id = Some(project_id);
        }
        self
    }

    /// The base URL without trailing slashes.
    pub fn normalized_base_url(&self) -> String {
        self.base_url.trim_end_matches('/').to_string()
    }
}

/// Timeout configuration for API calls.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Connection establishment timeout in milliseconds.
    pub connect_ms: u64,

    /// Request timeout (total time for request/response) in milliseconds.
    pub request_ms: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self {
            connect_ms: 10_000,
            request_ms: 30_000,
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level used by `observability::logging::init` (trace, debug, info, warn, error).
    pub log_level: String,

    /// Record request counters and latency histograms through the `metrics` facade.
    pub metrics_enabled: bool,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            metrics_enabled: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
    }

    #[test]
    fn test_defaults() {
        let config = ClientConfig::default();
        assert_eq!(config.base_url, "https://api.dakora.io");
        assert!(config.api_key.is_none());
        assert!(config.project_id.is_none());
        assert_eq!(config.timeouts.request_ms, 30_000);
        assert!(config.use_system_proxy);
    }

    #[test]
    fn test_env_overrides() {
        let vars = env(&[
            ("DAKORA_API_KEY", "dk_env_key"),
            ("DAKORA_BASE_URL", "https://env.dakora.io"),
            ("DAKORA_PROJECT_ID", "proj-env"),
        ]);
        let config = ClientConfig::default().with_env_overrides(|k| vars.get(k).cloned());

        assert_eq!(config.api_key.as_ref().map(ApiKey::expose), Some("dk_env_key"));
        assert_eq!(config.base_url, "https://env.dakora.io");
        assert_eq!(config.project_id.as_deref(), Some("proj-env"));
    }

    #[test]
    fn test_empty_env_values_ignored() {
        let vars = env(&[("DAKORA_API_KEY", ""), ("DAKORA_BASE_URL", "   ")]);
        let config = ClientConfig::default().with_env_overrides(|k| vars.get(k).cloned());

        assert!(config.api_key.is_none());
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
    }

    #[test]
    fn test_trailing_slash_removed() {
        let config = ClientConfig {
            base_url: "https://test.dakora.io//".to_string(),
            ..Default::default()
        };
        assert_eq!(config.normalized_base_url(), "https://test.dakora.io");
    }

    #[test]
    fn test_debug_does_not_leak_key() {
        let config = ClientConfig {
            api_key: Some(ApiKey::new("dk_secret_key")),
            ..Default::default()
        };
        assert!(!format!("{:?}", config).contains("dk_secret_key"));
    }
}
