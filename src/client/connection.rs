//! The `Dakora` connection object.
//!
//! # Responsibilities
//! - Own the shared HTTP connection pool and the credential
//! - Keep every request scoped to the configured API base URL
//! - Resolve the caller's project id once and cache it
//! - Hand out the prompts and traces sub-resource clients

use std::path::Path;
use std::sync::Arc;
use std::time::{Duration, Instant};

use arc_swap::ArcSwapOption;
use reqwest::header::HeaderValue;
use reqwest::Response;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::client::context::{ProjectContext, CONTEXT_PATH};
use crate::client::credential::ApiKey;
use crate::client::error::{DakoraError, DakoraResult};
use crate::client::request::{ApiRequest, X_API_KEY};
use crate::config::{load_config, validate_config, ClientConfig, ConfigError};
use crate::observability::metrics;
use crate::prompts::PromptsApi;
use crate::traces::TracesApi;

/// Client for the Dakora API.
///
/// Create once and reuse: every call goes through the same connection pool.
/// Share it behind an `Arc` across tasks.
///
/// Treat a `Dakora` value like a credential. Holding it grants the ability
/// to make authenticated requests against the workspace, even though the
/// key itself cannot be read back.
pub struct Dakora {
    http: reqwest::Client,
    base_url: String,
    api_key: ArcSwapOption<ApiKey>,
    /// Explicit or lazily resolved project id.
    project_id: ArcSwapOption<String>,
    metrics_enabled: bool,
}

impl Dakora {
    /// Create a client from a complete configuration.
    ///
    /// The environment is not consulted; use [`Dakora::from_env`] or
    /// [`Dakora::builder`] for that.
    pub fn new(config: ClientConfig) -> DakoraResult<Self> {
        validate_config(&config).map_err(|errors| DakoraError::Config(ConfigError::Validation(errors)))?;

        let base_url = config.normalized_base_url();

        tracing::debug!(
            base_url = %base_url,
            api_key = if config.api_key.is_some() { "present" } else { "none" },
            project_id = config.project_id.as_deref().unwrap_or("auto"),
            "Initializing Dakora client"
        );

        let mut builder = reqwest::Client::builder()
            .timeout(Duration::from_millis(config.timeouts.request_ms))
            .connect_timeout(Duration::from_millis(config.timeouts.connect_ms))
            .user_agent(concat!("dakora-client-rust/", env!("CARGO_PKG_VERSION")));
        if !config.use_system_proxy {
            builder = builder.no_proxy();
        }
        let http = builder.build()?;

        let client = Self {
            http,
            base_url,
            api_key: ArcSwapOption::new(config.api_key.map(Arc::new)),
            project_id: ArcSwapOption::new(config.project_id.map(Arc::new)),
            metrics_enabled: config.observability.metrics_enabled,
        };

        tracing::info!(base_url = %client.base_url, "Dakora client initialized");
        Ok(client)
    }

    /// Create a client from defaults plus `DAKORA_API_KEY`, `DAKORA_BASE_URL`
    /// and `DAKORA_PROJECT_ID`.
    pub fn from_env() -> DakoraResult<Self> {
        Self::new(ClientConfig::from_env())
    }

    /// Create a client from a TOML config file (environment overrides apply).
    pub fn from_config_file(path: &Path) -> DakoraResult<Self> {
        Self::new(load_config(path)?)
    }

    /// Start building a client on top of the environment defaults.
    pub fn builder() -> DakoraBuilder {
        DakoraBuilder::new()
    }

    /// Base URL without trailing slash.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// True if a non-empty API key is configured.
    pub fn has_api_key(&self) -> bool {
        self.api_key.load_full().is_some_and(|k| !k.expose().is_empty())
    }

    /// Replace or clear the API key. Subsequent requests use the new value.
    pub fn update_api_key(&self, api_key: Option<ApiKey>) {
        tracing::debug!(api_key = if api_key.is_some() { "present" } else { "none" }, "API key updated");
        self.api_key.store(api_key.map(Arc::new));
    }

    /// The project id if it was given explicitly or already resolved.
    ///
    /// Never performs a request; see [`Dakora::resolve_project_id`].
    pub fn project_id(&self) -> Option<String> {
        self.project_id.load_full().map(|id| id.as_ref().clone())
    }

    /// Return the project id, fetching it from `/api/me/context` on first use.
    ///
    /// Concurrent first calls may each fetch; the last response wins.
    pub async fn resolve_project_id(&self) -> DakoraResult<String> {
        if let Some(id) = self.project_id.load_full() {
            return Ok(id.as_ref().clone());
        }

        tracing::debug!("Fetching project context from {}", CONTEXT_PATH);
        let context: ProjectContext = self.send_json(ApiRequest::get(CONTEXT_PATH)).await?;
        self.project_id.store(Some(Arc::new(context.project_id.clone())));

        tracing::info!(project_id = %context.project_id, "Project context loaded");
        Ok(context.project_id)
    }

    /// Fetch the caller's full context. Seeds the project id cache if empty.
    pub async fn context(&self) -> DakoraResult<ProjectContext> {
        let context: ProjectContext = self.send_json(ApiRequest::get(CONTEXT_PATH)).await?;
        if self.project_id.load().is_none() {
            self.project_id.store(Some(Arc::new(context.project_id.clone())));
        }
        Ok(context)
    }

    /// Prompt template operations.
    pub fn prompts(&self) -> PromptsApi<'_> {
        PromptsApi::new(self)
    }

    /// Execution trace operations.
    pub fn traces(&self) -> TracesApi<'_> {
        TracesApi::new(self)
    }

    /// Send a scoped request and return the raw response.
    ///
    /// The status is not checked. The stored API key replaces any
    /// `X-API-Key` header on the request; an empty key sends no header.
    pub async fn request(&self, request: ApiRequest) -> DakoraResult<Response> {
        let url = request.url(&self.base_url)?;

        let mut headers = request.sanitized_headers();
        if let Some(key) = self.api_key.load_full().filter(|k| !k.expose().is_empty()) {
            let mut value =
                HeaderValue::from_str(key.expose()).map_err(|e| DakoraError::InvalidHeader(e.to_string()))?;
            value.set_sensitive(true);
            headers.insert(X_API_KEY, value);
        }

        let mut builder = self.http.request(request.method().clone(), &url).headers(headers);
        if !request.query_pairs().is_empty() {
            builder = builder.query(request.query_pairs());
        }
        if let Some(body) = request.json_body() {
            builder = builder.json(body);
        }

        let started = Instant::now();
        let result = builder.send().await;
        let status = result.as_ref().ok().map(|r| r.status().as_u16());

        if self.metrics_enabled {
            metrics::record_request(request.method().as_str(), status, started.elapsed());
        }

        match &result {
            Ok(resp) => tracing::debug!(
                method = %request.method(),
                path = %request.path(),
                status = resp.status().as_u16(),
                "Request completed"
            ),
            Err(e) => tracing::warn!(
                method = %request.method(),
                path = %request.path(),
                error = %e,
                "Request failed"
            ),
        }

        Ok(result?)
    }

    pub async fn get(&self, path: &str) -> DakoraResult<Response> {
        self.request(ApiRequest::get(path)).await
    }

    pub async fn post<T: Serialize + ?Sized>(&self, path: &str, body: &T) -> DakoraResult<Response> {
        self.request(ApiRequest::post(path).json(body)?).await
    }

    pub async fn put<T: Serialize + ?Sized>(&self, path: &str, body: &T) -> DakoraResult<Response> {
        self.request(ApiRequest::put(path).json(body)?).await
    }

    pub async fn delete(&self, path: &str) -> DakoraResult<Response> {
        self.request(ApiRequest::delete(path)).await
    }

    /// Send, require a 2xx status, and decode the JSON body.
    pub(crate) async fn send_json<T: DeserializeOwned>(&self, request: ApiRequest) -> DakoraResult<T> {
        let text = Self::success_text(self.request(request).await?).await?;
        Ok(serde_json::from_str(&text)?)
    }

    /// Send and require a 2xx status, discarding the body.
    pub(crate) async fn send_empty(&self, request: ApiRequest) -> DakoraResult<()> {
        Self::success_text(self.request(request).await?).await?;
        Ok(())
    }

    async fn success_text(resp: Response) -> DakoraResult<String> {
        let status = resp.status();
        let text = resp.text().await?;

        if !status.is_success() {
            return Err(DakoraError::from_status(status.as_u16(), &text));
        }
        Ok(text)
    }
}

impl std::fmt::Debug for Dakora {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dakora")
            .field("base_url", &self.base_url)
            .field("has_api_key", &self.has_api_key())
            .field("project_id", &self.project_id())
            .finish()
    }
}

/// Builder for [`Dakora`].
///
/// Starts from the environment defaults; every setter wins over the
/// environment.
#[derive(Debug, Clone)]
pub struct DakoraBuilder {
    config: ClientConfig,
}

impl DakoraBuilder {
    /// Defaults overlaid with the `DAKORA_*` environment variables.
    pub fn new() -> Self {
        Self {
            config: ClientConfig::from_env(),
        }
    }

    /// Start from an explicit config, ignoring the environment.
    pub fn from_config(config: ClientConfig) -> Self {
        Self { config }
    }

    pub fn api_key(mut self, api_key: impl Into<ApiKey>) -> Self {
        self.config.api_key = Some(api_key.into());
        self
    }

    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.config.base_url = base_url.into();
        self
    }

    pub fn project_id(mut self, project_id: impl Into<String>) -> Self {
        self.config.project_id = Some(project_id.into());
        self
    }

    /// Total time allowed per request. Sub-millisecond parts are dropped;
    /// anything shorter than 1ms becomes 1ms.
    pub fn request_timeout(mut self, timeout: Duration) -> Self {
        let millis = u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX);
        self.config.timeouts.request_ms = millis.max(1);
        self
    }

    pub fn use_system_proxy(mut self, enabled: bool) -> Self {
        self.config.use_system_proxy = enabled;
        self
    }

    pub fn metrics_enabled(mut self, enabled: bool) -> Self {
        self.config.observability.metrics_enabled = enabled;
        self
    }

    pub fn build(self) -> DakoraResult<Dakora> {
        Dakora::new(self.config)
    }
}

impl Default for DakoraBuilder {
    fn default() -> Self {
        Self::new()
    }
}
