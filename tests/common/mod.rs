//! Shared utilities for integration tests: an in-process mock of the Dakora API.

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderMap, Method, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use axum::{Json, Router};
use serde_json::{json, Value};
use tokio::net::TcpListener;

use dakora_client::{ApiKey, ClientConfig, Dakora};

pub const PROJECT_ID: &str = "test-project-123";

/// A request as seen by the mock server.
#[derive(Debug, Clone)]
#[allow(dead_code)]
pub struct RecordedRequest {
    pub method: String,
    pub path: String,
    pub query: Option<String>,
    pub api_key: Option<String>,
    pub body: Option<Value>,
}

impl RecordedRequest {
    /// Query string split into pairs, in order.
    #[allow(dead_code)]
    pub fn query_pairs(&self) -> Vec<(String, String)> {
        self.query
            .as_deref()
            .unwrap_or_default()
            .split('&')
            .filter(|p| !p.is_empty())
            .filter_map(|p| p.split_once('='))
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }
}

#[derive(Default)]
struct MockState {
    routes: Mutex<HashMap<(String, String), (u16, Value)>>,
    requests: Mutex<Vec<RecordedRequest>>,
}

/// Programmable mock API bound to an ephemeral local port.
pub struct MockApi {
    pub addr: SocketAddr,
    state: Arc<MockState>,
}

#[allow(dead_code)]
impl MockApi {
    /// Start a mock with no routes. Unknown routes answer 404.
    pub async fn start() -> Self {
        let state = Arc::new(MockState::default());
        let app = Router::new().fallback(handle).with_state(state.clone());

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });

        Self { addr, state }
    }

    /// Start a mock that answers `/api/me/context` with `PROJECT_ID`.
    pub async fn with_project_context() -> Self {
        let mock = Self::start().await;
        mock.mock(
            "GET",
            "/api/me/context",
            200,
            json!({
                "user_id": "user-1",
                "email": "dev@example.com",
                "name": null,
                "project_id": PROJECT_ID,
                "project_slug": "default",
                "project_name": "Default"
            }),
        );
        mock
    }

    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Answer `method path` with `status` and a JSON body.
    pub fn mock(&self, method: &str, path: &str, status: u16, body: Value) {
        self.state
            .routes
            .lock()
            .unwrap()
            .insert((method.to_string(), path.to_string()), (status, body));
    }

    /// All requests received so far.
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.state.requests.lock().unwrap().clone()
    }

    /// Requests received for `method path`.
    pub fn requests_to(&self, method: &str, path: &str) -> Vec<RecordedRequest> {
        self.requests()
            .into_iter()
            .filter(|r| r.method == method && r.path == path)
            .collect()
    }

    /// Config pointing at this mock, with an API key and no project id.
    pub fn config(&self) -> ClientConfig {
        ClientConfig {
            base_url: self.base_url(),
            api_key: Some(ApiKey::new("dk_test")),
            project_id: None,
            use_system_proxy: false,
            ..Default::default()
        }
    }

    /// Client pointing at this mock.
    pub fn client(&self) -> Dakora {
        Dakora::new(self.config()).unwrap()
    }
}

async fn handle(
    State(state): State<Arc<MockState>>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let path = uri.path().to_string();
    state.requests.lock().unwrap().push(RecordedRequest {
        method: method.to_string(),
        path: path.clone(),
        query: uri.query().map(str::to_string),
        api_key: headers
            .get("x-api-key")
            .and_then(|v| v.to_str().ok())
            .map(str::to_string),
        body: serde_json::from_slice(&body).ok(),
    });

    let route = state
        .routes
        .lock()
        .unwrap()
        .get(&(method.to_string(), path))
        .cloned();

    match route {
        Some((204, _)) => StatusCode::NO_CONTENT.into_response(),
        Some((status, body)) => (StatusCode::from_u16(status).unwrap(), Json(body)).into_response(),
        None => (StatusCode::NOT_FOUND, Json(json!({"detail": "Not Found"}))).into_response(),
    }
}
