//! Execution trace endpoints against the mock API.

use dakora_client::{ClientConfig, Dakora, TraceCreate, TraceFilter};
use serde_json::json;

mod common;

use common::MockApi;

const EXECUTIONS: &str = "/api/projects/test-project/executions";

async fn setup() -> (MockApi, Dakora) {
    let api = MockApi::start().await;
    let client = Dakora::new(ClientConfig {
        project_id: Some("test-project".into()),
        ..api.config()
    })
    .unwrap();
    (api, client)
}

fn query(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
    pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
}

#[tokio::test]
async fn test_list_traces_returns_executions() {
    let (api, client) = setup().await;
    api.mock(
        "GET",
        EXECUTIONS,
        200,
        json!({
            "executions": [
                {"trace_id": "trace-1", "session_id": "session-1"},
                {"trace_id": "trace-2", "session_id": "session-1"},
                {"trace_id": "trace-3", "session_id": "session-1"}
            ],
            "total": 3,
            "limit": 100,
            "offset": 0
        }),
    );

    let traces = client.traces().list(&TraceFilter::new()).await.unwrap();

    assert_eq!(traces.len(), 3);
    assert_eq!(traces[0].trace_id, "trace-1");
    assert!(traces.iter().all(|t| t.session_id.as_deref() == Some("session-1")));
    assert_eq!(
        api.requests_to("GET", EXECUTIONS)[0].query_pairs(),
        query(&[("limit", "100"), ("offset", "0")])
    );
}

#[tokio::test]
async fn test_list_traces_with_metadata() {
    let (api, client) = setup().await;
    api.mock(
        "GET",
        EXECUTIONS,
        200,
        json!({
            "executions": [
                {"trace_id": "trace-1", "session_id": "session-1"},
                {"trace_id": "trace-2", "session_id": "session-1"}
            ],
            "total": 10,
            "limit": 2,
            "offset": 0
        }),
    );

    let page = client.traces().list_page(&TraceFilter::new().limit(2)).await.unwrap();

    assert_eq!(page.executions.len(), 2);
    assert_eq!(page.total, 10);
    assert_eq!(page.limit, 2);
    assert_eq!(page.offset, 0);
    assert_eq!(page.next_offset(), Some(2));
}

#[tokio::test]
async fn test_list_traces_with_filters() {
    let (api, client) = setup().await;
    api.mock(
        "GET",
        EXECUTIONS,
        200,
        json!({
            "executions": [{"trace_id": "trace-1", "session_id": "session-1", "agent_id": "agent-1"}],
            "total": 1,
            "limit": 100,
            "offset": 0
        }),
    );

    let filter = TraceFilter::new().session("session-1").agent("agent-1").prompt("greeting");
    let traces = client.traces().list(&filter).await.unwrap();

    assert_eq!(traces.len(), 1);
    assert_eq!(traces[0].agent_id.as_deref(), Some("agent-1"));
    assert_eq!(
        api.requests_to("GET", EXECUTIONS)[0].query_pairs(),
        query(&[
            ("limit", "100"),
            ("offset", "0"),
            ("session_id", "session-1"),
            ("prompt_id", "greeting"),
            ("agent_id", "agent-1"),
        ])
    );
}

#[tokio::test]
async fn test_list_traces_pagination() {
    let (api, client) = setup().await;
    api.mock(
        "GET",
        EXECUTIONS,
        200,
        json!({
            "executions": [{"trace_id": "trace-3"}, {"trace_id": "trace-4"}],
            "total": 5,
            "limit": 2,
            "offset": 2
        }),
    );

    let page = client
        .traces()
        .list_page(&TraceFilter::new().limit(2).offset(2))
        .await
        .unwrap();

    assert_eq!(page.executions[0].trace_id, "trace-3");
    assert_eq!(page.offset, 2);
    assert_eq!(page.next_offset(), Some(4));
    assert_eq!(
        api.requests_to("GET", EXECUTIONS)[0].query_pairs(),
        query(&[("limit", "2"), ("offset", "2")])
    );
}

#[tokio::test]
async fn test_list_traces_empty_result() {
    let (api, client) = setup().await;
    api.mock(
        "GET",
        EXECUTIONS,
        200,
        json!({"executions": [], "total": 0, "limit": 100, "offset": 0}),
    );

    let traces = client.traces().list(&TraceFilter::new()).await.unwrap();
    assert!(traces.is_empty());
}

#[tokio::test]
async fn test_create_trace() {
    let (api, client) = setup().await;
    api.mock(
        "POST",
        EXECUTIONS,
        200,
        json!({"trace_id": "trace-456", "status": "logged"}),
    );

    let trace = TraceCreate::new("session-789")
        .trace_id("trace-456")
        .agent_id("support-v1")
        .message(json!({"role": "user", "content": "Hello"}))
        .metadata("user_id", "user-123")
        .model("openai", "gpt-4")
        .tokens(150, 75)
        .cost_usd(0.00225);
    let ack = client.traces().create(&trace).await.unwrap();

    assert_eq!(ack.trace_id, "trace-456");
    assert_eq!(ack.status, "logged");

    let body = api.requests_to("POST", EXECUTIONS)[0].body.clone().unwrap();
    assert_eq!(body["session_id"], "session-789");
    assert_eq!(body["conversation_history"][0]["content"], "Hello");
    assert_eq!(body["metadata"]["user_id"], "user-123");
    assert_eq!(body["provider"], "openai");
    assert_eq!(body["tokens_out"], 75);
    assert_eq!(body["template_usages"], serde_json::Value::Null);
}

#[tokio::test]
async fn test_render_then_trace_links_template() {
    let api = MockApi::with_project_context().await;
    api.mock(
        "POST",
        "/api/projects/test-project-123/prompts/greeting/render",
        200,
        json!({"rendered": "Hello Alice!", "version": "1.0.0"}),
    );
    api.mock(
        "POST",
        "/api/projects/test-project-123/executions",
        200,
        json!({"trace_id": "t-1", "status": "logged"}),
    );
    let client = api.client();

    let result = client
        .prompts()
        .render("greeting", json!({"name": "Alice"}), None)
        .await
        .unwrap()
        .with_metadata("user_id", "user-123");
    client
        .traces()
        .create(&TraceCreate::new("s-1").trace_id("t-1").template_usage(&result))
        .await
        .unwrap();

    let body = api.requests_to("POST", "/api/projects/test-project-123/executions")[0]
        .body
        .clone()
        .unwrap();
    assert_eq!(
        body["template_usages"],
        json!([{
            "prompt_id": "greeting",
            "version": "1.0.0",
            "inputs": {"name": "Alice"},
            "metadata": {"user_id": "user-123"}
        }])
    );
}

#[tokio::test]
async fn test_get_trace() {
    let (api, client) = setup().await;
    api.mock(
        "GET",
        &format!("{EXECUTIONS}/trace-456"),
        200,
        json!({
            "trace_id": "trace-456",
            "parent_trace_id": null,
            "session_id": "session-789",
            "agent_id": "support-v1",
            "source": null,
            "conversation_history": [{"role": "user", "content": "Hello"}],
            "metadata": {"user_id": "user-123"},
            "provider": "openai",
            "model": "gpt-4",
            "tokens_in": 150,
            "tokens_out": 75,
            "cost_usd": 0.00225,
            "latency_ms": 420,
            "created_at": "2025-01-01T00:00:00+00:00",
            "templates_used": [{
                "prompt_id": "greeting",
                "version": "1.0.0",
                "inputs": {"name": "Alice"},
                "metadata": null,
                "position": 0,
                "role": "user",
                "source": null,
                "message_index": 0
            }]
        }),
    );

    let trace = client.traces().get("trace-456").await.unwrap();

    assert_eq!(trace.session_id.as_deref(), Some("session-789"));
    assert_eq!(trace.tokens_in, Some(150));
    assert_eq!(trace.templates_used[0].prompt_id, "greeting");
    assert_eq!(trace.templates_used[0].role.as_deref(), Some("user"));
}

#[tokio::test]
async fn test_get_trace_not_found() {
    let (api, client) = setup().await;
    api.mock(
        "GET",
        &format!("{EXECUTIONS}/missing"),
        404,
        json!({"detail": "Execution not found"}),
    );

    let err = client.traces().get("missing").await.unwrap_err();
    assert!(err.is_not_found());
    assert_eq!(err.to_string(), "API error 404: Execution not found");
}
