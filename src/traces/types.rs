//! Execution trace types.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::prompts::{JsonMap, RenderResult};

/// A template used during an execution, sent when creating a trace.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemplateUsage {
    pub prompt_id: String,
    pub version: String,
    #[serde(default)]
    pub inputs: JsonMap,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message_index: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<JsonMap>,
}

impl TemplateUsage {
    pub fn new(prompt_id: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            prompt_id: prompt_id.into(),
            version: version.into(),
            inputs: JsonMap::new(),
            role: None,
            source: None,
            message_index: None,
            metadata: None,
        }
    }

    /// Conversation role the rendered text was used as (e.g., "system", "user").
    pub fn role(mut self, role: impl Into<String>) -> Self {
        self.role = Some(role.into());
        self
    }

    /// Position of the message in the conversation history.
    pub fn message_index(mut self, index: u32) -> Self {
        self.message_index = Some(index);
        self
    }
}

impl From<&RenderResult> for TemplateUsage {
    fn from(result: &RenderResult) -> Self {
        Self {
            prompt_id: result.prompt_id.clone(),
            version: result.version.clone(),
            inputs: result.inputs.clone(),
            role: None,
            source: None,
            message_index: None,
            metadata: (!result.metadata.is_empty()).then(|| result.metadata.clone()),
        }
    }
}

/// Payload for logging an execution trace.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TraceCreate {
    pub trace_id: String,
    pub parent_trace_id: Option<String>,
    pub session_id: String,
    pub agent_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    pub template_usages: Option<Vec<TemplateUsage>>,
    pub conversation_history: Option<Vec<Value>>,
    pub metadata: Option<JsonMap>,
    pub provider: Option<String>,
    pub model: Option<String>,
    pub tokens_in: Option<u64>,
    pub tokens_out: Option<u64>,
    pub latency_ms: Option<u64>,
    pub cost_usd: Option<f64>,
}

impl TraceCreate {
    /// A trace for `session_id` with a fresh random trace id.
    pub fn new(session_id: impl Into<String>) -> Self {
        Self {
            trace_id: Uuid::new_v4().to_string(),
            parent_trace_id: None,
            session_id: session_id.into(),
            agent_id: None,
            source: None,
            template_usages: None,
            conversation_history: None,
            metadata: None,
            provider: None,
            model: None,
            tokens_in: None,
            tokens_out: None,
            latency_ms: None,
            cost_usd: None,
        }
    }

    pub fn trace_id(mut self, trace_id: impl Into<String>) -> Self {
        self.trace_id = trace_id.into();
        self
    }

    pub fn parent_trace_id(mut self, parent: impl Into<String>) -> Self {
        self.parent_trace_id = Some(parent.into());
        self
    }

    pub fn agent_id(mut self, agent_id: impl Into<String>) -> Self {
        self.agent_id = Some(agent_id.into());
        self
    }

    pub fn source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    pub fn template_usage(mut self, usage: impl Into<TemplateUsage>) -> Self {
        self.template_usages.get_or_insert_with(Vec::new).push(usage.into());
        self
    }

    pub fn message(mut self, message: Value) -> Self {
        self.conversation_history.get_or_insert_with(Vec::new).push(message);
        self
    }

    pub fn metadata(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.metadata
            .get_or_insert_with(JsonMap::new)
            .insert(key.into(), value.into());
        self
    }

    pub fn model(mut self, provider: impl Into<String>, model: impl Into<String>) -> Self {
        self.provider = Some(provider.into());
        self.model = Some(model.into());
        self
    }

    pub fn tokens(mut self, tokens_in: u64, tokens_out: u64) -> Self {
        self.tokens_in = Some(tokens_in);
        self.tokens_out = Some(tokens_out);
        self
    }

    pub fn latency(mut self, latency: Duration) -> Self {
        self.latency_ms = Some(latency.as_millis() as u64);
        self
    }

    pub fn cost_usd(mut self, cost: f64) -> Self {
        self.cost_usd = Some(cost);
        self
    }
}

impl From<RenderResult> for TemplateUsage {
    fn from(result: RenderResult) -> Self {
        Self::from(&result)
    }
}

/// Server acknowledgement of a logged trace.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraceAck {
    pub trace_id: String,
    #[serde(default)]
    pub status: String,
}

/// Filters and pagination for listing traces.
#[derive(Debug, Clone, PartialEq)]
pub struct TraceFilter {
    pub session_id: Option<String>,
    pub prompt_id: Option<String>,
    pub agent_id: Option<String>,
    pub provider: Option<String>,
    pub model: Option<String>,
    pub has_templates: Option<bool>,
    pub min_cost: Option<f64>,
    pub limit: u32,
    pub offset: u32,
}

impl Default for TraceFilter {
    fn default() -> Self {
        Self {
            session_id: None,
            prompt_id: None,
            agent_id: None,
            provider: None,
            model: None,
            has_templates: None,
            min_cost: None,
            limit: Self::DEFAULT_LIMIT,
            offset: 0,
        }
    }
}

impl TraceFilter {
    pub const DEFAULT_LIMIT: u32 = 100;

    pub fn new() -> Self {
        Self::default()
    }

    pub fn session(mut self, session_id: impl Into<String>) -> Self {
        self.session_id = Some(session_id.into());
        self
    }

    pub fn prompt(mut self, prompt_id: impl Into<String>) -> Self {
        self.prompt_id = Some(prompt_id.into());
        self
    }

    pub fn agent(mut self, agent_id: impl Into<String>) -> Self {
        self.agent_id = Some(agent_id.into());
        self
    }

    pub fn provider(mut self, provider: impl Into<String>) -> Self {
        self.provider = Some(provider.into());
        self
    }

    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    pub fn has_templates(mut self, has_templates: bool) -> Self {
        self.has_templates = Some(has_templates);
        self
    }

    pub fn min_cost(mut self, min_cost: f64) -> Self {
        self.min_cost = Some(min_cost);
        self
    }

    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = limit;
        self
    }

    pub fn offset(mut self, offset: u32) -> Self {
        self.offset = offset;
        self
    }

    /// Query parameters: `limit` and `offset` always, the rest when set.
    pub fn to_query(&self) -> Vec<(&'static str, String)> {
        let mut query = vec![("limit", self.limit.to_string()), ("offset", self.offset.to_string())];

        let optional = [
            ("session_id", self.session_id.clone()),
            ("prompt_id", self.prompt_id.clone()),
            ("agent_id", self.agent_id.clone()),
            ("provider", self.provider.clone()),
            ("model", self.model.clone()),
            ("has_templates", self.has_templates.map(|b| b.to_string())),
            ("min_cost", self.min_cost.map(|c| c.to_string())),
        ];
        query.extend(
            optional
                .into_iter()
                .filter_map(|(key, value)| value.filter(|v| !v.is_empty()).map(|v| (key, v))),
        );
        query
    }
}

/// One row of a trace listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TraceSummary {
    pub trace_id: String,
    pub parent_trace_id: Option<String>,
    pub session_id: Option<String>,
    pub agent_id: Option<String>,
    pub source: Option<String>,
    pub provider: Option<String>,
    pub model: Option<String>,
    pub tokens_in: Option<u64>,
    pub tokens_out: Option<u64>,
    pub cost_usd: Option<f64>,
    pub latency_ms: Option<u64>,
    pub created_at: Option<String>,
    #[serde(default)]
    pub template_count: u32,
    pub metadata: Option<Value>,
}

/// A page of traces with pagination metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExecutionPage {
    #[serde(default)]
    pub executions: Vec<TraceSummary>,
    #[serde(default)]
    pub total: u64,
    #[serde(default)]
    pub limit: u32,
    #[serde(default)]
    pub offset: u32,
}

impl ExecutionPage {
    /// Offset of the next page, if more traces remain.
    pub fn next_offset(&self) -> Option<u32> {
        let next = self.offset as u64 + self.executions.len() as u64;
        (!self.executions.is_empty() && next < self.total).then_some(next as u32)
    }
}

/// A template linked to a stored trace.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinkedTemplate {
    pub prompt_id: String,
    pub version: String,
    pub inputs: Option<Value>,
    pub metadata: Option<Value>,
    pub position: Option<u32>,
    pub role: Option<String>,
    pub source: Option<String>,
    pub message_index: Option<u32>,
}

/// Full trace, including conversation and linked templates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TraceDetail {
    pub trace_id: String,
    pub parent_trace_id: Option<String>,
    pub session_id: Option<String>,
    pub agent_id: Option<String>,
    pub source: Option<String>,
    pub conversation_history: Option<Vec<Value>>,
    pub metadata: Option<Value>,
    pub provider: Option<String>,
    pub model: Option<String>,
    pub tokens_in: Option<u64>,
    pub tokens_out: Option<u64>,
    pub cost_usd: Option<f64>,
    pub latency_ms: Option<u64>,
    pub created_at: Option<String>,
    #[serde(default)]
    pub templates_used: Vec<LinkedTemplate>,
}
