//! Prompt template types.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A JSON object.
pub type JsonMap = serde_json::Map<String, Value>;

/// Declared input variable of a template.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InputSpec {
    /// Variable type as understood by the server (e.g., "string", "number").
    #[serde(rename = "type", default = "default_input_type")]
    pub kind: String,
    #[serde(default = "default_required")]
    pub required: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,
}

fn default_input_type() -> String {
    "string".to_string()
}

fn default_required() -> bool {
    true
}

impl InputSpec {
    /// A required input of the given type.
    pub fn new(kind: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            required: true,
            default: None,
        }
    }

    /// A required string input.
    pub fn string() -> Self {
        Self::new("string")
    }

    /// Mark the input optional.
    pub fn optional(mut self) -> Self {
        self.required = false;
        self
    }

    /// Value used when the caller omits the input.
    pub fn with_default(mut self, value: impl Into<Value>) -> Self {
        self.default = Some(value.into());
        self
    }
}

/// A stored prompt template.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Template {
    pub id: String,
    pub version: String,
    #[serde(default)]
    pub description: Option<String>,
    pub template: String,
    #[serde(default)]
    pub inputs: BTreeMap<String, InputSpec>,
    #[serde(default)]
    pub metadata: JsonMap,
}

/// Payload for creating a prompt.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewPrompt {
    pub id: String,
    pub version: String,
    pub template: String,
    pub description: Option<String>,
    pub inputs: BTreeMap<String, InputSpec>,
    pub metadata: JsonMap,
}

impl NewPrompt {
    /// Version given to new prompts unless set explicitly.
    pub const DEFAULT_VERSION: &'static str = "1.0.0";

    pub fn new(id: impl Into<String>, template: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            version: Self::DEFAULT_VERSION.to_string(),
            template: template.into(),
            description: None,
            inputs: BTreeMap::new(),
            metadata: JsonMap::new(),
        }
    }

    pub fn version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn input(mut self, name: impl Into<String>, spec: InputSpec) -> Self {
        self.inputs.insert(name.into(), spec);
        self
    }

    pub fn metadata(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }
}

/// Partial update of a prompt. Unset fields are left unchanged.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PromptUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub template: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inputs: Option<BTreeMap<String, InputSpec>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<JsonMap>,
}

impl PromptUpdate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn template(mut self, template: impl Into<String>) -> Self {
        self.template = Some(template.into());
        self
    }

    pub fn inputs(mut self, inputs: BTreeMap<String, InputSpec>) -> Self {
        self.inputs = Some(inputs);
        self
    }

    pub fn metadata(mut self, metadata: JsonMap) -> Self {
        self.metadata = Some(metadata);
        self
    }

    /// True if nothing would change.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Result of rendering a template on the server.
///
/// Carries enough context (prompt id, version, inputs) to link a later
/// execution trace back to the template; see `TemplateUsage`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderResult {
    /// The rendered prompt text.
    pub text: String,
    pub prompt_id: String,
    /// Version the server rendered, or the requested one, or "latest".
    pub version: String,
    /// Inputs as sent.
    pub inputs: JsonMap,
    /// Caller-attached metadata (user id, tags, ...). Starts empty.
    pub metadata: JsonMap,
}

impl RenderResult {
    /// Attach a metadata entry.
    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }
}

impl std::fmt::Display for RenderResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.text)
    }
}

/// Body of `POST .../render`.
#[derive(Debug, Serialize)]
pub(crate) struct RenderRequest<'a> {
    pub inputs: &'a JsonMap,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<&'a str>,
}

/// Response of `POST .../render`.
#[derive(Debug, Deserialize)]
pub(crate) struct RenderResponse {
    pub rendered: String,
    #[serde(default)]
    pub version: Option<String>,
}
