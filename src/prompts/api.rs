//! Prompt template endpoints.

use serde::Serialize;
use serde_json::Value;

use crate::client::request::path_segment;
use crate::client::{ApiRequest, Dakora, DakoraError, DakoraResult};
use crate::prompts::types::{JsonMap, NewPrompt, PromptUpdate, RenderRequest, RenderResponse, RenderResult, Template};

/// Operations on the prompts of the client's project.
///
/// Obtained from [`Dakora::prompts`]. Every call resolves the project id
/// first (cached after the first lookup).
#[derive(Debug, Clone, Copy)]
pub struct PromptsApi<'a> {
    client: &'a Dakora,
}

impl<'a> PromptsApi<'a> {
    pub(crate) fn new(client: &'a Dakora) -> Self {
        Self { client }
    }

    async fn collection_path(&self) -> DakoraResult<String> {
        let project_id = self.client.resolve_project_id().await?;
        Ok(format!("/api/projects/{}/prompts", project_id))
    }

    async fn item_path(&self, prompt_id: &str) -> DakoraResult<String> {
        let prompt_id = path_segment(prompt_id)?;
        Ok(format!("{}/{}", self.collection_path().await?, prompt_id))
    }

    /// List all prompt ids in the project.
    pub async fn list(&self) -> DakoraResult<Vec<String>> {
        let path = self.collection_path().await?;
        tracing::debug!("GET {}", path);

        let ids: Vec<String> = self.client.send_json(ApiRequest::get(path)).await?;
        tracing::info!(count = ids.len(), "Listed prompts");
        Ok(ids)
    }

    /// Fetch a prompt by id.
    pub async fn get(&self, prompt_id: &str) -> DakoraResult<Template> {
        let path = self.item_path(prompt_id).await?;
        tracing::debug!("GET {}", path);

        let template: Template = self.client.send_json(ApiRequest::get(path)).await?;
        tracing::info!(prompt_id = %template.id, version = %template.version, "Retrieved prompt");
        Ok(template)
    }

    /// Create a prompt.
    pub async fn create(&self, prompt: &NewPrompt) -> DakoraResult<Template> {
        path_segment(&prompt.id)?;
        let path = self.collection_path().await?;
        tracing::debug!(prompt_id = %prompt.id, "POST {} - creating prompt", path);

        let template: Template = self.client.send_json(ApiRequest::post(path).json(prompt)?).await?;
        tracing::info!(prompt_id = %template.id, version = %template.version, "Created prompt");
        Ok(template)
    }

    /// Update fields of an existing prompt.
    pub async fn update(&self, prompt_id: &str, update: &PromptUpdate) -> DakoraResult<Template> {
        let path = self.item_path(prompt_id).await?;
        tracing::debug!("PUT {}", path);

        let template: Template = self.client.send_json(ApiRequest::put(path).json(update)?).await?;
        tracing::info!(prompt_id = %template.id, version = %template.version, "Updated prompt");
        Ok(template)
    }

    /// Delete a prompt.
    pub async fn delete(&self, prompt_id: &str) -> DakoraResult<()> {
        let path = self.item_path(prompt_id).await?;
        tracing::debug!("DELETE {}", path);

        self.client.send_empty(ApiRequest::delete(path)).await?;
        tracing::info!(prompt_id, "Deleted prompt");
        Ok(())
    }

    /// Render a prompt on the server.
    ///
    /// `inputs` must serialize to a JSON object (or null, meaning no
    /// inputs). `version` selects a specific version; the latest is used
    /// when it is `None` or empty.
    pub async fn render<I: Serialize>(
        &self,
        prompt_id: &str,
        inputs: I,
        version: Option<&str>,
    ) -> DakoraResult<RenderResult> {
        let version = version.filter(|v| !v.is_empty());
        let inputs = into_object(serde_json::to_value(inputs)?)?;
        let path = format!("{}/render", self.item_path(prompt_id).await?);
        tracing::debug!(inputs = inputs.len(), "POST {}", path);

        let body = RenderRequest {
            inputs: &inputs,
            version,
        };
        let response: RenderResponse = self.client.send_json(ApiRequest::post(path).json(&body)?).await?;

        let version = response
            .version
            .or_else(|| version.map(str::to_string))
            .unwrap_or_else(|| "latest".to_string());

        let result = RenderResult {
            text: response.rendered,
            prompt_id: prompt_id.to_string(),
            version,
            inputs,
            metadata: JsonMap::new(),
        };

        tracing::info!(
            prompt_id,
            version = %result.version,
            chars = result.text.chars().count(),
            "Rendered prompt"
        );
        Ok(result)
    }
}

fn into_object(value: Value) -> DakoraResult<JsonMap> {
    match value {
        Value::Object(map) => Ok(map),
        Value::Null => Ok(JsonMap::new()),
        other => Err(DakoraError::InvalidInputs(format!(
            "expected a JSON object of variables, got {}",
            json_kind(&other)
        ))),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
