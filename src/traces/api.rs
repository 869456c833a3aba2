//! Execution trace endpoints.

use crate::client::request::path_segment;
use crate::client::{ApiRequest, Dakora, DakoraResult};
use crate::traces::types::{ExecutionPage, TraceAck, TraceCreate, TraceDetail, TraceFilter, TraceSummary};

/// Operations on the execution traces of the client's project.
///
/// Obtained from [`Dakora::traces`].
#[derive(Debug, Clone, Copy)]
pub struct TracesApi<'a> {
    client: &'a Dakora,
}

impl<'a> TracesApi<'a> {
    pub(crate) fn new(client: &'a Dakora) -> Self {
        Self { client }
    }

    async fn collection_path(&self) -> DakoraResult<String> {
        let project_id = self.client.resolve_project_id().await?;
        Ok(format!("/api/projects/{}/executions", project_id))
    }

    /// Log an execution trace.
    pub async fn create(&self, trace: &TraceCreate) -> DakoraResult<TraceAck> {
        let path = self.collection_path().await?;
        tracing::debug!(trace_id = %trace.trace_id, "POST {}", path);

        let ack: TraceAck = self.client.send_json(ApiRequest::post(path).json(trace)?).await?;
        tracing::info!(trace_id = %ack.trace_id, status = %ack.status, "Created trace");
        Ok(ack)
    }

    /// List traces matching `filter`, without pagination metadata.
    pub async fn list(&self, filter: &TraceFilter) -> DakoraResult<Vec<TraceSummary>> {
        Ok(self.list_page(filter).await?.executions)
    }

    /// List traces matching `filter` together with `total`, `limit` and `offset`.
    pub async fn list_page(&self, filter: &TraceFilter) -> DakoraResult<ExecutionPage> {
        let path = self.collection_path().await?;
        let query = filter.to_query();
        tracing::debug!(filters = ?query, "GET {}", path);

        let request = query
            .into_iter()
            .fold(ApiRequest::get(path), |req, (key, value)| req.query(key, value));
        let page: ExecutionPage = self.client.send_json(request).await?;

        tracing::info!(count = page.executions.len(), total = page.total, "Listed traces");
        Ok(page)
    }

    /// Fetch one trace with its conversation history and linked templates.
    pub async fn get(&self, trace_id: &str) -> DakoraResult<TraceDetail> {
        let path = format!("{}/{}", self.collection_path().await?, path_segment(trace_id)?);
        tracing::debug!("GET {}", path);

        let trace: TraceDetail = self.client.send_json(ApiRequest::get(path)).await?;
        tracing::info!(trace_id = %trace.trace_id, "Retrieved trace");
        Ok(trace)
    }
}
