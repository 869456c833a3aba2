//! Execution traces (observability records of LLM calls).
//!
//! # Data Flow
//! ```text
//! RenderResult ──From──▶ TemplateUsage ──▶ TraceCreate
//!     → TracesApi::create → POST /api/projects/{project_id}/executions
//!
//! TraceFilter → TracesApi::list / list_page → ExecutionPage
//! trace id    → TracesApi::get → TraceDetail
//! ```

pub mod api;
pub mod types;

pub use api::TracesApi;
pub use types::{
    ExecutionPage, LinkedTemplate, TemplateUsage, TraceAck, TraceCreate, TraceDetail, TraceFilter, TraceSummary,
};
