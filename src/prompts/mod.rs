//! Versioned prompt templates.
//!
//! # Data Flow
//! ```text
//! PromptsApi call
//!     → Dakora::resolve_project_id (cached after first call)
//!     → /api/projects/{project_id}/prompts[/{prompt_id}[/render]]
//!     → typed Template / RenderResult
//! ```
//!
//! Rendering is done by the server. The client only sends inputs and
//! returns the rendered text together with the context needed to link
//! an execution trace to it.

pub mod api;
pub mod types;

pub use api::PromptsApi;
pub use types::{InputSpec, JsonMap, NewPrompt, PromptUpdate, RenderResult, Template};
