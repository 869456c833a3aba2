//! Rust client for the Dakora prompt-management API.
//!
//! # Architecture Overview
//!
//! ```text
//!   caller
//!     │
//!     ▼
//!   ┌──────────────────────────────────────────────────────────┐
//!   │                        Dakora                            │
//!   │   credential (X-API-Key)   base url   project id cache   │
//!   │                                                          │
//!   │   ┌──────────────┐        ┌──────────────┐               │
//!   │   │  PromptsApi  │        │  TracesApi   │               │
//!   │   └──────┬───────┘        └──────┬───────┘               │
//!   │          └──────────┬────────────┘                       │
//!   │                     ▼                                    │
//!   │         shared reqwest connection pool ──────────────────┼──▶ Dakora API
//!   └──────────────────────────────────────────────────────────┘
//! ```
//!
//! Rendering happens on the server. The client only posts variables and
//! receives the rendered text.
//!
//! # Example
//!
//! ```no_run
//! use dakora_client::Dakora;
//! use serde_json::json;
//!
//! # async fn run() -> Result<(), dakora_client::DakoraError> {
//! let client = Dakora::builder().api_key("dk_xxx").build()?;
//!
//! let ids = client.prompts().list().await?;
//! let result = client
//!     .prompts()
//!     .render("greeting", json!({ "name": "Alice" }), None)
//!     .await?;
//! println!("{ids:?} {}", result.text);
//! # Ok(())
//! # }
//! ```

// Core
pub mod client;
pub mod config;

// Resources
pub mod prompts;
pub mod traces;

// Cross-cutting concerns
pub mod observability;

pub use client::{ApiKey, ApiRequest, Dakora, DakoraBuilder, DakoraError, DakoraResult, ProjectContext};
pub use config::ClientConfig;
pub use prompts::{InputSpec, NewPrompt, PromptUpdate, PromptsApi, RenderResult, Template};
pub use traces::{
    ExecutionPage, TemplateUsage, TraceAck, TraceCreate, TraceDetail, TraceFilter, TraceSummary, TracesApi,
};
