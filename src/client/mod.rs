//! Connection object and request plumbing.
//!
//! # Data Flow
//! ```text
//! PromptsApi / TracesApi
//!     → request.rs (ApiRequest: method, relative path, query, body, headers)
//!     → connection.rs (scope check, credential injection, send, metrics)
//!     → error.rs (status check, body decode)
//!     → typed result
//! ```
//!
//! # Security Constraints
//! - Only relative API paths are sent; absolute URLs are rejected
//! - The credential is injected per request and never logged
//! - Caller-supplied `X-API-Key` headers are replaced by the stored key

pub mod connection;
pub mod context;
pub mod credential;
pub mod error;
pub mod request;

pub use connection::{Dakora, DakoraBuilder};
pub use context::ProjectContext;
pub use credential::ApiKey;
pub use error::{DakoraError, DakoraResult};
pub use request::{ApiRequest, X_API_KEY};
