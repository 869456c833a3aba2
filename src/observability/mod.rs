//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Every API call produces:
//!     → tracing events (debug for request shaping, info for completed operations)
//!     → metrics.rs (request counter, latency histogram)
//!
//! Consumers:
//!     → logging.rs installs a subscriber (CLI, or the embedding application's own)
//!     → whatever `metrics` recorder the application installs
//! ```
//!
//! # Design Decisions
//! - The library never installs a global subscriber or recorder on its own
//! - Secrets are never logged; the API key shows up as "present" or "none"
//! - Metrics are cheap no-ops when no recorder is installed

pub mod logging;
pub mod metrics;
