//! Client configuration.
//!
//! # Data Flow
//! ```text
//! defaults (schema.rs)
//!     → optional TOML file (loader.rs)
//!     → DAKORA_* environment overrides (schema.rs)
//!     → explicit builder values (client/connection.rs)
//!     → validation.rs (semantic checks, all errors reported)
//!     → ClientConfig (immutable, owned by the Dakora client)
//! ```
//!
//! # Design Decisions
//! - All fields have defaults so an empty file is a valid config
//! - Explicit values beat the environment, the environment beats the file
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, load_config_with_env, parse_config, ConfigError};
pub use schema::{ClientConfig, ObservabilityConfig, TimeoutConfig};
pub use schema::{DEFAULT_BASE_URL, ENV_API_KEY, ENV_BASE_URL, ENV_PROJECT_ID};
pub use validation::{validate_config, ValidationError};
