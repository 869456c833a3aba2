//! Caller context returned by `/api/me/context`.

use serde::{Deserialize, Serialize};

/// Path of the context endpoint.
pub const CONTEXT_PATH: &str = "/api/me/context";

/// The authenticated caller and their default project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectContext {
    #[serde(default)]
    pub user_id: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub name: Option<String>,
    pub project_id: String,
    #[serde(default)]
    pub project_slug: String,
    #[serde(default)]
    pub project_name: String,
}
