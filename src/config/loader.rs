//! Configuration loading from disk.

use std::fs;
use std::path::Path;

use crate::config::schema::ClientConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Error type for configuration loading.
#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
    Validation(Vec<ValidationError>),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "IO error: {}", e),
            ConfigError::Parse(e) => write!(f, "Parse error: {}", e),
            ConfigError::Validation(errors) => {
                write!(f, "Validation failed: ")?;
                for (i, err) in errors.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", err)?;
                }
                Ok(())
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// Load a TOML config file, overlay the environment and validate.
pub fn load_config(path: &Path) -> Result<ClientConfig, ConfigError> {
    load_config_with_env(path, |name| std::env::var(name).ok())
}

/// Like [`load_config`], reading overrides through `lookup`.
///
/// Validation runs once, after the overlay, so an override can repair a
/// bad value in the file.
pub fn load_config_with_env<F>(path: &Path, lookup: F) -> Result<ClientConfig, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let content = fs::read_to_string(path).map_err(ConfigError::Io)?;
    let config = parse_toml(&content)?.with_env_overrides(lookup);

    validate_config(&config).map_err(ConfigError::Validation)?;

    tracing::debug!(path = %path.display(), base_url = %config.base_url, "Configuration loaded");
    Ok(config)
}

/// Parse and validate TOML content without consulting the environment.
pub fn parse_config(content: &str) -> Result<ClientConfig, ConfigError> {
    let config = parse_toml(content)?;
    validate_config(&config).map_err(ConfigError::Validation)?;
    Ok(config)
}

fn parse_toml(content: &str) -> Result<ClientConfig, ConfigError> {
    toml::from_str(content).map_err(ConfigError::Parse)
}
