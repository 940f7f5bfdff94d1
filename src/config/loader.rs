//! Configuration loading from disk and environment.

use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::config::schema::CollectorConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Environment variable overriding `limits.max_field_length`.
pub const MAX_LENGTH_ENV: &str = "PINGER_MAX_LENGTH";

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("{var} must be a non-negative integer, got `{value}`")]
    Env { var: &'static str, value: String },
    #[error("Validation failed: {}", join(.0))]
    Validation(Vec<ValidationError>),
}

fn join(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Load configuration from an optional TOML file, then apply environment overrides.
///
/// Without a path the built-in defaults are used. The result is not validated yet,
/// since command-line flags may still adjust it; call [`check_config`] afterwards.
pub fn load_config(path: Option<&Path>) -> Result<CollectorConfig, ConfigError> {
    let mut config = match path {
        Some(path) => read_config_file(path)?,
        None => CollectorConfig::default(),
    };

    apply_env_overrides(&mut config, |var| std::env::var(var).ok())?;
    Ok(config)
}

/// Parse a TOML configuration file.
pub fn read_config_file(path: &Path) -> Result<CollectorConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    Ok(toml::from_str(&content)?)
}

/// Apply environment overrides using `lookup` to read variables.
pub fn apply_env_overrides<F>(config: &mut CollectorConfig, lookup: F) -> Result<(), ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(value) = lookup(MAX_LENGTH_ENV).filter(|v| !v.is_empty()) {
        config.limits.max_field_length =
            value.trim().parse().map_err(|_| ConfigError::Env {
                var: MAX_LENGTH_ENV,
                value: value.clone(),
            })?;
    }
    Ok(())
}

/// Run semantic validation, folding the problems into a single error.
pub fn check_config(config: &CollectorConfig) -> Result<(), ConfigError> {
    validate_config(config).map_err(ConfigError::Validation)
}
