//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (limits > 0, port valid, body limit fits the field bound)
//! - Check store addressing (URI scheme, distinct databases)
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: CollectorConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::net::SocketAddr;

use thiserror::Error;

use crate::config::schema::{CollectorConfig, StoreBackend};

/// A single semantic problem found in a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("listener.host must not be empty")]
    EmptyHost,
    #[error("listener.port must not be 0")]
    ZeroPort,
    #[error("limits.max_field_length must be greater than 0")]
    ZeroFieldLength,
    #[error("limits.max_body_bytes is {limit}, but limits.max_field_length needs at least {required}")]
    BodyLimitTooSmall { limit: usize, required: usize },
    #[error("store.{0} must not be empty")]
    EmptyDatabase(&'static str),
    #[error("store.database and store.ephemeral_database must differ")]
    SharedDatabase,
    #[error("store.uri is not a valid MongoDB connection string: {0}")]
    InvalidStoreUri(String),
    #[error("observability.metrics_address is not a socket address: {0}")]
    InvalidMetricsAddress(String),
}

/// Validate a configuration, collecting every problem found.
pub fn validate_config(config: &CollectorConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.host.trim().is_empty() {
        errors.push(ValidationError::EmptyHost);
    }
    if config.listener.port == 0 {
        errors.push(ValidationError::ZeroPort);
    }

    if config.limits.max_field_length == 0 {
        errors.push(ValidationError::ZeroFieldLength);
    }
    if let Some(limit) = config.limits.max_body_bytes {
        let required = config.limits.min_body_bytes();
        if limit < required {
            errors.push(ValidationError::BodyLimitTooSmall { limit, required });
        }
    }

    let store = &config.store;
    if store.database.is_empty() {
        errors.push(ValidationError::EmptyDatabase("database"));
    }
    if store.ephemeral_database.is_empty() {
        errors.push(ValidationError::EmptyDatabase("ephemeral_database"));
    }
    if !store.database.is_empty() && store.database == store.ephemeral_database {
        errors.push(ValidationError::SharedDatabase);
    }
    if store.backend == StoreBackend::Mongodb {
        match store.uri.split_once("://") {
            Some(("mongodb" | "mongodb+srv", rest)) if !rest.is_empty() => {}
            Some((scheme, _)) => errors.push(ValidationError::InvalidStoreUri(format!(
                "unsupported scheme `{}`",
                scheme
            ))),
            None => errors.push(ValidationError::InvalidStoreUri(store.uri.clone())),
        }
    }

    let observability = &config.observability;
    if observability.metrics_enabled
        && observability.metrics_address.parse::<SocketAddr>().is_err()
    {
        errors.push(ValidationError::InvalidMetricsAddress(
            observability.metrics_address.clone(),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
