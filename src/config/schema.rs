//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the collector.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

/// Default upper bound on the text length of `level`, `minimal` and `full`.
pub const DEFAULT_MAX_FIELD_LENGTH: usize = 31415;

/// Room for the keys and punctuation around the three bounded fields.
const ENVELOPE_BYTES: usize = 64;

/// A `\uXXXX` escape is the longest wire encoding of one character.
const MAX_BYTES_PER_CHAR: usize = 6;

/// Root configuration for the collector.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct CollectorConfig {
    /// Listener configuration (host, port).
    pub listener: ListenerConfig,

    /// Submission size limits.
    pub limits: LimitsConfig,

    /// Document store selection and addressing.
    pub store: StoreConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Host to listen on.
    pub host: String,

    /// Port to listen on.
    pub port: u16,
}

impl ListenerConfig {
    /// The `host:port` string handed to the TCP listener.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 5000,
        }
    }
}

/// Size limits applied to incoming submissions.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LimitsConfig {
    /// Maximum length of `level`, serialized `minimal` and serialized `full`.
    /// Overridable through `PINGER_MAX_LENGTH`.
    pub max_field_length: usize,

    /// Maximum raw request body size in bytes. Derived from `max_field_length`
    /// when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_body_bytes: Option<usize>,
}

impl LimitsConfig {
    /// Body size limit handed to the HTTP layer.
    ///
    /// The derived value admits three fields at the bound even when every
    /// character arrives escaped.
    pub fn body_limit(&self) -> usize {
        self.max_body_bytes.unwrap_or_else(|| {
            self.max_field_length
                .saturating_mul(3 * MAX_BYTES_PER_CHAR)
                .saturating_add(ENVELOPE_BYTES)
        })
    }

    /// Smallest explicit body limit that still admits three unescaped fields at the bound.
    pub fn min_body_bytes(&self) -> usize {
        self.max_field_length
            .saturating_mul(3)
            .saturating_add(ENVELOPE_BYTES)
    }
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            max_field_length: DEFAULT_MAX_FIELD_LENGTH,
            max_body_bytes: None,
        }
    }
}

/// Which document store implementation backs the gateway.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    #[default]
    Mongodb,
    Memory,
}

/// Whether stored documents outlive the process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum StoreMode {
    /// Write to the production database.
    #[default]
    Persistent,
    /// Write to an isolated test database whose collections are dropped on shutdown.
    Ephemeral,
}

/// Document store configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct StoreConfig {
    pub backend: StoreBackend,

    pub mode: StoreMode,

    /// Connection string for the MongoDB backend.
    pub uri: String,

    /// Database used in persistent mode.
    pub database: String,

    /// Database used in ephemeral mode.
    pub ephemeral_database: String,
}

impl StoreConfig {
    /// Database name selected by the current mode.
    pub fn active_database(&self) -> &str {
        match self.mode {
            StoreMode::Persistent => &self.database,
            StoreMode::Ephemeral => &self.ephemeral_database,
        }
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            backend: StoreBackend::Mongodb,
            mode: StoreMode::Persistent,
            uri: "mongodb://mongodb:27017".to_string(),
            database: "fcos_pinger".to_string(),
            ephemeral_database: "fcos_pinger_test".to_string(),
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Verbose logging, including the full inbound request.
    pub debug: bool,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            debug: false,
            metrics_enabled: false,
            metrics_address: "127.0.0.1:9090".to_string(),
        }
    }
}
