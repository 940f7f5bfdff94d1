//! Document store subsystem.
//!
//! # Data Flow
//! ```text
//! accepted submission
//!     → gateway.rs (minimal insert, then full insert)
//!     → DocumentStore impl (mongo.rs or memory.rs)
//!
//! shutdown
//!     → gateway.rs (drop collections in ephemeral mode, then disconnect)
//! ```
//!
//! # Design Decisions
//! - The store handle is built once at startup and shared read-only
//! - The two inserts are independent; a partial write is not compensated
//! - No retries

pub mod gateway;
pub mod memory;
pub mod mongo;

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{Map, Value};
use thiserror::Error;

use crate::config::{StoreBackend, StoreConfig};

pub use gateway::Gateway;
pub use memory::MemoryStore;
pub use mongo::MongoStore;

/// Collection receiving `minimal` sub-documents.
pub const MINIMAL_COLLECTION: &str = "minimal";
/// Collection receiving `full` sub-documents.
pub const FULL_COLLECTION: &str = "full";

/// A stored document: a JSON object, written verbatim.
pub type Document = Map<String, Value>;

/// Identifier the store assigned to an inserted document.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DocumentId(pub String);

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Error type for store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to connect to {target}: {reason}")]
    Connect { target: String, reason: String },

    #[error("ping failed: {0}")]
    Ping(String),

    #[error("insert into `{collection}` failed: {reason}")]
    Write { collection: String, reason: String },

    #[error("document for `{collection}` cannot be stored: {reason}")]
    Encode { collection: String, reason: String },

    #[error("dropping `{collection}` failed: {reason}")]
    Drop { collection: String, reason: String },

    #[error("disconnect failed: {0}")]
    Disconnect(String),
}

/// Minimal capability set the collector needs from a document database.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Short name used in logs.
    fn backend_name(&self) -> &'static str;

    /// Health-check the connection.
    async fn ping(&self) -> Result<(), StoreError>;

    /// Insert one document into the named collection.
    async fn insert_one(&self, collection: &str, document: Document)
        -> Result<DocumentId, StoreError>;

    /// Remove a collection and everything in it.
    async fn drop_collection(&self, collection: &str) -> Result<(), StoreError>;

    /// Release the connection.
    async fn disconnect(&self) -> Result<(), StoreError>;
}

/// Open the store selected by `config` and wrap it in a [`Gateway`].
///
/// Connection and health-check failures are returned to the caller, which treats
/// them as fatal at startup.
pub async fn connect(config: &StoreConfig) -> Result<Gateway, StoreError> {
    let database = config.active_database();
    let store: Arc<dyn DocumentStore> = match config.backend {
        StoreBackend::Mongodb => Arc::new(MongoStore::connect(&config.uri, database).await?),
        StoreBackend::Memory => Arc::new(MemoryStore::new()),
    };

    tracing::info!(
        backend = store.backend_name(),
        database = %database,
        mode = ?config.mode,
        "Connected to document store"
    );

    Ok(Gateway::new(store, config.mode))
}
