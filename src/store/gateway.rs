//! Store gateway: the collector's single entry point to persistence.

use std::sync::Arc;

use crate::config::StoreMode;
use crate::observability::metrics;
use crate::store::{
    Document, DocumentId, DocumentStore, StoreError, FULL_COLLECTION, MINIMAL_COLLECTION,
};

/// Shared handle over the configured [`DocumentStore`].
///
/// Built once at startup, then cloned into every request. It is never mutated
/// afterwards, so no locking is needed around it.
#[derive(Clone)]
pub struct Gateway {
    store: Arc<dyn DocumentStore>,
    mode: StoreMode,
}

/// IDs assigned to the two documents written for one submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Persisted {
    pub minimal: DocumentId,
    pub full: DocumentId,
}

impl Gateway {
    pub fn new(store: Arc<dyn DocumentStore>, mode: StoreMode) -> Self {
        Self { store, mode }
    }

    pub fn backend_name(&self) -> &'static str {
        self.store.backend_name()
    }

    pub fn mode(&self) -> StoreMode {
        self.mode
    }

    /// Insert one document and log the assigned ID.
    pub async fn insert(
        &self,
        collection: &'static str,
        document: Document,
    ) -> Result<DocumentId, StoreError> {
        match self.store.insert_one(collection, document).await {
            Ok(id) => {
                metrics::record_insert(collection, true);
                tracing::info!(collection, id = %id, "Inserted a single document");
                Ok(id)
            }
            Err(e) => {
                metrics::record_insert(collection, false);
                Err(e)
            }
        }
    }

    /// Write `minimal` then `full` as two independent inserts.
    ///
    /// If the first insert fails the second is not attempted. If the second
    /// fails, the first stays written.
    pub async fn persist(&self, minimal: Document, full: Document) -> Result<Persisted, StoreError> {
        let minimal = self.insert(MINIMAL_COLLECTION, minimal).await?;
        let full = self.insert(FULL_COLLECTION, full).await?;
        Ok(Persisted { minimal, full })
    }

    /// Release the store. In ephemeral mode both collections are dropped first.
    ///
    /// Cleanup is attempted even if a drop fails; the first error is returned.
    pub async fn shutdown(&self) -> Result<(), StoreError> {
        let mut first_error = None;

        if self.mode == StoreMode::Ephemeral {
            for collection in [MINIMAL_COLLECTION, FULL_COLLECTION] {
                match self.store.drop_collection(collection).await {
                    Ok(()) => tracing::info!(collection, "Dropped ephemeral collection"),
                    Err(e) => {
                        tracing::error!(error = %e, "Ephemeral cleanup failed");
                        first_error.get_or_insert(e);
                    }
                }
            }
        }

        if let Err(e) = self.store.disconnect().await {
            tracing::error!(error = %e, "Store disconnect failed");
            first_error.get_or_insert(e);
        }

        match first_error {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}
