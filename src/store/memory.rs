//! In-process document store.
//!
//! Backs the `memory` store backend and the test suites. Documents are kept per
//! collection in insertion order and identified by a random UUID.

use std::sync::Arc;

use async_trait::async_trait;
use dashmap::DashMap;
use uuid::Uuid;

use crate::store::{Document, DocumentId, DocumentStore, StoreError};

/// A thread-safe map of collection name to stored documents.
#[derive(Clone, Default)]
pub struct MemoryStore {
    collections: Arc<DashMap<String, Vec<(DocumentId, Document)>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of documents in `collection` (0 if it does not exist).
    pub fn count(&self, collection: &str) -> usize {
        self.collections
            .get(collection)
            .map(|docs| docs.len())
            .unwrap_or(0)
    }

    /// Snapshot of the documents in `collection`, in insertion order.
    pub fn documents(&self, collection: &str) -> Vec<Document> {
        self.collections
            .get(collection)
            .map(|docs| docs.iter().map(|(_, doc)| doc.clone()).collect())
            .unwrap_or_default()
    }

    /// Whether `collection` exists.
    pub fn has_collection(&self, collection: &str) -> bool {
        self.collections.contains_key(collection)
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    fn backend_name(&self) -> &'static str {
        "memory"
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }

    async fn insert_one(
        &self,
        collection: &str,
        document: Document,
    ) -> Result<DocumentId, StoreError> {
        let id = DocumentId(Uuid::new_v4().to_string());
        self.collections
            .entry(collection.to_string())
            .or_default()
            .push((id.clone(), document));
        Ok(id)
    }

    async fn drop_collection(&self, collection: &str) -> Result<(), StoreError> {
        self.collections.remove(collection);
        Ok(())
    }

    async fn disconnect(&self) -> Result<(), StoreError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn doc(value: serde_json::Value) -> Document {
        value.as_object().cloned().unwrap()
    }

    #[tokio::test]
    async fn test_insert_assigns_distinct_ids() {
        let store = MemoryStore::new();
        let a = store.insert_one("minimal", doc(json!({"platform": "qemu"}))).await.unwrap();
        let b = store.insert_one("minimal", doc(json!({"platform": "aws"}))).await.unwrap();

        assert_ne!(a, b);
        assert_eq!(store.count("minimal"), 2);
        assert_eq!(store.documents("minimal")[1]["platform"], "aws");
    }

    #[tokio::test]
    async fn test_collections_are_independent() {
        let store = MemoryStore::new();
        store.insert_one("full", Document::new()).await.unwrap();

        assert_eq!(store.count("full"), 1);
        assert_eq!(store.count("minimal"), 0);
        assert!(store.documents("minimal").is_empty());
    }

    #[tokio::test]
    async fn test_drop_collection() {
        let store = MemoryStore::new();
        store.insert_one("full", Document::new()).await.unwrap();
        store.drop_collection("full").await.unwrap();

        assert!(!store.has_collection("full"));
        // Dropping a missing collection is not an error.
        store.drop_collection("full").await.unwrap();
    }

    #[tokio::test]
    async fn test_clones_share_state() {
        let store = MemoryStore::new();
        let view = store.clone();
        store.insert_one("minimal", Document::new()).await.unwrap();
        assert_eq!(view.count("minimal"), 1);
    }
}
