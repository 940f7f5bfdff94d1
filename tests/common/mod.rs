//! Shared utilities for integration tests.

use std::sync::Arc;

use async_trait::async_trait;
use pinger_collector::config::{CollectorConfig, StoreMode};
use pinger_collector::store::{Document, DocumentId, DocumentStore, MemoryStore, StoreError};
use pinger_collector::{CollectorServer, Gateway, Shutdown};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

/// A collector running on an OS-assigned local port.
pub struct TestCollector {
    pub base: String,
    pub gateway: Gateway,
    shutdown: Shutdown,
    handle: JoinHandle<Result<(), std::io::Error>>,
}

impl TestCollector {
    /// Stop the server, wait for it to drain, then release the store.
    pub async fn stop(self) -> Result<(), StoreError> {
        self.shutdown.trigger();
        let _ = self.handle.await;
        self.gateway.shutdown().await
    }
}

/// Start a collector over `store` with the given configuration.
pub async fn spawn_collector(
    config: CollectorConfig,
    store: Arc<dyn DocumentStore>,
    mode: StoreMode,
) -> TestCollector {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let base = format!("http://{}", listener.local_addr().unwrap());

    let gateway = Gateway::new(store, mode);
    let server = CollectorServer::new(config, gateway.clone());
    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    let handle = tokio::spawn(server.run(listener, server_shutdown));

    TestCollector {
        base,
        gateway,
        shutdown,
        handle,
    }
}

/// Start a collector with default configuration over a fresh in-memory store.
#[allow(dead_code)]
pub async fn spawn_default() -> (TestCollector, MemoryStore) {
    let store = MemoryStore::new();
    let collector = spawn_collector(
        CollectorConfig::default(),
        Arc::new(store.clone()),
        StoreMode::Persistent,
    )
    .await;
    (collector, store)
}

/// HTTP client that ignores proxy settings from the environment.
pub fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .pool_max_idle_per_host(0)
        .no_proxy()
        .build()
        .unwrap()
}

/// A store whose inserts into one collection always fail.
#[allow(dead_code)]
pub struct FailingStore {
    pub failing_collection: &'static str,
    pub inner: MemoryStore,
}

#[async_trait]
impl DocumentStore for FailingStore {
    fn backend_name(&self) -> &'static str {
        "failing"
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }

    async fn insert_one(
        &self,
        collection: &str,
        document: Document,
    ) -> Result<DocumentId, StoreError> {
        if collection == self.failing_collection {
            return Err(StoreError::Write {
                collection: collection.to_string(),
                reason: "injected failure".to_string(),
            });
        }
        self.inner.insert_one(collection, document).await
    }

    async fn drop_collection(&self, collection: &str) -> Result<(), StoreError> {
        self.inner.drop_collection(collection).await
    }

    async fn disconnect(&self) -> Result<(), StoreError> {
        Ok(())
    }
}
