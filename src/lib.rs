//! Pinger collector library.
//!
//! Accepts machine identity submissions over HTTP and stores each one as a
//! `minimal` and a `full` document.

pub mod config;
pub mod http;
pub mod ingest;
pub mod lifecycle;
pub mod observability;
pub mod store;

pub use config::CollectorConfig;
pub use http::CollectorServer;
pub use lifecycle::Shutdown;
pub use store::{DocumentStore, Gateway};
