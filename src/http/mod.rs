//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, request ID, tracing, CORS headers)
//!     → request.rs (access log)
//!     → ingest::handler (validate, persist)
//!     → response.rs (outcome body)
//!     → Send to client
//! ```

pub mod request;
pub mod response;
pub mod server;

pub use request::X_REQUEST_ID;
pub use response::Outcome;
pub use server::{build_router, AppState, CollectorServer};
