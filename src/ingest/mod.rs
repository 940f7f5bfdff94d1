//! Submission ingestion subsystem.
//!
//! # Data Flow
//! ```text
//! POST body
//!     → submission.rs (strict decode into Submission)
//!     → validation.rs (required fields, length bound)
//!     → handler.rs (log, split into minimal/full, persist via store::Gateway)
//!     → rejection.rs (failure → status + body)
//! ```

pub mod handler;
pub mod rejection;
pub mod submission;
pub mod validation;

pub use rejection::Rejection;
pub use submission::{FullIdentity, MinimalIdentity, Submission};
