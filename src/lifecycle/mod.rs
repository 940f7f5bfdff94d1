//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup (main.rs):
//!     Load config → Validate → Connect store → Bind listener → Serve
//!
//! Shutdown:
//!     signals.rs (SIGTERM/SIGINT) → shutdown.rs flag
//!     → server drains → store gateway cleans up and disconnects
//! ```
//!
//! # Design Decisions
//! - Fail fast: any startup error is fatal
//! - Store connects before the listener binds (traffic only when ready)

pub mod shutdown;
pub mod signals;

pub use shutdown::{Shutdown, ShutdownListener};
