//! winddown: graceful shutdown coordination for Tokio applications
//!
//! When the first configured termination signal arrives, winddown fans out a
//! set of named cleanup operations (closing connection pools, flushing
//! queues), waits for all of them to finish, and fires a fallback action if a
//! grace period elapses first.
//!
//! - Operations run concurrently, with no ordering and no mutual visibility
//! - Each operation gets exactly one attempt; a failure is reported through
//!   the failure observer and never aborts its siblings
//! - The grace-period fallback is an escape hatch, commonly forced process
//!   exit; it does not cancel in-flight operations
//!
//! Signal handling targets Unix platforms.
//!
//! # Example
//!
//! ```rust,no_run
//! use std::collections::HashMap;
//! use std::time::Duration;
//!
//! use tokio_util::sync::CancellationToken;
//! use winddown::{graceful, Operation, ShutdownOptions};
//!
//! #[tokio::main]
//! async fn main() {
//!     let mut ops = HashMap::new();
//!     ops.insert(
//!         "postgres".to_string(),
//!         Operation::new(|_ctx| async {
//!             // close the connection pool here
//!             Ok(())
//!         }),
//!     );
//!
//!     let done = graceful(
//!         CancellationToken::new(),
//!         ops,
//!         ShutdownOptions::new()
//!             .grace_period(Duration::from_secs(5))
//!             .on_timeout(|| std::process::exit(1)),
//!     );
//!
//!     // ... run the application ...
//!
//!     done.wait().await;
//! }
//! ```

#![deny(warnings)]

pub mod coordinator;
pub mod operation;
pub mod options;
pub mod signal;

// Re-export core types
pub use coordinator::{graceful, Completion};
pub use operation::{OpError, Operation};
pub use options::ShutdownOptions;
pub use signal::SignalError;
