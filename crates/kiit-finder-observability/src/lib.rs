//! KIIT Finder Observability
//!
//! Console (and optionally file) logging for the KIIT Finder client.
//!
//! # Examples
//!
//! ```no_run
//! use kiit_finder_observability::init_logging;
//!
//! let _guard = init_logging();
//! tracing::info!("client started");
//! ```

pub mod logging;

pub use logging::{LoggingGuard, init_logging};
