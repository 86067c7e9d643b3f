//! # KIIT Finder Config
//!
//! Configuration structures for the KIIT Finder client, loaded from
//! environment variables:
//!
//! - [`api`]: backend base URL and request timeout
//! - [`session`]: session file location and the login/landing view paths
//!
//! # Example
//!
//! ```ignore
//! use kiit_finder_config::{ApiConfig, SessionConfig};
//!
//! let api_config = ApiConfig::from_env();
//! let session_config = SessionConfig::from_env();
//! ```

pub mod api;
pub mod session;

// Re-export commonly used types at crate root
pub use api::ApiConfig;
pub use session::SessionConfig;
