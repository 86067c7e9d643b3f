//! # KIIT Finder Core
//!
//! Core types and errors shared by every KIIT Finder client crate.
//!
//! - [`errors`]: the client error taxonomy ([`ClientError`], [`TokenError`], [`StorageError`])
//! - [`roles`]: the two-level [`Role`] hierarchy used for access decisions
//! - [`serde`]: custom serde deserialization helpers
//!
//! # Example
//!
//! ```ignore
//! use kiit_finder_core::{ClientError, Role};
//!
//! assert!(Role::Admin.satisfies(Role::User));
//! let err = ClientError::Permission("admin only".to_string());
//! ```

pub mod errors;
pub mod roles;
pub mod serde;

// Re-export commonly used types at crate root
pub use errors::{ClientError, StorageError, TokenError};
pub use roles::Role;
