//! Client-local session persistence.
//!
//! - [`storage`]: the [`SessionStorage`] backend trait with memory and file implementations
//! - [`store`]: [`SessionStore`], the token + profile pair on top of a backend
//!
//! Persisted layout: key `token` holds the raw bearer token, key `user` holds
//! the profile as JSON.

pub mod storage;
pub mod store;

pub use storage::{FileStorage, MemoryStorage, SessionStorage};
pub use store::{PROFILE_KEY, SessionStore, TOKEN_KEY};
