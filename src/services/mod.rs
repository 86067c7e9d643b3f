//! Client services built on the session store and the API client.

pub mod auth;

pub use auth::{AuthService, SessionState};
