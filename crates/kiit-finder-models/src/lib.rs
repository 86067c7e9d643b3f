//! # KIIT Finder Models
//!
//! Request and response bodies exchanged with the KIIT Finder backend.
//!
//! - [`auth`]: login and registration requests, the token/user response
//! - [`users`]: the user profile returned by `/users/profile`

pub mod auth;
pub mod users;

pub use auth::{AuthResponse, LoginRequest, RegisterRequest};
pub use users::UserProfile;
