//! Authentication DTOs.
//!
//! Bodies for `POST /auth/login` and `POST /auth/register` and the shared
//! `{token, user}` response both endpoints return.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::users::UserProfile;

/// Login request with email and password.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email(message = "Email must be a valid address"))]
    pub email: String,
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Registration request for a new account.
///
/// `role` is optional and forwarded as-is for backend compatibility; the
/// server decides the role that ends up in the issued token.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,
    #[validate(email(message = "Email must be a valid address"))]
    pub email: String,
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
}

/// Successful login or registration response.
///
/// The embedded `user` is informational; the profile is always fetched again
/// with the new token before a session is stored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthResponse {
    pub token: String,
    #[serde(default)]
    pub user: Option<UserProfile>,
}
