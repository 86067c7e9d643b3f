//! User profile model.

use serde::{Deserialize, Serialize};

use kiit_finder_core::Role;

/// A KIIT Finder account as returned by the backend.
///
/// Cached on the client for display. Access decisions never read `role` from
/// here; they re-derive it from the current session token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub role: Role,
}
