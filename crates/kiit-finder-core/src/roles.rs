//! Role hierarchy for access control.
//!
//! KIIT Finder has exactly two roles. They form a total order so that a
//! single comparison answers every access question:
//!
//! ```text
//! ADMIN  (moderates items and users)
//!   ↑ satisfies everything below
//! USER   (reports and manages own items)
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A KIIT Finder account role.
///
/// Variant order is the privilege order: `User < Admin`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Role {
    User,
    Admin,
}

impl Role {
    /// Wire representation (`"USER"` / `"ADMIN"`).
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "USER",
            Role::Admin => "ADMIN",
        }
    }

    /// Hierarchy level of a role (higher number = more privileges).
    pub fn level(&self) -> u8 {
        match self {
            Role::User => 0,
            Role::Admin => 1,
        }
    }

    /// Returns true if this role grants at least the access of `required`.
    ///
    /// ```ignore
    /// assert!(Role::Admin.satisfies(Role::User));
    /// assert!(!Role::User.satisfies(Role::Admin));
    /// ```
    pub fn satisfies(&self, required: Role) -> bool {
        self.level() >= required.level()
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a string is not a known role.
///
/// Parsing is case-insensitive and tolerates the `ROLE_` prefix some
/// backends put on authorities.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Invalid role: {0}")]
pub struct ParseRoleError(pub String);

impl FromStr for Role {
    type Err = ParseRoleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_uppercase();
        match normalized.strip_prefix("ROLE_").unwrap_or(&normalized) {
            "USER" => Ok(Role::User),
            "ADMIN" => Ok(Role::Admin),
            _ => Err(ParseRoleError(s.to_string())),
        }
    }
}

impl Serialize for Role {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Role {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}
