//! Claims carried in a KIIT Finder session token.
//!
//! Wire keys follow the JWT registered names: `sub`, `role`, `iat`, `exp`.
//! Only `role` and `exp` are required for a token to be usable on the client.

use serde::{Deserialize, Serialize};

use kiit_finder_core::Role;
use kiit_finder_core::serde::deserialize_string_or_number;

/// Claims payload of a session token.
///
/// # Fields
///
/// - `sub`: user identifier (subject), empty when the issuer omits it
/// - `role`: account role, the only source of truth for access control
/// - `iat`: issued-at timestamp (Unix seconds), if present
/// - `exp`: expiration timestamp (Unix seconds)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// User ID (subject claim)
    #[serde(default, deserialize_with = "deserialize_string_or_number")]
    pub sub: String,
    /// Account role
    pub role: Role,
    /// Token issued-at timestamp (Unix timestamp)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iat: Option<i64>,
    /// Token expiration timestamp (Unix timestamp)
    pub exp: i64,
}

impl Claims {
    /// True iff the token has not reached its expiry at `now`.
    pub fn is_live_at(&self, now: i64) -> bool {
        self.exp > now
    }

    /// `exp > iat` whenever `iat` is present.
    pub fn has_consistent_timestamps(&self) -> bool {
        self.iat.is_none_or(|iat| self.exp > iat)
    }

    pub fn role(&self) -> Role {
        self.role
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_claims_deserialize() {
        let json = r#"{"sub":"student@kiit.ac.in","role":"USER","iat":1700000000,"exp":1700003600}"#;
        let claims: Claims = serde_json::from_str(json).unwrap();
        assert_eq!(claims.sub, "student@kiit.ac.in");
        assert_eq!(claims.role, Role::User);
        assert_eq!(claims.iat, Some(1700000000));
        assert_eq!(claims.exp, 1700003600);
    }

    #[test]
    fn test_claims_deserialize_numeric_subject() {
        let json = r#"{"sub":17,"role":"ADMIN","exp":1700003600}"#;
        let claims: Claims = serde_json::from_str(json).unwrap();
        assert_eq!(claims.sub, "17");
        assert_eq!(claims.iat, None);
    }

    #[test]
    fn test_claims_missing_role_rejected() {
        let json = r#"{"sub":"1","exp":1700003600}"#;
        assert!(serde_json::from_str::<Claims>(json).is_err());
    }

    #[test]
    fn test_claims_missing_exp_rejected() {
        let json = r#"{"sub":"1","role":"USER"}"#;
        assert!(serde_json::from_str::<Claims>(json).is_err());
    }

    #[test]
    fn test_claims_serialize_omits_missing_iat() {
        let claims = Claims {
            sub: "9".to_string(),
            role: Role::Admin,
            iat: None,
            exp: 1234567890,
        };
        let serialized = serde_json::to_string(&claims).unwrap();
        assert!(serialized.contains(r#""role":"ADMIN""#));
        assert!(!serialized.contains("iat"));
    }

    #[test]
    fn test_liveness_boundary() {
        let claims = Claims {
            sub: "1".to_string(),
            role: Role::User,
            iat: Some(100),
            exp: 200,
        };
        assert!(claims.is_live_at(199));
        assert!(!claims.is_live_at(200));
        assert!(!claims.is_live_at(201));
    }

    #[test]
    fn test_timestamp_consistency() {
        let mut claims = Claims {
            sub: "1".to_string(),
            role: Role::User,
            iat: Some(100),
            exp: 200,
        };
        assert!(claims.has_consistent_timestamps());
        claims.iat = Some(200);
        assert!(!claims.has_consistent_timestamps());
        claims.iat = None;
        assert!(claims.has_consistent_timestamps());
    }
}
