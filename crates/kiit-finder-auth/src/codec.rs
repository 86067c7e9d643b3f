//! Client-side session token codec.
//!
//! A session token is three dot-separated base64url segments: header,
//! claims, signature. Only the claims segment is read. The signature is
//! never checked here (there is no key on the client), so a decoded token is
//! "well-formed", never "authentic".
//!
//! All functions are pure. Every failure path returns `None` or a
//! [`TokenError`]; nothing here panics on untrusted input.

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use chrono::Utc;
use tracing::debug;

use kiit_finder_core::TokenError;

use crate::claims::Claims;

/// Current time as Unix seconds.
pub fn now_unix() -> i64 {
    Utc::now().timestamp()
}

/// Decodes the claims payload of `token` without verifying its signature.
///
/// Returns `None` if:
/// - the token does not have exactly three segments
/// - the claims segment is not valid base64url
/// - the decoded bytes are not a JSON object with `role` and `exp`
/// - the role is unknown, or `exp <= iat`
///
/// # Example
///
/// ```ignore
/// let claims = decode_claims(&token).ok_or(TokenError::Malformed)?;
/// println!("role: {}", claims.role);
/// ```
pub fn decode_claims(token: &str) -> Option<Claims> {
    match decode_payload(token) {
        Ok(claims) => Some(claims),
        Err(reason) => {
            debug!(reason, "Rejected session token");
            None
        }
    }
}

/// True iff the claims are not expired at `now` (Unix seconds).
pub fn is_live(claims: &Claims, now: i64) -> bool {
    claims.is_live_at(now)
}

/// Decodes `token` and checks it is live at `now`.
///
/// Used where the caller needs to tell a malformed token from an expired one,
/// e.g. when accepting a freshly issued token at sign-in.
///
/// # Errors
///
/// - [`TokenError::Malformed`] when [`decode_claims`] would return `None`
/// - [`TokenError::Expired`] when the token decodes but `exp <= now`
pub fn inspect(token: &str, now: i64) -> Result<Claims, TokenError> {
    let claims = decode_claims(token).ok_or(TokenError::Malformed)?;
    if !is_live(&claims, now) {
        return Err(TokenError::Expired {
            expired_at: claims.exp,
        });
    }
    Ok(claims)
}

fn decode_payload(token: &str) -> Result<Claims, &'static str> {
    let segments: Vec<&str> = token.trim().split('.').collect();
    if segments.len() != 3 {
        return Err("token must have exactly three segments");
    }

    let payload = segments[1].trim_end_matches('=');
    if payload.is_empty() {
        return Err("claims segment is empty");
    }

    let bytes = URL_SAFE_NO_PAD
        .decode(payload)
        .map_err(|_| "claims segment is not base64url")?;

    let value: serde_json::Value =
        serde_json::from_slice(&bytes).map_err(|_| "claims segment is not JSON")?;
    if !value.is_object() {
        return Err("claims segment is not a JSON object");
    }

    let claims: Claims =
        serde_json::from_value(value).map_err(|_| "claims are missing role or exp")?;
    if !claims.has_consistent_timestamps() {
        return Err("claims expire before they were issued");
    }

    Ok(claims)
}
