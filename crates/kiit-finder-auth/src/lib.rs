//! # KIIT Finder Auth
//!
//! Session token claims and the client-side token codec.
//!
//! - [`claims`]: the claims payload embedded in a session token
//! - [`codec`]: decode-and-inspect helpers for stored tokens
//!
//! # Liveness, not authenticity
//!
//! The client holds no verification key. Decoding here answers "is this
//! token well-formed and not yet expired?" and nothing more. Every API call
//! is still authenticated by the server, which is the only party able to
//! check the signature.
//!
//! # Example
//!
//! ```ignore
//! use kiit_finder_auth::{decode_claims, is_live, now_unix};
//!
//! if let Some(claims) = decode_claims(&token) {
//!     if is_live(&claims, now_unix()) {
//!         println!("signed in as {} ({})", claims.sub, claims.role);
//!     }
//! }
//! ```

pub mod claims;
pub mod codec;

// Re-export commonly used types at crate root
pub use claims::Claims;
pub use codec::{decode_claims, inspect, is_live, now_unix};
