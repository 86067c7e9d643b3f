//! Client error taxonomy.
//!
//! Network and server failures are mapped once, centrally, by the HTTP client
//! and then returned to the caller so the calling flow can react as well.
//! Token and storage failures originate locally.

use thiserror::Error;

/// Failure to decode or accept a session token on the client.
///
/// The client never checks signatures; these errors only describe shape and
/// liveness.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TokenError {
    #[error("Session token is malformed")]
    Malformed,

    #[error("Session token expired at {expired_at}")]
    Expired { expired_at: i64 },
}

/// Failure of the client-local key/value storage.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Storage serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Storage unavailable: {0}")]
    Unavailable(String),
}

/// Every error a KIIT Finder client operation can return.
#[derive(Debug, Error)]
pub enum ClientError {
    /// No response reached us (connect failure, timeout).
    #[error("Unable to connect to server: {0}")]
    Connectivity(String),

    /// The server rejected the submitted credentials (401 on login).
    #[error("Invalid credentials: {0}")]
    Credential(String),

    /// Registration for an identity that already exists (409).
    #[error("Account already exists: {0}")]
    DuplicateAccount(String),

    #[error(transparent)]
    Token(#[from] TokenError),

    /// The authenticated profile call right after sign-in failed.
    #[error("Failed to fetch profile after sign-in: {0}")]
    ProfileFetch(#[source] Box<ClientError>),

    /// Authenticated but not allowed (403).
    #[error("Permission denied: {0}")]
    Permission(String),

    #[error(transparent)]
    Storage(#[from] StorageError),

    /// Rejected input, either pre-flight or by the server (422).
    #[error("Validation failed: {0}")]
    Validation(String),

    /// 401 on any call other than login: the session is no longer accepted.
    #[error("Session expired: {0}")]
    Unauthorized(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Server returned {status}: {message}")]
    Server { status: u16, message: String },

    /// A success response whose body could not be read as expected.
    #[error("Unexpected response body: {0}")]
    Decode(String),
}

impl ClientError {
    /// HTTP status the error was mapped from, if it came from a response.
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Credential(_) | ClientError::Unauthorized(_) => Some(401),
            ClientError::Permission(_) => Some(403),
            ClientError::NotFound(_) => Some(404),
            ClientError::DuplicateAccount(_) => Some(409),
            ClientError::Server { status, .. } => Some(*status),
            ClientError::ProfileFetch(inner) => inner.status(),
            _ => None,
        }
    }
}
