//! The session store: token and cached profile on top of [`SessionStorage`].

use std::sync::Arc;

use parking_lot::Mutex;
use tracing::{debug, error, warn};

use kiit_finder_core::StorageError;
use kiit_finder_models::UserProfile;

use super::storage::SessionStorage;

/// Storage key of the raw bearer token.
pub const TOKEN_KEY: &str = "token";
/// Storage key of the cached profile JSON.
pub const PROFILE_KEY: &str = "user";

/// Values some storage layers write when they stringify absence.
fn is_placeholder(value: &str) -> bool {
    let value = value.trim();
    value.is_empty() || value == "undefined" || value == "null"
}

/// Persists the session token and the cached user profile.
///
/// Token and profile are written and cleared as a pair. Reads are null-safe:
/// absence, placeholders and unreadable entries all come back as `None`.
pub struct SessionStore {
    storage: Arc<dyn SessionStorage>,
    lock: Mutex<()>,
}

impl std::fmt::Debug for SessionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionStore").finish_non_exhaustive()
    }
}

impl SessionStore {
    pub fn new(storage: Arc<dyn SessionStorage>) -> Self {
        Self {
            storage,
            lock: Mutex::new(()),
        }
    }

    /// Persists `token` and `profile` together.
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] if either write fails. In that case the
    /// previous token and profile are put back, so callers never observe a
    /// new token without its profile.
    pub fn write_session(&self, token: &str, profile: &UserProfile) -> Result<(), StorageError> {
        let profile_json = serde_json::to_string(profile)?;

        let _guard = self.lock.lock();
        let previous_token = self.storage.get(TOKEN_KEY)?;
        let previous_profile = self.storage.get(PROFILE_KEY)?;

        if let Err(e) = self.storage.set(TOKEN_KEY, token) {
            error!(error = %e, "Failed to persist session token");
            self.restore(TOKEN_KEY, previous_token.as_deref());
            return Err(e);
        }

        if let Err(e) = self.storage.set(PROFILE_KEY, &profile_json) {
            error!(error = %e, "Failed to persist user profile, rolling back token");
            self.restore(TOKEN_KEY, previous_token.as_deref());
            self.restore(PROFILE_KEY, previous_profile.as_deref());
            return Err(e);
        }

        debug!(user_id = profile.id, "Session written");
        Ok(())
    }

    /// The stored bearer token, exactly as written, if there is a usable one.
    ///
    /// Storage read failures are logged and reported as `None`.
    pub fn read_token(&self) -> Option<String> {
        let _guard = self.lock.lock();
        match self.storage.get(TOKEN_KEY) {
            Ok(Some(token)) if !is_placeholder(&token) => Some(token),
            Ok(_) => None,
            Err(e) => {
                warn!(error = %e, "Failed to read session token");
                None
            }
        }
    }

    /// The cached profile, if present and readable.
    ///
    /// An entry that is not a valid profile is logged and removed so the
    /// next read starts clean.
    pub fn read_profile(&self) -> Option<UserProfile> {
        let _guard = self.lock.lock();
        let raw = match self.storage.get(PROFILE_KEY) {
            Ok(Some(raw)) if !is_placeholder(&raw) => raw,
            Ok(_) => return None,
            Err(e) => {
                warn!(error = %e, "Failed to read cached profile");
                return None;
            }
        };

        match serde_json::from_str(&raw) {
            Ok(profile) => Some(profile),
            Err(e) => {
                warn!(error = %e, "Cached profile is corrupt, clearing it");
                if let Err(e) = self.storage.remove(PROFILE_KEY) {
                    warn!(error = %e, "Failed to clear corrupt profile");
                }
                None
            }
        }
    }

    /// Removes token and profile.
    ///
    /// Idempotent: clearing an empty store succeeds. Both removals are
    /// attempted even if the first fails; the first error is returned.
    pub fn clear(&self) -> Result<(), StorageError> {
        let _guard = self.lock.lock();
        let token_result = self.storage.remove(TOKEN_KEY);
        let profile_result = self.storage.remove(PROFILE_KEY);
        if let Err(e) = &token_result {
            warn!(error = %e, "Failed to remove session token");
        }
        if let Err(e) = &profile_result {
            warn!(error = %e, "Failed to remove cached profile");
        }
        token_result.and(profile_result)
    }

    fn restore(&self, key: &str, previous: Option<&str>) {
        let result = match previous {
            Some(value) => self.storage.set(key, value),
            None => self.storage.remove(key),
        };
        if let Err(e) = result {
            error!(key, error = %e, "Failed to restore previous session entry");
        }
    }
}
