use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{debug, error, info, instrument, warn};

use kiit_finder_auth::{Claims, decode_claims, inspect, is_live, now_unix};
use kiit_finder_core::{ClientError, Role};
use kiit_finder_models::{AuthResponse, LoginRequest, RegisterRequest, UserProfile};

use crate::http::{ApiClient, Notification, Notifier};
use crate::session::SessionStore;
use crate::validator::validate_request;

const LOGIN_PATH: &str = "/auth/login";
const REGISTER_PATH: &str = "/auth/register";
const PROFILE_PATH: &str = "/users/profile";

/// Authentication state derived from the stored token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Anonymous,
    Authenticated(Role),
}

/// Owns the session lifecycle: sign-in, registration, sign-out and the
/// role queries the route guard relies on.
///
/// Queries always re-derive the role from the stored token. The cached
/// profile is for display only.
pub struct AuthService {
    api: Arc<ApiClient>,
    store: Arc<SessionStore>,
    notifier: Arc<dyn Notifier>,
}

impl std::fmt::Debug for AuthService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthService")
            .field("api", &self.api)
            .finish_non_exhaustive()
    }
}

impl AuthService {
    pub fn new(
        api: Arc<ApiClient>,
        store: Arc<SessionStore>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            api,
            store,
            notifier,
        }
    }

    /// Exchanges credentials for a session.
    ///
    /// # Errors
    ///
    /// - [`ClientError::Validation`] before any request if the form is incomplete
    /// - [`ClientError::Credential`] if the server rejects the credentials
    /// - [`ClientError::Token`] if the issued token is malformed or already expired
    /// - [`ClientError::ProfileFetch`] if the profile cannot be loaded with the new token
    /// - [`ClientError::Storage`] if the session cannot be persisted
    ///
    /// On every error path nothing new is persisted.
    #[instrument(skip(self, request), fields(email = %request.email))]
    pub async fn login(&self, request: LoginRequest) -> Result<UserProfile, ClientError> {
        validate_request(&request)?;

        let response: AuthResponse = self.api.post_anonymous(LOGIN_PATH, &request).await?;
        let profile = self.establish_session(response).await?;

        info!(user_id = profile.id, role = %profile.role, "User logged in");
        Ok(profile)
    }

    /// Creates an account and signs in with the token the server issues.
    ///
    /// # Errors
    ///
    /// Same as [`AuthService::login`], plus [`ClientError::DuplicateAccount`]
    /// when the email is already registered.
    #[instrument(skip(self, request), fields(email = %request.email))]
    pub async fn register(&self, request: RegisterRequest) -> Result<UserProfile, ClientError> {
        validate_request(&request)?;

        let response: AuthResponse = self
            .api
            .post_anonymous(REGISTER_PATH, &request)
            .await
            .map_err(|e| match e {
                ClientError::Server {
                    status: 409,
                    message,
                } => ClientError::DuplicateAccount(message),
                other => other,
            })?;
        let profile = self.establish_session(response).await?;

        info!(user_id = profile.id, role = %profile.role, "User registered");
        Ok(profile)
    }

    /// Ends the session. Never fails: storage errors are logged and shown
    /// to the user, and the caller proceeds as signed out.
    #[instrument(skip(self))]
    pub fn logout(&self) {
        match self.store.clear() {
            Ok(()) => info!("User logged out"),
            Err(e) => {
                error!(error = %e, "Failed to clear session on logout");
                self.notifier.notify(Notification::destructive(
                    "Storage Error",
                    "Your session could not be fully removed from this device.",
                ));
            }
        }
    }

    /// True iff a stored token decodes and has not expired.
    pub fn is_authenticated(&self) -> bool {
        self.live_claims().is_some()
    }

    /// Role from the stored token; `None` when the token is absent,
    /// malformed or expired.
    pub fn get_role(&self) -> Option<Role> {
        self.live_claims().map(|claims| claims.role())
    }

    pub fn state(&self) -> SessionState {
        match self.get_role() {
            Some(role) => SessionState::Authenticated(role),
            None => SessionState::Anonymous,
        }
    }

    /// Claims of the stored token whether or not it is still live.
    pub fn stored_claims(&self) -> Option<Claims> {
        self.store.read_token().as_deref().and_then(decode_claims)
    }

    /// Expiry of the stored token, live or not.
    pub fn session_expires_at(&self) -> Option<DateTime<Utc>> {
        self.stored_claims()
            .and_then(|claims| DateTime::from_timestamp(claims.exp, 0))
    }

    /// True if any token is stored, usable or not.
    pub fn has_stored_token(&self) -> bool {
        self.store.read_token().is_some()
    }

    /// Cached profile for display. Never use it for access decisions.
    pub fn current_profile_from_cache(&self) -> Option<UserProfile> {
        self.store.read_profile()
    }

    fn live_claims(&self) -> Option<Claims> {
        self.stored_claims().filter(|claims| is_live(claims, now_unix()))
    }

    /// Validates the issued token, loads the profile with it and persists
    /// both. The token is not stored until the profile is in hand.
    async fn establish_session(&self, response: AuthResponse) -> Result<UserProfile, ClientError> {
        let AuthResponse { token, user } = response;

        let claims = inspect(&token, now_unix()).map_err(|e| {
            warn!(error = %e, "Server issued an unusable session token");
            ClientError::Token(e)
        })?;

        let profile: UserProfile = self
            .api
            .get_with_token(PROFILE_PATH, &token)
            .await
            .map_err(|e| {
                warn!(error = %e, "Profile fetch failed, discarding token");
                ClientError::ProfileFetch(Box::new(e))
            })?;

        if let Some(embedded) = user.filter(|embedded| embedded.id != profile.id) {
            warn!(
                embedded_id = embedded.id,
                profile_id = profile.id,
                "Auth response user differs from fetched profile"
            );
        }
        if profile.role != claims.role() {
            debug!(
                token_role = %claims.role(),
                profile_role = %profile.role,
                "Cached profile role differs from token role"
            );
        }

        if let Err(e) = self.store.write_session(&token, &profile) {
            self.notifier.notify(Notification::destructive(
                "Storage Error",
                "Your session could not be saved on this device.",
            ));
            return Err(ClientError::Storage(e));
        }

        Ok(profile)
    }
}
