//! Route guard for protected views
//!
//! [`RouteGuard`] decides whether a view may render for the current session:
//!
//! 1. No live session: send the user to login, remembering where they were going
//! 2. Live session without the required role: send them to the landing view
//!    with an "Access Denied" notice
//! 3. Otherwise render
//!
//! Any leftover session state (an expired or unreadable token, a profile
//! with no token) is cleared through [`AuthService::logout`] before
//! redirecting to login.
//!
//! # Example
//!
//! ```rust,ignore
//! let guard = RouteGuard::new(auth, navigator, notifier, &session_config);
//! if guard.enforce("/admin/users", Some(Role::Admin)) {
//!     render_admin_users();
//! }
//! ```

use std::sync::Arc;

use tracing::{debug, info, warn};

use kiit_finder_config::SessionConfig;
use kiit_finder_core::Role;

use crate::http::{Navigator, Notification, Notifier};
use crate::services::AuthService;

/// Outcome of a guard check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardDecision {
    Render,
    RedirectToLogin { return_to: String },
    RedirectToLanding { notice: Notification },
}

pub struct RouteGuard {
    auth: Arc<AuthService>,
    navigator: Arc<dyn Navigator>,
    notifier: Arc<dyn Notifier>,
    login_path: String,
    landing_path: String,
}

impl std::fmt::Debug for RouteGuard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RouteGuard")
            .field("login_path", &self.login_path)
            .field("landing_path", &self.landing_path)
            .finish_non_exhaustive()
    }
}

impl RouteGuard {
    pub fn new(
        auth: Arc<AuthService>,
        navigator: Arc<dyn Navigator>,
        notifier: Arc<dyn Notifier>,
        config: &SessionConfig,
    ) -> Self {
        Self {
            auth,
            navigator,
            notifier,
            login_path: config.login_path.clone(),
            landing_path: config.landing_path.clone(),
        }
    }

    pub fn login_path(&self) -> &str {
        &self.login_path
    }

    pub fn landing_path(&self) -> &str {
        &self.landing_path
    }

    /// Decides access to `requested` for the current session.
    ///
    /// The only side effect is the self-heal logout on the way to login.
    pub fn check(&self, requested: &str, required: Option<Role>) -> GuardDecision {
        if !self.auth.is_authenticated() {
            if self.auth.has_stored_token() {
                info!(location = requested, "Stored session is no longer valid, signing out");
            }
            // Also drops a cached profile left behind without a usable token.
            self.auth.logout();
            return GuardDecision::RedirectToLogin {
                return_to: requested.to_string(),
            };
        }

        let Some(required) = required else {
            return GuardDecision::Render;
        };

        let Some(role) = self.auth.get_role() else {
            // Expired between the two reads.
            warn!(location = requested, "Session became invalid during route check");
            self.auth.logout();
            return GuardDecision::RedirectToLogin {
                return_to: requested.to_string(),
            };
        };

        if role.satisfies(required) {
            debug!(location = requested, %role, %required, "Route access granted");
            GuardDecision::Render
        } else {
            warn!(location = requested, %role, %required, "Route access denied");
            GuardDecision::RedirectToLanding {
                notice: Notification::destructive(
                    "Access Denied",
                    format!("This page requires the {} role.", required),
                ),
            }
        }
    }

    /// Runs [`RouteGuard::check`] and applies the decision through the
    /// navigator and notifier. Returns true when the view may render.
    pub fn enforce(&self, requested: &str, required: Option<Role>) -> bool {
        match self.check(requested, required) {
            GuardDecision::Render => true,
            GuardDecision::RedirectToLogin { return_to } => {
                self.navigator.navigate(&self.login_path, Some(&return_to));
                false
            }
            GuardDecision::RedirectToLanding { notice } => {
                self.notifier.notify(notice);
                self.navigator.navigate(&self.landing_path, None);
                false
            }
        }
    }
}
