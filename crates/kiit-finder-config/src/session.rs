use std::env;
use std::path::PathBuf;

/// Client session settings.
///
/// # Environment Variables
///
/// - `KIIT_SESSION_FILE`: where the CLI persists the session (default: `.kiit-finder/session.json`)
/// - `KIIT_LOGIN_PATH`: location of the login view (default: `/auth`)
/// - `KIIT_LANDING_PATH`: default view for signed-in users (default: `/dashboard`)
#[derive(Clone, Debug)]
pub struct SessionConfig {
    pub session_file: PathBuf,
    pub login_path: String,
    pub landing_path: String,
}

impl SessionConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            session_file: env::var("KIIT_SESSION_FILE")
                .map(PathBuf::from)
                .unwrap_or(defaults.session_file),
            login_path: env::var("KIIT_LOGIN_PATH").unwrap_or(defaults.login_path),
            landing_path: env::var("KIIT_LANDING_PATH").unwrap_or(defaults.landing_path),
        }
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            session_file: PathBuf::from(".kiit-finder/session.json"),
            login_path: "/auth".into(),
            landing_path: "/dashboard".into(),
        }
    }
}
