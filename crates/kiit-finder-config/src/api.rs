use std::env;
use std::time::Duration;

/// Backend connection settings.
///
/// # Environment Variables
///
/// - `KIIT_API_BASE_URL`: API root (default: `http://localhost:8080/api`)
/// - `KIIT_API_TIMEOUT_SECS`: per-request timeout in seconds (default: `10`)
#[derive(Clone, Debug)]
pub struct ApiConfig {
    pub base_url: String,
    pub timeout_secs: u64,
}

impl ApiConfig {
    pub fn from_env() -> Self {
        Self {
            base_url: env::var("KIIT_API_BASE_URL")
                .map(|url| url.trim_end_matches('/').to_string())
                .unwrap_or_else(|_| "http://localhost:8080/api".to_string()),
            timeout_secs: env::var("KIIT_API_TIMEOUT_SECS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(10),
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8080/api".into(),
            timeout_secs: 10,
        }
    }
}
