//! HTTP client wrapper for the KIIT Finder API.
//!
//! [`ApiClient`] is the single place where the backend is called. It:
//!
//! - attaches `Authorization: Bearer <token>` from the session store
//! - maps transport failures and error statuses to [`ClientError`]
//! - raises the matching user notification
//! - on any 401, clears the stored session; outside sign-in it also sends
//!   the user to login
//!
//! Side effects never swallow the error: the mapped [`ClientError`] is always
//! returned so the calling flow can react too.

use std::sync::Arc;
use std::time::Instant;

use parking_lot::Mutex;
use reqwest::{Method, Response, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, error, info, warn};

use kiit_finder_config::ApiConfig;
use kiit_finder_core::ClientError;

use super::navigation::Navigator;
use super::notify::{Notification, Notifier};
use crate::session::SessionStore;

/// Which credentials a request carries.
#[derive(Debug, Clone, Copy)]
pub enum RequestAuth<'a> {
    /// The token currently held by the session store, if any.
    Session,
    /// An explicit token that is not (yet) stored.
    Bearer(&'a str),
    /// No credentials (login, registration).
    Anonymous,
}

pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    login_path: String,
    store: Arc<SessionStore>,
    notifier: Arc<dyn Notifier>,
    navigator: Arc<dyn Navigator>,
    redirect_lock: Mutex<()>,
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.base_url)
            .field("login_path", &self.login_path)
            .finish_non_exhaustive()
    }
}

impl ApiClient {
    /// Creates a client with the configured base URL and fixed timeout.
    ///
    /// Requests are never retried; a timeout is reported once as a
    /// connectivity failure.
    pub fn new(
        config: &ApiConfig,
        login_path: impl Into<String>,
        store: Arc<SessionStore>,
        notifier: Arc<dyn Notifier>,
        navigator: Arc<dyn Navigator>,
    ) -> Result<Self, ClientError> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout())
            .user_agent(concat!("kiit-finder/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| ClientError::Connectivity(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            login_path: login_path.into(),
            store,
            notifier,
            navigator,
            redirect_lock: Mutex::new(()),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// `GET path` with the session token, decoding a JSON body.
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ClientError> {
        self.request(Method::GET, path, None::<&()>, RequestAuth::Session)
            .await
    }

    /// `GET path` authenticated with an explicit token.
    pub async fn get_with_token<T: DeserializeOwned>(
        &self,
        path: &str,
        token: &str,
    ) -> Result<T, ClientError> {
        self.request(Method::GET, path, None::<&()>, RequestAuth::Bearer(token))
            .await
    }

    /// `POST path` with a JSON body and the session token.
    pub async fn post<B, T>(&self, path: &str, body: &B) -> Result<T, ClientError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.request(Method::POST, path, Some(body), RequestAuth::Session)
            .await
    }

    /// `POST path` with a JSON body and no credentials.
    pub async fn post_anonymous<B, T>(&self, path: &str, body: &B) -> Result<T, ClientError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.request(Method::POST, path, Some(body), RequestAuth::Anonymous)
            .await
    }

    /// `DELETE path` with the session token, ignoring any response body.
    pub async fn delete(&self, path: &str) -> Result<(), ClientError> {
        self.execute(Method::DELETE, path, None::<&()>, RequestAuth::Session)
            .await
            .map(|_| ())
    }

    /// Sends a request and decodes a JSON success body into `T`.
    pub async fn request<B, T>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
        auth: RequestAuth<'_>,
    ) -> Result<T, ClientError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let response = self.execute(method, path, body, auth).await?;
        response.json::<T>().await.map_err(|e| {
            if e.is_decode() {
                warn!(path, error = %e, "Unexpected response body");
                ClientError::Decode(e.to_string())
            } else {
                self.transport_failure(path, &e)
            }
        })
    }

    async fn execute<B>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
        auth: RequestAuth<'_>,
    ) -> Result<Response, ClientError>
    where
        B: Serialize + ?Sized,
    {
        let url = format!("{}/{}", self.base_url, path.trim_start_matches('/'));
        let mut builder = self.http.request(method.clone(), &url);

        let token = match auth {
            RequestAuth::Session => self.store.read_token(),
            RequestAuth::Bearer(token) => Some(token.to_string()),
            RequestAuth::Anonymous => None,
        };
        if let Some(token) = token {
            builder = builder.bearer_auth(token);
        }
        if let Some(body) = body {
            builder = builder.json(body);
        }

        let start = Instant::now();
        let response = match builder.send().await {
            Ok(response) => response,
            Err(e) => return Err(self.transport_failure(path, &e)),
        };

        let status = response.status();
        log_response(&method, path, status, start.elapsed().as_millis() as u64);

        if status.is_success() {
            return Ok(response);
        }

        let message = read_server_message(response).await;
        Err(self.map_error_status(status, message, auth))
    }

    fn transport_failure(&self, path: &str, err: &reqwest::Error) -> ClientError {
        let description = if err.is_timeout() {
            "The server took too long to respond. Please try again."
        } else {
            "Unable to connect to server. Please check your internet connection."
        };
        warn!(path, error = %err, timeout = err.is_timeout(), "Request failed without a response");
        self.notifier
            .notify(Notification::destructive("Connection Error", description));
        ClientError::Connectivity(err.to_string())
    }

    fn map_error_status(
        &self,
        status: StatusCode,
        message: Option<String>,
        auth: RequestAuth<'_>,
    ) -> ClientError {
        match status {
            StatusCode::UNAUTHORIZED => match auth {
                RequestAuth::Session => {
                    self.expire_session();
                    ClientError::Unauthorized(
                        message.unwrap_or_else(|| "Authentication required".to_string()),
                    )
                }
                RequestAuth::Anonymous => {
                    // A failed sign-in ends whatever session was stored before it.
                    if let Err(e) = self.store.clear() {
                        warn!(error = %e, "Failed to clear session after rejected sign-in");
                    }
                    let description =
                        message.unwrap_or_else(|| "Invalid email or password.".to_string());
                    self.notifier
                        .notify(Notification::destructive("Login Failed", description.clone()));
                    ClientError::Credential(description)
                }
                // The rejected token was never stored, so there is no session to expire.
                RequestAuth::Bearer(_) => ClientError::Unauthorized(
                    message.unwrap_or_else(|| "Token rejected".to_string()),
                ),
            },
            StatusCode::FORBIDDEN => {
                self.notifier.notify(Notification::destructive(
                    "Access Denied",
                    "You don't have permission to perform this action.",
                ));
                ClientError::Permission(message.unwrap_or_else(|| "Forbidden".to_string()))
            }
            StatusCode::NOT_FOUND => {
                let description = message.unwrap_or_else(|| generic_message(status).to_string());
                self.notifier
                    .notify(Notification::destructive("Not Found", description.clone()));
                ClientError::NotFound(description)
            }
            StatusCode::UNPROCESSABLE_ENTITY => {
                let description = message.unwrap_or_else(|| generic_message(status).to_string());
                self.notifier
                    .notify(Notification::destructive("Validation Error", description.clone()));
                ClientError::Validation(description)
            }
            _ => {
                let title = if status == StatusCode::INTERNAL_SERVER_ERROR {
                    "Server Error"
                } else {
                    "Error"
                };
                let description = message.unwrap_or_else(|| generic_message(status).to_string());
                self.notifier
                    .notify(Notification::destructive(title, description.clone()));
                ClientError::Server {
                    status: status.as_u16(),
                    message: description,
                }
            }
        }
    }

    /// Clears the rejected session and sends the user to the login view.
    fn expire_session(&self) {
        if let Err(e) = self.store.clear() {
            warn!(error = %e, "Failed to clear rejected session");
        }
        self.notifier.notify(Notification::destructive(
            "Session Expired",
            "Please log in again to continue.",
        ));
        self.redirect_to_login();
    }

    /// Redirects to login unless already there. Check and redirect happen
    /// under one lock so concurrent 401s navigate once.
    fn redirect_to_login(&self) {
        let _guard = self.redirect_lock.lock();
        let current = self.navigator.current_location();
        let current_path = current.split('?').next().unwrap_or_default();
        if current_path == self.login_path {
            debug!(location = %current, "Already on login view, skipping redirect");
            return;
        }
        info!(from = %current, to = %self.login_path, "Redirecting to login");
        self.navigator.navigate(&self.login_path, Some(&current));
    }
}

fn log_response(method: &Method, path: &str, status: StatusCode, latency_ms: u64) {
    match status.as_u16() {
        400..=499 => warn!(
            method = %method,
            path,
            status = status.as_u16(),
            latency_ms,
            "Client error"
        ),
        500..=599 => error!(
            method = %method,
            path,
            status = status.as_u16(),
            latency_ms,
            "Server error"
        ),
        _ => debug!(
            method = %method,
            path,
            status = status.as_u16(),
            latency_ms,
            "Request completed"
        ),
    }
}

/// Server-supplied `message` (or `error`) field of a JSON error body.
async fn read_server_message(response: Response) -> Option<String> {
    let body = response.text().await.ok()?;
    let value: serde_json::Value = serde_json::from_str(&body).ok()?;
    ["message", "error"]
        .iter()
        .find_map(|key| value.get(*key).and_then(|v| v.as_str()))
        .map(str::trim)
        .filter(|message| !message.is_empty())
        .map(str::to_string)
}

fn generic_message(status: StatusCode) -> &'static str {
    match status.as_u16() {
        404 => "The requested resource was not found.",
        422 => "Please check your input and try again.",
        500 => "Something went wrong on our end. Please try again later.",
        400..=499 => "The request could not be completed.",
        500..=599 => "The server is unavailable right now. Please try again later.",
        _ => "An unexpected error occurred.",
    }
}
