#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::routing::{delete, get, post};
use axum::{Json, Router};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use serde_json::json;
use uuid::Uuid;

use kiit_finder::http::{MemoryNavigator, Notification, Notifier};
use kiit_finder::session::{MemoryStorage, SessionStorage};
use kiit_finder::state::ClientContext;
use kiit_finder_config::{ApiConfig, SessionConfig};
use kiit_finder_core::{Role, StorageError};
use kiit_finder_models::UserProfile;

pub const TEST_SECRET: &[u8] = b"test_secret_key_for_testing_purposes";
pub const LOGIN_VIEW: &str = "/auth";
pub const LANDING_VIEW: &str = "/dashboard";

#[derive(Debug, Serialize, Deserialize)]
pub struct TestClaims {
    pub sub: String,
    pub role: String,
    pub iat: i64,
    pub exp: i64,
}

/// Signs a token whose expiry is `exp_offset` seconds from now.
pub fn mint_token(sub: &str, role: &str, exp_offset: i64) -> String {
    mint_token_with(sub, role, exp_offset, TEST_SECRET)
}

pub fn mint_token_with(sub: &str, role: &str, exp_offset: i64, secret: &[u8]) -> String {
    let now = chrono::Utc::now().timestamp();
    let claims = TestClaims {
        sub: sub.to_string(),
        role: role.to_string(),
        iat: now - 7200,
        exp: now + exp_offset,
    };
    encode(&Header::default(), &claims, &EncodingKey::from_secret(secret)).unwrap()
}

pub fn generate_unique_email() -> String {
    format!("test-{}@kiit.ac.in", Uuid::new_v4())
}

/// What kind of token the stub issues on login/register.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IssuedToken {
    Valid,
    Expired,
    Malformed,
}

#[derive(Debug, Clone)]
struct StubUser {
    id: i64,
    name: String,
    email: String,
    password: String,
    role: Role,
}

impl StubUser {
    fn profile(&self) -> UserProfile {
        UserProfile {
            id: self.id,
            name: self.name.clone(),
            email: self.email.clone(),
            role: self.role,
        }
    }
}

#[derive(Default)]
struct StubInner {
    users: HashMap<String, StubUser>,
    next_id: i64,
    profile_fails: bool,
    issued: Option<IssuedToken>,
    profile_calls: usize,
}

/// Handle to the in-process backend.
#[derive(Clone, Default)]
pub struct StubBackend {
    inner: Arc<Mutex<StubInner>>,
}

impl StubBackend {
    pub fn add_user(&self, email: &str, password: &str, role: Role) -> i64 {
        let mut inner = self.inner.lock();
        inner.next_id += 1;
        let id = inner.next_id;
        inner.users.insert(
            email.to_string(),
            StubUser {
                id,
                name: "Test User".to_string(),
                email: email.to_string(),
                password: password.to_string(),
                role,
            },
        );
        id
    }

    pub fn fail_profile_requests(&self) {
        self.inner.lock().profile_fails = true;
    }

    pub fn issue(&self, kind: IssuedToken) {
        self.inner.lock().issued = Some(kind);
    }

    pub fn profile_calls(&self) -> usize {
        self.inner.lock().profile_calls
    }

    fn token_for(&self, user: &StubUser) -> String {
        let sub = user.id.to_string();
        let role = user.role.as_str();
        match self.inner.lock().issued.unwrap_or(IssuedToken::Valid) {
            IssuedToken::Valid => mint_token(&sub, role, 3600),
            IssuedToken::Expired => mint_token(&sub, role, -1),
            IssuedToken::Malformed => "not-a-session-token".to_string(),
        }
    }
}

#[derive(Deserialize)]
struct LoginBody {
    email: String,
    password: String,
}

#[derive(Deserialize)]
struct RegisterBody {
    name: String,
    email: String,
    password: String,
    role: Option<String>,
}

fn error_body(status: StatusCode, message: &str) -> Response {
    (status, Json(json!({ "message": message }))).into_response()
}

fn bearer_claims(headers: &HeaderMap) -> Option<TestClaims> {
    let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    let token = value.strip_prefix("Bearer ")?;
    decode::<TestClaims>(
        token,
        &DecodingKey::from_secret(TEST_SECRET),
        &Validation::default(),
    )
    .ok()
    .map(|data| data.claims)
}

async fn login(State(stub): State<StubBackend>, Json(body): Json<LoginBody>) -> Response {
    let user = stub.inner.lock().users.get(&body.email).cloned();
    match user {
        Some(user) if user.password == body.password => {
            let token = stub.token_for(&user);
            Json(json!({ "token": token, "user": user.profile() })).into_response()
        }
        _ => error_body(StatusCode::UNAUTHORIZED, "Invalid email or password"),
    }
}

async fn register(State(stub): State<StubBackend>, Json(body): Json<RegisterBody>) -> Response {
    if stub.inner.lock().users.contains_key(&body.email) {
        return error_body(StatusCode::CONFLICT, "Email already registered");
    }
    let role = body
        .role
        .as_deref()
        .and_then(|r| r.parse().ok())
        .unwrap_or(Role::User);
    stub.add_user(&body.email, &body.password, role);

    let user = {
        let mut inner = stub.inner.lock();
        let user = inner.users.get_mut(&body.email).unwrap();
        user.name = body.name;
        user.clone()
    };
    let token = stub.token_for(&user);
    (
        StatusCode::CREATED,
        Json(json!({ "token": token, "user": user.profile() })),
    )
        .into_response()
}

async fn profile(State(stub): State<StubBackend>, headers: HeaderMap) -> Response {
    stub.inner.lock().profile_calls += 1;
    let Some(claims) = bearer_claims(&headers) else {
        return error_body(StatusCode::UNAUTHORIZED, "Invalid token");
    };
    let inner = stub.inner.lock();
    if inner.profile_fails {
        return error_body(StatusCode::INTERNAL_SERVER_ERROR, "Profile service unavailable");
    }
    match inner
        .users
        .values()
        .find(|user| user.id.to_string() == claims.sub)
    {
        Some(user) => Json(user.profile()).into_response(),
        None => error_body(StatusCode::NOT_FOUND, "User not found"),
    }
}

async fn items(headers: HeaderMap) -> Response {
    match bearer_claims(&headers) {
        Some(claims) => Json(json!([{ "id": 1, "title": "Blue water bottle", "owner": claims.sub }]))
            .into_response(),
        None => error_body(StatusCode::UNAUTHORIZED, "Authentication required"),
    }
}

#[derive(Deserialize)]
struct NewItem {
    title: String,
}

async fn create_item(headers: HeaderMap, Json(body): Json<NewItem>) -> Response {
    match bearer_claims(&headers) {
        Some(claims) => (
            StatusCode::CREATED,
            Json(json!({ "id": 2, "title": body.title, "owner": claims.sub })),
        )
            .into_response(),
        None => error_body(StatusCode::UNAUTHORIZED, "Authentication required"),
    }
}

async fn delete_item(Path(id): Path<i64>, headers: HeaderMap) -> Response {
    match bearer_claims(&headers) {
        Some(claims) if claims.role == "ADMIN" => {
            if id == 1 {
                StatusCode::NO_CONTENT.into_response()
            } else {
                error_body(StatusCode::NOT_FOUND, "Item not found")
            }
        }
        Some(_) => error_body(StatusCode::FORBIDDEN, "Only moderators can delete items"),
        None => error_body(StatusCode::UNAUTHORIZED, "Authentication required"),
    }
}

async fn admin_users(headers: HeaderMap) -> Response {
    match bearer_claims(&headers) {
        Some(claims) if claims.role == "ADMIN" => Json(json!([])).into_response(),
        Some(_) => error_body(StatusCode::FORBIDDEN, "Admin role required"),
        None => error_body(StatusCode::UNAUTHORIZED, "Authentication required"),
    }
}

async fn status_with_message(Path(code): Path<u16>) -> Response {
    let status = StatusCode::from_u16(code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    error_body(status, &format!("stub failure {}", code))
}

async fn bare_status(Path(code): Path<u16>) -> Response {
    StatusCode::from_u16(code)
        .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
        .into_response()
}

async fn slow() -> Response {
    tokio::time::sleep(Duration::from_secs(3)).await;
    Json(json!({})).into_response()
}

/// Starts the stub on an ephemeral port and returns its API base URL.
pub async fn spawn_backend(stub: StubBackend) -> String {
    let api = Router::new()
        .route("/auth/login", post(login))
        .route("/auth/register", post(register))
        .route("/users/profile", get(profile))
        .route("/items", get(items).post(create_item))
        .route("/items/{id}", delete(delete_item))
        .route("/users", get(admin_users))
        .route("/status/{code}", get(status_with_message))
        .route("/bare/{code}", get(bare_status))
        .route("/slow", get(slow))
        .with_state(stub);
    let app = Router::new().nest("/api", api);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}/api", addr)
}

/// Notifier that remembers every notification.
#[derive(Default)]
pub struct RecordingNotifier {
    seen: Mutex<Vec<Notification>>,
}

impl RecordingNotifier {
    pub fn titles(&self) -> Vec<String> {
        self.seen.lock().iter().map(|n| n.title.clone()).collect()
    }

    pub fn all(&self) -> Vec<Notification> {
        self.seen.lock().clone()
    }

    pub fn count(&self, title: &str) -> usize {
        self.seen.lock().iter().filter(|n| n.title == title).count()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, notification: Notification) {
        self.seen.lock().push(notification);
    }
}

/// Storage that reads empty and refuses every write.
#[derive(Default)]
pub struct FailingStorage;

impl SessionStorage for FailingStorage {
    fn get(&self, _key: &str) -> Result<Option<String>, StorageError> {
        Ok(None)
    }

    fn set(&self, _key: &str, _value: &str) -> Result<(), StorageError> {
        Err(StorageError::Unavailable("quota exceeded".to_string()))
    }

    fn remove(&self, _key: &str) -> Result<(), StorageError> {
        Ok(())
    }
}

/// In-memory storage that rejects writes to one key.
pub struct RejectingStorage {
    inner: MemoryStorage,
    rejected_key: &'static str,
}

impl RejectingStorage {
    pub fn new(inner: MemoryStorage, rejected_key: &'static str) -> Self {
        Self {
            inner,
            rejected_key,
        }
    }
}

impl SessionStorage for RejectingStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.inner.get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        if key == self.rejected_key {
            return Err(StorageError::Unavailable(format!("{} is read-only", key)));
        }
        self.inner.set(key, value)
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.inner.remove(key)
    }
}

pub struct TestClient {
    pub context: ClientContext,
    pub notifier: Arc<RecordingNotifier>,
    pub navigator: Arc<MemoryNavigator>,
}

pub fn test_session_config() -> SessionConfig {
    SessionConfig {
        login_path: LOGIN_VIEW.to_string(),
        landing_path: LANDING_VIEW.to_string(),
        ..SessionConfig::default()
    }
}

pub fn build_client(
    base_url: &str,
    storage: Arc<dyn SessionStorage>,
    location: &str,
) -> TestClient {
    let notifier = Arc::new(RecordingNotifier::default());
    let navigator = Arc::new(MemoryNavigator::new(location));
    let api_config = ApiConfig {
        base_url: base_url.to_string(),
        timeout_secs: 1,
    };
    let context = ClientContext::new(
        api_config,
        test_session_config(),
        storage,
        notifier.clone(),
        navigator.clone(),
    )
    .unwrap();
    TestClient {
        context,
        notifier,
        navigator,
    }
}

pub fn memory_client(base_url: &str, location: &str) -> (TestClient, Arc<MemoryStorage>) {
    let storage = Arc::new(MemoryStorage::new());
    (build_client(base_url, storage.clone(), location), storage)
}
