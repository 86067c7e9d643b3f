//! # KIIT Finder Client
//!
//! Session, authentication and route-guard layer for the KIIT Finder
//! lost-and-found API.
//!
//! ## Overview
//!
//! - **Token Codec** ([`kiit_finder_auth`]): reads role and expiry from the
//!   session token without a server round-trip
//! - **Session Store** ([`session`]): persists the token and cached profile
//! - **Auth Service** ([`services::auth`]): login, registration, logout and
//!   role queries
//! - **HTTP Client** ([`http`]): attaches the token and maps failures to
//!   notifications and redirects
//! - **Route Guard** ([`guard`]): admits or redirects navigation to protected views
//!
//! ## Architecture
//!
//! ```text
//! crates/
//! ├── kiit-finder-core/           # Roles and the error taxonomy
//! ├── kiit-finder-config/         # Environment configuration
//! ├── kiit-finder-auth/           # Token claims and codec
//! ├── kiit-finder-models/         # Request/response DTOs
//! ├── kiit-finder-observability/  # Logging setup
//! └── kiit-finder-cli/            # Command-line front-end
//! src/
//! ├── session/    # Storage backends and the session store
//! ├── http/       # API client, notifications, navigation
//! ├── services/   # Auth service
//! ├── guard.rs    # Route guard
//! ├── state.rs    # Client context wiring
//! └── validator.rs
//! ```
//!
//! ## Role Hierarchy
//!
//! ```text
//! ADMIN
//!   ↓ satisfies
//! USER
//! ```
//!
//! Access decisions always use the role in the current token. The cached
//! profile is display data and can lag behind a freshly issued token.
//!
//! ## Session Tokens
//!
//! The client cannot verify signatures, so a "valid" token here means
//! well-formed and not expired. The server still authenticates every call;
//! a 401 clears the local session and redirects to login.
//!
//! ## Environment Variables
//!
//! ```bash
//! KIIT_API_BASE_URL=http://localhost:8080/api
//! KIIT_API_TIMEOUT_SECS=10
//! KIIT_SESSION_FILE=.kiit-finder/session.json
//! KIIT_LOGIN_PATH=/auth
//! KIIT_LANDING_PATH=/dashboard
//! LOG_LEVEL=info
//! ```

pub mod guard;
pub mod http;
pub mod services;
pub mod session;
pub mod state;
pub mod validator;

// Re-export workspace crates for convenience
pub use kiit_finder_auth;
pub use kiit_finder_config;
pub use kiit_finder_core;
pub use kiit_finder_models;
