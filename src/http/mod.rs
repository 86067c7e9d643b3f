//! HTTP access to the KIIT Finder backend.
//!
//! - [`client`]: [`ApiClient`], bearer attachment and centralized error mapping
//! - [`notify`]: user-facing [`Notification`]s and the [`Notifier`] sink
//! - [`navigation`]: the [`Navigator`] seam used for redirects

pub mod client;
pub mod navigation;
pub mod notify;

pub use client::{ApiClient, RequestAuth};
pub use navigation::{MemoryNavigator, Navigator, Visit};
pub use notify::{Notification, Notifier, Severity, TracingNotifier};
