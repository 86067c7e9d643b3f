//! View navigation seam.
//!
//! The client redirects (to the login view after a rejected session, to the
//! landing view after a denied route) through a [`Navigator`], so it works
//! the same under a browser router, a TUI, or a test.

use parking_lot::Mutex;

/// Current location plus the ability to move elsewhere.
pub trait Navigator: Send + Sync {
    fn current_location(&self) -> String;

    /// Move to `to`. `return_to` is the location the user originally asked
    /// for, kept so they can be sent back after signing in.
    fn navigate(&self, to: &str, return_to: Option<&str>);
}

/// One navigation performed through a [`MemoryNavigator`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Visit {
    pub location: String,
    pub return_to: Option<String>,
}

/// Navigator that keeps its location and history in memory.
#[derive(Debug)]
pub struct MemoryNavigator {
    location: Mutex<String>,
    return_to: Mutex<Option<String>>,
    history: Mutex<Vec<Visit>>,
}

impl MemoryNavigator {
    pub fn new(initial: impl Into<String>) -> Self {
        Self {
            location: Mutex::new(initial.into()),
            return_to: Mutex::new(None),
            history: Mutex::new(Vec::new()),
        }
    }

    /// Every navigation so far, oldest first.
    pub fn history(&self) -> Vec<Visit> {
        self.history.lock().clone()
    }

    /// The pending post-login destination, consumed by the caller.
    pub fn take_return_to(&self) -> Option<String> {
        self.return_to.lock().take()
    }
}

impl Navigator for MemoryNavigator {
    fn current_location(&self) -> String {
        self.location.lock().clone()
    }

    fn navigate(&self, to: &str, return_to: Option<&str>) {
        *self.location.lock() = to.to_string();
        if let Some(target) = return_to {
            *self.return_to.lock() = Some(target.to_string());
        }
        self.history.lock().push(Visit {
            location: to.to_string(),
            return_to: return_to.map(str::to_string),
        });
    }
}
