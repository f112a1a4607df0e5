//! Navigation seam: where the client is and where it sends the user.
//!
//! Session-expiry handling needs to read the current path (to highlight
//! nav links, to decide what counts as "here") and to redirect. Both go
//! through [`Navigator`] so tests can observe redirects instead of
//! leaving the page.

use std::sync::{Mutex, MutexGuard, PoisonError};

/// Read the current location and request navigation.
pub trait Navigator: Send + Sync {
    /// Path portion of the current location, e.g. `/admin/orders`.
    fn current_path(&self) -> String;

    /// Navigate to `path`. Takes effect at the host's discretion; callers
    /// must not assume code after the call is unreachable.
    fn goto(&self, path: &str);
}

/// In-memory [`Navigator`] recording every requested navigation.
#[derive(Debug)]
pub struct MemoryNavigator {
    path: Mutex<String>,
    visited: Mutex<Vec<String>>,
}

impl MemoryNavigator {
    /// Create a navigator positioned at `path`.
    #[must_use]
    pub fn new(path: &str) -> Self {
        Self {
            path: Mutex::new(path.to_string()),
            visited: Mutex::new(Vec::new()),
        }
    }

    /// Every path passed to [`Navigator::goto`], oldest first.
    #[must_use]
    pub fn visited(&self) -> Vec<String> {
        lock(&self.visited).clone()
    }

    /// The most recent redirect target, if any.
    #[must_use]
    pub fn last_visited(&self) -> Option<String> {
        lock(&self.visited).last().cloned()
    }
}

impl Default for MemoryNavigator {
    fn default() -> Self {
        Self::new("/")
    }
}

impl Navigator for MemoryNavigator {
    fn current_path(&self) -> String {
        lock(&self.path).clone()
    }

    fn goto(&self, path: &str) {
        *lock(&self.path) = path.to_string();
        lock(&self.visited).push(path.to_string());
    }
}

fn lock<T>(m: &Mutex<T>) -> MutexGuard<'_, T> {
    m.lock().unwrap_or_else(PoisonError::into_inner)
}
