//! CLI command implementations.
//!
//! Each command builds an in-memory session from the environment, runs one
//! client flow against the configured server, and reports what the browser
//! would have shown through `tracing`.

use std::sync::Arc;

use shopease_core::session::keys;
use shopease_core::{
    MemoryNavigator, MemoryNotifier, MemorySessionStore, NotificationKind, SessionStore, config,
};

pub mod call;
pub mod cart;

/// Build a session store seeded from `SHOPEASE_TOKEN` and `SHOPEASE_USER`.
///
/// Both variables are optional; an empty store behaves like a logged-out
/// browser.
pub(crate) fn session_from_env() -> Arc<MemorySessionStore> {
    let session = MemorySessionStore::new();
    if let Some(token) = config::get_optional_env("SHOPEASE_TOKEN") {
        session.set(keys::TOKEN, &token);
    }
    if let Some(user) = config::get_optional_env("SHOPEASE_USER") {
        session.set(keys::USER, &user);
    }
    Arc::new(session)
}

/// Log every collected notification at the level matching its kind.
pub(crate) fn report_notifications(notifier: &MemoryNotifier) {
    for notification in notifier.sent() {
        match notification.kind {
            NotificationKind::Success | NotificationKind::Info => {
                tracing::info!("[{}] {}", notification.kind, notification.message);
            }
            NotificationKind::Warning => {
                tracing::warn!("[{}] {}", notification.kind, notification.message);
            }
            NotificationKind::Error => {
                tracing::error!("[{}] {}", notification.kind, notification.message);
            }
        }
    }
}

/// Log the redirect a flow performed, if any.
pub(crate) fn report_navigation(navigator: &MemoryNavigator) {
    if let Some(path) = navigator.last_visited() {
        tracing::info!("Redirected to {path}");
    }
}
