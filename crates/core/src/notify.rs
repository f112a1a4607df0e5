//! User-facing notifications, decoupled from how they are drawn.
//!
//! Core code decides *that* the user should hear something ("session
//! expired", "added to cart"); the [`Notifier`] it holds decides how.
//! The storefront and admin crates ship presenters with their own
//! timing and dismissal rules; tests use [`MemoryNotifier`].

use std::sync::{Mutex, MutexGuard, PoisonError};

/// Severity of a notification, mapped to Bootstrap theme colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NotificationKind {
    Success,
    Error,
    Warning,
    Info,
}

impl NotificationKind {
    /// Bootstrap Icons class shown next to the message.
    #[must_use]
    pub const fn icon(self) -> &'static str {
        match self {
            Self::Success => "bi-check-circle-fill",
            Self::Error => "bi-x-circle-fill",
            Self::Warning => "bi-exclamation-triangle-fill",
            Self::Info => "bi-info-circle-fill",
        }
    }

    /// Bootstrap contextual class suffix (`success`, `danger`, ...).
    #[must_use]
    pub const fn css_class(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Error => "danger",
            Self::Warning => "warning",
            Self::Info => "info",
        }
    }
}

impl std::fmt::Display for NotificationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Success => "success",
            Self::Error => "error",
            Self::Warning => "warning",
            Self::Info => "info",
        };
        write!(f, "{name}")
    }
}

/// A message queued for the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub kind: NotificationKind,
    pub message: String,
}

impl Notification {
    #[must_use]
    pub fn new(kind: NotificationKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Sink for notifications.
///
/// `notify` must not block; presenters that animate do so on their own
/// tasks.
pub trait Notifier: Send + Sync {
    /// Deliver one notification.
    fn notify(&self, notification: Notification);

    /// Shorthand for a success message.
    fn success(&self, message: &str) {
        self.notify(Notification::new(NotificationKind::Success, message));
    }

    /// Shorthand for an error message.
    fn error(&self, message: &str) {
        self.notify(Notification::new(NotificationKind::Error, message));
    }

    /// Shorthand for a warning message.
    fn warning(&self, message: &str) {
        self.notify(Notification::new(NotificationKind::Warning, message));
    }

    /// Shorthand for an informational message.
    fn info(&self, message: &str) {
        self.notify(Notification::new(NotificationKind::Info, message));
    }
}

/// [`Notifier`] that drops everything. For hosts that report outcomes
/// through some other channel and want no notification queue at all.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullNotifier;

impl Notifier for NullNotifier {
    fn notify(&self, _notification: Notification) {}
}

/// [`Notifier`] that records every notification, oldest first.
#[derive(Debug, Default)]
pub struct MemoryNotifier {
    sent: Mutex<Vec<Notification>>,
}

impl MemoryNotifier {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything notified so far.
    #[must_use]
    pub fn sent(&self) -> Vec<Notification> {
        self.lock().clone()
    }

    /// Messages only, in delivery order.
    #[must_use]
    pub fn messages(&self) -> Vec<String> {
        self.lock().iter().map(|n| n.message.clone()).collect()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<Notification>> {
        self.sent.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Notifier for MemoryNotifier {
    fn notify(&self, notification: Notification) {
        self.lock().push(notification);
    }
}
