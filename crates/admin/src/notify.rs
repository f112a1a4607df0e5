//! Dismissible alert presenter for the admin panel.
//!
//! Unlike the storefront toasts there is no container or fade stage:
//! alerts append straight to the page, carry a close button, and remove
//! themselves after five seconds if the user has not dismissed them
//! first. Expiry and manual dismissal are both idempotent.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use shopease_core::notify::{Notification, NotificationKind, Notifier};

const ALERT_TIMEOUT: Duration = Duration::from_secs(5);

/// One alert on the page.
#[derive(Debug, Clone)]
pub struct Alert {
    /// Stable handle, unique within this stack. The close button
    /// dismisses by id.
    pub id: u64,
    pub kind: NotificationKind,
    pub message: String,
}

struct AlertStackInner {
    alerts: Mutex<Vec<Alert>>,
    next_id: AtomicU64,
    timeout: Duration,
}

impl AlertStackInner {
    fn lock(&self) -> MutexGuard<'_, Vec<Alert>> {
        self.alerts.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn remove(&self, id: u64) -> bool {
        let mut alerts = self.lock();
        let before = alerts.len();
        alerts.retain(|alert| alert.id != id);
        alerts.len() != before
    }
}

/// Auto-dismissing alert stack implementing [`Notifier`].
///
/// Must live inside a tokio runtime; expiry runs on spawned timer tasks.
/// Clones share the same stack.
#[derive(Clone)]
pub struct AlertStack {
    inner: Arc<AlertStackInner>,
}

impl AlertStack {
    /// Create a stack with the production five-second timeout.
    #[must_use]
    pub fn new() -> Self {
        Self::with_timeout(ALERT_TIMEOUT)
    }

    /// Create a stack with a custom timeout. Tests shrink it to keep
    /// runs fast.
    #[must_use]
    pub fn with_timeout(timeout: Duration) -> Self {
        Self {
            inner: Arc::new(AlertStackInner {
                alerts: Mutex::new(Vec::new()),
                next_id: AtomicU64::new(0),
                timeout,
            }),
        }
    }

    /// Alerts currently on the page, oldest first.
    #[must_use]
    pub fn active(&self) -> Vec<Alert> {
        self.inner.lock().clone()
    }

    /// Close an alert by id, as the close button does.
    ///
    /// Returns whether the alert was still present; closing twice, or
    /// closing after expiry, is a quiet no-op.
    pub fn dismiss(&self, id: u64) -> bool {
        self.inner.remove(id)
    }

    fn push(&self, kind: NotificationKind, message: String) {
        let id = self.inner.next_id.fetch_add(1, Ordering::Relaxed);
        self.inner.lock().push(Alert { id, kind, message });

        let inner = Arc::clone(&self.inner);
        tokio::spawn(async move {
            tokio::time::sleep(inner.timeout).await;
            inner.remove(id);
        });
    }
}

impl Default for AlertStack {
    fn default() -> Self {
        Self::new()
    }
}

impl Notifier for AlertStack {
    fn notify(&self, notification: Notification) {
        self.push(notification.kind, notification.message);
    }
}
