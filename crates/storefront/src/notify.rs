//! Toast presenter for the customer pages.
//!
//! Mirrors the storefront toast lifecycle: toasts stack in a container
//! created on first use, stay visible for three seconds, then lose their
//! `show` state and linger 300 ms for the fade-out before removal. Each
//! toast gets exactly one removal task.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use shopease_core::notify::{Notification, NotificationKind, Notifier};

const TOAST_VISIBLE: Duration = Duration::from_secs(3);
const TOAST_FADE: Duration = Duration::from_millis(300);

/// One toast in the stack.
#[derive(Debug, Clone)]
pub struct Toast {
    /// Stable handle, unique within this stack.
    pub id: u64,
    pub kind: NotificationKind,
    pub message: String,
    /// Whether the toast still carries the `show` state. `false` means it
    /// is fading out and about to be removed.
    pub shown: bool,
}

struct ToastStackInner {
    /// `None` until the first toast; the container element is only
    /// created on demand.
    container: Mutex<Option<Vec<Toast>>>,
    next_id: AtomicU64,
    visible_for: Duration,
    fade_for: Duration,
}

impl ToastStackInner {
    fn lock(&self) -> MutexGuard<'_, Option<Vec<Toast>>> {
        self.container.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn hide(&self, id: u64) {
        if let Some(toasts) = self.lock().as_mut()
            && let Some(toast) = toasts.iter_mut().find(|t| t.id == id)
        {
            toast.shown = false;
        }
    }

    fn remove(&self, id: u64) {
        if let Some(toasts) = self.lock().as_mut() {
            toasts.retain(|t| t.id != id);
        }
    }
}

/// Auto-dismissing toast stack implementing [`Notifier`].
///
/// Must live inside a tokio runtime; dismissal runs on spawned timer
/// tasks. Clones share the same stack.
#[derive(Clone)]
pub struct ToastStack {
    inner: Arc<ToastStackInner>,
}

impl ToastStack {
    /// Create a stack with production timing (3 s visible, 300 ms fade).
    #[must_use]
    pub fn new() -> Self {
        Self::with_timing(TOAST_VISIBLE, TOAST_FADE)
    }

    /// Create a stack with custom timing. Tests shrink the windows to
    /// keep runs fast.
    #[must_use]
    pub fn with_timing(visible_for: Duration, fade_for: Duration) -> Self {
        Self {
            inner: Arc::new(ToastStackInner {
                container: Mutex::new(None),
                next_id: AtomicU64::new(0),
                visible_for,
                fade_for,
            }),
        }
    }

    /// Whether the container has been created yet.
    #[must_use]
    pub fn container_created(&self) -> bool {
        self.inner.lock().is_some()
    }

    /// Every toast not yet removed, oldest first.
    #[must_use]
    pub fn active(&self) -> Vec<Toast> {
        self.inner.lock().as_ref().cloned().unwrap_or_default()
    }

    /// Toasts still in their visible window.
    #[must_use]
    pub fn visible(&self) -> Vec<Toast> {
        self.active().into_iter().filter(|t| t.shown).collect()
    }

    fn push(&self, kind: NotificationKind, message: String) {
        let id = self.inner.next_id.fetch_add(1, Ordering::Relaxed);
        self.inner.lock().get_or_insert_default().push(Toast {
            id,
            kind,
            message,
            shown: true,
        });

        let inner = Arc::clone(&self.inner);
        tokio::spawn(async move {
            tokio::time::sleep(inner.visible_for).await;
            inner.hide(id);
            tokio::time::sleep(inner.fade_for).await;
            inner.remove(id);
        });
    }
}

impl Default for ToastStack {
    fn default() -> Self {
        Self::new()
    }
}

impl Notifier for ToastStack {
    fn notify(&self, notification: Notification) {
        self.push(notification.kind, notification.message);
    }
}
