//! Page-load behaviors shared by every storefront page.
//!
//! Small state machines behind the DOM wiring: the mobile nav toggle,
//! in-page anchor interception, one-shot lazy image loading, and the
//! debounce helper for search-as-you-type inputs. Hosts own the actual
//! elements; these types own the decisions.

use std::collections::HashSet;
use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use tokio::task::JoinHandle;

use crate::cart::CartService;

/// Document-ready hook: bring the cart badge up to date.
///
/// Returns the count that was written.
pub async fn on_ready(cart: &CartService) -> u32 {
    cart.refresh_count().await
}

// =============================================================================
// Mobile nav
// =============================================================================

/// Collapse state of the mobile navbar.
///
/// Built from a toggler's `data-bs-target` selector; construction fails
/// when the target is not on the page, in which case clicks fall through
/// untouched.
#[derive(Debug)]
pub struct MobileNav {
    target: String,
    open: bool,
}

impl MobileNav {
    /// Bind a toggler to its collapse target. Returns `None` when
    /// `target` names no known element.
    #[must_use]
    pub fn new(target: &str, known_targets: &[&str]) -> Option<Self> {
        known_targets.contains(&target).then(|| Self {
            target: target.to_string(),
            open: false,
        })
    }

    /// The selector this nav controls.
    #[must_use]
    pub fn target(&self) -> &str {
        &self.target
    }

    /// Whether the target currently carries the `show` state.
    #[must_use]
    pub const fn is_open(&self) -> bool {
        self.open
    }

    /// Flip the `show` state; returns the new state.
    pub const fn toggle(&mut self) -> bool {
        self.open = !self.open;
        self.open
    }
}

// =============================================================================
// Anchor links
// =============================================================================

/// Decide whether a clicked link should smooth-scroll in page.
///
/// Only `#fragment` links whose target id exists on the page intercept
/// the click; everything else (external links, bare `#`, unknown ids)
/// falls through to default navigation. Returns the id to scroll to.
#[must_use]
pub fn anchor_target(href: &str, known_ids: &[&str]) -> Option<String> {
    let id = href.strip_prefix('#')?;
    if id.is_empty() {
        return None;
    }
    known_ids.contains(&id).then(|| id.to_string())
}

// =============================================================================
// Lazy images
// =============================================================================

/// An image participating in lazy loading.
#[derive(Debug, Clone)]
pub struct LazyImage {
    /// Element id.
    pub id: String,
    /// Current `src` attribute.
    pub src: Option<String>,
    /// Deferred source from `data-src`.
    pub data_src: Option<String>,
    /// Whether the `lazy` marker class is still present.
    pub lazy: bool,
}

impl LazyImage {
    /// A not-yet-loaded image waiting on `data_src`.
    #[must_use]
    pub fn deferred(id: &str, data_src: &str) -> Self {
        Self {
            id: id.to_string(),
            src: None,
            data_src: Some(data_src.to_string()),
            lazy: true,
        }
    }
}

/// One-shot viewport observer for lazy images.
///
/// The first intersection of an observed image promotes `data_src` to
/// `src`, clears the `lazy` marker, and stops observing it; later events
/// for the same image are ignored.
#[derive(Debug, Default)]
pub struct LazyLoader {
    images: Vec<LazyImage>,
    observed: HashSet<String>,
}

impl LazyLoader {
    /// Create a loader observing nothing.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start observing an image.
    pub fn observe(&mut self, image: LazyImage) {
        self.observed.insert(image.id.clone());
        self.images.retain(|i| i.id != image.id);
        self.images.push(image);
    }

    /// Feed one intersection event.
    pub fn on_intersection(&mut self, id: &str, is_intersecting: bool) {
        if !is_intersecting || !self.observed.remove(id) {
            return;
        }
        if let Some(image) = self.images.iter_mut().find(|i| i.id == id) {
            image.src = image.data_src.clone();
            image.lazy = false;
        }
    }

    /// Ids still being observed.
    #[must_use]
    pub fn observed(&self) -> &HashSet<String> {
        &self.observed
    }

    /// Look up an image's current state.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&LazyImage> {
        self.images.iter().find(|i| i.id == id)
    }
}

// =============================================================================
// Debounce
// =============================================================================

type DebouncedCallback = Arc<dyn Fn() -> Pin<Box<dyn Future<Output = ()> + Send>> + Send + Sync>;

/// Trailing-edge debouncer for bursty events.
///
/// Every [`Debouncer::call`] cancels the pending timer and starts a new
/// one, so only the last call of a burst reaches the callback, `wait`
/// after the burst ends. Used for search inputs that fire per keystroke.
pub struct Debouncer {
    wait: Duration,
    callback: DebouncedCallback,
    pending: Mutex<Option<JoinHandle<()>>>,
}

impl Debouncer {
    /// Wrap an async callback with a debounce window.
    #[must_use]
    pub fn new<F, Fut>(wait: Duration, callback: F) -> Self
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        Self {
            wait,
            callback: Arc::new(move || Box::pin(callback())),
            pending: Mutex::new(None),
        }
    }

    /// Record one event. The callback runs `wait` later unless another
    /// call supersedes it first.
    pub fn call(&self) {
        let mut pending = self.lock();
        if let Some(handle) = pending.take() {
            handle.abort();
        }
        let callback = Arc::clone(&self.callback);
        let wait = self.wait;
        *pending = Some(tokio::spawn(async move {
            tokio::time::sleep(wait).await;
            callback().await;
        }));
    }

    /// Whether a timer is armed. A finished timer still counts until the
    /// next [`Debouncer::call`] clears it.
    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.lock().as_ref().is_some_and(|handle| !handle.is_finished())
    }

    fn lock(&self) -> MutexGuard<'_, Option<JoinHandle<()>>> {
        self.pending.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
