//! Add-to-cart flow and the navbar cart badge.
//!
//! The cart itself lives server-side; this module owns the client-side
//! choreography around it: the login gate with its delayed redirect, the
//! outcome toasts, and keeping the badge count in sync. Failures here are
//! presentational, not structural: a cart count that cannot be fetched
//! renders as zero, never as an error.

use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};
use std::time::Duration;

use rust_decimal::Decimal;
use serde::Deserialize;
use shopease_core::api::{ApiClient, ApiError};
use tracing::{debug, instrument};

/// Pause between the login-required toast and the redirect, long enough
/// to read the toast.
const REDIRECT_DELAY: Duration = Duration::from_millis(1500);

/// Server response for `GET /api/cart/total`.
///
/// Fields default to zero when absent so a sparse response still renders.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CartTotal {
    /// Number of items across all cart lines.
    #[serde(rename = "itemCount", default)]
    pub item_count: u32,
    /// Cart subtotal in dollars.
    #[serde(default)]
    pub total: Decimal,
}

/// Shared cart-count badge, the `#cartCount` navbar element.
///
/// Clones share one counter; any clone can render while the service
/// writes.
#[derive(Debug, Clone, Default)]
pub struct CartBadge {
    count: Arc<AtomicU32>,
}

impl CartBadge {
    /// Create a badge showing zero.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current count.
    #[must_use]
    pub fn count(&self) -> u32 {
        self.count.load(Ordering::Relaxed)
    }

    /// Text a host renders into the badge element.
    #[must_use]
    pub fn text(&self) -> String {
        self.count().to_string()
    }

    /// Overwrite the count.
    pub fn set(&self, count: u32) {
        self.count.store(count, Ordering::Relaxed);
    }
}

/// Cart operations for the customer surface.
pub struct CartService {
    api: ApiClient,
    badge: Option<CartBadge>,
    redirect_delay: Duration,
}

impl CartService {
    /// Create a cart service over the given engine, with no badge wired.
    #[must_use]
    pub fn new(api: ApiClient) -> Self {
        Self {
            api,
            badge: None,
            redirect_delay: REDIRECT_DELAY,
        }
    }

    /// Wire a badge for [`CartService::refresh_count`] to write into.
    #[must_use]
    pub fn with_badge(mut self, badge: CartBadge) -> Self {
        self.badge = Some(badge);
        self
    }

    /// Override the login-redirect delay. Tests use this to avoid
    /// waiting out the production pause.
    #[must_use]
    pub const fn with_redirect_delay(mut self, delay: Duration) -> Self {
        self.redirect_delay = delay;
        self
    }

    /// Add one unit of a product, the product-card button default.
    pub async fn add_one(&self, product_id: i64) {
        self.add_to_cart(product_id, 1).await;
    }

    /// Add a product to the cart, reporting the outcome as a toast.
    ///
    /// Logged out: a warning toast, then a redirect to login after a
    /// short pause; no request is issued. Logged in: POST the line, toast
    /// the result, and refresh the badge on success. If the session
    /// expires mid-flight the engine has already redirected and nothing
    /// more is shown.
    #[instrument(skip(self))]
    pub async fn add_to_cart(&self, product_id: i64, quantity: u32) {
        if !self.api.session().is_logged_in() {
            self.api
                .notifier()
                .warning("Please login to add items to cart");
            let navigator = Arc::clone(self.api.navigator());
            let login = self.api.policy().login_redirect.clone();
            let delay = self.redirect_delay;
            tokio::spawn(async move {
                tokio::time::sleep(delay).await;
                navigator.goto(&login);
            });
            return;
        }

        let endpoint = format!("/api/cart/add?productId={product_id}&quantity={quantity}");
        match self.api.post::<serde_json::Value>(&endpoint, None).await {
            Ok(Some(_)) => {
                self.api.notifier().success("Added to cart!");
                self.refresh_count().await;
            }
            Ok(None) => {}
            Err(e) => {
                let message = match e {
                    ApiError::Api { message, .. } => message,
                    _ => "Failed to add to cart".to_string(),
                };
                self.api.notifier().error(&message);
            }
        }
    }

    /// Fetch the cart count and write it to the badge.
    ///
    /// Never fails: logged out, expired, or erroring all read as zero.
    #[instrument(skip(self))]
    pub async fn refresh_count(&self) -> u32 {
        let count = self.fetch_count().await;
        if let Some(badge) = &self.badge {
            badge.set(count);
        }
        count
    }

    async fn fetch_count(&self) -> u32 {
        if !self.api.session().is_logged_in() {
            return 0;
        }
        match self.api.get::<CartTotal>("/api/cart/total").await {
            Ok(Some(total)) => total.item_count,
            Ok(None) => 0,
            Err(e) => {
                debug!(error = %e, "cart total unavailable, badge shows zero");
                0
            }
        }
    }
}
