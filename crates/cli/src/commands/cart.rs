//! Cart commands: badge count and the add-to-cart flow.
//!
//! # Usage
//!
//! ```bash
//! # Print the cart item count
//! shopease cart count
//!
//! # Add product 42, quantity 2
//! shopease cart add 42 --quantity 2
//! ```
//!
//! # Environment Variables
//!
//! - `SHOPEASE_API_BASE` - Server base URL (default: `http://localhost:8080`)
//! - `SHOPEASE_TOKEN` - Bearer token; without it the flow behaves logged-out
//! - `SHOPEASE_USER` - JSON user object stored alongside the token

use std::sync::Arc;
use std::time::Duration;

use shopease_core::{
    ClientConfig, ConfigError, MemoryNavigator, MemoryNotifier, Navigator, Notifier, NullNotifier,
};
use shopease_storefront::{CartBadge, CustomerClient};
use thiserror::Error;

/// Errors that can occur during cart commands.
#[derive(Debug, Error)]
pub enum CartCommandError {
    /// Configuration could not be loaded from the environment.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

/// Refresh the cart badge and print the resulting count.
///
/// The flow never fails: a missing token or an unreachable server both
/// leave the badge at zero, exactly as the storefront pages do.
///
/// # Errors
///
/// Returns `CartCommandError::Config` if the environment configuration is
/// invalid.
pub async fn count() -> Result<(), CartCommandError> {
    let config = ClientConfig::from_env()?;
    let session = super::session_from_env();
    let navigator = Arc::new(MemoryNavigator::default());
    // Badge refresh is silent end to end; there is nothing to collect.
    let notifier = Arc::new(NullNotifier);

    let client = CustomerClient::new(&config, session, navigator, notifier);
    let badge = CartBadge::new();
    let cart = client.cart().with_badge(badge.clone());

    tracing::info!("Fetching cart total from {}...", config.api_base);
    let count = cart.refresh_count().await;
    tracing::info!("Cart contains {count} item(s)");

    Ok(())
}

/// Run the add-to-cart flow and report the notifications it produced.
///
/// # Errors
///
/// Returns `CartCommandError::Config` if the environment configuration is
/// invalid. Request failures surface as error notifications, not as a
/// non-zero exit.
pub async fn add(product_id: i64, quantity: u32) -> Result<(), CartCommandError> {
    let config = ClientConfig::from_env()?;
    let session = super::session_from_env();
    let navigator = Arc::new(MemoryNavigator::default());
    let notifier = Arc::new(MemoryNotifier::new());

    let client = CustomerClient::new(
        &config,
        session,
        Arc::clone(&navigator) as Arc<dyn Navigator>,
        Arc::clone(&notifier) as Arc<dyn Notifier>,
    );
    let badge = CartBadge::new();
    let cart = client
        .cart()
        .with_badge(badge.clone())
        .with_redirect_delay(Duration::ZERO);

    tracing::info!("Adding product {product_id} (quantity {quantity}) to cart...");
    cart.add_to_cart(product_id, quantity).await;

    // The logged-out flow schedules its login redirect on a background task.
    tokio::time::sleep(Duration::from_millis(50)).await;

    super::report_notifications(&notifier);
    super::report_navigation(&navigator);
    tracing::info!("Cart badge now reads {}", badge.text());

    Ok(())
}
