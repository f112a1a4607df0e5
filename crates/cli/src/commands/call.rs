//! Admin API passthrough command.
//!
//! # Usage
//!
//! ```bash
//! # List orders
//! shopease call /api/admin/orders
//!
//! # Update an order status
//! shopease call /api/admin/orders/7/status --method PUT --data '{"status":"SHIPPED"}'
//! ```
//!
//! # Environment Variables
//!
//! - `SHOPEASE_API_BASE` - Server base URL (default: `http://localhost:8080`)
//! - `SHOPEASE_TOKEN` - Bearer token (required)
//! - `SHOPEASE_USER` - JSON user object stored alongside the token

use std::sync::Arc;

use shopease_admin::AdminClient;
use shopease_core::api::{ApiError, Method};
use shopease_core::{
    ClientConfig, ConfigError, MemoryNavigator, MemoryNotifier, Navigator, Notifier, config,
};
use thiserror::Error;

/// Errors that can occur during the `call` command.
#[derive(Debug, Error)]
pub enum CallError {
    /// Configuration could not be loaded or `SHOPEASE_TOKEN` is missing.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// The `--method` value is not an HTTP method.
    #[error("Invalid HTTP method: {0}")]
    InvalidMethod(String),

    /// The `--data` value is not valid JSON.
    #[error("Invalid JSON body: {0}")]
    InvalidBody(#[from] serde_json::Error),

    /// The request failed.
    #[error(transparent)]
    Api(#[from] ApiError),
}

/// Call an admin endpoint and print the JSON response.
///
/// # Errors
///
/// Returns an error when configuration is incomplete, the method or body
/// cannot be parsed, or the server rejects the request.
pub async fn execute(endpoint: &str, method: &str, data: Option<&str>) -> Result<(), CallError> {
    let config = ClientConfig::from_env()?;
    // Without a token the admin policy silently redirects; require it up front.
    config::require_env("SHOPEASE_TOKEN")?;

    let method = method
        .to_uppercase()
        .parse::<Method>()
        .map_err(|_| CallError::InvalidMethod(method.to_owned()))?;
    let body = data
        .map(serde_json::from_str::<serde_json::Value>)
        .transpose()?;

    let session = super::session_from_env();
    let navigator = Arc::new(MemoryNavigator::default());
    let notifier = Arc::new(MemoryNotifier::new());
    let client = AdminClient::new(
        &config,
        session,
        Arc::clone(&navigator) as Arc<dyn Navigator>,
        Arc::clone(&notifier) as Arc<dyn Notifier>,
    );

    tracing::info!("{method} {endpoint} via {}...", config.api_base);
    match client.call(method, endpoint, body.as_ref()).await? {
        Some(value) => {
            let pretty =
                serde_json::to_string_pretty(&value).unwrap_or_else(|_| value.to_string());
            tracing::info!("Response:\n{pretty}");
        }
        None => {
            super::report_notifications(&notifier);
            super::report_navigation(&navigator);
        }
    }

    Ok(())
}
