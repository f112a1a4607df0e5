//! Client configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All optional:
//! - `SHOPEASE_API_BASE` - Base URL of the ShopEase server (default: <http://localhost:8080>)
//! - `SHOPEASE_LOGIN_PATH` - Path users are sent to on auth failure (default: /login)
//! - `SHOPEASE_HOME_PATH` - Path non-admins are sent to from admin pages (default: /)

use thiserror::Error;
use url::Url;

const DEFAULT_API_BASE: &str = "http://localhost:8080";
const DEFAULT_LOGIN_PATH: &str = "/login";
const DEFAULT_HOME_PATH: &str = "/";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Client configuration: where the server is and where failures send users.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL endpoints are joined onto
    pub api_base: Url,
    /// Redirect target when a session is missing or expired
    pub login_path: String,
    /// Redirect target for non-admins leaving the admin panel
    pub home_path: String,
}

impl ClientConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidEnvVar` if `SHOPEASE_API_BASE` is set
    /// but not a valid URL.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let api_base = get_env_or_default("SHOPEASE_API_BASE", DEFAULT_API_BASE);
        let api_base = Url::parse(&api_base)
            .map_err(|e| ConfigError::InvalidEnvVar("SHOPEASE_API_BASE".to_string(), e.to_string()))?;

        Ok(Self {
            api_base,
            login_path: get_env_or_default("SHOPEASE_LOGIN_PATH", DEFAULT_LOGIN_PATH),
            home_path: get_env_or_default("SHOPEASE_HOME_PATH", DEFAULT_HOME_PATH),
        })
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base: Url::parse(DEFAULT_API_BASE).expect("default API base is a valid URL"),
            login_path: DEFAULT_LOGIN_PATH.to_string(),
            home_path: DEFAULT_HOME_PATH.to_string(),
        }
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Get an optional environment variable.
#[must_use]
pub fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

/// Get a required environment variable.
///
/// # Errors
///
/// Returns `ConfigError::MissingEnvVar` if the variable is unset.
pub fn require_env(key: &str) -> Result<String, ConfigError> {
    std::env::var(key).map_err(|_| ConfigError::MissingEnvVar(key.to_string()))
}
