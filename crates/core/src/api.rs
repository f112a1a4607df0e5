//! Unified request engine for the ShopEase REST API.
//!
//! One engine serves both surfaces: the customer pages and the admin
//! panel differ only in their [`AuthPolicy`] (whether a token is
//! mandatory before any request leaves, and which response statuses mean
//! the session is dead). Auth failure is not an error here: the engine
//! clears the session, redirects through the [`Navigator`], and resolves
//! to `Ok(None)` so call sites fall through quietly.

use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, instrument, warn};
use url::Url;

use crate::config::ClientConfig;
use crate::navigate::Navigator;
use crate::notify::Notifier;
use crate::session::SessionStore;

// Callers speak this vocabulary without depending on reqwest themselves.
pub use reqwest::{Method, StatusCode};

/// Message shown when an error response has no usable `message` field.
const FALLBACK_MESSAGE: &str = "Request failed";

// =============================================================================
// ApiError
// =============================================================================

/// Errors that can occur on the request path.
///
/// Session expiry is deliberately absent: expired sessions resolve to
/// `Ok(None)` after their side effects, never to an error.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Transport-level failure (connection refused, DNS, timeout).
    #[error("transport error: {0}")]
    Http(#[from] reqwest::Error),

    /// Server answered with a non-success status outside the policy's
    /// unauthorized set. `message` is the body's `message` field, or
    /// `"Request failed"` when the body had none.
    #[error("API error ({status}): {message}")]
    Api {
        status: StatusCode,
        message: String,
    },

    /// A success response carried a body this client could not parse.
    #[error("failed to parse response body")]
    Parse(#[from] serde_json::Error),

    /// Endpoint could not be joined onto the configured base URL.
    #[error("invalid endpoint {endpoint:?}: {source}")]
    InvalidUrl {
        endpoint: String,
        source: url::ParseError,
    },
}

// =============================================================================
// AuthPolicy
// =============================================================================

/// How a client surface treats authorization.
#[derive(Debug, Clone)]
pub struct AuthPolicy {
    /// Refuse to issue requests without a stored token, redirecting to
    /// login instead.
    pub require_token: bool,
    /// Response statuses that invalidate the session.
    pub unauthorized: Vec<StatusCode>,
    /// Where the user is sent when the session is missing or rejected.
    pub login_redirect: String,
    /// Notification emitted when the session is rejected, if any.
    pub expired_notice: Option<String>,
}

impl AuthPolicy {
    /// Customer-page policy: anonymous requests are allowed, a 401 ends
    /// the session silently.
    #[must_use]
    pub fn customer() -> Self {
        Self {
            require_token: false,
            unauthorized: vec![StatusCode::UNAUTHORIZED],
            login_redirect: "/login".to_string(),
            expired_notice: None,
        }
    }

    /// Admin-panel policy: a token is mandatory, both 401 and 403 end the
    /// session, and the user is told why.
    #[must_use]
    pub fn admin() -> Self {
        Self {
            require_token: true,
            unauthorized: vec![StatusCode::UNAUTHORIZED, StatusCode::FORBIDDEN],
            login_redirect: "/login".to_string(),
            expired_notice: Some("Session expired or access denied".to_string()),
        }
    }

    /// Replace the login redirect target.
    #[must_use]
    pub fn with_login_redirect(mut self, path: &str) -> Self {
        self.login_redirect = path.to_string();
        self
    }
}

// =============================================================================
// ApiClient
// =============================================================================

/// Client for the ShopEase REST API.
///
/// Cheap to clone; all state lives behind an `Arc`. The session store,
/// navigator, and notifier are injected so hosts decide persistence,
/// redirects, and presentation.
#[derive(Clone)]
pub struct ApiClient {
    inner: Arc<ApiClientInner>,
}

struct ApiClientInner {
    client: reqwest::Client,
    base_url: Url,
    policy: AuthPolicy,
    session: Arc<dyn SessionStore>,
    navigator: Arc<dyn Navigator>,
    notifier: Arc<dyn Notifier>,
}

impl ApiClient {
    /// Create a new API client.
    #[must_use]
    pub fn new(
        config: &ClientConfig,
        policy: AuthPolicy,
        session: Arc<dyn SessionStore>,
        navigator: Arc<dyn Navigator>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            inner: Arc::new(ApiClientInner {
                client: reqwest::Client::new(),
                base_url: config.api_base.clone(),
                policy,
                session,
                navigator,
                notifier,
            }),
        }
    }

    /// The session store this client reads tokens from.
    #[must_use]
    pub fn session(&self) -> &Arc<dyn SessionStore> {
        &self.inner.session
    }

    /// The navigator redirects go through.
    #[must_use]
    pub fn navigator(&self) -> &Arc<dyn Navigator> {
        &self.inner.navigator
    }

    /// The notifier user-facing messages go through.
    #[must_use]
    pub fn notifier(&self) -> &Arc<dyn Notifier> {
        &self.inner.notifier
    }

    /// The policy this client was built with.
    #[must_use]
    pub fn policy(&self) -> &AuthPolicy {
        &self.inner.policy
    }

    /// Issue a request and interpret the response under this client's
    /// policy.
    ///
    /// `Ok(Some(json))` is a parsed success body. `Ok(None)` means the
    /// session was missing or rejected: storage has been cleared (on
    /// rejection), the user is on their way to login, and there is
    /// nothing to render.
    ///
    /// The body is attached only for non-GET methods. A bearer header is
    /// attached whenever a token is stored.
    ///
    /// # Errors
    ///
    /// [`ApiError::Api`] for non-success statuses outside the policy's
    /// unauthorized set, [`ApiError::Http`] for transport failures,
    /// [`ApiError::Parse`] for an unparseable success body, and
    /// [`ApiError::InvalidUrl`] when the endpoint does not join onto the
    /// base URL.
    #[instrument(skip(self, body), fields(method = %method, endpoint = %endpoint))]
    pub async fn call(
        &self,
        method: Method,
        endpoint: &str,
        body: Option<&Value>,
    ) -> Result<Option<Value>, ApiError> {
        let token = self.inner.session.token();
        if token.is_none() && self.inner.policy.require_token {
            debug!("no session token, redirecting to login");
            self.inner.navigator.goto(&self.inner.policy.login_redirect);
            return Ok(None);
        }

        let url = self
            .inner
            .base_url
            .join(endpoint)
            .map_err(|source| ApiError::InvalidUrl {
                endpoint: endpoint.to_string(),
                source,
            })?;

        let mut request = self
            .inner
            .client
            .request(method.clone(), url)
            .header("Content-Type", "application/json");
        if let Some(token) = &token {
            request = request.bearer_auth(token);
        }
        if method != Method::GET
            && let Some(body) = body
        {
            request = request.json(body);
        }

        let response = request.send().await?;
        let status = response.status();

        if self.inner.policy.unauthorized.contains(&status) {
            warn!(status = %status, "session rejected, clearing and redirecting to login");
            if let Some(notice) = &self.inner.policy.expired_notice {
                self.inner.notifier.warning(notice);
            }
            self.inner.session.clear_session();
            self.inner.navigator.goto(&self.inner.policy.login_redirect);
            return Ok(None);
        }

        let response_text = response.text().await?;

        if !status.is_success() {
            let message = error_message(&response_text);
            tracing::error!(status = %status, message = %message, "API returned non-success status");
            return Err(ApiError::Api { status, message });
        }

        match serde_json::from_str(&response_text) {
            Ok(value) => {
                debug!(status = %status, "request succeeded");
                Ok(Some(value))
            }
            Err(e) => {
                tracing::error!(
                    status = %status,
                    body = %response_text.chars().take(500).collect::<String>(),
                    "failed to parse response body"
                );
                Err(ApiError::Parse(e))
            }
        }
    }

    /// GET `endpoint` and deserialize the success body.
    ///
    /// # Errors
    ///
    /// Same as [`ApiClient::call`]; a success body that does not fit `T`
    /// is [`ApiError::Parse`].
    pub async fn get<T: DeserializeOwned>(&self, endpoint: &str) -> Result<Option<T>, ApiError> {
        self.typed(Method::GET, endpoint, None).await
    }

    /// POST to `endpoint` and deserialize the success body.
    ///
    /// # Errors
    ///
    /// Same as [`ApiClient::call`].
    pub async fn post<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        body: Option<&Value>,
    ) -> Result<Option<T>, ApiError> {
        self.typed(Method::POST, endpoint, body).await
    }

    /// PUT to `endpoint` and deserialize the success body.
    ///
    /// # Errors
    ///
    /// Same as [`ApiClient::call`].
    pub async fn put<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        body: Option<&Value>,
    ) -> Result<Option<T>, ApiError> {
        self.typed(Method::PUT, endpoint, body).await
    }

    /// DELETE `endpoint` and deserialize the success body.
    ///
    /// # Errors
    ///
    /// Same as [`ApiClient::call`].
    pub async fn delete<T: DeserializeOwned>(
        &self,
        endpoint: &str,
    ) -> Result<Option<T>, ApiError> {
        self.typed(Method::DELETE, endpoint, None).await
    }

    async fn typed<T: DeserializeOwned>(
        &self,
        method: Method,
        endpoint: &str,
        body: Option<&Value>,
    ) -> Result<Option<T>, ApiError> {
        match self.call(method, endpoint, body).await? {
            Some(value) => Ok(Some(serde_json::from_value(value)?)),
            None => Ok(None),
        }
    }

    /// End the session: clear storage and send the user to login.
    pub fn logout(&self) {
        self.inner.session.clear_session();
        self.inner.navigator.goto(&self.inner.policy.login_redirect);
    }
}

/// Best-effort extraction of a human-readable message from an error body.
///
/// Non-JSON bodies, bodies without a `message` field, and empty messages
/// all fall back to `"Request failed"`.
fn error_message(body: &str) -> String {
    let parsed: Option<Value> = serde_json::from_str(body).ok();
    parsed
        .as_ref()
        .and_then(|value| value.get("message"))
        .and_then(Value::as_str)
        .filter(|message| !message.is_empty())
        .unwrap_or(FALLBACK_MESSAGE)
        .to_string()
}
