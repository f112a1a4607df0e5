//! Admin-surface client facade.

use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde_json::Value;
use shopease_core::api::{ApiClient, ApiError, AuthPolicy, Method};
use shopease_core::config::ClientConfig;
use shopease_core::navigate::Navigator;
use shopease_core::notify::Notifier;
use shopease_core::session::SessionStore;

/// Client for the admin panel.
///
/// Wraps the core engine with the admin policy: a stored token is
/// mandatory before any request leaves, and both 401 and 403 end the
/// session with a "Session expired or access denied" notice. Cheap to
/// clone.
#[derive(Clone)]
pub struct AdminClient {
    api: ApiClient,
}

impl AdminClient {
    /// Create a new admin client.
    #[must_use]
    pub fn new(
        config: &ClientConfig,
        session: Arc<dyn SessionStore>,
        navigator: Arc<dyn Navigator>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        let policy = AuthPolicy::admin().with_login_redirect(&config.login_path);
        Self {
            api: ApiClient::new(config, policy, session, navigator, notifier),
        }
    }

    /// The underlying request engine.
    #[must_use]
    pub fn api(&self) -> &ApiClient {
        &self.api
    }

    /// Raw passthrough for arbitrary admin endpoints.
    ///
    /// Admin pages drive most of their fetches through this: the endpoint
    /// and payload vary per page, the auth handling does not.
    ///
    /// # Errors
    ///
    /// Same as [`ApiClient::call`].
    pub async fn call(
        &self,
        method: Method,
        endpoint: &str,
        body: Option<&Value>,
    ) -> Result<Option<Value>, ApiError> {
        self.api.call(method, endpoint, body).await
    }

    /// GET an admin endpoint into a typed value.
    ///
    /// # Errors
    ///
    /// Same as [`ApiClient::call`].
    pub async fn get<T: DeserializeOwned>(&self, endpoint: &str) -> Result<Option<T>, ApiError> {
        self.api.get(endpoint).await
    }

    /// POST to an admin endpoint.
    ///
    /// # Errors
    ///
    /// Same as [`ApiClient::call`].
    pub async fn post<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        body: Option<&Value>,
    ) -> Result<Option<T>, ApiError> {
        self.api.post(endpoint, body).await
    }

    /// PUT to an admin endpoint.
    ///
    /// # Errors
    ///
    /// Same as [`ApiClient::call`].
    pub async fn put<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        body: Option<&Value>,
    ) -> Result<Option<T>, ApiError> {
        self.api.put(endpoint, body).await
    }

    /// DELETE an admin endpoint.
    ///
    /// # Errors
    ///
    /// Same as [`ApiClient::call`].
    pub async fn delete<T: DeserializeOwned>(
        &self,
        endpoint: &str,
    ) -> Result<Option<T>, ApiError> {
        self.api.delete(endpoint).await
    }

    /// End the session and send the user to login.
    pub fn logout(&self) {
        self.api.logout();
    }
}
