//! Customer-surface client facade.

use std::sync::Arc;

use shopease_core::api::{ApiClient, AuthPolicy};
use shopease_core::config::ClientConfig;
use shopease_core::navigate::Navigator;
use shopease_core::notify::Notifier;
use shopease_core::session::SessionStore;

use crate::cart::CartService;

/// Client for the customer-facing pages.
///
/// Wraps the core engine with the customer policy: anonymous requests
/// allowed, 401 ends the session silently. Cheap to clone.
#[derive(Clone)]
pub struct CustomerClient {
    api: ApiClient,
}

impl CustomerClient {
    /// Create a new customer client.
    #[must_use]
    pub fn new(
        config: &ClientConfig,
        session: Arc<dyn SessionStore>,
        navigator: Arc<dyn Navigator>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        let policy = AuthPolicy::customer().with_login_redirect(&config.login_path);
        Self {
            api: ApiClient::new(config, policy, session, navigator, notifier),
        }
    }

    /// The underlying request engine.
    #[must_use]
    pub fn api(&self) -> &ApiClient {
        &self.api
    }

    /// Whether a session token is stored.
    #[must_use]
    pub fn is_logged_in(&self) -> bool {
        self.api.session().is_logged_in()
    }

    /// Cart operations bound to this client.
    #[must_use]
    pub fn cart(&self) -> CartService {
        CartService::new(self.api.clone())
    }

    /// End the session and send the user to login.
    pub fn logout(&self) {
        self.api.logout();
    }
}
