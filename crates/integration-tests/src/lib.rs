//! Integration tests for ShopEase client flows.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p shopease-integration-tests
//! ```
//!
//! Each test starts a `wiremock` server standing in for the ShopEase
//! backend and drives the real clients against it; no running server or
//! credentials are required.
//!
//! # Test Categories
//!
//! - `customer_api` - Customer request engine: headers, auth policy, errors
//! - `admin_api` - Admin token gate, expiry handling, passthrough calls
//! - `cart_flow` - Add-to-cart and badge refresh flows

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::sync::Arc;

use shopease_admin::AdminClient;
use shopease_core::{
    ClientConfig, MemoryNavigator, MemoryNotifier, MemorySessionStore, Navigator, Notifier, Role,
    SessionStore, StoredUser,
};
use shopease_storefront::CustomerClient;
use url::Url;

/// Everything a client flow needs, wired to in-memory fakes.
///
/// The session, navigator, and notifier handles stay inspectable after
/// the clients consume their `Arc` clones, so tests can assert on what a
/// flow stored, where it redirected, and what it showed the user.
pub struct TestContext {
    pub config: ClientConfig,
    pub session: Arc<MemorySessionStore>,
    pub navigator: Arc<MemoryNavigator>,
    pub notifier: Arc<MemoryNotifier>,
}

impl TestContext {
    /// Context with an empty session, pointed at `server_uri`.
    #[must_use]
    pub fn logged_out(server_uri: &str) -> Self {
        Self::build(server_uri, MemorySessionStore::new())
    }

    /// Context with a stored token and a customer user record.
    #[must_use]
    pub fn logged_in(server_uri: &str, token: &str) -> Self {
        let user = StoredUser::with_role(Role::Customer);
        Self::build(server_uri, MemorySessionStore::with_session(token, &user))
    }

    /// Context with a stored token and an admin user record.
    #[must_use]
    pub fn logged_in_admin(server_uri: &str, token: &str) -> Self {
        let user = StoredUser::with_role(Role::Admin);
        Self::build(server_uri, MemorySessionStore::with_session(token, &user))
    }

    fn build(server_uri: &str, session: MemorySessionStore) -> Self {
        let config = ClientConfig {
            api_base: Url::parse(server_uri).expect("mock server URI is a valid URL"),
            login_path: "/login".to_owned(),
            home_path: "/".to_owned(),
        };
        Self {
            config,
            session: Arc::new(session),
            navigator: Arc::new(MemoryNavigator::default()),
            notifier: Arc::new(MemoryNotifier::new()),
        }
    }

    /// Customer client sharing this context's fakes.
    #[must_use]
    pub fn customer(&self) -> CustomerClient {
        CustomerClient::new(
            &self.config,
            Arc::clone(&self.session) as Arc<dyn SessionStore>,
            Arc::clone(&self.navigator) as Arc<dyn Navigator>,
            Arc::clone(&self.notifier) as Arc<dyn Notifier>,
        )
    }

    /// Admin client sharing this context's fakes.
    #[must_use]
    pub fn admin(&self) -> AdminClient {
        AdminClient::new(
            &self.config,
            Arc::clone(&self.session) as Arc<dyn SessionStore>,
            Arc::clone(&self.navigator) as Arc<dyn Navigator>,
            Arc::clone(&self.notifier) as Arc<dyn Notifier>,
        )
    }
}
