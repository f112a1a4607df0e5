//! Session state: the token and cached user record.
//!
//! Browser hosts keep these in local storage as page-global state. Here
//! the storage is an explicit [`SessionStore`] seam injected into the
//! request engine, so an in-memory fake can stand in during tests and any
//! host (CLI, embedded UI) can supply its own persistence.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use serde::{Deserialize, Serialize};

/// Storage keys for session data.
pub mod keys {
    /// Key for the bearer token proving identity to the API.
    pub const TOKEN: &str = "token";

    /// Key for the cached user record (JSON, at least a `role` field).
    pub const USER: &str = "user";

    /// Key for the discount code carried between pages.
    pub const DISCOUNT_CODE: &str = "discountCode";
}

/// User role as the API reports it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    #[default]
    Customer,
    Admin,
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Customer => write!(f, "CUSTOMER"),
            Self::Admin => write!(f, "ADMIN"),
        }
    }
}

impl std::str::FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "CUSTOMER" => Ok(Self::Customer),
            "ADMIN" => Ok(Self::Admin),
            _ => Err(format!("invalid role: {s}")),
        }
    }
}

/// Cached user record stored alongside the token.
///
/// Written by the (external) login flow and read-only here. Fields beyond
/// the ones this client inspects are carried through untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StoredUser {
    /// User's database ID.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    /// Display name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Email address.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Role used to gate admin pages.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,
    /// Everything else the server put in the record.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl StoredUser {
    /// Create a record carrying only a role.
    #[must_use]
    pub fn with_role(role: Role) -> Self {
        Self {
            role: Some(role),
            ..Self::default()
        }
    }

    /// Whether this record grants admin access.
    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.role == Some(Role::Admin)
    }
}

/// Key-value session storage with the token/user helpers layered on top.
///
/// Implementations only provide `get`/`set`/`remove`; the session-shaped
/// accessors are derived. Access is synchronous, like the local storage
/// it models.
pub trait SessionStore: Send + Sync {
    /// Read a value.
    fn get(&self, key: &str) -> Option<String>;

    /// Write a value, replacing any previous one.
    fn set(&self, key: &str, value: &str);

    /// Delete a value. Removing an absent key is a no-op.
    fn remove(&self, key: &str);

    /// The bearer token, if a session is active.
    fn token(&self) -> Option<String> {
        self.get(keys::TOKEN)
    }

    /// Whether a token is present. Validity is the server's call.
    fn is_logged_in(&self) -> bool {
        self.token().is_some()
    }

    /// The cached user record.
    ///
    /// Returns `None` when absent or unparseable; a corrupt record reads
    /// as "no user", never as an error.
    fn current_user(&self) -> Option<StoredUser> {
        let raw = self.get(keys::USER)?;
        serde_json::from_str(&raw).ok()
    }

    /// Persist a token and user record, as the external login flow would.
    fn store_login(&self, token: &str, user: &StoredUser) {
        self.set(keys::TOKEN, token);
        if let Ok(raw) = serde_json::to_string(user) {
            self.set(keys::USER, &raw);
        }
    }

    /// Drop everything session-scoped: token, user record, discount code.
    fn clear_session(&self) {
        self.remove(keys::TOKEN);
        self.remove(keys::USER);
        self.remove(keys::DISCOUNT_CODE);
    }
}

/// In-memory [`SessionStore`].
///
/// The substitutable store used by the CLI and by tests; a browser host
/// would back the same trait with its local storage.
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    values: Mutex<HashMap<String, String>>,
}

impl MemorySessionStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store holding an active session.
    #[must_use]
    pub fn with_session(token: &str, user: &StoredUser) -> Self {
        let store = Self::new();
        store.store_login(token, user);
        store
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<String, String>> {
        self.values.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl SessionStore for MemorySessionStore {
    fn get(&self, key: &str) -> Option<String> {
        self.lock().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) {
        self.lock().insert(key.to_string(), value.to_string());
    }

    fn remove(&self, key: &str) {
        self.lock().remove(key);
    }
}
