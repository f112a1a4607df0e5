//! ShopEase Core - Shared client plumbing.
//!
//! This crate provides everything the surface crates share:
//! - `storefront` - Customer-facing page glue (cart, toasts, page wiring)
//! - `admin` - Admin-panel glue (access gate, alerts, table filtering)
//! - `cli` - Command-line driver for manual testing
//!
//! # Architecture
//!
//! The browser globals of a conventional storefront frontend (local
//! storage, `window.location`, inline alerts) are modeled as injectable
//! seams: [`session::SessionStore`], [`navigate::Navigator`], and
//! [`notify::Notifier`]. The one piece of real I/O is
//! [`api::ApiClient`], the request engine both surfaces share; it is
//! parameterized by an [`api::AuthPolicy`] instead of existing in a
//! customer and an admin variant.
//!
//! # Modules
//!
//! - [`api`] - Request engine, authorization policy, error taxonomy
//! - [`config`] - Environment-driven client configuration
//! - [`format`] - Currency and date display formatting
//! - [`navigate`] - Location/redirect seam
//! - [`notify`] - Notification model and presenter seam
//! - [`session`] - Token and user-record storage seam

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod api;
pub mod config;
pub mod format;
pub mod navigate;
pub mod notify;
pub mod session;

pub use api::{ApiClient, ApiError, AuthPolicy};
pub use config::{ClientConfig, ConfigError};
pub use format::{FormatError, format_currency, format_currency_f64, format_date};
pub use navigate::{MemoryNavigator, Navigator};
pub use notify::{MemoryNotifier, Notification, NotificationKind, Notifier, NullNotifier};
pub use session::{MemorySessionStore, Role, SessionStore, StoredUser};
