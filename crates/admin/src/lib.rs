//! ShopEase Admin library.
//!
//! Admin-panel client glue: the page-load access gate, the sidebar
//! highlight, the dismissible alert presenter, and client-side table
//! filtering. Every request goes through the admin policy: no token
//! means no request, and a 401 or 403 ends the session with a notice.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod boot;
pub mod client;
pub mod notify;
pub mod table;

pub use boot::{AdminAccess, SidebarNav, ensure_admin_access};
pub use client::AdminClient;
pub use notify::AlertStack;
pub use table::{DataTable, TableSet};
