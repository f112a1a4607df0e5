//! ShopEase Storefront library.
//!
//! Customer-facing client glue: the add-to-cart flow with its badge and
//! login gating, the toast presenter, and the page behaviors every
//! storefront page boots with (badge refresh, mobile nav, anchor
//! scrolling, lazy images, debounced inputs).

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod client;
pub mod notify;
pub mod page;

pub use cart::{CartBadge, CartService, CartTotal};
pub use client::CustomerClient;
pub use notify::ToastStack;
