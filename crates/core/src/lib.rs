//! Fake Store Core - domain types and the cart/wishlist state model.
//!
//! This crate is shared by the web storefront and the `fs-cli` tool:
//! - `storefront` - Server-rendered shop backed by the Fake Store API
//! - `cli` - Command-line access to persisted carts and the catalog
//!
//! # Architecture
//!
//! The core crate contains only types, traits and in-memory state. No
//! network access and no filesystem; durable storage is reached through the
//! [`storage::KeyValueStore`] trait, which the storefront implements on disk.
//!
//! # Modules
//!
//! - [`types`] - Product ids, prices, option sets, products, emails
//! - [`cart`] - Line items, identity matching and the persisted cart store
//! - [`wishlist`] - Session-scoped set of saved products
//! - [`storage`] - Key-value slot abstraction and an in-memory implementation
//! - [`variants`] - Per-category option choices offered at add-to-cart time
//! - [`checkout`] - Shipping form validation

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod checkout;
pub mod storage;
pub mod types;
pub mod variants;
pub mod wishlist;

pub use cart::{Cart, CartStore, LineItem, RemoveOutcome};
pub use storage::{CART_KEY, KeyValueStore, MemoryStore};
pub use types::*;
pub use wishlist::{Wishlist, WishlistAction};
