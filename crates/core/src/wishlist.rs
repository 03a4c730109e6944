//! Wishlist: products saved for later, unique by product id.
//!
//! Unlike the cart, a wishlist has no quantities or options and is not
//! written to a durable slot; it lives as long as the visitor's session.

use serde::{Deserialize, Serialize};

use crate::types::{Product, ProductId};

/// Which way [`Wishlist::toggle`] went.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WishlistAction {
    Added,
    Removed,
}

impl WishlistAction {
    /// Notification text for `title`, e.g. `"Mug added to wishlist"`.
    #[must_use]
    pub fn message(self, title: &str) -> String {
        match self {
            Self::Added => format!("{title} added to wishlist"),
            Self::Removed => format!("{title} removed from wishlist"),
        }
    }
}

/// Ordered set of saved products.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Wishlist {
    entries: Vec<Product>,
}

impl Wishlist {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Append `product` unless its id is already present.
    ///
    /// Returns `true` if the wishlist changed.
    pub fn add(&mut self, product: Product) -> bool {
        if self.contains(&product.id) {
            return false;
        }
        self.entries.push(product);
        true
    }

    /// Remove the entry for `product_id`, if any.
    ///
    /// Returns `true` if the wishlist changed.
    pub fn remove(&mut self, product_id: &ProductId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|entry| entry.id != *product_id);
        self.entries.len() != before
    }

    /// Remove `product` if present, add it otherwise.
    pub fn toggle(&mut self, product: Product) -> WishlistAction {
        if self.remove(&product.id) {
            WishlistAction::Removed
        } else {
            self.entries.push(product);
            WishlistAction::Added
        }
    }

    #[must_use]
    pub fn contains(&self, product_id: &ProductId) -> bool {
        self.entries.iter().any(|entry| entry.id == *product_id)
    }

    #[must_use]
    pub fn get(&self, product_id: &ProductId) -> Option<&Product> {
        self.entries.iter().find(|entry| entry.id == *product_id)
    }

    #[must_use]
    pub fn entries(&self) -> &[Product] {
        &self.entries
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
