//! Shopping cart state.
//!
//! A [`Cart`] is an insertion-ordered list of [`LineItem`]s. A line item is
//! identified by its product id *and* its option set, so the same shirt in
//! two sizes occupies two lines. Adding an existing line bumps its quantity;
//! removing decrements it and drops the line when it would reach zero.
//!
//! [`CartStore`] wraps a cart with a durable [`KeyValueStore`](crate::KeyValueStore)
//! slot and writes through on every mutation.

mod store;

pub use store::{CartStore, hydrate};

use std::num::NonZeroU32;

use serde::{Deserialize, Serialize};

use crate::types::{OptionSet, Price, Product, ProductId};

/// One distinct (product, chosen options) entry in the cart.
///
/// Display fields are copied from the product when the line is first created
/// and are not refreshed afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    #[serde(rename = "id")]
    pub product_id: ProductId,
    pub title: String,
    pub price: Price,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub options: OptionSet,
    pub quantity: NonZeroU32,
}

impl LineItem {
    fn new(product: &Product, options: OptionSet) -> Self {
        Self {
            product_id: product.id.clone(),
            title: product.title.clone(),
            price: product.price,
            image: product.image.clone(),
            options,
            quantity: NonZeroU32::MIN,
        }
    }

    /// Whether this line is the one identified by `(product_id, options)`.
    ///
    /// Ids must match exactly and option sets must be equal as unordered
    /// maps. `None` and an empty set are interchangeable.
    #[must_use]
    pub fn matches(&self, product_id: &ProductId, options: Option<&OptionSet>) -> bool {
        self.product_id == *product_id
            && match options {
                Some(options) => self.options == *options,
                None => self.options.is_empty(),
            }
    }

    /// Price times quantity, unrounded.
    #[must_use]
    pub fn line_total(&self) -> Price {
        self.price * self.quantity.get()
    }
}

/// What [`Cart::remove`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemoveOutcome {
    /// The line's quantity dropped to the contained value.
    Decremented(NonZeroU32),
    /// The line had quantity 1 and is gone.
    Removed,
    /// No line matched; nothing changed.
    NotFound,
}

/// Insertion-ordered collection of line items with unique identities.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Cart {
    items: Vec<LineItem>,
}

impl Cart {
    #[must_use]
    pub const fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Build a cart from loose line items, merging any that share an
    /// identity. The merged line keeps the position of its first occurrence.
    #[must_use]
    pub fn from_items(items: impl IntoIterator<Item = LineItem>) -> Self {
        let mut cart = Self::new();
        for item in items {
            match cart.position(&item.product_id, Some(&item.options)) {
                Some(idx) => {
                    if let Some(existing) = cart.items.get_mut(idx) {
                        existing.quantity = existing.quantity.saturating_add(item.quantity.get());
                    }
                }
                None => cart.items.push(item),
            }
        }
        cart
    }

    fn position(&self, product_id: &ProductId, options: Option<&OptionSet>) -> Option<usize> {
        self.items
            .iter()
            .position(|item| item.matches(product_id, options))
    }

    /// Add one unit of `product` with the given options.
    ///
    /// Returns the line's new quantity.
    pub fn add(&mut self, product: &Product, options: Option<OptionSet>) -> NonZeroU32 {
        let options = OptionSet::from_optional(options);
        if let Some(item) = self
            .items
            .iter_mut()
            .find(|item| item.matches(&product.id, Some(&options)))
        {
            item.quantity = item.quantity.saturating_add(1);
            return item.quantity;
        }

        let item = LineItem::new(product, options);
        let quantity = item.quantity;
        self.items.push(item);
        quantity
    }

    /// Remove one unit of the matching line. Missing lines are a no-op.
    pub fn remove(&mut self, product_id: &ProductId, options: Option<&OptionSet>) -> RemoveOutcome {
        let Some(idx) = self.position(product_id, options) else {
            return RemoveOutcome::NotFound;
        };

        let current = self.items.get(idx).map_or(1, |item| item.quantity.get());

        match NonZeroU32::new(current - 1) {
            Some(quantity) => {
                if let Some(item) = self.items.get_mut(idx) {
                    item.quantity = quantity;
                }
                RemoveOutcome::Decremented(quantity)
            }
            None => {
                self.items.remove(idx);
                RemoveOutcome::Removed
            }
        }
    }

    /// Drop every line.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Sum of price × quantity over all lines, rounded to cents.
    #[must_use]
    pub fn total(&self) -> Price {
        self.items
            .iter()
            .map(LineItem::line_total)
            .sum::<Price>()
            .rounded()
    }

    /// Total number of units across all lines.
    #[must_use]
    pub fn item_count(&self) -> u32 {
        self.items
            .iter()
            .fold(0, |acc, item| acc.saturating_add(item.quantity.get()))
    }

    #[must_use]
    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    /// Find the line identified by `(product_id, options)`.
    #[must_use]
    pub fn get(&self, product_id: &ProductId, options: Option<&OptionSet>) -> Option<&LineItem> {
        self.items
            .iter()
            .find(|item| item.matches(product_id, options))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl<'de> Deserialize<'de> for Cart {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Vec::<LineItem>::deserialize(deserializer).map(Self::from_items)
    }
}
