//! Cart persistence bridge.

use std::num::NonZeroU32;

use tracing::{debug, warn};

use super::{Cart, RemoveOutcome};
use crate::storage::{CART_KEY, KeyValueStore};
use crate::types::{OptionSet, Price, Product, ProductId};

/// A [`Cart`] bound to a durable slot.
///
/// The slot is read once in [`CartStore::load`] and rewritten after every
/// mutation. Reads that fail or hold garbage yield an empty cart, and failed
/// writes are logged; neither surfaces as an error to the caller because the
/// in-memory cart stays authoritative.
#[derive(Debug)]
pub struct CartStore<S: KeyValueStore> {
    cart: Cart,
    storage: S,
}

impl<S: KeyValueStore> CartStore<S> {
    /// Hydrate a store from the `"cart"` slot of `storage`.
    pub fn load(storage: S) -> Self {
        let cart = match storage.get(CART_KEY) {
            Ok(raw) => hydrate(raw.as_deref()),
            Err(e) => {
                warn!(error = %e, "Failed to read persisted cart, starting empty");
                Cart::new()
            }
        };

        Self { cart, storage }
    }

    /// Add one unit of `product`; see [`Cart::add`].
    pub fn add_to_cart(&mut self, product: &Product, options: Option<OptionSet>) -> NonZeroU32 {
        let quantity = self.cart.add(product, options);
        self.persist();
        quantity
    }

    /// Remove one unit of a line; see [`Cart::remove`].
    pub fn remove_from_cart(
        &mut self,
        product_id: &ProductId,
        options: Option<&OptionSet>,
    ) -> RemoveOutcome {
        let outcome = self.cart.remove(product_id, options);
        self.persist();
        outcome
    }

    /// Empty the cart.
    pub fn clear_cart(&mut self) {
        self.cart.clear();
        self.persist();
    }

    /// Cart total rounded to cents.
    #[must_use]
    pub fn get_total(&self) -> Price {
        self.cart.total()
    }

    #[must_use]
    pub const fn cart(&self) -> &Cart {
        &self.cart
    }

    fn persist(&self) {
        let json = match serde_json::to_string(&self.cart) {
            Ok(json) => json,
            Err(e) => {
                warn!(error = %e, "Failed to serialize cart");
                return;
            }
        };

        match self.storage.set(CART_KEY, &json) {
            Ok(()) => debug!(lines = self.cart.len(), "Cart persisted"),
            Err(e) => warn!(error = %e, "Failed to persist cart"),
        }
    }
}

/// Parse a persisted cart slot.
///
/// `None`, blank input, or anything that does not parse as a list of line
/// items produces an empty cart.
#[must_use]
pub fn hydrate(raw: Option<&str>) -> Cart {
    let Some(raw) = raw.map(str::trim).filter(|s| !s.is_empty()) else {
        return Cart::new();
    };

    serde_json::from_str(raw).unwrap_or_else(|e| {
        warn!(error = %e, "Persisted cart is corrupted, starting empty");
        Cart::new()
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::io;

    use super::*;
    use crate::storage::MemoryStore;

    fn product(id: u64, cents: u32) -> Product {
        Product {
            id: ProductId::from(id),
            title: format!("Product {id}"),
            price: Price::from_cents(cents),
            description: "desc".to_string(),
            category: "jewelery".to_string(),
            image: format!("https://img.example/{id}.jpg"),
            rating: None,
        }
    }

    /// A slot store that can neither read nor write.
    #[derive(Debug)]
    struct BrokenStore;

    impl KeyValueStore for BrokenStore {
        type Error = io::Error;

        fn get(&self, _key: &str) -> Result<Option<String>, Self::Error> {
            Err(io::Error::other("disk on fire"))
        }

        fn set(&self, _key: &str, _value: &str) -> Result<(), Self::Error> {
            Err(io::Error::other("disk on fire"))
        }

        fn remove(&self, _key: &str) -> Result<(), Self::Error> {
            Err(io::Error::other("disk on fire"))
        }
    }

    #[test]
    fn test_round_trip_through_restart() {
        let slots = MemoryStore::new();
        let ring = OptionSet::from_iter([("metal", "Gold"), ("size", "7")]);

        let mut store = CartStore::load(slots.clone());
        store.add_to_cart(&product(5, 69_599), Some(ring.clone()));
        store.add_to_cart(&product(5, 69_599), Some(ring.clone()));
        store.add_to_cart(&product(6, 16_800), None);
        let before = store.cart().clone();

        let restarted = CartStore::load(slots);
        assert_eq!(*restarted.cart(), before);
        assert_eq!(
            restarted
                .cart()
                .get(&ProductId::from(5), Some(&ring))
                .unwrap()
                .quantity
                .get(),
            2
        );
    }

    #[test]
    fn test_every_mutation_writes_through() {
        let slots = MemoryStore::new();
        let mut store = CartStore::load(slots.clone());

        store.add_to_cart(&product(1, 100), None);
        assert!(slots.get(CART_KEY).unwrap().unwrap().contains("\"quantity\":1"));

        store.remove_from_cart(&ProductId::from(1), None);
        assert_eq!(slots.get(CART_KEY).unwrap().as_deref(), Some("[]"));

        store.add_to_cart(&product(2, 100), None);
        store.clear_cart();
        assert_eq!(slots.get(CART_KEY).unwrap().as_deref(), Some("[]"));
    }

    #[test]
    fn test_absent_slot_is_empty_cart() {
        let store = CartStore::load(MemoryStore::new());
        assert!(store.cart().is_empty());
    }

    #[test]
    fn test_corrupted_slot_is_empty_cart() {
        for garbage in ["{not json", "42", "{\"id\":1}", "[{\"id\":1}]", "   "] {
            let slots = MemoryStore::new();
            slots.set(CART_KEY, garbage).unwrap();
            let store = CartStore::load(slots);
            assert!(store.cart().is_empty(), "slot {garbage:?} should hydrate empty");
        }
    }

    #[test]
    fn test_absurd_price_slot_is_empty_cart() {
        let slots = MemoryStore::new();
        slots
            .set(
                CART_KEY,
                r#"[{"id":1,"title":"A","price":70000000000000000000000000000,"image":"","options":{},"quantity":2}]"#,
            )
            .unwrap();
        let store = CartStore::load(slots);
        assert!(store.cart().is_empty());
        assert_eq!(store.get_total(), Price::ZERO);
    }

    #[test]
    fn test_total_at_max_price_and_quantity_does_not_panic() {
        let slots = MemoryStore::new();
        slots
            .set(
                CART_KEY,
                r#"[{"id":1,"title":"A","price":1000000000,"quantity":4294967295},
                    {"id":2,"title":"B","price":1000000000,"quantity":4294967295}]"#,
            )
            .unwrap();
        let store = CartStore::load(slots);
        assert_eq!(store.cart().len(), 2);
        assert!(store.get_total() > Price::ZERO);
        assert_eq!(store.cart().item_count(), u32::MAX);
    }

    #[test]
    fn test_unreadable_storage_is_empty_cart() {
        let store = CartStore::load(BrokenStore);
        assert!(store.cart().is_empty());
    }

    #[test]
    fn test_failed_write_keeps_in_memory_state() {
        let mut store = CartStore::load(BrokenStore);
        store.add_to_cart(&product(1, 250), None);
        store.add_to_cart(&product(1, 250), None);

        assert_eq!(store.cart().item_count(), 2);
        assert_eq!(store.get_total().to_fixed(), "5.00");
    }

    #[test]
    fn test_hydrate_reads_browser_shape() {
        let raw = r#"[{"id":3,"title":"Jacket","price":55.99,"image":"https://x/3.jpg","options":{"color":"Black","size":"XL"},"quantity":2}]"#;
        let cart = hydrate(Some(raw));
        assert_eq!(cart.len(), 1);
        assert_eq!(cart.total().to_fixed(), "111.98");
    }
}
