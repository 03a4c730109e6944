//! Durable key-value slots.
//!
//! A [`KeyValueStore`] is the Rust-side stand-in for browser local storage:
//! a flat namespace of string keys holding string (JSON) values that survive
//! restarts. The cart store writes its whole line-item collection to
//! [`CART_KEY`] on every mutation.
//!
//! All methods take `&self`; implementations use interior mutability so one
//! handle can be shared by a store and whatever opened it.

use std::collections::HashMap;
use std::convert::Infallible;
use std::fmt::Debug;
use std::sync::{Arc, Mutex, PoisonError};

/// Slot holding the JSON-encoded cart line items.
pub const CART_KEY: &str = "cart";

/// A durable string-to-string slot store.
pub trait KeyValueStore: Debug {
    /// The error type returned by storage operations.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Read the value stored under `key`.
    ///
    /// Returns `Ok(None)` if the key has never been written.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing storage cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>, Self::Error>;

    /// Insert or replace the value under `key`.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing storage cannot be written.
    fn set(&self, key: &str, value: &str) -> Result<(), Self::Error>;

    /// Delete `key`. Deleting a missing key is not an error.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing storage cannot be written.
    fn remove(&self, key: &str) -> Result<(), Self::Error>;
}

/// In-process store. Clones share the same slots, so a test can keep a
/// handle and "restart" by opening a second store over it.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    slots: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn with_slots<R>(&self, f: impl FnOnce(&mut HashMap<String, String>) -> R) -> R {
        let mut slots = self.slots.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut slots)
    }
}

impl KeyValueStore for MemoryStore {
    type Error = Infallible;

    fn get(&self, key: &str) -> Result<Option<String>, Self::Error> {
        Ok(self.with_slots(|slots| slots.get(key).cloned()))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), Self::Error> {
        self.with_slots(|slots| slots.insert(key.to_owned(), value.to_owned()));
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), Self::Error> {
        self.with_slots(|slots| slots.remove(key));
        Ok(())
    }
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for &T {
    type Error = T::Error;

    fn get(&self, key: &str) -> Result<Option<String>, Self::Error> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), Self::Error> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> Result<(), Self::Error> {
        (**self).remove(key)
    }
}
