//! Per-visitor cart stores.
//!
//! Each visitor's [`CartStore`] is opened lazily from its slot directory
//! and kept in a `moka` cache, so repeat requests skip the disk read. An
//! entry evicted after idling is simply re-hydrated from disk on the next
//! request; nothing is lost because every mutation already wrote through.
//!
//! Opening and mutating a cart touches the disk, so request handlers use
//! [`CartRegistry::with_cart`], which runs on tokio's blocking pool. The CLI
//! has no runtime work to protect and calls [`CartRegistry::with_cart_blocking`].

use std::path::PathBuf;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use fakestore_core::CartStore;
use moka::sync::Cache;
use tokio::task::JoinError;

use crate::models::VisitorId;
use crate::storage::FileStore;

const MAX_OPEN_CARTS: u64 = 10_000;
const IDLE_TIMEOUT: Duration = Duration::from_secs(30 * 60);

type SharedCart = Arc<Mutex<CartStore<FileStore>>>;

/// Registry of open visitor carts.
#[derive(Clone)]
pub struct CartRegistry {
    root: PathBuf,
    open: Cache<VisitorId, SharedCart>,
}

impl CartRegistry {
    /// Create a registry storing carts under `<root>/visitors/<id>/`.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        let open = Cache::builder()
            .max_capacity(MAX_OPEN_CARTS)
            .time_to_idle(IDLE_TIMEOUT)
            .build();

        Self {
            root: root.into(),
            open,
        }
    }

    /// Slot directory for `visitor`.
    #[must_use]
    pub fn visitor_dir(&self, visitor: &VisitorId) -> PathBuf {
        self.root.join("visitors").join(visitor.to_string())
    }

    fn open(&self, visitor: &VisitorId) -> SharedCart {
        self.open.get_with_by_ref(visitor, || {
            tracing::debug!(visitor = %visitor, "Opening cart store");
            Arc::new(Mutex::new(CartStore::load(FileStore::new(
                self.visitor_dir(visitor),
            ))))
        })
    }

    /// Run `f` with exclusive access to `visitor`'s cart on the current
    /// thread. Hydration and write-through happen inline.
    pub fn with_cart_blocking<R>(
        &self,
        visitor: &VisitorId,
        f: impl FnOnce(&mut CartStore<FileStore>) -> R,
    ) -> R {
        let cart = self.open(visitor);
        let mut guard = cart.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut guard)
    }

    /// Run `f` with exclusive access to `visitor`'s cart on the blocking
    /// pool, so slot reads and writes never stall an async worker.
    ///
    /// # Errors
    ///
    /// Returns the [`JoinError`] if `f` panics.
    pub async fn with_cart<F, R>(&self, visitor: &VisitorId, f: F) -> Result<R, JoinError>
    where
        F: FnOnce(&mut CartStore<FileStore>) -> R + Send + 'static,
        R: Send + 'static,
    {
        let registry = self.clone();
        let visitor = *visitor;
        tokio::task::spawn_blocking(move || registry.with_cart_blocking(&visitor, f)).await
    }
}
