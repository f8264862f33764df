//! CartHandle: the consumer surface of the cart store.
//!
//! UI components get a handle instead of the store itself. A handle reads
//! the current cart, awaits changes, and performs the three mutations. It
//! holds the store weakly: once the store is dropped, mutating through a
//! leftover handle is a programming error and fails immediately with
//! [`CartStoreError::Detached`].

use std::sync::Weak;

use tokio::sync::watch;

use pocket_cart_core::{Cart, CartChange, CartItem, Product, ProductId};

use crate::error::{CartStoreError, Result};
use crate::store::Shared;

/// A cloneable consumer handle to a [`CartStore`].
///
/// Reads keep working after the store is gone (they serve the last
/// published cart); mutations and change-waits fail with
/// [`CartStoreError::Detached`].
///
/// [`CartStore`]: crate::CartStore
#[derive(Clone)]
pub struct CartHandle {
    shared: Weak<Shared>,
    cart_rx: watch::Receiver<Cart>,
}

impl CartHandle {
    pub(crate) fn new(shared: Weak<Shared>, cart_rx: watch::Receiver<Cart>) -> Self {
        Self { shared, cart_rx }
    }

    fn shared(&self) -> Result<std::sync::Arc<Shared>> {
        self.shared.upgrade().ok_or(CartStoreError::Detached)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Mutations
    // ─────────────────────────────────────────────────────────────────────────

    /// Add a product to the cart. See [`CartStore::add_item`].
    ///
    /// [`CartStore::add_item`]: crate::CartStore::add_item
    pub fn add_item(&self, product: Product) -> Result<CartChange> {
        Ok(self.shared()?.apply(|cart| cart.add(product)))
    }

    /// Increment the quantity of the item with the given id.
    pub fn increment(&self, id: &ProductId) -> Result<CartChange> {
        Ok(self.shared()?.apply(|cart| cart.increment(id)))
    }

    /// Decrement the quantity of the item with the given id.
    pub fn decrement(&self, id: &ProductId) -> Result<CartChange> {
        Ok(self.shared()?.apply(|cart| cart.decrement(id)))
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Reads and subscriptions
    // ─────────────────────────────────────────────────────────────────────────

    /// A clone of the current cart.
    pub fn cart(&self) -> Cart {
        self.cart_rx.borrow().clone()
    }

    /// The current item list.
    pub fn items(&self) -> Vec<CartItem> {
        self.cart_rx.borrow().items().to_vec()
    }

    /// Wait for the next published cart change.
    ///
    /// Consumers re-render off this: loop on `changed()`, re-read
    /// [`CartHandle::cart`]. Fails with `Detached` once the store is gone.
    pub async fn changed(&mut self) -> Result<()> {
        self.cart_rx
            .changed()
            .await
            .map_err(|_| CartStoreError::Detached)
    }

    /// A raw watch receiver for callers that want `tokio::select!` plumbing.
    pub fn watch(&self) -> watch::Receiver<Cart> {
        self.cart_rx.clone()
    }

    /// Whether the backing store is still alive.
    pub fn is_attached(&self) -> bool {
        self.shared.strong_count() > 0
    }
}
