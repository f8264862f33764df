//! Fault-injecting storage wrapper.
//!
//! Wraps any backend and fails saves (or loads) while the corresponding
//! switch is on. Used to test that the store survives background write
//! failures and surfaces hydration failures.

use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;

use pocket_cart_core::CartItem;
use pocket_cart_storage::{Result, Storage, StorageError};

/// Storage wrapper with on-demand failure injection.
pub struct FlakyStorage<S> {
    inner: S,
    fail_saves: AtomicBool,
    fail_loads: AtomicBool,
}

impl<S> FlakyStorage<S> {
    /// Wrap a backend. Both switches start off.
    pub fn new(inner: S) -> Self {
        Self {
            inner,
            fail_saves: AtomicBool::new(false),
            fail_loads: AtomicBool::new(false),
        }
    }

    /// Make every save fail (or stop failing).
    pub fn fail_saves(&self, on: bool) {
        self.fail_saves.store(on, Ordering::SeqCst);
    }

    /// Make every load fail (or stop failing).
    pub fn fail_loads(&self, on: bool) {
        self.fail_loads.store(on, Ordering::SeqCst);
    }

    fn injected(what: &str) -> StorageError {
        StorageError::Io(std::io::Error::new(
            std::io::ErrorKind::Other,
            format!("injected {what} failure"),
        ))
    }
}

#[async_trait]
impl<S: Storage> Storage for FlakyStorage<S> {
    async fn load_cart(&self, key: &str) -> Result<Option<Vec<CartItem>>> {
        if self.fail_loads.load(Ordering::SeqCst) {
            return Err(Self::injected("load"));
        }
        self.inner.load_cart(key).await
    }

    async fn save_cart(&self, key: &str, items: &[CartItem]) -> Result<()> {
        if self.fail_saves.load(Ordering::SeqCst) {
            return Err(Self::injected("save"));
        }
        self.inner.save_cart(key, items).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pocket_cart_core::Product;
    use pocket_cart_storage::{MemoryStorage, DEFAULT_CART_KEY};

    #[tokio::test]
    async fn test_passes_through_when_off() {
        let storage = FlakyStorage::new(MemoryStorage::new());
        let items = vec![CartItem::new(Product::new("a", "A", "u", 1.0))];

        storage.save_cart(DEFAULT_CART_KEY, &items).await.unwrap();
        assert_eq!(
            storage.load_cart(DEFAULT_CART_KEY).await.unwrap(),
            Some(items)
        );
    }

    #[tokio::test]
    async fn test_injects_save_failure() {
        let storage = FlakyStorage::new(MemoryStorage::new());
        storage.fail_saves(true);

        let items = vec![CartItem::new(Product::new("a", "A", "u", 1.0))];
        assert!(storage.save_cart(DEFAULT_CART_KEY, &items).await.is_err());

        // Nothing reached the inner backend.
        storage.fail_saves(false);
        assert!(storage.load_cart(DEFAULT_CART_KEY).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_injects_load_failure() {
        let storage = FlakyStorage::new(MemoryStorage::new());
        storage.fail_loads(true);
        assert!(storage.load_cart(DEFAULT_CART_KEY).await.is_err());
    }
}
