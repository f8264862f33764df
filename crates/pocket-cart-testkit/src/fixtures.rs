//! Test fixtures and helpers.
//!
//! Common setup code for integration tests: a shared in-memory backend,
//! a small deterministic product catalog, and store constructors over it.

use std::sync::Arc;

use rand::distributions::Alphanumeric;
use rand::Rng;

use pocket_cart::{CartStore, CartStoreConfig, Result};
use pocket_cart_core::{CartItem, Product};
use pocket_cart_storage::{MemoryStorage, Storage, DEFAULT_CART_KEY};

/// A test fixture with a shared in-memory storage backend.
///
/// Stores opened through the fixture all persist into the same backend, so
/// tests can exercise close-and-reopen hydration without touching disk.
pub struct TestFixture {
    pub storage: Arc<MemoryStorage>,
}

impl TestFixture {
    /// Create a new fixture with empty storage.
    pub fn new() -> Self {
        Self {
            storage: Arc::new(MemoryStorage::new()),
        }
    }

    /// Open a store over the fixture's storage with the default config.
    pub async fn open_store(&self) -> Result<CartStore> {
        CartStore::open_default(Arc::clone(&self.storage)).await
    }

    /// Open a store over the fixture's storage with a custom config.
    pub async fn open_store_with(&self, config: CartStoreConfig) -> Result<CartStore> {
        CartStore::open(Arc::clone(&self.storage), config).await
    }

    /// The nth product of a small deterministic catalog.
    pub fn product(&self, n: usize) -> Product {
        Product::new(
            format!("sku-{n:03}"),
            format!("Product {n}"),
            format!("https://img.test/{n}.png"),
            0.5 + n as f64,
        )
    }

    /// What is currently persisted under the default cart key.
    pub async fn persisted_items(&self) -> Result<Option<Vec<CartItem>>> {
        Ok(self.storage.load_cart(DEFAULT_CART_KEY).await?)
    }
}

impl Default for TestFixture {
    fn default() -> Self {
        Self::new()
    }
}

/// A product with a random id, for tests that need ids that cannot collide
/// with the fixture catalog.
pub fn random_product() -> Product {
    let id: String = rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(12)
        .map(char::from)
        .collect();
    Product::new(id, "Random product", "https://img.test/random.png", 4.2)
}
