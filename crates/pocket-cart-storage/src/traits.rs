//! Storage trait: the abstract interface for cart persistence.
//!
//! This trait keeps the cart store storage-agnostic. Implementations
//! include SQLite (on device) and in-memory (for tests).

use async_trait::async_trait;
use bytes::Bytes;
use pocket_cart_core::CartItem;

use crate::error::Result;

/// The key the cart blob is stored under unless configured otherwise.
pub const DEFAULT_CART_KEY: &str = "cart/items";

/// The Storage trait: async interface for cart persistence.
///
/// The unit of storage is the entire cart: one JSON array blob under one
/// key. All methods are async to keep the store non-blocking over backends
/// that do real I/O; SQLite uses `spawn_blocking` internally.
///
/// # Design Notes
///
/// - **Whole-blob writes**: a save replaces whatever was stored before.
/// - **Absent vs. empty**: a key that was never written loads as `None`
///   (the cart has never been persisted). An explicitly saved empty cart
///   loads as `Some(vec![])`.
#[async_trait]
pub trait Storage: Send + Sync {
    /// Load the cart stored under `key`.
    ///
    /// Returns `None` if nothing has been stored under that key yet.
    /// A malformed blob is a [`StorageError::Serialization`] error.
    ///
    /// [`StorageError::Serialization`]: crate::StorageError::Serialization
    async fn load_cart(&self, key: &str) -> Result<Option<Vec<CartItem>>>;

    /// Save the full item list under `key`, replacing any previous blob.
    async fn save_cart(&self, key: &str, items: &[CartItem]) -> Result<()>;
}

// Shared backends (store plus tests, multiple stores) pass an Arc.
#[async_trait]
impl<S: Storage + ?Sized> Storage for std::sync::Arc<S> {
    async fn load_cart(&self, key: &str) -> Result<Option<Vec<CartItem>>> {
        (**self).load_cart(key).await
    }

    async fn save_cart(&self, key: &str, items: &[CartItem]) -> Result<()> {
        (**self).save_cart(key, items).await
    }
}

/// Encode an item list to the persisted JSON blob.
pub(crate) fn encode_items(items: &[CartItem]) -> Result<Bytes> {
    Ok(Bytes::from(serde_json::to_vec(items)?))
}

/// Decode a persisted JSON blob back into an item list.
pub(crate) fn decode_items(blob: &[u8]) -> Result<Vec<CartItem>> {
    Ok(serde_json::from_slice(blob)?)
}
