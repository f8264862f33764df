//! In-memory implementation of the Storage trait.
//!
//! This is primarily for testing. It has the same semantics as SQLite -
//! the blob is really serialized and deserialized - but keeps everything
//! in memory with no persistence.

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;
use bytes::Bytes;

use pocket_cart_core::CartItem;

use crate::error::Result;
use crate::traits::{decode_items, encode_items, Storage};

/// In-memory storage implementation.
///
/// All data is lost when the storage is dropped. Thread-safe via RwLock.
pub struct MemoryStorage {
    blobs: RwLock<HashMap<String, Bytes>>,
}

impl MemoryStorage {
    /// Create a new empty in-memory storage.
    pub fn new() -> Self {
        Self {
            blobs: RwLock::new(HashMap::new()),
        }
    }

    /// The raw blob currently stored under `key`, if any.
    ///
    /// Lets tests assert on the persisted bytes directly.
    pub fn raw_blob(&self, key: &str) -> Option<Bytes> {
        self.blobs.read().unwrap().get(key).cloned()
    }

    /// Replace the raw blob under `key` without going through
    /// serialization. Lets tests plant malformed data.
    pub fn set_raw_blob(&self, key: &str, blob: impl Into<Bytes>) {
        self.blobs.write().unwrap().insert(key.to_string(), blob.into());
    }
}

impl Default for MemoryStorage {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Storage for MemoryStorage {
    async fn load_cart(&self, key: &str) -> Result<Option<Vec<CartItem>>> {
        let blob = self.blobs.read().unwrap().get(key).cloned();
        match blob {
            Some(bytes) => Ok(Some(decode_items(&bytes)?)),
            None => Ok(None),
        }
    }

    async fn save_cart(&self, key: &str, items: &[CartItem]) -> Result<()> {
        let blob = encode_items(items)?;
        self.blobs.write().unwrap().insert(key.to_string(), blob);
        Ok(())
    }
}
