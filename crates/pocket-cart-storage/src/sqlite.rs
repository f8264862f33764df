//! SQLite implementation of the Storage trait.
//!
//! This is the on-device backend for the cart store. It uses rusqlite with
//! bundled SQLite, wrapped in async via tokio::spawn_blocking.

use std::path::Path;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use rusqlite::{params, Connection, OptionalExtension};

use pocket_cart_core::CartItem;

use crate::error::{Result, StorageError};
use crate::migration;
use crate::traits::{decode_items, encode_items, Storage};

/// SQLite-based storage implementation.
///
/// Thread-safe via internal Mutex. All operations use spawn_blocking
/// to avoid blocking the async runtime.
pub struct SqliteStorage {
    /// The SQLite connection, protected by a mutex.
    conn: Arc<Mutex<Connection>>,
}

impl SqliteStorage {
    /// Open a SQLite database at the given path.
    ///
    /// Creates the file and runs migrations if it doesn't exist.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let mut conn = Connection::open(path)?;
        migration::migrate(&mut conn)?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// Open an in-memory SQLite database.
    ///
    /// Useful for testing.
    pub fn open_memory() -> Result<Self> {
        let mut conn = Connection::open_in_memory()?;
        migration::migrate(&mut conn)?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }
}

/// Lock the connection, mapping a poisoned mutex to a database error.
fn lock_conn(conn: &Mutex<Connection>) -> Result<std::sync::MutexGuard<'_, Connection>> {
    conn.lock().map_err(|e| {
        StorageError::Database(rusqlite::Error::SqliteFailure(
            rusqlite::ffi::Error::new(rusqlite::ffi::SQLITE_LOCKED),
            Some(format!("mutex poisoned: {}", e)),
        ))
    })
}

/// Map a spawn_blocking join failure to a database error.
fn join_error(e: tokio::task::JoinError) -> StorageError {
    StorageError::Database(rusqlite::Error::SqliteFailure(
        rusqlite::ffi::Error::new(rusqlite::ffi::SQLITE_ERROR),
        Some(format!("spawn_blocking failed: {}", e)),
    ))
}

#[async_trait]
impl Storage for SqliteStorage {
    async fn load_cart(&self, key: &str) -> Result<Option<Vec<CartItem>>> {
        let key = key.to_string();
        let conn = self.conn.clone();

        let blob: Option<Vec<u8>> = tokio::task::spawn_blocking(move || {
            let conn = lock_conn(&conn)?;
            let blob = conn
                .query_row(
                    "SELECT value FROM kv_blobs WHERE key = ?1",
                    params![key],
                    |row| row.get(0),
                )
                .optional()?;
            Ok::<_, StorageError>(blob)
        })
        .await
        .map_err(join_error)??;

        match blob {
            Some(bytes) => Ok(Some(decode_items(&bytes)?)),
            None => Ok(None),
        }
    }

    async fn save_cart(&self, key: &str, items: &[CartItem]) -> Result<()> {
        let owned_key = key.to_string();
        let blob = encode_items(items)?;
        let conn = self.conn.clone();

        tokio::task::spawn_blocking(move || {
            let conn = lock_conn(&conn)?;
            conn.execute(
                "INSERT INTO kv_blobs (key, value, updated_at) VALUES (?1, ?2, ?3)
                 ON CONFLICT(key) DO UPDATE SET value = ?2, updated_at = ?3",
                params![owned_key, blob.as_ref(), now_millis()],
            )?;
            Ok::<_, StorageError>(())
        })
        .await
        .map_err(join_error)??;

        tracing::debug!(key, items = items.len(), "cart blob saved");
        Ok(())
    }
}

/// Get current time in milliseconds.
fn now_millis() -> i64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("time went backwards")
        .as_millis() as i64
}

#[cfg(test)]
mod tests {
    use super::*;
    use pocket_cart_core::Product;

    use crate::traits::DEFAULT_CART_KEY;

    fn items() -> Vec<CartItem> {
        vec![
            CartItem::new(Product::new("a", "Apple", "https://img.test/a", 0.5)),
            CartItem::new(Product::new("b", "Bread", "https://img.test/b", 2.2)),
        ]
    }

    #[tokio::test]
    async fn test_load_absent_key_is_none() {
        let storage = SqliteStorage::open_memory().unwrap();
        let loaded = storage.load_cart(DEFAULT_CART_KEY).await.unwrap();
        assert!(loaded.is_none());
    }

    #[tokio::test]
    async fn test_save_then_load() {
        let storage = SqliteStorage::open_memory().unwrap();
        let items = items();

        storage.save_cart(DEFAULT_CART_KEY, &items).await.unwrap();
        let loaded = storage.load_cart(DEFAULT_CART_KEY).await.unwrap();
        assert_eq!(loaded, Some(items));
    }

    #[tokio::test]
    async fn test_save_replaces_previous_blob() {
        let storage = SqliteStorage::open_memory().unwrap();
        let items = items();

        storage.save_cart(DEFAULT_CART_KEY, &items).await.unwrap();
        storage
            .save_cart(DEFAULT_CART_KEY, &items[..1])
            .await
            .unwrap();

        let loaded = storage.load_cart(DEFAULT_CART_KEY).await.unwrap().unwrap();
        assert_eq!(loaded.len(), 1);
    }

    #[tokio::test]
    async fn test_saved_empty_list_loads_as_some_empty() {
        let storage = SqliteStorage::open_memory().unwrap();

        storage.save_cart(DEFAULT_CART_KEY, &[]).await.unwrap();
        let loaded = storage.load_cart(DEFAULT_CART_KEY).await.unwrap();
        assert_eq!(loaded, Some(vec![]));
    }

    #[tokio::test]
    async fn test_keys_are_independent() {
        let storage = SqliteStorage::open_memory().unwrap();
        let items = items();

        storage.save_cart("cart/items", &items).await.unwrap();
        assert!(storage.load_cart("other/key").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_persists_across_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cart.db");
        let items = items();

        {
            let storage = SqliteStorage::open(&path).unwrap();
            storage.save_cart(DEFAULT_CART_KEY, &items).await.unwrap();
        }

        let storage = SqliteStorage::open(&path).unwrap();
        let loaded = storage.load_cart(DEFAULT_CART_KEY).await.unwrap();
        assert_eq!(loaded, Some(items));
    }

    #[tokio::test]
    async fn test_malformed_blob_is_serialization_error() {
        let storage = SqliteStorage::open_memory().unwrap();

        {
            let conn = storage.conn.lock().unwrap();
            conn.execute(
                "INSERT INTO kv_blobs (key, value, updated_at) VALUES (?1, ?2, 0)",
                params![DEFAULT_CART_KEY, b"not json".as_slice()],
            )
            .unwrap();
        }

        let err = storage.load_cart(DEFAULT_CART_KEY).await.unwrap_err();
        assert!(matches!(err, StorageError::Serialization(_)));
    }
}
