//! # Pocket Cart Storage
//!
//! Storage abstraction for the pocket-cart store. Provides a trait-based
//! interface for persisting the cart as a single JSON blob, with SQLite and
//! in-memory implementations.
//!
//! ## Overview
//!
//! The whole cart is stored as one JSON array under a single fixed key.
//! There is no per-item storage: every save rewrites the blob, every load
//! reads it back in full. The [`Storage`] trait abstracts the backend so
//! the store stays storage-agnostic; [`SqliteStorage`] is the on-device
//! backend, [`MemoryStorage`] the test backend with identical semantics.
//!
//! ## Key Types
//!
//! - [`Storage`] - The async trait for loading and saving the cart blob
//! - [`SqliteStorage`] - SQLite-backed persistent storage
//! - [`MemoryStorage`] - In-memory storage for tests
//! - [`StorageError`] - What can go wrong at this layer
//!
//! ## Usage
//!
//! ```rust,no_run
//! use pocket_cart_storage::{SqliteStorage, Storage, DEFAULT_CART_KEY};
//!
//! async fn example() {
//!     let storage = SqliteStorage::open("cart.db").unwrap();
//!
//!     // Absent key means "never persisted": an empty cart.
//!     let items = storage.load_cart(DEFAULT_CART_KEY).await.unwrap();
//!     assert!(items.is_none());
//! }
//! ```

pub mod error;
pub mod memory;
pub mod migration;
pub mod sqlite;
pub mod traits;

pub use error::{Result, StorageError};
pub use memory::MemoryStorage;
pub use sqlite::SqliteStorage;
pub use traits::{Storage, DEFAULT_CART_KEY};
