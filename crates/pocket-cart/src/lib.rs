//! # Pocket Cart
//!
//! A client-side shopping cart store: an ordered in-memory list of line
//! items, published to subscribers on every change and persisted to local
//! device storage as a single JSON blob.
//!
//! ## Overview
//!
//! The cart store combines three things:
//!
//! - **State holder**: the cart lives in memory; every mutation is applied
//!   to the latest snapshot and published through a watch channel.
//! - **Persistence**: after each change the full item list goes onto a
//!   single-writer queue and is written to storage in the background, in
//!   mutation order, without blocking the caller.
//! - **Consumer surface**: UI components hold a [`CartHandle`] - cheap to
//!   clone, read + subscribe + mutate - instead of the store itself.
//!
//! ## Semantics
//!
//! - Adding a product that is already in the cart bumps its quantity by 1;
//!   a new product is appended with quantity 1.
//! - Decrementing an item at quantity 1 removes it; the cart never holds an
//!   item at quantity 0.
//! - Incrementing or decrementing an id that is not in the cart is a silent
//!   no-op: subscribers are not woken, nothing is persisted.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use pocket_cart::{CartStore, CartStoreConfig, Product};
//! use pocket_cart::storage::SqliteStorage;
//!
//! async fn example() {
//!     let storage = SqliteStorage::open("cart.db").unwrap();
//!     let store = CartStore::open(storage, CartStoreConfig::default())
//!         .await
//!         .unwrap();
//!
//!     let handle = store.handle();
//!     handle
//!         .add_item(Product::new("sku-1", "Bananas", "https://cdn/ba.png", 1.25))
//!         .unwrap();
//!
//!     // Persistence runs behind the scenes; flush to wait for it.
//!     store.flush().await.unwrap();
//! }
//! ```
//!
//! ## Re-exports
//!
//! This crate re-exports the component crates for convenience:
//!
//! - `pocket_cart::core` - Domain types (Cart, CartItem, Product, ...)
//! - `pocket_cart::storage` - Storage trait, SQLite and in-memory backends

pub mod error;
pub mod handle;
pub mod store;

// Re-export component crates
pub use pocket_cart_core as core;
pub use pocket_cart_storage as storage;

// Re-export main types for convenience
pub use error::{CartStoreError, Result};
pub use handle::CartHandle;
pub use store::{CartStore, CartStoreConfig};

// Re-export commonly used core types
pub use pocket_cart_core::{Cart, CartChange, CartError, CartItem, Product, ProductId};
