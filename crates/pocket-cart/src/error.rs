//! Error types for the cart store.

use pocket_cart_core::CartError;
use pocket_cart_storage::StorageError;
use thiserror::Error;

/// Errors that can occur during cart store operations.
#[derive(Debug, Error)]
pub enum CartStoreError {
    /// The persisted cart violates the cart invariants.
    #[error("invalid persisted cart: {0}")]
    Cart(#[from] CartError),

    /// Storage error.
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),

    /// A handle was used after its store was dropped.
    #[error("cart store is gone: handle is detached")]
    Detached,

    /// The persistence writer is no longer running.
    #[error("cart store is closed")]
    Closed,
}

/// Result type for cart store operations.
pub type Result<T> = std::result::Result<T, CartStoreError>;
