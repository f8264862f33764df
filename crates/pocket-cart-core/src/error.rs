//! Error types for the pocket-cart core.

use thiserror::Error;

use crate::types::ProductId;

/// Invariant violations found when installing a list of items as a cart.
///
/// These only arise when hydrating a persisted blob. The mutation
/// operations cannot produce a cart that violates the invariants.
#[derive(Debug, Error)]
pub enum CartError {
    #[error("duplicate item id in cart: {0}")]
    DuplicateItem(ProductId),

    #[error("item {0} has quantity 0; items at 0 must be removed, not stored")]
    ZeroQuantity(ProductId),
}
