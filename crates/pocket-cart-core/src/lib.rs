//! # Pocket Cart Core
//!
//! Pure domain types for the pocket-cart store: products, cart line items,
//! and the cart mutation logic.
//!
//! This crate contains no I/O, no storage, no async. It is pure computation
//! over a small ordered list of line items.
//!
//! ## Key Types
//!
//! - [`Cart`] - Ordered list of line items, unique by product id
//! - [`CartItem`] - A product plus a quantity of at least 1
//! - [`Product`] - A catalog product, the input to an add operation
//! - [`ProductId`] - Identifier newtype for products and line items
//! - [`CartChange`] - What a mutation did to the cart
//!
//! ## Invariants
//!
//! A [`Cart`] never holds two items with the same id, and never holds an
//! item with quantity 0. Decrementing a quantity-1 item removes it.

pub mod cart;
pub mod error;
pub mod item;
pub mod types;

pub use cart::{Cart, CartChange};
pub use error::CartError;
pub use item::{CartItem, Product};
pub use types::ProductId;
