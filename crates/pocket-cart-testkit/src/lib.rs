//! # Pocket Cart Testkit
//!
//! Testing utilities for the pocket-cart store.
//!
//! ## Overview
//!
//! This crate provides:
//!
//! - **Fixtures**: a shared in-memory backend plus a small product catalog
//!   for setting up store scenarios quickly
//! - **Generators**: proptest strategies for products, carts, and operation
//!   sequences
//! - **Fault injection**: [`FlakyStorage`], a wrapper that fails saves on
//!   demand for error-path tests
//!
//! ## Fixtures
//!
//! ```rust,ignore
//! use pocket_cart_testkit::TestFixture;
//!
//! let fixture = TestFixture::new();
//! let store = fixture.open_store().await.unwrap();
//! store.add_item(fixture.product(0));
//! ```
//!
//! ## Property Testing
//!
//! ```rust,ignore
//! use proptest::prelude::*;
//! use pocket_cart_testkit::generators::{cart_ops, apply_ops};
//!
//! proptest! {
//!     #[test]
//!     fn quantities_stay_positive(ops in cart_ops(64)) {
//!         let cart = apply_ops(&ops);
//!         prop_assert!(cart.items().iter().all(|i| i.quantity >= 1));
//!     }
//! }
//! ```

pub mod fixtures;
pub mod flaky;
pub mod generators;

pub use fixtures::TestFixture;
pub use flaky::FlakyStorage;
pub use generators::{apply_ops, cart_ops, CartOp};
