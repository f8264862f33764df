//! Proptest generators for property-based testing.

use proptest::prelude::*;

use pocket_cart_core::{Cart, CartItem, Product, ProductId};

/// Generate a product id from a small space, so operation sequences
/// actually collide on ids.
pub fn product_id() -> impl Strategy<Value = ProductId> {
    "[a-h]".prop_map(|s| ProductId::new(s))
}

/// Generate a product id from a wide space, for uniqueness-heavy tests.
pub fn wide_product_id() -> impl Strategy<Value = ProductId> {
    "[a-z0-9]{8,16}".prop_map(ProductId::new)
}

/// Generate a product.
pub fn product() -> impl Strategy<Value = Product> {
    (product_id(), "[A-Za-z ]{1,24}", 0.01f64..=500.0).prop_map(|(id, title, price)| {
        let image_url = format!("https://img.test/{id}.png");
        Product {
            id,
            title,
            image_url,
            price,
        }
    })
}

/// Generate a cart item with quantity >= 1.
pub fn cart_item() -> impl Strategy<Value = CartItem> {
    (product(), 1u32..=20).prop_map(|(product, quantity)| CartItem { product, quantity })
}

/// Generate a valid cart: unique ids, all quantities >= 1.
pub fn cart(max_items: usize) -> impl Strategy<Value = Cart> {
    prop::collection::vec((wide_product_id(), 1u32..=20), 0..=max_items).prop_map(|entries| {
        let mut cart = Cart::new();
        for (id, quantity) in entries {
            cart.add(Product {
                title: format!("Product {id}"),
                image_url: format!("https://img.test/{id}.png"),
                price: 1.0,
                id: id.clone(),
            });
            for _ in 1..quantity {
                cart.increment(&id);
            }
        }
        cart
    })
}

/// One cart store operation.
#[derive(Debug, Clone)]
pub enum CartOp {
    /// Add a product (insert or bump).
    Add(Product),
    /// Increment an id that may or may not be present.
    Increment(ProductId),
    /// Decrement an id that may or may not be present.
    Decrement(ProductId),
}

/// Generate a sequence of operations over the small id space.
pub fn cart_ops(max_len: usize) -> impl Strategy<Value = Vec<CartOp>> {
    let op = prop_oneof![
        product().prop_map(CartOp::Add),
        product_id().prop_map(CartOp::Increment),
        product_id().prop_map(CartOp::Decrement),
    ];
    prop::collection::vec(op, 0..=max_len)
}

/// Apply an operation sequence to an empty cart.
pub fn apply_ops(ops: &[CartOp]) -> Cart {
    let mut cart = Cart::new();
    for op in ops {
        match op {
            CartOp::Add(product) => {
                cart.add(product.clone());
            }
            CartOp::Increment(id) => {
                cart.increment(id);
            }
            CartOp::Decrement(id) => {
                cart.decrement(id);
            }
        }
    }
    cart
}
