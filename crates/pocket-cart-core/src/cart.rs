//! Cart: an ordered list of line items, unique by product id.
//!
//! Insertion order is display order. All three mutations are linear scans;
//! carts are small.

use serde::{Deserialize, Serialize};

use crate::error::CartError;
use crate::item::{CartItem, Product};
use crate::types::ProductId;

/// The cart state: line items in insertion order, unique by product id.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cart {
    items: Vec<CartItem>,
}

impl Cart {
    /// Create an empty cart.
    pub fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Build a cart from an already-materialized item list, checking the
    /// cart invariants.
    ///
    /// Used when hydrating a persisted blob: the blob was written by some
    /// earlier process, so ids must be re-checked for uniqueness and
    /// quantities for being >= 1.
    pub fn from_items(items: Vec<CartItem>) -> Result<Self, CartError> {
        for (i, item) in items.iter().enumerate() {
            if item.quantity == 0 {
                return Err(CartError::ZeroQuantity(item.id().clone()));
            }
            if items[..i].iter().any(|prev| prev.id() == item.id()) {
                return Err(CartError::DuplicateItem(item.id().clone()));
            }
        }
        Ok(Self { items })
    }

    /// Build a cart from an item list without checking the invariants.
    ///
    /// For callers that opt out of hydration validation. A list that
    /// violates the invariants will misbehave quietly (duplicate rows,
    /// undecrementable zero-quantity items); prefer [`Cart::from_items`].
    pub fn from_items_unchecked(items: Vec<CartItem>) -> Self {
        Self { items }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Mutations
    // ─────────────────────────────────────────────────────────────────────────

    /// Add a product to the cart.
    ///
    /// If an item with the same id is already present, its quantity goes up
    /// by 1. Otherwise the product is appended as a new item with
    /// quantity 1.
    pub fn add(&mut self, product: Product) -> CartChange {
        if let Some(item) = self.items.iter_mut().find(|i| i.id() == &product.id) {
            item.quantity += 1;
            return CartChange::Incremented {
                quantity: item.quantity,
            };
        }

        self.items.push(CartItem::new(product));
        CartChange::Added
    }

    /// Increment the quantity of the item with the given id.
    ///
    /// A missing id is a silent no-op, reported as [`CartChange::NotFound`].
    pub fn increment(&mut self, id: &ProductId) -> CartChange {
        match self.items.iter_mut().find(|i| i.id() == id) {
            Some(item) => {
                item.quantity += 1;
                CartChange::Incremented {
                    quantity: item.quantity,
                }
            }
            None => CartChange::NotFound,
        }
    }

    /// Decrement the quantity of the item with the given id.
    ///
    /// An item at quantity 1 is removed from the cart entirely; the cart
    /// never holds an item at quantity 0. A missing id is a silent no-op.
    pub fn decrement(&mut self, id: &ProductId) -> CartChange {
        let Some(pos) = self.items.iter().position(|i| i.id() == id) else {
            return CartChange::NotFound;
        };

        if self.items[pos].quantity > 1 {
            self.items[pos].quantity -= 1;
            CartChange::Decremented {
                quantity: self.items[pos].quantity,
            }
        } else {
            self.items.remove(pos);
            CartChange::Removed
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Queries
    // ─────────────────────────────────────────────────────────────────────────

    /// The line items, in insertion order.
    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    /// Consume the cart, returning the item list.
    pub fn into_items(self) -> Vec<CartItem> {
        self.items
    }

    /// Look up a line item by product id.
    pub fn get(&self, id: &ProductId) -> Option<&CartItem> {
        self.items.iter().find(|i| i.id() == id)
    }

    /// Whether an item with the given id is in the cart.
    pub fn contains(&self, id: &ProductId) -> bool {
        self.get(id).is_some()
    }

    /// Number of distinct line items.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the cart holds no items.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Sum of quantities across all line items.
    pub fn total_quantity(&self) -> u32 {
        self.items.iter().map(|i| i.quantity).sum()
    }

    /// Sum of line totals.
    pub fn subtotal(&self) -> f64 {
        self.items.iter().map(CartItem::line_total).sum()
    }
}

/// What a mutation did to the cart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CartChange {
    /// A new line item was appended with quantity 1.
    Added,
    /// An existing item's quantity went up.
    Incremented {
        /// The quantity after the increment.
        quantity: u32,
    },
    /// An existing item's quantity went down (and stayed >= 1).
    Decremented {
        /// The quantity after the decrement.
        quantity: u32,
    },
    /// The item was at quantity 1 and was removed.
    Removed,
    /// No item with that id; the cart is unchanged.
    NotFound,
}

impl CartChange {
    /// Whether the mutation changed the cart at all.
    pub fn changed(&self) -> bool {
        !matches!(self, CartChange::NotFound)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(id: &str) -> Product {
        Product::new(id, format!("Product {id}"), format!("https://img.test/{id}.png"), 9.99)
    }

    #[test]
    fn test_add_new_item() {
        let mut cart = Cart::new();
        assert_eq!(cart.add(product("a")), CartChange::Added);

        assert_eq!(cart.len(), 1);
        assert_eq!(cart.get(&"a".into()).unwrap().quantity, 1);
    }

    #[test]
    fn test_add_existing_item_increments() {
        let mut cart = Cart::new();
        cart.add(product("a"));

        assert_eq!(
            cart.add(product("a")),
            CartChange::Incremented { quantity: 2 }
        );
        // Still exactly one entry.
        assert_eq!(cart.len(), 1);
        assert_eq!(cart.get(&"a".into()).unwrap().quantity, 2);
    }

    #[test]
    fn test_add_preserves_insertion_order() {
        let mut cart = Cart::new();
        cart.add(product("a"));
        cart.add(product("b"));
        cart.add(product("c"));
        cart.add(product("a")); // bump, must not reorder

        let ids: Vec<&str> = cart.items().iter().map(|i| i.id().as_str()).collect();
        assert_eq!(ids, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_increment_existing() {
        let mut cart = Cart::new();
        cart.add(product("a"));

        assert_eq!(
            cart.increment(&"a".into()),
            CartChange::Incremented { quantity: 2 }
        );
    }

    #[test]
    fn test_increment_missing_is_noop() {
        let mut cart = Cart::new();
        cart.add(product("a"));
        let before = cart.clone();

        assert_eq!(cart.increment(&"ghost".into()), CartChange::NotFound);
        assert_eq!(cart, before);
    }

    #[test]
    fn test_decrement_above_one_keeps_item() {
        let mut cart = Cart::new();
        cart.add(product("a"));
        cart.increment(&"a".into()); // quantity 2

        assert_eq!(
            cart.decrement(&"a".into()),
            CartChange::Decremented { quantity: 1 }
        );
        assert!(cart.contains(&"a".into()));
    }

    #[test]
    fn test_decrement_at_one_removes_item() {
        let mut cart = Cart::new();
        cart.add(product("a"));

        assert_eq!(cart.decrement(&"a".into()), CartChange::Removed);
        assert!(cart.is_empty());
    }

    #[test]
    fn test_decrement_missing_is_noop() {
        let mut cart = Cart::new();
        assert_eq!(cart.decrement(&"ghost".into()), CartChange::NotFound);
        assert!(cart.is_empty());
    }

    #[test]
    fn test_decrement_to_empty_example() {
        // [{a, qty 2}] -> decrement(a) -> [{a, qty 1}] -> decrement(a) -> []
        let mut cart = Cart::new();
        cart.add(product("a"));
        cart.increment(&"a".into());

        cart.decrement(&"a".into());
        assert_eq!(cart.get(&"a".into()).unwrap().quantity, 1);

        cart.decrement(&"a".into());
        assert!(cart.is_empty());
    }

    #[test]
    fn test_totals() {
        let mut cart = Cart::new();
        cart.add(Product::new("a", "A", "u", 2.0));
        cart.add(Product::new("b", "B", "u", 3.0));
        cart.increment(&"b".into()); // 2x b

        assert_eq!(cart.total_quantity(), 3);
        assert!((cart.subtotal() - 8.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_from_items_accepts_valid_list() {
        let items = vec![CartItem::new(product("a")), CartItem::new(product("b"))];
        let cart = Cart::from_items(items).unwrap();
        assert_eq!(cart.len(), 2);
    }

    #[test]
    fn test_from_items_rejects_duplicate_id() {
        let items = vec![CartItem::new(product("a")), CartItem::new(product("a"))];
        assert!(matches!(
            Cart::from_items(items),
            Err(CartError::DuplicateItem(_))
        ));
    }

    #[test]
    fn test_from_items_rejects_zero_quantity() {
        let mut item = CartItem::new(product("a"));
        item.quantity = 0;
        assert!(matches!(
            Cart::from_items(vec![item]),
            Err(CartError::ZeroQuantity(_))
        ));
    }

    #[test]
    fn test_cart_serializes_as_bare_array() {
        let mut cart = Cart::new();
        cart.add(product("a"));

        let json = serde_json::to_value(&cart).unwrap();
        assert!(json.is_array());
        assert_eq!(json.as_array().unwrap().len(), 1);
    }

    mod props {
        use super::*;
        use proptest::prelude::*;

        #[derive(Debug, Clone)]
        enum Op {
            Add(String),
            Increment(String),
            Decrement(String),
        }

        fn op() -> impl Strategy<Value = Op> {
            let id = "[a-e]"; // small id space to force collisions
            prop_oneof![
                id.prop_map(Op::Add),
                id.prop_map(Op::Increment),
                id.prop_map(Op::Decrement),
            ]
        }

        proptest! {
            #[test]
            fn any_op_sequence_preserves_invariants(ops in prop::collection::vec(op(), 0..64)) {
                let mut cart = Cart::new();

                for op in ops {
                    match op {
                        Op::Add(id) => {
                            cart.add(product(&id));
                        }
                        Op::Increment(id) => {
                            cart.increment(&id.as_str().into());
                        }
                        Op::Decrement(id) => {
                            cart.decrement(&id.as_str().into());
                        }
                    }

                    // No duplicate ids.
                    for (i, item) in cart.items().iter().enumerate() {
                        prop_assert!(
                            !cart.items()[..i].iter().any(|p| p.id() == item.id())
                        );
                    }
                    // No item at quantity 0.
                    prop_assert!(cart.items().iter().all(|i| i.quantity >= 1));
                    // Whatever the mutations did, the list re-validates.
                    prop_assert!(Cart::from_items(cart.items().to_vec()).is_ok());
                }
            }
        }
    }
}
