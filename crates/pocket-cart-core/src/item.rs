//! Products and cart line items.
//!
//! A [`Product`] is what the catalog hands to the cart: id, title, image,
//! price, no quantity. A [`CartItem`] is a product that made it into the
//! cart, which is exactly the product fields plus a quantity of at least 1.

use serde::{Deserialize, Serialize};

use crate::types::ProductId;

/// A catalog product: the input to an add-to-cart operation.
///
/// Fields are not validated here. The cart accepts whatever the catalog
/// sends; an empty title or a zero price is the catalog's problem.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Unique product identifier.
    pub id: ProductId,
    /// Display title.
    pub title: String,
    /// URL of the product image shown in the cart.
    pub image_url: String,
    /// Unit price. Serialized as a plain JSON number.
    pub price: f64,
}

impl Product {
    /// Create a product.
    pub fn new(
        id: impl Into<ProductId>,
        title: impl Into<String>,
        image_url: impl Into<String>,
        price: f64,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            image_url: image_url.into(),
            price,
        }
    }
}

/// A line item in the cart: a product plus its quantity.
///
/// The persisted blob is a JSON array of these, with the product fields
/// flattened alongside `quantity`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CartItem {
    /// The product this line item refers to.
    #[serde(flatten)]
    pub product: Product,
    /// How many units are in the cart. Always >= 1 for an item that is
    /// present; a decrement to 0 removes the item instead.
    pub quantity: u32,
}

impl CartItem {
    /// Create a line item for a product entering the cart (quantity 1).
    pub fn new(product: Product) -> Self {
        Self {
            product,
            quantity: 1,
        }
    }

    /// The product id of this line item.
    pub fn id(&self) -> &ProductId {
        &self.product.id
    }

    /// Line total: unit price times quantity.
    pub fn line_total(&self) -> f64 {
        self.product.price * f64::from(self.quantity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn banana() -> Product {
        Product::new("banana", "Banana", "https://img.test/banana.png", 1.25)
    }

    #[test]
    fn test_new_item_has_quantity_one() {
        let item = CartItem::new(banana());
        assert_eq!(item.quantity, 1);
        assert_eq!(item.id().as_str(), "banana");
    }

    #[test]
    fn test_line_total() {
        let mut item = CartItem::new(banana());
        item.quantity = 4;
        assert!((item.line_total() - 5.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_item_serializes_flat() {
        let item = CartItem::new(banana());
        let json = serde_json::to_value(&item).unwrap();

        // Product fields sit next to quantity, not nested under "product".
        assert_eq!(json["id"], "banana");
        assert_eq!(json["title"], "Banana");
        assert_eq!(json["image_url"], "https://img.test/banana.png");
        assert_eq!(json["price"], 1.25);
        assert_eq!(json["quantity"], 1);
        assert!(json.get("product").is_none());
    }

    #[test]
    fn test_item_deserializes_flat() {
        let json = r#"{"id":"a","title":"A","image_url":"u","price":2.5,"quantity":3}"#;
        let item: CartItem = serde_json::from_str(json).unwrap();
        assert_eq!(item.id().as_str(), "a");
        assert_eq!(item.quantity, 3);
    }
}
