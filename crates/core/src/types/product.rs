//! Cart entry types.

use serde::{Deserialize, Serialize};

use crate::{Price, ProductId};

/// A product offered for the cart, before it has a quantity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewProduct {
    pub id: ProductId,
    pub title: String,
    pub image_url: String,
    pub price: Price,
}

impl NewProduct {
    /// Turn the candidate into a cart entry holding a single unit.
    #[must_use]
    pub fn into_entry(self) -> Product {
        Product {
            id: self.id,
            title: self.title,
            image_url: self.image_url,
            price: self.price,
            quantity: 1,
        }
    }
}

/// One line in the cart.
///
/// This is also the persisted shape: a stored cart is a JSON array of these,
/// `{"id", "title", "image_url", "price", "quantity"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub title: String,
    pub image_url: String,
    pub price: Price,
    /// Always at least 1 while the entry is in a cart.
    pub quantity: u32,
}

impl Product {
    /// Price multiplied by quantity, or `None` on overflow.
    #[must_use]
    pub fn line_total(&self) -> Option<Price> {
        self.price.checked_mul(self.quantity)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_into_entry_starts_at_one() {
        let candidate = NewProduct {
            id: ProductId::parse("p1").unwrap(),
            title: "Shirt".to_string(),
            image_url: "u".to_string(),
            price: Price::from_cents(1000),
        };

        let entry = candidate.clone().into_entry();
        assert_eq!(entry.quantity, 1);
        assert_eq!(entry.id, candidate.id);
        assert_eq!(entry.title, "Shirt");
    }

    #[test]
    fn test_deserialize_stored_shape() {
        let json = r#"{"id":"p2","title":"Hat","image_url":"u","price":5,"quantity":3}"#;
        let product: Product = serde_json::from_str(json).unwrap();

        assert_eq!(product.id.as_str(), "p2");
        assert_eq!(product.quantity, 3);
        assert_eq!(product.line_total(), Some(Price::from_cents(1500)));
    }

    #[test]
    fn test_missing_quantity_is_rejected() {
        let json = r#"{"id":"p2","title":"Hat","image_url":"u","price":5}"#;
        assert!(serde_json::from_str::<Product>(json).is_err());
    }
}
