//! JSON encoding of the stored cart.
//!
//! A snapshot is the whole cart as a JSON array of entries. Decoding enforces
//! the cart invariants on data that may have been written by older builds or
//! edited by hand: zero-quantity entries and repeated identifiers are dropped.

use std::collections::HashSet;

use go_marketplace_core::Product;
use tracing::warn;

/// Serialize the cart.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn encode(products: &[Product]) -> Result<String, serde_json::Error> {
    serde_json::to_string(products)
}

/// Deserialize a stored cart, keeping the first entry for each identifier and
/// skipping entries whose quantity is zero.
///
/// Entries are decoded one at a time, so a single unreadable entry (e.g. an
/// identifier `ProductId` rejects) is dropped without losing the rest.
///
/// # Errors
///
/// Returns an error if the value is not a JSON array.
pub fn decode(raw: &str) -> Result<Vec<Product>, serde_json::Error> {
    let entries: Vec<serde_json::Value> = serde_json::from_str(raw)?;

    let mut seen = HashSet::with_capacity(entries.len());
    let products = entries
        .into_iter()
        .enumerate()
        .filter_map(|(index, value)| match serde_json::from_value::<Product>(value) {
            Ok(entry) => Some(entry),
            Err(e) => {
                warn!(index, error = %e, "Dropping unreadable stored entry");
                None
            }
        })
        .filter(|entry| {
            if entry.quantity == 0 {
                warn!(product_id = %entry.id, "Dropping stored entry with zero quantity");
                return false;
            }
            if !seen.insert(entry.id.clone()) {
                warn!(product_id = %entry.id, "Dropping duplicate stored entry");
                return false;
            }
            true
        })
        .collect();

    Ok(products)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
#[allow(clippy::indexing_slicing)]
mod tests {
    use go_marketplace_core::{Price, ProductId};

    use super::*;

    #[test]
    fn test_decode_single_entry() {
        let raw = r#"[{"id":"p2","title":"Hat","image_url":"u","price":5,"quantity":3}]"#;
        let products = decode(raw).unwrap();

        assert_eq!(products.len(), 1);
        assert_eq!(products[0].id.as_str(), "p2");
        assert_eq!(products[0].title, "Hat");
        assert_eq!(products[0].price, Price::from_cents(500));
        assert_eq!(products[0].quantity, 3);
    }

    #[test]
    fn test_decode_empty_array() {
        assert!(decode("[]").unwrap().is_empty());
    }

    #[test]
    fn test_decode_rejects_non_array() {
        assert!(decode("not json").is_err());
        assert!(decode(r#"{"id":"p1"}"#).is_err());
        assert!(decode("").is_err());
    }

    #[test]
    fn test_decode_drops_unreadable_entries() {
        let long_id = "x".repeat(300);
        let raw = format!(
            r#"[
                {{"id":"p2","title":"Hat","image_url":"u","price":5,"quantity":3}},
                {{"id":"{long_id}","title":"Long","image_url":"u","price":1,"quantity":1}},
                {{"id":"","title":"Blank","image_url":"u","price":1,"quantity":1}},
                {{"id":"p3","title":"Bad","image_url":"u","price":1,"quantity":-1}},
                {{"id":"p4","title":"Sock","image_url":"u","price":2}}
            ]"#
        );
        let products = decode(&raw).unwrap();

        assert_eq!(products.len(), 1);
        assert_eq!(products[0].id.as_str(), "p2");
        assert_eq!(products[0].quantity, 3);
    }

    #[test]
    fn test_decode_drops_zero_and_duplicates() {
        let raw = r#"[
            {"id":"a","title":"A","image_url":"u","price":1,"quantity":0},
            {"id":"b","title":"B","image_url":"u","price":2,"quantity":2},
            {"id":"b","title":"B again","image_url":"u","price":9,"quantity":7}
        ]"#;
        let products = decode(raw).unwrap();

        assert_eq!(products.len(), 1);
        assert_eq!(products[0].id, ProductId::parse("b").unwrap());
        assert_eq!(products[0].title, "B");
        assert_eq!(products[0].quantity, 2);
    }

    #[test]
    fn test_encode_then_decode_preserves_order() {
        let raw = r#"[
            {"id":"z","title":"Z","image_url":"u","price":1.25,"quantity":1},
            {"id":"a","title":"A","image_url":"u","price":3,"quantity":4}
        ]"#;
        let products = decode(raw).unwrap();
        let again = decode(&encode(&products).unwrap()).unwrap();

        assert_eq!(again, products);
        assert_eq!(again[0].id.as_str(), "z");
    }
}
