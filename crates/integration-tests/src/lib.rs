//! Integration tests for GoMarketplace.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p go-marketplace-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `cart_persistence` - Store lifecycle against file storage
//! - `cart_properties` - Property tests over mutation sequences
//!
//! This library holds the fixtures the test files share.

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::Path;
use std::sync::Arc;

use go_marketplace_cart::{CartStore, FileStorage};
use go_marketplace_core::{NewProduct, Price, ProductId, ProductIdError};

/// Storage key used by the fixtures.
pub const TEST_KEY: &str = "@GoMarketplace:cart";

/// Build a candidate product with a placeholder image.
///
/// # Errors
///
/// Returns an error if `id` is not a valid product identifier.
pub fn candidate(id: &str, title: &str, cents: i64) -> Result<NewProduct, ProductIdError> {
    Ok(NewProduct {
        id: ProductId::parse(id)?,
        title: title.to_string(),
        image_url: "u".to_string(),
        price: Price::from_cents(cents),
    })
}

/// Create a store on file storage rooted at `dir`, without loading it.
///
/// # Panics
///
/// Panics if called outside a tokio runtime.
#[must_use]
pub fn file_store(dir: &Path) -> CartStore {
    CartStore::new(Arc::new(FileStorage::new(dir)), TEST_KEY)
}
