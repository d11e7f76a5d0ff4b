//! Error types for the cart store.

use go_marketplace_core::ProductId;
use thiserror::Error;

use crate::storage::StorageError;

/// Errors returned by [`CartStore`](crate::CartStore) operations.
#[derive(Debug, Error)]
pub enum CartError {
    /// No entry with this identifier is in the cart.
    #[error("Product not in cart: {0}")]
    NotFound(ProductId),

    /// Incrementing would exceed `u32::MAX`.
    #[error("Quantity overflow for product: {0}")]
    QuantityOverflow(ProductId),

    /// Reading the stored cart failed.
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// The stored cart could not be decoded.
    #[error("Invalid cart snapshot: {0}")]
    Snapshot(#[from] serde_json::Error),
}

/// Result type alias for `CartError`.
pub type Result<T> = std::result::Result<T, CartError>;

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_cart_error_display() {
        let err = CartError::NotFound(ProductId::parse("p9").unwrap());
        assert_eq!(err.to_string(), "Product not in cart: p9");

        let err = CartError::Storage(StorageError::InvalidKey("../x".to_string()));
        assert_eq!(err.to_string(), "Storage error: Invalid storage key: ../x");
    }
}
