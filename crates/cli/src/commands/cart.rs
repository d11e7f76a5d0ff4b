//! Cart inspection and editing commands.
//!
//! # Usage
//!
//! ```bash
//! # Show the stored cart
//! gm-cli cart list
//!
//! # Add a product (or bump its quantity if already present)
//! gm-cli cart add --id p1 --title "Shirt" --image-url https://example.com/shirt.png --price 10
//!
//! # Change quantities
//! gm-cli cart increment p1
//! gm-cli cart decrement p1
//! ```
//!
//! # Environment Variables
//!
//! - `CART_STORAGE_KEY` - Storage slot holding the cart
//! - `CART_STORAGE_DIR` - Directory for the cart file

use go_marketplace_cart::{CartConfig, CartError, CartStore, ConfigError};
use go_marketplace_core::{NewProduct, Price, ProductId};
use thiserror::Error;
use tracing::info;

/// Errors that can occur during cart commands.
#[derive(Debug, Error)]
pub enum CartCommandError {
    /// Configuration could not be loaded.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Cart operation failed.
    #[error(transparent)]
    Cart(#[from] CartError),
}

/// A single change to apply to the cart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mutation {
    Add(NewProduct),
    Increment(ProductId),
    Decrement(ProductId),
    Remove(ProductId),
    Clear,
}

/// Open the configured cart, loading whatever is stored.
async fn open() -> Result<CartStore, CartCommandError> {
    let config = CartConfig::from_env()?;
    info!(
        dir = %config.storage_dir.display(),
        key = %config.storage_key,
        "Opening cart"
    );

    let mut store = CartStore::from_config(&config);
    store.load().await?;
    Ok(store)
}

/// Log the cart contents.
pub fn report(store: &CartStore) {
    if store.is_empty() {
        info!("Cart is empty");
        return;
    }

    for product in store.products() {
        let line_total = product
            .line_total()
            .map_or_else(|| "overflow".to_string(), |total| total.display());
        info!(
            "  {} x{}  {}  @ {} = {}",
            product.id,
            product.quantity,
            product.title,
            product.price.display(),
            line_total
        );
    }

    let subtotal = store
        .subtotal()
        .map_or_else(|| "overflow".to_string(), |total: Price| total.display());
    info!("Items: {}  Subtotal: {subtotal}", store.total_quantity());
}

/// Show the stored cart.
///
/// # Errors
///
/// Returns an error if configuration is invalid or the stored cart cannot be read.
pub async fn list() -> Result<(), CartCommandError> {
    let store = open().await?;
    report(&store);
    Ok(())
}

/// Apply a mutation to a loaded store, returning the affected quantity.
///
/// # Errors
///
/// Returns `CartError::NotFound` when the mutation targets a product not in the cart.
pub fn apply(store: &mut CartStore, mutation: Mutation) -> Result<Option<u32>, CartError> {
    match mutation {
        Mutation::Add(candidate) => store.add_to_cart(candidate).map(Some),
        Mutation::Increment(id) => store.increment(&id).map(Some),
        Mutation::Decrement(id) => store.decrement(&id).map(Some),
        Mutation::Remove(id) => store.remove(&id).map(|_| Some(0)),
        Mutation::Clear => {
            store.clear();
            Ok(None)
        }
    }
}

/// Load the stored cart, apply `mutation`, and wait for the write.
///
/// # Errors
///
/// Returns an error if configuration is invalid, the stored cart cannot be
/// read, or the mutation targets a product not in the cart.
pub async fn mutate(mutation: Mutation) -> Result<(), CartCommandError> {
    let mut store = open().await?;

    match apply(&mut store, mutation)? {
        Some(0) => info!("Product removed from cart"),
        Some(quantity) => info!(quantity, "Cart updated"),
        None => info!("Cart cleared"),
    }

    store.flush().await;
    report(&store);
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Arc;

    use go_marketplace_cart::MemoryStorage;

    use super::*;

    fn shirt() -> NewProduct {
        NewProduct {
            id: ProductId::parse("p1").unwrap(),
            title: "Shirt".to_string(),
            image_url: "u".to_string(),
            price: Price::from_cents(1000),
        }
    }

    #[tokio::test]
    async fn test_apply_sequence() {
        let mut store = CartStore::new(Arc::new(MemoryStorage::new()), "k");
        store.load().await.unwrap();
        let id = ProductId::parse("p1").unwrap();

        assert_eq!(apply(&mut store, Mutation::Add(shirt())).unwrap(), Some(1));
        assert_eq!(apply(&mut store, Mutation::Increment(id.clone())).unwrap(), Some(2));
        assert_eq!(apply(&mut store, Mutation::Decrement(id.clone())).unwrap(), Some(1));
        assert_eq!(apply(&mut store, Mutation::Remove(id)).unwrap(), Some(0));
        assert!(store.is_empty());
        assert_eq!(apply(&mut store, Mutation::Clear).unwrap(), None);
    }

    #[tokio::test]
    async fn test_apply_unknown_product() {
        let mut store = CartStore::new(Arc::new(MemoryStorage::new()), "k");
        store.load().await.unwrap();

        let result = apply(
            &mut store,
            Mutation::Decrement(ProductId::parse("missing").unwrap()),
        );
        assert!(matches!(result, Err(CartError::NotFound(_))));
    }

    #[test]
    fn test_command_error_display() {
        let err = CartCommandError::from(ConfigError::InvalidEnvVar(
            "CART_STORAGE_KEY".to_string(),
            "must not be blank".to_string(),
        ));
        assert_eq!(
            err.to_string(),
            "Configuration error: Invalid environment variable CART_STORAGE_KEY: must not be blank"
        );
    }
}
