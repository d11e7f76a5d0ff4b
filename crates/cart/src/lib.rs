//! GoMarketplace Cart - Persistent shopping cart store.
//!
//! Holds the cart in memory, restores it from a key-value slot at startup and
//! writes it back after every change.
//!
//! # Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use go_marketplace_cart::{CartStore, MemoryStorage};
//! use go_marketplace_core::{NewProduct, Price, ProductId};
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let mut cart = CartStore::new(Arc::new(MemoryStorage::new()), "@GoMarketplace:cart");
//! cart.load().await?;
//!
//! let id = ProductId::parse("p1")?;
//! cart.add_to_cart(NewProduct {
//!     id: id.clone(),
//!     title: "Shirt".to_string(),
//!     image_url: "https://example.com/shirt.png".to_string(),
//!     price: Price::from_cents(1000),
//! })?;
//! cart.increment(&id)?;
//! cart.flush().await;
//! # Ok(())
//! # }
//! ```
//!
//! # Modules
//!
//! - [`store`] - The cart store and its operations
//! - [`storage`] - Key-value storage trait with memory and file backends
//! - [`persister`] - Ordered background writer for snapshots
//! - [`snapshot`] - JSON encoding of the stored cart
//! - [`config`] - Environment configuration
//! - [`error`] - Error types

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod error;
pub mod persister;
pub mod snapshot;
pub mod storage;
pub mod store;

pub use config::{CartConfig, ConfigError};
pub use error::{CartError, Result};
pub use storage::{FileStorage, MemoryStorage, Storage, StorageError};
pub use store::CartStore;
