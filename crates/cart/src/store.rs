//! The cart store.
//!
//! [`CartStore`] owns the in-memory cart and is the only way to change it.
//! Consumers are handed the store explicitly (`&CartStore` to read,
//! `&mut CartStore` to mutate); there is no global instance to reach for.
//!
//! Every mutation applies synchronously and then queues a snapshot with the
//! [`Persister`], without waiting for the write. Call [`CartStore::flush`] when
//! the stored value must be up to date, e.g. before exiting.

use std::sync::Arc;

use go_marketplace_core::{NewProduct, Price, Product, ProductId};
use tokio::sync::watch;
use tracing::{debug, info, instrument, warn};

use crate::config::CartConfig;
use crate::error::{CartError, Result};
use crate::persister::Persister;
use crate::snapshot;
use crate::storage::{FileStorage, Storage};

/// Shopping cart backed by a single storage slot.
pub struct CartStore {
    products: Vec<Product>,
    loaded: bool,
    storage: Arc<dyn Storage>,
    key: String,
    persister: Persister,
    changes: watch::Sender<Vec<Product>>,
}

impl CartStore {
    /// Create an empty, not yet loaded store and start its writer task.
    ///
    /// # Panics
    ///
    /// Panics if called outside a tokio runtime.
    #[must_use]
    pub fn new(storage: Arc<dyn Storage>, key: impl Into<String>) -> Self {
        let key = key.into();
        let persister = Persister::spawn(Arc::clone(&storage), key.clone());
        let (changes, _) = watch::channel(Vec::new());

        Self {
            products: Vec::new(),
            loaded: false,
            storage,
            key,
            persister,
            changes,
        }
    }

    /// Create a store on file storage as described by `config`.
    ///
    /// # Panics
    ///
    /// Panics if called outside a tokio runtime.
    #[must_use]
    pub fn from_config(config: &CartConfig) -> Self {
        let storage = FileStorage::new(config.storage_dir.clone());
        Self::new(Arc::new(storage), config.storage_key.clone())
    }

    /// Load the stored cart, returning the number of entries loaded.
    ///
    /// With nothing stored (no value, or a blank one) the cart is left as is
    /// and `Ok(0)` is returned. A stored cart replaces anything added before
    /// the call.
    ///
    /// Mutations made before `load` queue their own writes to the same slot.
    /// Those writes are not ordered against the read done here, so `load` may
    /// see either the previously stored cart or one of those writes. Call
    /// `load` before mutating.
    ///
    /// # Errors
    ///
    /// Returns `CartError::Storage` if the slot cannot be read and
    /// `CartError::Snapshot` if the stored value is malformed. In both cases
    /// the in-memory cart is left untouched.
    #[instrument(skip(self), fields(key = %self.key))]
    pub async fn load(&mut self) -> Result<usize> {
        let raw = match self.storage.get_item(&self.key).await {
            Ok(raw) => raw,
            Err(e) => {
                warn!(error = %e, "Failed to read stored cart");
                return Err(e.into());
            }
        };

        let Some(raw) = raw.filter(|raw| !raw.trim().is_empty()) else {
            info!("No stored cart, starting empty");
            self.loaded = true;
            return Ok(0);
        };

        let products = snapshot::decode(&raw).map_err(|e| {
            warn!(error = %e, "Stored cart is malformed");
            CartError::from(e)
        })?;

        let count = products.len();
        self.products = products;
        self.loaded = true;
        self.changes.send_replace(self.products.clone());

        info!(entries = count, "Loaded stored cart");
        Ok(count)
    }

    /// Add a product to the cart, returning its new quantity.
    ///
    /// If an entry with the same identifier exists this is the same as
    /// [`increment`](Self::increment), and the candidate's title, image and
    /// price are ignored. Otherwise the product is appended with quantity 1.
    ///
    /// # Errors
    ///
    /// Returns `CartError::QuantityOverflow` if the existing quantity is at
    /// `u32::MAX`.
    pub fn add_to_cart(&mut self, candidate: NewProduct) -> Result<u32> {
        if self.position(&candidate.id).is_some() {
            return self.increment(&candidate.id);
        }

        debug!(product_id = %candidate.id, "Adding product to cart");
        self.products.push(candidate.into_entry());
        self.commit();
        Ok(1)
    }

    /// Increase an entry's quantity by one, returning the new quantity.
    ///
    /// # Errors
    ///
    /// Returns `CartError::NotFound` if the product is not in the cart, or
    /// `CartError::QuantityOverflow` at `u32::MAX`. The cart is unchanged on error.
    pub fn increment(&mut self, id: &ProductId) -> Result<u32> {
        let index = self
            .position(id)
            .ok_or_else(|| CartError::NotFound(id.clone()))?;
        let entry = self
            .products
            .get_mut(index)
            .ok_or_else(|| CartError::NotFound(id.clone()))?;

        entry.quantity = entry
            .quantity
            .checked_add(1)
            .ok_or_else(|| CartError::QuantityOverflow(id.clone()))?;
        let quantity = entry.quantity;

        debug!(product_id = %id, quantity, "Incremented cart entry");
        self.commit();
        Ok(quantity)
    }

    /// Decrease an entry's quantity by one, returning the new quantity.
    ///
    /// An entry that reaches zero is removed and `Ok(0)` is returned.
    ///
    /// # Errors
    ///
    /// Returns `CartError::NotFound` if the product is not in the cart. The
    /// cart is unchanged on error.
    pub fn decrement(&mut self, id: &ProductId) -> Result<u32> {
        let index = self
            .position(id)
            .ok_or_else(|| CartError::NotFound(id.clone()))?;
        let entry = self
            .products
            .get_mut(index)
            .ok_or_else(|| CartError::NotFound(id.clone()))?;

        entry.quantity = entry.quantity.saturating_sub(1);
        let quantity = entry.quantity;

        if quantity == 0 {
            self.products.remove(index);
            debug!(product_id = %id, "Removed cart entry");
        } else {
            debug!(product_id = %id, quantity, "Decremented cart entry");
        }

        self.commit();
        Ok(quantity)
    }

    /// Remove an entry regardless of its quantity.
    ///
    /// # Errors
    ///
    /// Returns `CartError::NotFound` if the product is not in the cart.
    pub fn remove(&mut self, id: &ProductId) -> Result<Product> {
        let index = self
            .position(id)
            .ok_or_else(|| CartError::NotFound(id.clone()))?;
        let removed = self.products.remove(index);

        debug!(product_id = %id, "Removed cart entry");
        self.commit();
        Ok(removed)
    }

    /// Empty the cart and remove the stored slot.
    ///
    /// Before a successful load the slot is left alone, like any other
    /// empty-cart write.
    pub fn clear(&mut self) {
        self.products.clear();
        self.changes.send_replace(Vec::new());
        debug!("Cleared cart");

        if self.loaded {
            self.persister.discard();
        } else {
            debug!("Cart not loaded, leaving stored cart in place");
        }
    }

    /// Wait until every snapshot queued so far has been written.
    pub async fn flush(&self) {
        self.persister.flush().await;
    }

    /// Current entries, in insertion order.
    #[must_use]
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// Look up an entry.
    #[must_use]
    pub fn get(&self, id: &ProductId) -> Option<&Product> {
        self.products.iter().find(|p| &p.id == id)
    }

    /// Number of distinct entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.products.len()
    }

    /// Whether the cart has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Whether [`load`](Self::load) has completed successfully.
    #[must_use]
    pub const fn is_loaded(&self) -> bool {
        self.loaded
    }

    /// Sum of all quantities.
    #[must_use]
    pub fn total_quantity(&self) -> u64 {
        self.products.iter().map(|p| u64::from(p.quantity)).sum()
    }

    /// Sum of price times quantity over all entries, or `None` on overflow.
    #[must_use]
    pub fn subtotal(&self) -> Option<Price> {
        self.products
            .iter()
            .try_fold(Price::ZERO, |total, p| total.checked_add(p.line_total()?))
    }

    /// Observe the cart. The receiver sees the current entries and every change.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<Vec<Product>> {
        self.changes.subscribe()
    }

    fn position(&self, id: &ProductId) -> Option<usize> {
        self.products.iter().position(|p| &p.id == id)
    }

    /// Publish the new state to subscribers and queue it for writing.
    ///
    /// An empty cart is not written before a successful load, so a stored
    /// cart that has not been read yet is never replaced with nothing.
    fn commit(&self) {
        self.changes.send_replace(self.products.clone());

        if self.products.is_empty() && !self.loaded {
            debug!("Cart empty and not loaded, skipping write");
            return;
        }

        self.persister.persist(&self.products);
    }
}

impl std::fmt::Debug for CartStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CartStore")
            .field("key", &self.key)
            .field("loaded", &self.loaded)
            .field("products", &self.products)
            .finish_non_exhaustive()
    }
}
