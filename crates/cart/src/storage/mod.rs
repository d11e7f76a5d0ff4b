//! Key-value storage backends for the persisted cart.
//!
//! The cart lives in a single string slot. Backends only need to read,
//! replace, and remove whole values; there are no partial writes.
//!
//! Implementations:
//! - [`MemoryStorage`] - in-process map, used by tests and ephemeral sessions
//! - [`FileStorage`] - one file per key under a directory, replaced atomically

mod file;
mod memory;

pub use file::FileStorage;
pub use memory::MemoryStorage;

use async_trait::async_trait;
use thiserror::Error;

/// Errors raised by storage backends.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Underlying I/O failed.
    #[error("Storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The key cannot be used with this backend.
    #[error("Invalid storage key: {0}")]
    InvalidKey(String),
}

/// Abstraction over device-local key-value storage.
#[async_trait]
pub trait Storage: Send + Sync {
    /// Read the value stored under `key`.
    ///
    /// Returns `Ok(None)` if nothing is stored.
    async fn get_item(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Replace the value stored under `key`.
    async fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Remove the value stored under `key`.
    ///
    /// Returns Ok even if nothing was stored.
    async fn remove_item(&self, key: &str) -> Result<(), StorageError>;
}
