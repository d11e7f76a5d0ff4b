//! Cart configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Optional
//! - `CART_STORAGE_KEY` - Storage slot holding the cart (default: `@GoMarketplace:cart`)
//! - `CART_STORAGE_DIR` - Directory used by file storage (default: `.go-marketplace`)

use std::path::PathBuf;

use thiserror::Error;

/// Default storage slot for the cart.
pub const DEFAULT_STORAGE_KEY: &str = "@GoMarketplace:cart";

/// Default directory for file-backed storage.
pub const DEFAULT_STORAGE_DIR: &str = ".go-marketplace";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Cart store configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartConfig {
    /// Key of the storage slot holding the serialized cart
    pub storage_key: String,
    /// Directory for file-backed storage
    pub storage_dir: PathBuf,
}

impl Default for CartConfig {
    fn default() -> Self {
        Self {
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            storage_dir: PathBuf::from(DEFAULT_STORAGE_DIR),
        }
    }
}

impl CartConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set but blank.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable lookup.
    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let storage_key = get_non_blank_or_default(&lookup, "CART_STORAGE_KEY", DEFAULT_STORAGE_KEY)?;
        let storage_dir = get_non_blank_or_default(&lookup, "CART_STORAGE_DIR", DEFAULT_STORAGE_DIR)?;

        Ok(Self {
            storage_key,
            storage_dir: PathBuf::from(storage_dir),
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get a variable with a default value, rejecting values that are set but blank.
fn get_non_blank_or_default(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
    default: &str,
) -> Result<String, ConfigError> {
    match lookup(key) {
        Some(value) if value.trim().is_empty() => Err(ConfigError::InvalidEnvVar(
            key.to_string(),
            "must not be blank".to_string(),
        )),
        Some(value) => Ok(value),
        None => Ok(default.to_string()),
    }
}
