//! GoMarketplace Core - Shared cart types.
//!
//! This crate provides the types used across all GoMarketplace components:
//! - `cart` - The cart store and its storage backends
//! - `cli` - Command-line tools for inspecting and editing a stored cart
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no storage access, no async
//! runtime. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for product IDs and prices, plus cart entries

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
