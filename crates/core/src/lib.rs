//! Vitrin Core - Shared domain types.
//!
//! This crate provides the types shared by the Vitrin components:
//! - `storefront` - Cart state container, storage backends and routing table
//! - `cli` - Command-line view over the cart state container
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no storage access, no clock.
//! This keeps it lightweight and allows it to be used anywhere, including
//! wasm builds running in the browser.
//!
//! # Modules
//!
//! - [`types`] - Prices, address IDs, cart items, addresses and the user record

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
