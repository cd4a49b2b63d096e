//! Core types for Vitrin.
//!
//! This module provides type-safe wrappers for the storefront's domain
//! concepts. Everything here round-trips through the JSON payloads kept in
//! browser storage.

pub mod address;
pub mod cart;
pub mod id;
pub mod price;
pub mod user;

pub use address::{Address, AddressFields};
pub use cart::CartItem;
pub use id::*;
pub use price::Price;
pub use user::User;
