//! Vitrin Storefront library.
//!
//! Client-side state for the storefront: the cart state container, the
//! key-value storage it mirrors itself into, and the page routing table.
//!
//! # Usage
//!
//! ```rust
//! use vitrin_core::{CartItem, Price};
//! use vitrin_storefront::storage::MemoryStore;
//! use vitrin_storefront::store::CartStore;
//!
//! let mut store = CartStore::open(MemoryStore::new());
//! store
//!     .set_cart_items(vec![CartItem::new(Price::from_cents(10_000), 1)])
//!     .expect("memory storage never fails");
//!
//! assert_eq!(store.final_total().to_string(), "129.90");
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod error;
pub mod routes;
pub mod storage;
pub mod store;

pub use error::{Result, StoreError};
pub use store::{CartStore, Change};
