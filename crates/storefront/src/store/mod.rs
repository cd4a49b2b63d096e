//! Application state owned by the storefront.
//!
//! There is no global store. The host constructs one [`CartStore`] at start
//! (usually via [`CartStore::open`]) and hands it to whatever renders views.

pub mod cart;
mod ids;

pub use cart::{CartStore, CartSummary, Change, FREE_SHIPPING_THRESHOLD, SHIPPING_COST};
pub use ids::{AddressIds, Clock, SystemClock};
