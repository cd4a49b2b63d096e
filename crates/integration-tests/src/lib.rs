//! Integration tests for Vitrin.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p vitrin-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `cart_state` - Cart totals and mutations through the public API
//! - `file_storage` - State surviving a restart on the JSON file backend
//! - `storefront_routes` - Routing table resolution
//!
//! This library holds the fixtures the test files share.

#![cfg_attr(not(test), forbid(unsafe_code))]

use serde_json::Value;
use vitrin_core::{AddressFields, CartItem, Price};

/// A cart line priced in whole cents.
#[must_use]
pub fn line(cents: i64, quantity: u64) -> CartItem {
    CartItem::new(Price::from_cents(cents), quantity)
}

/// Address fields from a JSON object literal.
///
/// # Panics
///
/// Panics if `value` is not a JSON object.
#[must_use]
#[allow(clippy::expect_used)]
pub fn address_fields(value: Value) -> AddressFields {
    value
        .as_object()
        .cloned()
        .expect("address fixture must be a JSON object")
}

/// A clock frozen at a fixed millisecond, for deterministic address IDs.
#[must_use]
pub fn frozen_clock(millis: i64) -> impl Fn() -> i64 {
    move || millis
}
