//! Cart commands.

use std::path::Path;

use serde_json::json;
use vitrin_core::CartItem;
use vitrin_storefront::storage::KeyValueStore;
use vitrin_storefront::store::{CartStore, Clock};

use super::{CommandError, emit};

/// Print cart lines and totals.
///
/// # Errors
///
/// Returns an error if output cannot be written.
pub fn show<S: KeyValueStore, C: Clock>(store: &CartStore<S, C>) -> Result<(), CommandError> {
    emit(&json!({
        "items": store.cart_items(),
        "summary": store.summary(),
    }))
}

/// Replace the cart with the lines in `file`.
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed, or the cart cannot
/// be saved.
pub fn set<S: KeyValueStore, C: Clock>(
    store: &mut CartStore<S, C>,
    file: &Path,
) -> Result<(), CommandError> {
    let raw = std::fs::read_to_string(file)?;
    let items: Vec<CartItem> = serde_json::from_str(&raw)?;

    tracing::info!(lines = items.len(), "Replacing cart");
    store.set_cart_items(items)?;
    show(store)
}

/// Remove the line at `index`.
///
/// # Errors
///
/// Returns an error if the cart cannot be saved.
pub fn remove<S: KeyValueStore, C: Clock>(
    store: &mut CartStore<S, C>,
    index: usize,
) -> Result<(), CommandError> {
    let change = store.remove_from_cart(index)?;
    emit(&json!({ "change": change, "summary": store.summary() }))
}

/// Set the quantity of the line at `index`.
///
/// # Errors
///
/// Returns an error if the cart cannot be saved.
pub fn quantity<S: KeyValueStore, C: Clock>(
    store: &mut CartStore<S, C>,
    index: usize,
    quantity: i64,
) -> Result<(), CommandError> {
    let change = store.update_quantity(index, quantity)?;
    if !change.is_applied() {
        tracing::warn!(index, quantity, "Quantity not changed");
    }
    emit(&json!({ "change": change, "summary": store.summary() }))
}
