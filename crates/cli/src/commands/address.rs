//! Address book commands.

use serde_json::{Value, json};
use vitrin_core::{AddressFields, AddressId};
use vitrin_storefront::storage::KeyValueStore;
use vitrin_storefront::store::{CartStore, Clock};

use super::{CommandError, emit};

/// Print saved addresses.
///
/// # Errors
///
/// Returns an error if output cannot be written.
pub fn list<S: KeyValueStore, C: Clock>(store: &CartStore<S, C>) -> Result<(), CommandError> {
    emit(&store.user_addresses())
}

/// Save a new address.
///
/// # Errors
///
/// Returns an error if `fields` is not a JSON object or the address book
/// cannot be saved.
pub fn add<S: KeyValueStore, C: Clock>(
    store: &mut CartStore<S, C>,
    fields: &str,
) -> Result<(), CommandError> {
    let id = store.add_address(parse_fields(fields)?)?;
    tracing::info!(%id, "Saved address");
    emit(&json!({ "id": id }))
}

/// Replace the fields of the address with `id`.
///
/// # Errors
///
/// Returns an error if `fields` is not a JSON object or the address book
/// cannot be saved.
pub fn update<S: KeyValueStore, C: Clock>(
    store: &mut CartStore<S, C>,
    id: AddressId,
    fields: &str,
) -> Result<(), CommandError> {
    let change = store.update_address(id, parse_fields(fields)?)?;
    emit(&json!({ "id": id, "change": change }))
}

/// Delete the address with `id`.
///
/// # Errors
///
/// Returns an error if the address book cannot be saved.
pub fn remove<S: KeyValueStore, C: Clock>(
    store: &mut CartStore<S, C>,
    id: AddressId,
) -> Result<(), CommandError> {
    let change = store.remove_address(id)?;
    emit(&json!({ "id": id, "change": change }))
}

fn parse_fields(raw: &str) -> Result<AddressFields, CommandError> {
    let value: Value = serde_json::from_str(raw)?;
    match value {
        Value::Object(fields) => Ok(fields),
        other => Err(CommandError::InvalidInput(format!(
            "address must be a JSON object, got {other}"
        ))),
    }
}
