//! User commands.

use vitrin_storefront::storage::KeyValueStore;
use vitrin_storefront::store::{CartStore, Clock};

use super::{CommandError, emit};

/// Print the logged-in user record, or `null`.
///
/// # Errors
///
/// Returns an error if output cannot be written.
pub fn show<S: KeyValueStore, C: Clock>(store: &CartStore<S, C>) -> Result<(), CommandError> {
    emit(&store.current_user())
}
