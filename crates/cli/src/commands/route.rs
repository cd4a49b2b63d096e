//! Routing table commands.

use serde_json::{Value, json};
use vitrin_storefront::routes::{self, Props};

use super::{CommandError, emit};

/// Resolve `location` and print the matched page.
///
/// # Errors
///
/// Returns an error if no page matches or output cannot be written.
pub fn resolve(location: &str) -> Result<(), CommandError> {
    let route = routes::resolve(location)
        .ok_or_else(|| CommandError::InvalidInput(format!("no page for {location}")))?;

    let props = match &route.props {
        Props::None => Value::Null,
        Props::Query(pairs) => pairs
            .iter()
            .map(|(k, v)| (k.clone(), Value::from(v.as_str())))
            .collect::<serde_json::Map<_, _>>()
            .into(),
        Props::Product { id } => json!({ "id": id }),
    };

    emit(&json!({
        "name": route.name(),
        "view": route.page.view(),
        "path": route.page.path(),
        "href": route.href(),
        "props": props,
    }))
}
