//! The logged-in user record.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Whatever the login page stored about the current user.
///
/// The storefront treats the record as opaque; the accessors below only
/// read well-known fields when they happen to be present.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct User(Map<String, Value>);

impl User {
    /// Wrap a raw record.
    #[must_use]
    pub const fn new(record: Map<String, Value>) -> Self {
        Self(record)
    }

    /// The raw record.
    #[must_use]
    pub const fn record(&self) -> &Map<String, Value> {
        &self.0
    }

    /// Display name, if present.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.str_field("name")
    }

    /// Email address, if present.
    #[must_use]
    pub fn email(&self) -> Option<&str> {
        self.str_field("email")
    }

    fn str_field(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(Value::as_str)
    }
}
