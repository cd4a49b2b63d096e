//! Saved shipping addresses.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::AddressId;

/// The caller-supplied part of an address (name, street, city, phone, ...).
///
/// The storefront does not interpret these fields; they are stored exactly
/// as the address form submitted them.
pub type AddressFields = Map<String, Value>;

/// A saved address with its storefront-assigned ID.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Address {
    /// Assigned when the address is first saved. Never changed afterwards.
    pub id: AddressId,
    /// Form fields, stored verbatim.
    #[serde(flatten)]
    pub fields: AddressFields,
}

impl Address {
    /// Combine form fields with an ID.
    ///
    /// An `id` key inside `fields` is discarded; the `id` argument always wins.
    ///
    /// ```
    /// use serde_json::json;
    /// use vitrin_core::{Address, AddressId};
    ///
    /// let fields = json!({"id": 1, "city": "İzmir"});
    /// let address = Address::new(AddressId::new(99), fields.as_object().unwrap().clone());
    /// assert_eq!(address.id, AddressId::new(99));
    /// assert!(!address.fields.contains_key("id"));
    /// ```
    #[must_use]
    pub fn new(id: AddressId, mut fields: AddressFields) -> Self {
        fields.remove("id");
        Self { id, fields }
    }

    /// Look up a single form field.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }
}
