//! Cart line items.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::Price;

const RESERVED_KEYS: [&str; 2] = ["price", "quantity"];

/// One product line in the shopping cart.
///
/// Line items have no stable identity: the storefront addresses them by
/// their position in the cart. Anything the product views attach to a line
/// (title, image, brand, selected color) is kept in [`details`](Self::details)
/// and written back to storage untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartItem {
    /// Unit price.
    pub price: Price,
    /// Number of units. Only ever set to a positive value by the cart.
    pub quantity: u64,
    /// Display fields carried verbatim.
    #[serde(flatten)]
    pub details: Map<String, Value>,
}

impl CartItem {
    /// Create a line with no display fields.
    #[must_use]
    pub fn new(price: Price, quantity: u64) -> Self {
        Self {
            price,
            quantity,
            details: Map::new(),
        }
    }

    /// Attach a display field.
    ///
    /// `price` and `quantity` are skipped: they are the line's own fields, and
    /// a second copy in the flattened details would make the saved line
    /// unreadable.
    #[must_use]
    pub fn with_detail(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        let key = key.into();
        if RESERVED_KEYS.contains(&key.as_str()) {
            return self;
        }
        self.details.insert(key, value.into());
        self
    }

    /// Unit price times quantity, rounded to cents.
    #[must_use]
    pub fn line_total(&self) -> Price {
        self.price.times(self.quantity)
    }

    /// The product title, if the view stored one.
    #[must_use]
    pub fn title(&self) -> Option<&str> {
        self.details
            .get("title")
            .or_else(|| self.details.get("name"))
            .and_then(Value::as_str)
    }
}
