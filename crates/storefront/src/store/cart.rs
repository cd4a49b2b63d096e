//! Cart state container.
//!
//! [`CartStore`] is the single owner of the shopper's cart lines, the
//! logged-in user record and the address book. Views read totals from it and
//! call its mutations; every mutation writes the affected collection back to
//! storage before returning.
//!
//! # Lifecycle
//!
//! ```text
//! CartStore::open(storage)
//!   ├─ read "currentUser"      (absent/malformed → no user)
//!   ├─ read "savedAddresses"   (absent/malformed → empty)
//!   ├─ initialize_cart()       read "cartItems"
//!   └─ initialize_addresses()  read "savedAddresses"
//! ```
//!
//! # Invalid input
//!
//! Mutations never fail because of their arguments. An out-of-range index,
//! a non-positive quantity or an unknown address ID leaves the state as it
//! was and is reported as [`Change::Unchanged`]. Only storage write failures
//! surface as errors.

use rust_decimal::Decimal;
use serde::Serialize;
use tracing::instrument;

use vitrin_core::{Address, AddressFields, AddressId, CartItem, Price, User};

use super::ids::{AddressIds, Clock, SystemClock};
use crate::error::Result;
use crate::storage::{self, KeyValueStore, keys};

/// Subtotal at or above which shipping is free.
pub const FREE_SHIPPING_THRESHOLD: Price = Price::new(Decimal::ONE_THOUSAND);

/// Flat shipping charge below the free-shipping threshold.
pub const SHIPPING_COST: Price = Price::new(Decimal::from_parts(2990, 0, 0, false, 2));

/// Whether a mutation altered state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Change {
    /// State changed.
    Applied,
    /// The input did not match anything (or was rejected); state is as before.
    Unchanged,
}

impl Change {
    /// `true` for [`Change::Applied`].
    #[must_use]
    pub const fn is_applied(self) -> bool {
        matches!(self, Self::Applied)
    }
}

/// Snapshot of the cart's monetary values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartSummary {
    /// Number of cart lines.
    pub line_count: usize,
    /// Total units across all lines.
    pub item_count: u64,
    /// Sum of line totals.
    pub cart_total: Price,
    /// Shipping charge applied at checkout.
    pub shipping_cost: Price,
    /// How much more the shopper must add for free shipping.
    pub remaining_for_free_shipping: Price,
    /// Cart total plus shipping.
    pub final_total: Price,
}

/// The storefront's cart, user and address state.
#[derive(Debug)]
pub struct CartStore<S, C = SystemClock> {
    storage: S,
    address_ids: AddressIds<C>,
    cart_items: Vec<CartItem>,
    user: Option<User>,
    saved_addresses: Vec<Address>,
}

impl<S: KeyValueStore> CartStore<S> {
    /// Create a store over `storage`, loading the user and saved addresses.
    ///
    /// The cart starts empty until [`initialize_cart`](Self::initialize_cart)
    /// runs. Use [`open`](Self::open) at application start.
    #[must_use]
    pub fn new(storage: S) -> Self {
        Self::with_clock(storage, SystemClock)
    }

    /// Create a store and re-hydrate the cart and address book from storage.
    #[must_use]
    pub fn open(storage: S) -> Self {
        let mut store = Self::new(storage);
        store.initialize_cart();
        store.initialize_addresses();
        store
    }
}

impl<S: KeyValueStore, C: Clock> CartStore<S, C> {
    /// Like [`new`](CartStore::new), with address IDs taken from `clock`.
    #[must_use]
    pub fn with_clock(storage: S, clock: C) -> Self {
        let user = storage::read_json(&storage, keys::CURRENT_USER);
        let saved_addresses = storage::read_json(&storage, keys::SAVED_ADDRESSES).unwrap_or_default();

        Self {
            storage,
            address_ids: AddressIds::new(clock),
            cart_items: Vec::new(),
            user,
            saved_addresses,
        }
    }

    /// The storage backend.
    #[must_use]
    pub const fn storage(&self) -> &S {
        &self.storage
    }

    /// Give back the storage backend.
    #[must_use]
    pub fn into_storage(self) -> S {
        self.storage
    }

    // =========================================================================
    // Derived values
    // =========================================================================

    /// Cart lines in display order.
    #[must_use]
    pub fn cart_items(&self) -> &[CartItem] {
        &self.cart_items
    }

    /// Sum of `price × quantity` over all lines.
    ///
    /// Each line total is rounded to cents, and so is the running sum after
    /// every line. Three lines of 0.333 therefore total 0.99, not 1.00.
    #[must_use]
    pub fn cart_total(&self) -> Price {
        self.cart_items.iter().fold(Price::ZERO, |total, item| {
            (total + item.line_total()).round_cents()
        })
    }

    /// Amount still needed to reach [`FREE_SHIPPING_THRESHOLD`], or zero.
    #[must_use]
    pub fn remaining_for_free_shipping(&self) -> Price {
        let remaining = FREE_SHIPPING_THRESHOLD - self.cart_total();
        if remaining.is_positive() {
            remaining.round_cents()
        } else {
            Price::ZERO
        }
    }

    /// Shipping charge for the current cart.
    #[must_use]
    pub fn shipping_cost(&self) -> Price {
        if self.cart_total() >= FREE_SHIPPING_THRESHOLD {
            Price::ZERO
        } else {
            SHIPPING_COST
        }
    }

    /// Cart total plus shipping, rounded to cents.
    #[must_use]
    pub fn final_total(&self) -> Price {
        (self.cart_total() + self.shipping_cost()).round_cents()
    }

    /// The logged-in user, if any.
    #[must_use]
    pub const fn current_user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    /// Saved addresses in the order they were added.
    #[must_use]
    pub fn user_addresses(&self) -> &[Address] {
        &self.saved_addresses
    }

    /// All monetary values at once.
    #[must_use]
    pub fn summary(&self) -> CartSummary {
        CartSummary {
            line_count: self.cart_items.len(),
            item_count: self
                .cart_items
                .iter()
                .fold(0, |count: u64, i| count.saturating_add(i.quantity)),
            cart_total: self.cart_total(),
            shipping_cost: self.shipping_cost(),
            remaining_for_free_shipping: self.remaining_for_free_shipping(),
            final_total: self.final_total(),
        }
    }

    // =========================================================================
    // Cart mutations
    // =========================================================================

    /// Replace the whole cart.
    ///
    /// # Errors
    ///
    /// Returns an error if the cart cannot be written to storage.
    #[instrument(skip(self, items), fields(lines = items.len()))]
    pub fn set_cart_items(&mut self, items: Vec<CartItem>) -> Result<()> {
        self.cart_items = items;
        self.persist_cart()
    }

    /// Remove the line at `index`. An index past the end removes nothing.
    ///
    /// The cart is written back either way.
    ///
    /// # Errors
    ///
    /// Returns an error if the cart cannot be written to storage.
    #[instrument(skip(self))]
    pub fn remove_from_cart(&mut self, index: usize) -> Result<Change> {
        let change = if index < self.cart_items.len() {
            self.cart_items.remove(index);
            Change::Applied
        } else {
            tracing::debug!(lines = self.cart_items.len(), "No cart line at index");
            Change::Unchanged
        };

        self.persist_cart()?;
        Ok(change)
    }

    /// Set the quantity of the line at `index`.
    ///
    /// Zero and negative quantities are ignored, as is an index past the
    /// end. Storage is only written when the line changed.
    ///
    /// # Errors
    ///
    /// Returns an error if the cart cannot be written to storage.
    #[instrument(skip(self))]
    pub fn update_quantity(&mut self, index: usize, new_quantity: i64) -> Result<Change> {
        let Some(quantity) = u64::try_from(new_quantity).ok().filter(|q| *q > 0) else {
            tracing::debug!("Ignoring non-positive quantity");
            return Ok(Change::Unchanged);
        };

        let Some(item) = self.cart_items.get_mut(index) else {
            tracing::debug!(lines = self.cart_items.len(), "No cart line at index");
            return Ok(Change::Unchanged);
        };

        item.quantity = quantity;
        self.persist_cart()?;
        Ok(Change::Applied)
    }

    /// Reload the cart from storage, if anything was saved.
    ///
    /// A missing or malformed entry leaves the current cart in place.
    pub fn initialize_cart(&mut self) {
        if let Some(items) = storage::read_json::<Vec<CartItem>, _>(&self.storage, keys::CART_ITEMS) {
            tracing::debug!(lines = items.len(), "Restored cart from storage");
            self.cart_items = items;
        }
    }

    // =========================================================================
    // Address book mutations
    // =========================================================================

    /// Save a new address and return the ID it was given.
    ///
    /// # Errors
    ///
    /// Returns an error if the address book cannot be written to storage.
    #[instrument(skip(self, fields))]
    pub fn add_address(&mut self, fields: AddressFields) -> Result<AddressId> {
        let id = self
            .address_ids
            .next(self.saved_addresses.iter().map(|a| a.id));
        self.saved_addresses.push(Address::new(id, fields));
        tracing::debug!(%id, "Added address");

        self.persist_addresses()?;
        Ok(id)
    }

    /// Replace the fields of the address with `id`, keeping its ID and position.
    ///
    /// The address book is written back even when no address matched.
    ///
    /// # Errors
    ///
    /// Returns an error if the address book cannot be written to storage.
    #[instrument(skip(self, fields))]
    pub fn update_address(&mut self, id: AddressId, fields: AddressFields) -> Result<Change> {
        let change = match self.saved_addresses.iter_mut().find(|a| a.id == id) {
            Some(address) => {
                *address = Address::new(id, fields);
                Change::Applied
            }
            None => {
                tracing::debug!("No saved address with id");
                Change::Unchanged
            }
        };

        self.persist_addresses()?;
        Ok(change)
    }

    /// Delete every address with `id`.
    ///
    /// # Errors
    ///
    /// Returns an error if the address book cannot be written to storage.
    #[instrument(skip(self))]
    pub fn remove_address(&mut self, id: AddressId) -> Result<Change> {
        let before = self.saved_addresses.len();
        self.saved_addresses.retain(|a| a.id != id);
        let change = if self.saved_addresses.len() < before {
            Change::Applied
        } else {
            Change::Unchanged
        };

        self.persist_addresses()?;
        Ok(change)
    }

    /// Reload the address book from storage, if anything was saved.
    ///
    /// A missing or malformed entry leaves the current address book in place.
    pub fn initialize_addresses(&mut self) {
        if let Some(addresses) =
            storage::read_json::<Vec<Address>, _>(&self.storage, keys::SAVED_ADDRESSES)
        {
            tracing::debug!(count = addresses.len(), "Restored addresses from storage");
            self.saved_addresses = addresses;
        }
    }

    fn persist_cart(&mut self) -> Result<()> {
        storage::write_json(&mut self.storage, keys::CART_ITEMS, &self.cart_items)?;
        Ok(())
    }

    fn persist_addresses(&mut self) -> Result<()> {
        storage::write_json(&mut self.storage, keys::SAVED_ADDRESSES, &self.saved_addresses)?;
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use serde_json::{Value, json};

    use super::*;
    use crate::storage::MemoryStore;

    fn price(cents: i64) -> Price {
        Price::from_cents(cents)
    }

    fn fields(value: Value) -> AddressFields {
        value.as_object().unwrap().clone()
    }

    fn store_with(items: Vec<CartItem>) -> CartStore<MemoryStore> {
        let mut store = CartStore::new(MemoryStore::new());
        store.set_cart_items(items).unwrap();
        store
    }

    // -------------------------------------------------------------------------
    // Totals
    // -------------------------------------------------------------------------

    #[test]
    fn test_empty_cart_totals() {
        let store = CartStore::new(MemoryStore::new());
        assert_eq!(store.cart_total(), Price::ZERO);
        assert_eq!(store.remaining_for_free_shipping(), price(100_000));
        assert_eq!(store.shipping_cost(), SHIPPING_COST);
        assert_eq!(store.final_total(), price(2990));
    }

    #[test]
    fn test_over_threshold_ships_free() {
        let store = store_with(vec![
            CartItem::new(price(50_000), 1),
            CartItem::new(price(30_000), 2),
        ]);
        assert_eq!(store.cart_total(), price(110_000));
        assert_eq!(store.remaining_for_free_shipping(), Price::ZERO);
        assert_eq!(store.final_total(), price(110_000));
    }

    #[test]
    fn test_under_threshold_adds_shipping() {
        let store = store_with(vec![CartItem::new(price(10_000), 1)]);
        assert_eq!(store.cart_total(), price(10_000));
        assert_eq!(store.remaining_for_free_shipping(), price(90_000));
        assert_eq!(store.final_total(), price(12_990));
    }

    #[test]
    fn test_exactly_at_threshold_ships_free() {
        let store = store_with(vec![CartItem::new(price(25_000), 4)]);
        assert_eq!(store.cart_total(), FREE_SHIPPING_THRESHOLD);
        assert_eq!(store.remaining_for_free_shipping(), Price::ZERO);
        assert_eq!(store.shipping_cost(), Price::ZERO);
        assert_eq!(store.final_total(), price(100_000));
    }

    #[test]
    fn test_line_totals_are_rounded_before_summing() {
        let third = Price::new(Decimal::new(333, 3));
        let store = store_with(vec![
            CartItem::new(third, 1),
            CartItem::new(third, 1),
            CartItem::new(third, 1),
        ]);

        let naive: Decimal = (0..3).map(|_| third.amount()).sum();
        assert_eq!(Price::new(naive).round_cents(), price(100));
        assert_eq!(store.cart_total(), price(99));
    }

    #[test]
    fn test_line_total_rounds_half_up() {
        let store = store_with(vec![CartItem::new(Price::new(Decimal::new(1_005, 3)), 1)]);
        assert_eq!(store.cart_total(), price(101));
    }

    #[test]
    fn test_summary() {
        let store = store_with(vec![
            CartItem::new(price(19_990), 2),
            CartItem::new(price(4_950), 1),
        ]);
        let summary = store.summary();
        assert_eq!(summary.line_count, 2);
        assert_eq!(summary.item_count, 3);
        assert_eq!(summary.cart_total, price(44_930));
        assert_eq!(summary.shipping_cost, SHIPPING_COST);
        assert_eq!(summary.remaining_for_free_shipping, price(55_070));
        assert_eq!(summary.final_total, price(47_920));

        let value = serde_json::to_value(&summary).unwrap();
        assert!(value["remainingForFreeShipping"].is_number());
        assert!(value["finalTotal"].is_number());
    }

    // -------------------------------------------------------------------------
    // Cart mutations
    // -------------------------------------------------------------------------

    #[test]
    fn test_set_cart_items_persists() {
        let store = store_with(vec![CartItem::new(price(1_000), 2).with_detail("title", "Cüzdan")]);
        let saved = store.storage().get(keys::CART_ITEMS).unwrap();
        let saved: Value = serde_json::from_str(&saved).unwrap();
        assert_eq!(saved, json!([{"price": 10.0, "quantity": 2, "title": "Cüzdan"}]));
    }

    #[test]
    fn test_remove_from_cart() {
        let mut store = store_with(vec![
            CartItem::new(price(100), 1),
            CartItem::new(price(200), 1),
            CartItem::new(price(300), 1),
        ]);

        assert_eq!(store.remove_from_cart(1).unwrap(), Change::Applied);
        let prices: Vec<Price> = store.cart_items().iter().map(|i| i.price).collect();
        assert_eq!(prices, vec![price(100), price(300)]);
        assert_eq!(store.storage().write_count(keys::CART_ITEMS), 2);
    }

    #[test]
    fn test_remove_from_cart_out_of_range() {
        let mut store = store_with(vec![CartItem::new(price(100), 1)]);
        assert_eq!(store.remove_from_cart(5).unwrap(), Change::Unchanged);
        assert_eq!(store.cart_items().len(), 1);
        assert_eq!(store.storage().write_count(keys::CART_ITEMS), 2);
    }

    #[test]
    fn test_update_quantity() {
        let mut store = store_with(vec![CartItem::new(price(100), 1)]);
        assert_eq!(store.update_quantity(0, 4).unwrap(), Change::Applied);
        assert_eq!(store.cart_items()[0].quantity, 4);
        assert_eq!(store.cart_total(), price(400));
        assert_eq!(store.storage().write_count(keys::CART_ITEMS), 2);
    }

    #[test]
    fn test_update_quantity_rejects_non_positive() {
        let mut store = store_with(vec![CartItem::new(price(100), 3)]);

        assert_eq!(store.update_quantity(0, 0).unwrap(), Change::Unchanged);
        assert_eq!(store.update_quantity(0, -2).unwrap(), Change::Unchanged);

        assert_eq!(store.cart_items()[0].quantity, 3);
        assert_eq!(store.storage().write_count(keys::CART_ITEMS), 1);
    }

    #[test]
    fn test_update_quantity_accepts_large_values() {
        let mut store = store_with(vec![CartItem::new(price(1), 1)]);
        assert_eq!(store.update_quantity(0, 5_000_000_000).unwrap(), Change::Applied);
        assert_eq!(store.cart_items()[0].quantity, 5_000_000_000);
        assert_eq!(store.cart_total(), price(5_000_000_000));
    }

    #[test]
    fn test_oversized_saved_price_does_not_panic() {
        let storage = MemoryStore::with_entries([(
            keys::CART_ITEMS,
            r#"[{"price":50000000000000000000000000000,"quantity":2},{"price":10,"quantity":1}]"#,
        )]);
        let store = CartStore::open(storage);
        assert_eq!(store.cart_items().len(), 2);

        assert_eq!(store.cart_total(), Price::MAX);
        assert_eq!(store.shipping_cost(), Price::ZERO);
        assert_eq!(store.remaining_for_free_shipping(), Price::ZERO);
        assert_eq!(store.final_total(), Price::MAX);
        assert_eq!(store.summary().item_count, 3);
    }

    #[test]
    fn test_update_quantity_missing_line() {
        let mut store = store_with(vec![]);
        assert_eq!(store.update_quantity(0, 2).unwrap(), Change::Unchanged);
        assert_eq!(store.storage().write_count(keys::CART_ITEMS), 1);
    }

    #[test]
    fn test_initialize_cart_restores_saved_items() {
        let storage = MemoryStore::with_entries([(
            keys::CART_ITEMS,
            r#"[{"price":500,"quantity":1,"title":"Sırt Çantası"}]"#,
        )]);
        let mut store = CartStore::new(storage);
        assert!(store.cart_items().is_empty());

        store.initialize_cart();
        assert_eq!(store.cart_items().len(), 1);
        assert_eq!(store.cart_items()[0].title(), Some("Sırt Çantası"));
        assert_eq!(store.storage().write_count(keys::CART_ITEMS), 0);
    }

    #[test]
    fn test_initialize_cart_ignores_malformed_entry() {
        let storage = MemoryStore::with_entries([(keys::CART_ITEMS, "{oops")]);
        let mut store = CartStore::new(storage);
        store.initialize_cart();
        assert!(store.cart_items().is_empty());
    }

    // -------------------------------------------------------------------------
    // User & addresses
    // -------------------------------------------------------------------------

    #[test]
    fn test_loads_user_on_construction() {
        let storage = MemoryStore::with_entries([(keys::CURRENT_USER, r#"{"name":"Mehmet"}"#)]);
        let store = CartStore::new(storage);
        assert_eq!(store.current_user().and_then(User::name), Some("Mehmet"));
    }

    #[test]
    fn test_missing_or_malformed_user_is_absent() {
        assert!(CartStore::new(MemoryStore::new()).current_user().is_none());

        let storage = MemoryStore::with_entries([(keys::CURRENT_USER, "null")]);
        assert!(CartStore::new(storage).current_user().is_none());

        let storage = MemoryStore::with_entries([(keys::CURRENT_USER, "[1,2]")]);
        assert!(CartStore::new(storage).current_user().is_none());
    }

    #[test]
    fn test_add_address_assigns_distinct_ids() {
        let mut store = CartStore::with_clock(MemoryStore::new(), || 1_718_000_000_000_i64);

        let home = store.add_address(fields(json!({"title": "Ev", "city": "İstanbul"}))).unwrap();
        let work = store.add_address(fields(json!({"title": "İş", "city": "İstanbul"}))).unwrap();

        assert_ne!(home, work);
        let addresses = store.user_addresses();
        assert_eq!(addresses.len(), 2);
        assert_eq!(addresses[0].id, home);
        assert_eq!(addresses[0].field("title"), Some(&json!("Ev")));
        assert_eq!(addresses[1].field("title"), Some(&json!("İş")));
        assert_eq!(store.storage().write_count(keys::SAVED_ADDRESSES), 2);
    }

    #[test]
    fn test_update_address_keeps_id_and_position() {
        let mut store = CartStore::new(MemoryStore::new());
        let first = store.add_address(fields(json!({"city": "Adana"}))).unwrap();
        let second = store.add_address(fields(json!({"city": "Mersin"}))).unwrap();

        let change = store
            .update_address(first, fields(json!({"id": 1, "city": "Hatay"})))
            .unwrap();
        assert_eq!(change, Change::Applied);

        let addresses = store.user_addresses();
        assert_eq!(addresses[0].id, first);
        assert_eq!(addresses[0].field("city"), Some(&json!("Hatay")));
        assert_eq!(addresses[1].id, second);
    }

    #[test]
    fn test_update_unknown_address_still_writes() {
        let mut store = CartStore::new(MemoryStore::new());
        store.add_address(fields(json!({"city": "Konya"}))).unwrap();
        let before = store.user_addresses().to_vec();

        let change = store
            .update_address(AddressId::new(-1), fields(json!({"city": "Sivas"})))
            .unwrap();

        assert_eq!(change, Change::Unchanged);
        assert_eq!(store.user_addresses(), before.as_slice());
        assert_eq!(store.storage().write_count(keys::SAVED_ADDRESSES), 2);
    }

    #[test]
    fn test_remove_address() {
        let mut store = CartStore::new(MemoryStore::new());
        let keep = store.add_address(fields(json!({"city": "Van"}))).unwrap();
        let drop = store.add_address(fields(json!({"city": "Muş"}))).unwrap();

        assert_eq!(store.remove_address(drop).unwrap(), Change::Applied);
        assert_eq!(store.user_addresses().len(), 1);
        assert_eq!(store.user_addresses()[0].id, keep);

        assert_eq!(store.remove_address(drop).unwrap(), Change::Unchanged);
        assert_eq!(store.user_addresses().len(), 1);
    }

    #[test]
    fn test_open_restores_everything() {
        let mut storage = MemoryStore::new();
        {
            let mut store = CartStore::new(&mut storage);
            store
                .set_cart_items(vec![CartItem::new(price(4_500), 2)])
                .unwrap();
            store.add_address(fields(json!({"city": "Trabzon"}))).unwrap();
        }

        let store = CartStore::open(storage);
        assert_eq!(store.cart_items().len(), 1);
        assert_eq!(store.cart_total(), price(9_000));
        assert_eq!(store.user_addresses().len(), 1);
        assert_eq!(store.user_addresses()[0].field("city"), Some(&json!("Trabzon")));
    }
}
