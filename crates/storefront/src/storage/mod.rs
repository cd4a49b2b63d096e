//! Persistent key-value storage.
//!
//! The cart state container never talks to a concrete storage API. It is
//! handed something implementing [`KeyValueStore`], the same synchronous
//! `get`/`set`/`remove` surface that browser `localStorage` offers.
//!
//! # Backends
//!
//! - [`MemoryStore`] - In-process map. Used by tests and ephemeral sessions.
//! - [`JsonFileStore`] - One JSON object on disk, rewritten on every write.
//! - [`LocalStorage`] - The browser's `window.localStorage` (`browser` feature).
//!
//! # Keys
//!
//! All values are JSON strings stored under the fixed keys in [`keys`].

#[cfg(feature = "browser")]
mod browser;
mod file;
mod memory;

use std::path::PathBuf;

use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

#[cfg(feature = "browser")]
pub use browser::LocalStorage;
pub use file::JsonFileStore;
pub use memory::MemoryStore;

/// Storage keys used by the storefront.
pub mod keys {
    /// Serialized array of cart line items.
    pub const CART_ITEMS: &str = "cartItems";

    /// Serialized record of the logged-in user.
    pub const CURRENT_USER: &str = "currentUser";

    /// Serialized array of saved addresses.
    pub const SAVED_ADDRESSES: &str = "savedAddresses";
}

/// Errors raised by a storage backend while writing.
#[derive(Debug, Error)]
pub enum StorageError {
    /// The backing file could not be written.
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The backing file contents could not be encoded.
    #[error("Encoding error: {0}")]
    Encode(#[from] serde_json::Error),

    /// The browser rejected the operation (quota exceeded, storage disabled).
    #[error("Browser storage error: {0}")]
    Browser(String),
}

/// A synchronous string-keyed store.
///
/// Reads never fail: an unreadable key is reported as absent. Writes may fail
/// when the backend runs out of space or cannot reach its medium.
pub trait KeyValueStore {
    /// Read the value stored under `key`.
    fn get(&self, key: &str) -> Option<String>;

    /// Store `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend could not persist the value.
    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Delete `key`. Deleting a missing key is not an error.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend could not persist the removal.
    fn remove(&mut self, key: &str) -> Result<(), StorageError>;
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for &mut S {
    fn get(&self, key: &str) -> Option<String> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).set(key, value)
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        (**self).remove(key)
    }
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for Box<S> {
    fn get(&self, key: &str) -> Option<String> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).set(key, value)
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        (**self).remove(key)
    }
}

/// Read and decode the JSON value under `key`.
///
/// Missing keys and values that do not decode as `T` both yield `None`.
pub fn read_json<T, S>(store: &S, key: &str) -> Option<T>
where
    T: DeserializeOwned,
    S: KeyValueStore + ?Sized,
{
    let raw = store.get(key)?;
    if raw.is_empty() {
        return None;
    }

    match serde_json::from_str(&raw) {
        Ok(value) => Some(value),
        Err(e) => {
            tracing::warn!(key, error = %e, "Ignoring malformed stored value");
            None
        }
    }
}

/// Encode `value` as JSON and store it under `key`.
///
/// # Errors
///
/// Returns an error if encoding fails or the backend rejects the write.
pub fn write_json<T, S>(store: &mut S, key: &str, value: &T) -> Result<(), StorageError>
where
    T: Serialize + ?Sized,
    S: KeyValueStore + ?Sized,
{
    let encoded = serde_json::to_string(value)?;
    store.set(key, &encoded)
}
