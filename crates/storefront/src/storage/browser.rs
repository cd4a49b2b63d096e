//! Browser `localStorage` backend.

use web_sys::Storage;

use super::{KeyValueStore, StorageError};

/// A [`KeyValueStore`] over the page's `window.localStorage`.
#[derive(Debug, Clone)]
pub struct LocalStorage {
    storage: Storage,
}

impl LocalStorage {
    /// Attach to the current window's local storage.
    ///
    /// # Errors
    ///
    /// Returns an error when there is no window (workers) or the browser
    /// has storage disabled.
    pub fn from_window() -> Result<Self, StorageError> {
        let window = web_sys::window()
            .ok_or_else(|| StorageError::Browser("no window available".to_string()))?;
        let storage = window
            .local_storage()
            .map_err(|e| StorageError::Browser(format!("{e:?}")))?
            .ok_or_else(|| StorageError::Browser("localStorage is disabled".to_string()))?;
        Ok(Self { storage })
    }
}

impl KeyValueStore for LocalStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.storage
            .get_item(key)
            .inspect_err(|e| tracing::warn!(key, error = ?e, "localStorage read failed"))
            .ok()
            .flatten()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.storage
            .set_item(key, value)
            .map_err(|e| StorageError::Browser(format!("{e:?}")))
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        self.storage
            .remove_item(key)
            .map_err(|e| StorageError::Browser(format!("{e:?}")))
    }
}
