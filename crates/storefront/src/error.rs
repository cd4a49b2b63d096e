//! Unified error handling for the cart state container.
//!
//! Argument problems are never errors here (see [`Change`](crate::store::Change));
//! the only thing that can go wrong is persisting state.

use thiserror::Error;

use crate::storage::StorageError;

/// Error returned by cart state mutations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Writing the updated state to storage failed.
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}

/// Result type alias for `StoreError`.
pub type Result<T> = std::result::Result<T, StoreError>;
