//! CLI command implementations.
//!
//! Every command writes its result to stdout as pretty-printed JSON.

pub mod address;
pub mod cart;
pub mod route;
pub mod user;

use std::io::Write;

use serde::Serialize;
use thiserror::Error;
use vitrin_storefront::StoreError;

/// Errors that can occur while running a command.
#[derive(Debug, Error)]
pub enum CommandError {
    /// Persisting state failed.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// Input JSON could not be parsed, or output could not be encoded.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Reading input or writing output failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The argument is well-formed JSON but not the expected shape.
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Write `value` to stdout as JSON.
fn emit(value: &impl Serialize) -> Result<(), CommandError> {
    let mut stdout = std::io::stdout().lock();
    serde_json::to_writer_pretty(&mut stdout, value)?;
    writeln!(stdout)?;
    Ok(())
}
