//! Command implementations.
//!
//! Each command writes its output to the given sink rather than stdout.

pub mod account;
pub mod catalog;
pub mod orders;

use boxpaper_storefront::storage::StorageError;
use thiserror::Error;

/// Errors that can occur while running a command.
#[derive(Debug, Error)]
pub enum CommandError {
    #[error("Order not found: {0}")]
    OrderNotFound(String),

    #[error("No local account")]
    NoAccount,

    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error("Failed to encode output: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Failed to write output: {0}")]
    Io(#[from] std::io::Error),
}
