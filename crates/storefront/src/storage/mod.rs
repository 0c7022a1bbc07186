//! Local key-value persistence.
//!
//! All durable state lives under two fixed keys in a single key-value store:
//!
//! - [`keys::AUTH`] - the single local [`User`](boxpaper_core::User) record
//! - [`keys::ORDERS`] - the full order sequence, newest first
//!
//! Values are JSON documents. Readers go through [`load_lenient`], which turns
//! any read or parse failure into "absent" so that a corrupted value never
//! surfaces as an error. Writers replace the whole value at once; there is no
//! partial update and no locking across read-modify-write cycles, so two
//! concurrent writers to the same key can lose one write (last write wins).
//!
//! # Implementations
//!
//! - [`MemoryStore`] - mutex-guarded map for tests and ephemeral runs
//! - [`FileStore`] - one `<key>.json` file per key in a data directory
//!
//! Both implementations block the calling thread. Async callers go through
//! [`blocking`] so file I/O runs on the blocking pool.

mod file;
mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

/// Fixed storage keys.
pub mod keys {
    /// Key holding the single local user record.
    pub const AUTH: &str = "boxpaper_auth";

    /// Key holding the order sequence.
    pub const ORDERS: &str = "boxpaper_orders";
}

/// Errors that can occur when reading or writing the store.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Filesystem operation failed.
    #[error("storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Value could not be encoded.
    #[error("storage serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    /// Key contains characters that cannot be used as a file name.
    #[error("invalid storage key: {0}")]
    InvalidKey(String),
}

/// A named region of string values.
///
/// Injected into the identity and order stores as `Arc<dyn KeyValueStore>` so
/// tests can substitute an in-memory store.
pub trait KeyValueStore: Send + Sync {
    /// Read the raw value under `key`, or `None` if nothing is stored.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backing medium cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Replace the value under `key`.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the value cannot be written.
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Delete the value under `key`. Deleting an absent key is not an error.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backing medium cannot be modified.
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

/// Run a blocking store call on the blocking thread pool.
///
/// # Errors
///
/// Returns `StorageError::Io` if the blocking task panicked or was cancelled.
pub async fn blocking<T, F>(f: F) -> Result<T, StorageError>
where
    F: FnOnce() -> T + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| StorageError::Io(std::io::Error::other(e)))
}

/// Read and decode a JSON value, treating every failure as absence.
///
/// A missing key, an unreadable medium and a malformed document all yield
/// `None`. Failures other than a missing key are logged at `warn`.
pub fn load_lenient<T: DeserializeOwned>(store: &dyn KeyValueStore, key: &str) -> Option<T> {
    let raw = match store.get(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => return None,
        Err(e) => {
            tracing::warn!(key, error = %e, "Failed to read stored value, treating as absent");
            return None;
        }
    };

    match serde_json::from_str(&raw) {
        Ok(value) => Some(value),
        Err(e) => {
            tracing::warn!(key, error = %e, "Stored value is malformed, treating as absent");
            None
        }
    }
}

/// Encode a value as JSON and write it under `key`.
///
/// # Errors
///
/// Returns `StorageError` if encoding or writing fails.
pub fn save<T: Serialize + ?Sized>(
    store: &dyn KeyValueStore,
    key: &str,
    value: &T,
) -> Result<(), StorageError> {
    let raw = serde_json::to_string(value)?;
    store.set(key, &raw)
}
