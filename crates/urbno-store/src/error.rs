//! Store error types.

use thiserror::Error;

/// Errors that can occur when using the store.
#[derive(Error, Debug)]
pub enum StoreError {
    /// Failed to encode or decode a value.
    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    /// Filesystem failure in a file-backed store.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Key contains characters the backend cannot represent.
    #[error("Invalid key: {0:?}")]
    InvalidKey(String),

    /// Backend-specific failure (poisoned lock, unreadable entry).
    #[error("Store operation failed: {0}")]
    Backend(String),
}
