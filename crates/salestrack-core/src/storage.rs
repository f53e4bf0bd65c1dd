use thiserror::Error;

use crate::models::Collection;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("IO error: {0}")]
    IOError(#[from] std::io::Error),
    #[error("{0}")]
    Other(String),
    #[error("malformed row at line {line}: {reason}")]
    MalformedRow { line: u64, reason: String },
    #[error("storage lock poisoned")]
    LockPoisoned,
}

/// A durable home for the sales collection.
///
/// Backends always read and write the whole collection; there is no partial
/// update. A second writer on the same resource silently replaces the first.
pub trait StorageBackend: Send + Sync {
    /// Reads the stored collection. `Ok(None)` means the resource does not
    /// exist yet, which callers treat as an empty store.
    fn read(&self) -> Result<Option<Collection>, StorageError>;

    /// Replaces the stored contents with `collection`.
    fn write(&self, collection: &Collection) -> Result<(), StorageError>;

    /// Human readable location, used in messages.
    fn location(&self) -> String;
}
