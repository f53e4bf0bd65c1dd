//! In-memory storage backend for SalesTrack.

use std::sync::{
    atomic::{AtomicU64, Ordering},
    RwLock,
};

use salestrack_core::{Collection, StorageBackend, StorageError};

/// Keeps the collection in process memory. Starts out "missing" unless
/// seeded, mirroring a data file that has not been created yet.
pub struct InMemoryStorage {
    data: RwLock<Option<Collection>>,
    write_counter: AtomicU64,
}

impl Default for InMemoryStorage {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryStorage {
    pub fn new() -> Self {
        Self {
            data: RwLock::new(None),
            write_counter: AtomicU64::new(0),
        }
    }

    pub fn with_collection(collection: Collection) -> Self {
        Self {
            data: RwLock::new(Some(collection)),
            write_counter: AtomicU64::new(0),
        }
    }

    /// Number of successful writes since construction.
    pub fn write_count(&self) -> u64 {
        self.write_counter.load(Ordering::SeqCst)
    }
}

impl StorageBackend for InMemoryStorage {
    fn read(&self) -> Result<Option<Collection>, StorageError> {
        let data = self.data.read().map_err(|_| StorageError::LockPoisoned)?;
        Ok(data.clone())
    }

    fn write(&self, collection: &Collection) -> Result<(), StorageError> {
        let mut data = self.data.write().map_err(|_| StorageError::LockPoisoned)?;
        *data = Some(collection.clone());
        let writes = self.write_counter.fetch_add(1, Ordering::SeqCst) + 1;
        tracing::debug!(records = collection.len(), writes, "In-memory collection replaced");
        Ok(())
    }

    fn location(&self) -> String {
        "memory".to_string()
    }
}
