use std::sync::Arc;

use salestrack_core::{Collection, Record};

// Re-export core storage types so callers only need crate::storage::*
pub use salestrack_core::storage::{StorageBackend, StorageError};
pub use salestrack_csv::CsvStorage;
pub use salestrack_memory::InMemoryStorage;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceStatus {
    Present,
    /// The backing resource did not exist; the collection is empty.
    Missing,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Loaded {
    pub collection: Collection,
    pub source: SourceStatus,
}

impl Loaded {
    pub fn is_missing(&self) -> bool {
        self.source == SourceStatus::Missing
    }
}

/// Owns load, append and persist of the sales collection over an explicit
/// storage handle.
pub struct Store {
    backend: Arc<dyn StorageBackend>,
}

impl Store {
    pub fn new(backend: Arc<dyn StorageBackend>) -> Self {
        Self { backend }
    }

    /// Loads the collection. A missing resource is not an error: the result
    /// is an empty collection tagged [`SourceStatus::Missing`].
    pub fn load(&self) -> Result<Loaded, StorageError> {
        match self.backend.read()? {
            Some(collection) => Ok(Loaded { collection, source: SourceStatus::Present }),
            None => {
                tracing::warn!(location = %self.backend.location(), "Sales data source not found");
                Ok(Loaded { collection: Collection::new(), source: SourceStatus::Missing })
            }
        }
    }

    pub fn append(&self, collection: Collection, record: Record) -> Collection {
        collection.appended(record)
    }

    /// Overwrites the stored contents with the full collection.
    pub fn persist(&self, collection: &Collection) -> Result<(), StorageError> {
        self.backend.write(collection)?;
        tracing::debug!(records = collection.len(), "Collection persisted");
        Ok(())
    }

    pub fn append_and_persist(&self, collection: Collection, record: Record) -> Result<Collection, StorageError> {
        let collection = self.append(collection, record);
        self.persist(&collection)?;
        Ok(collection)
    }

    pub fn location(&self) -> String {
        self.backend.location()
    }
}
