//! Core types and traits for SalesTrack storage backends.
//!
//! This crate provides the `StorageBackend` trait together with the `Record`
//! and `Collection` model, so storage implementations can live in separate
//! crates.

pub mod models;
pub mod storage;

// Re-export key types at crate root for convenience
pub use models::{Collection, Record, RecordError, COLUMNS, MAX_SALES};
pub use models::write::CreateRecordCommand;
pub use storage::{StorageBackend, StorageError};
