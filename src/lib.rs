pub mod aggregate;
pub mod app;
pub mod config;
pub mod filter;
pub mod report;
pub mod storage;

pub use salestrack_core::{Collection, CreateRecordCommand, Record, RecordError};
