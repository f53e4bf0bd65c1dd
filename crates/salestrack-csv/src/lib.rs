//! CSV file storage backend for SalesTrack.
//!
//! The file holds a header row `name,area,sales,month,year` followed by one
//! row per record. Every write rewrites the whole file.

use std::{
    fs,
    io::{self, BufReader},
    path::{Path, PathBuf},
    str::FromStr,
};

use rust_decimal::{prelude::ToPrimitive, Decimal};
use serde::Deserialize;

use salestrack_core::{Collection, Record, StorageBackend, StorageError, COLUMNS};

pub struct CsvStorage {
    path: PathBuf,
}

impl CsvStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Raw row as found in the file. The aliases accept files written by the
/// older dashboard, which used `nama`, `bulan` and `tahun` as headers.
#[derive(Debug, Deserialize)]
struct CsvRow {
    #[serde(alias = "nama")]
    name: String,
    area: String,
    sales: String,
    #[serde(alias = "bulan")]
    month: String,
    #[serde(alias = "tahun")]
    year: String,
}

impl CsvRow {
    fn into_record(self) -> Result<Record, String> {
        let sales = parse_decimal("sales", &self.sales)?;
        let month = parse_whole("month", &self.month)?;
        let year = parse_whole("year", &self.year)?;
        Record::new(self.name, self.area, sales, month, year).map_err(|e| e.to_string())
    }
}

fn parse_decimal(field: &str, value: &str) -> Result<Decimal, String> {
    Decimal::from_str(value)
        .or_else(|_| Decimal::from_scientific(value))
        .map_err(|_| format!("{} {:?} is not a number", field, value))
}

// Spreadsheet exports sometimes write whole numbers as "2024.0".
fn parse_whole(field: &str, value: &str) -> Result<i64, String> {
    if let Ok(n) = value.parse::<i64>() {
        return Ok(n);
    }
    let d = parse_decimal(field, value)?;
    if !d.fract().is_zero() {
        return Err(format!("{} {:?} is not a whole number", field, value));
    }
    d.to_i64()
        .ok_or_else(|| format!("{} {:?} is out of range", field, value))
}

fn map_csv_error(err: csv::Error) -> StorageError {
    if let Some(line) = err.position().map(|p| p.line()) {
        return StorageError::MalformedRow { line, reason: err.to_string() };
    }
    match err.into_kind() {
        csv::ErrorKind::Io(e) => StorageError::IOError(e),
        kind => StorageError::Other(format!("CSV error: {:?}", kind)),
    }
}

impl StorageBackend for CsvStorage {
    fn read(&self) -> Result<Option<Collection>, StorageError> {
        let file = match fs::File::open(&self.path) {
            Ok(file) => file,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                tracing::debug!(path = %self.path.display(), "Data file not found");
                return Ok(None);
            }
            Err(e) => return Err(StorageError::IOError(e)),
        };

        let mut reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(BufReader::new(file));

        let headers = reader.headers().map_err(map_csv_error)?.clone();
        let mut records = Vec::new();

        for result in reader.records() {
            let raw = result.map_err(map_csv_error)?;
            let line = raw.position().map(|p| p.line()).unwrap_or_default();
            let row: CsvRow = raw
                .deserialize(Some(&headers))
                .map_err(|e| StorageError::MalformedRow { line, reason: e.to_string() })?;
            let record = row
                .into_record()
                .map_err(|reason| StorageError::MalformedRow { line, reason })?;
            records.push(record);
        }

        tracing::debug!(path = %self.path.display(), records = records.len(), "Data file loaded");
        Ok(Some(Collection::from_records(records)))
    }

    fn write(&self, collection: &Collection) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let mut writer = csv::Writer::from_path(&self.path).map_err(map_csv_error)?;
        writer.write_record(COLUMNS).map_err(map_csv_error)?;

        for record in collection {
            let sales = record.sales().to_string();
            let month = record.month().to_string();
            let year = record.year().to_string();
            writer
                .write_record([record.name(), record.area(), sales.as_str(), month.as_str(), year.as_str()])
                .map_err(map_csv_error)?;
        }

        writer.flush()?;
        tracing::debug!(path = %self.path.display(), records = collection.len(), "Data file written");
        Ok(())
    }

    fn location(&self) -> String {
        self.path.display().to_string()
    }
}
