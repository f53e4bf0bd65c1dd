use std::{collections::HashSet, fmt::Display, ops::RangeInclusive, sync::Arc};

use rust_decimal::Decimal;
use serde::Serialize;
use thiserror::Error;
use time::Month;

pub mod write;

/// Persisted column order.
pub const COLUMNS: [&str; 5] = ["name", "area", "sales", "month", "year"];

pub const MONTH_RANGE: RangeInclusive<i64> = 1..=12;
pub const YEAR_RANGE: RangeInclusive<i64> = 2000..=2100;

/// Largest accepted sales amount, 10^15. Totals over any realistic number of
/// records stay far below `Decimal::MAX`, so aggregation cannot overflow.
pub const MAX_SALES: Decimal = Decimal::from_parts(0xA4C6_8000, 0x0003_8D7E, 0, false, 0);

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecordError {
    #[error("invalid {field}: {reason}")]
    InvalidField { field: &'static str, reason: String },
}

impl RecordError {
    fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        RecordError::InvalidField { field, reason: reason.into() }
    }

    pub fn field(&self) -> &'static str {
        match self {
            RecordError::InvalidField { field, .. } => field,
        }
    }
}

/// One sales entry. Only constructible through [`Record::new`], so every
/// value in a collection satisfies the field domains.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Record {
    name: Arc<str>,
    area: Arc<str>,
    sales: Decimal,
    month: u8,
    year: u16,
}

impl Record {
    pub fn new(
        name: impl AsRef<str>,
        area: impl AsRef<str>,
        sales: Decimal,
        month: i64,
        year: i64,
    ) -> Result<Self, RecordError> {
        let name = name.as_ref().trim();
        if name.is_empty() {
            return Err(RecordError::invalid("name", "must not be blank"));
        }

        let area = area.as_ref().trim();
        if area.is_empty() {
            return Err(RecordError::invalid("area", "must not be blank"));
        }

        if sales.is_sign_negative() && !sales.is_zero() {
            return Err(RecordError::invalid("sales", format!("{} is negative", sales)));
        }

        if sales > MAX_SALES {
            return Err(RecordError::invalid("sales", format!("{} exceeds {}", sales, MAX_SALES)));
        }

        if !MONTH_RANGE.contains(&month) {
            return Err(RecordError::invalid("month", format!("{} is not in 1..=12", month)));
        }

        if !YEAR_RANGE.contains(&year) {
            return Err(RecordError::invalid("year", format!("{} is not in 2000..=2100", year)));
        }

        Ok(Self {
            name: Arc::from(name),
            area: Arc::from(area),
            // "-0" parses as a negative zero
            sales: if sales.is_zero() { Decimal::ZERO } else { sales },
            month: month as u8,
            year: year as u16,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn area(&self) -> &str {
        &self.area
    }

    pub fn area_label(&self) -> Arc<str> {
        self.area.clone()
    }

    pub fn sales(&self) -> Decimal {
        self.sales
    }

    pub fn month(&self) -> u8 {
        self.month
    }

    pub fn year(&self) -> u16 {
        self.year
    }

    pub fn calendar_month(&self) -> Month {
        // month is validated in `new`
        Month::try_from(self.month).unwrap_or(Month::January)
    }
}

impl Display for Record {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} | {} | {} | {:02}/{}",
            self.name, self.area, self.sales, self.month, self.year
        )
    }
}

/// Ordered sales entries. Insertion order is the persisted order and
/// duplicates are allowed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Collection {
    records: Vec<Record>,
}

impl Collection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_records(records: Vec<Record>) -> Self {
        Self { records }
    }

    /// Column names, available even when the collection is empty.
    pub fn columns(&self) -> &'static [&'static str] {
        &COLUMNS
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Record> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Returns this collection with `record` added at the end.
    pub fn appended(mut self, record: Record) -> Self {
        self.records.push(record);
        self
    }

    /// Distinct areas in first-seen order.
    pub fn distinct_areas(&self) -> Vec<Arc<str>> {
        let mut seen = HashSet::new();
        self.records
            .iter()
            .filter(|r| seen.insert(r.area.clone()))
            .map(|r| r.area.clone())
            .collect()
    }

    /// Distinct years in first-seen order.
    pub fn distinct_years(&self) -> Vec<u16> {
        let mut seen = HashSet::new();
        self.records
            .iter()
            .filter(|r| seen.insert(r.year))
            .map(|r| r.year)
            .collect()
    }
}

impl FromIterator<Record> for Collection {
    fn from_iter<I: IntoIterator<Item = Record>>(iter: I) -> Self {
        Self { records: iter.into_iter().collect() }
    }
}

impl<'a> IntoIterator for &'a Collection {
    type Item = &'a Record;
    type IntoIter = std::slice::Iter<'a, Record>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

impl IntoIterator for Collection {
    type Item = Record;
    type IntoIter = std::vec::IntoIter<Record>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.into_iter()
    }
}
