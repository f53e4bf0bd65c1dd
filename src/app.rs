use std::io::Write;

use thiserror::Error;

use salestrack_core::{CreateRecordCommand, Record, RecordError};

use crate::{
    config::{AddArgs, ChartConfig, Command, OutputFormat, ShowArgs},
    filter::Selection,
    report::{self, Dashboard},
    storage::{Store, StorageError},
};

#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    InvalidEntry(#[from] RecordError),
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),
    #[error("output error: {0}")]
    Output(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

const NO_DATA: &str = "No sales data yet. Add an entry with `salestrack add`.";

/// Runs one command against a store and writes what the user sees to `out`.
pub struct App {
    store: Store,
    chart_width: usize,
}

impl App {
    pub fn new(store: Store, chart: &ChartConfig) -> Self {
        Self {
            store,
            chart_width: chart.width,
        }
    }

    pub fn run(&self, command: &Command, out: &mut impl Write) -> Result<(), AppError> {
        match command {
            Command::Add(args) => self.add(args, out),
            Command::Show(args) => self.show(args, out),
            Command::Areas => {
                let loaded = self.store.load()?;
                for area in loaded.collection.distinct_areas() {
                    writeln!(out, "{}", area)?;
                }
                Ok(())
            }
            Command::Years => {
                let loaded = self.store.load()?;
                for year in loaded.collection.distinct_years() {
                    writeln!(out, "{}", year)?;
                }
                Ok(())
            }
        }
    }

    fn add(&self, args: &AddArgs, out: &mut impl Write) -> Result<(), AppError> {
        // validate before touching the data file
        let record = Record::try_from(CreateRecordCommand::from(args.clone()))?;

        let loaded = self.store.load()?;
        if loaded.is_missing() {
            writeln!(out, "Data file {} not found, creating it.", self.store.location())?;
        }

        let collection = self.store.append_and_persist(loaded.collection, record)?;
        tracing::info!(records = collection.len(), location = %self.store.location(), "Sales entry added");
        writeln!(out, "Entry added ({} records).", collection.len())?;
        Ok(())
    }

    fn show(&self, args: &ShowArgs, out: &mut impl Write) -> Result<(), AppError> {
        let loaded = self.store.load()?;
        let selection = Selection::all(&loaded.collection).narrow(args.areas.as_slice(), &args.years);
        let filtered = selection.apply(&loaded.collection);
        tracing::debug!(
            loaded = loaded.collection.len(),
            matching = filtered.len(),
            "Selection applied"
        );

        // no data: report it and render nothing else, in either format
        if loaded.collection.is_empty() {
            if args.format == OutputFormat::Json {
                let status = serde_json::json!({
                    "source": if loaded.is_missing() { "missing" } else { "present" },
                    "message": NO_DATA,
                });
                serde_json::to_writer_pretty(&mut *out, &status)?;
                writeln!(out)?;
                return Ok(());
            }
            if loaded.is_missing() {
                writeln!(out, "Data file {} not found.", self.store.location())?;
            }
            writeln!(out, "{}", NO_DATA)?;
            return Ok(());
        }

        if args.format == OutputFormat::Json {
            let dashboard = Dashboard::build(loaded.source, selection, filtered);
            serde_json::to_writer_pretty(&mut *out, &dashboard)?;
            writeln!(out)?;
            return Ok(());
        }

        writeln!(out, "Sales data")?;
        if filtered.is_empty() {
            writeln!(out, "No data matches the selected areas and years.")?;
        } else {
            write!(out, "{}", report::records_table(&filtered))?;
        }

        let dashboard = Dashboard::build(loaded.source, selection, filtered);
        writeln!(out)?;
        writeln!(out, "Total sales: {}", dashboard.total)?;

        if !dashboard.records.is_empty() {
            writeln!(out)?;
            write!(out, "{}", report::bar_chart("Sales per area", &dashboard.by_area, self.chart_width))?;
            writeln!(out)?;
            write!(out, "{}", report::line_chart("Sales per month", &dashboard.by_month, self.chart_width))?;
        }

        Ok(())
    }
}
