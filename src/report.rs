//! Text rendering of the dashboard: the record table, the headline total and
//! the two charts.

use std::{fmt::Display, sync::Arc};

use prettytable::{row, Table};
use rust_decimal::{prelude::ToPrimitive, Decimal};
use serde::Serialize;
use time::Month;

use salestrack_core::Collection;

use crate::{
    aggregate::{self, GroupTotal},
    filter::Selection,
    storage::SourceStatus,
};

/// Everything the dashboard shows for one selection.
#[derive(Debug, Clone, Serialize)]
pub struct Dashboard {
    pub source: &'static str,
    pub selection: Selection,
    pub records: Collection,
    pub total: Decimal,
    pub by_area: Vec<GroupTotal<Arc<str>>>,
    pub by_month: Vec<GroupTotal<u8>>,
}

impl Dashboard {
    pub fn build(source: SourceStatus, selection: Selection, filtered: Collection) -> Self {
        Self {
            source: match source {
                SourceStatus::Present => "present",
                SourceStatus::Missing => "missing",
            },
            selection,
            total: aggregate::total(&filtered),
            by_area: aggregate::sum_by_area(&filtered),
            by_month: aggregate::sum_by_month(&filtered),
            records: filtered,
        }
    }
}

pub fn records_table(collection: &Collection) -> String {
    let mut table = Table::new();
    let columns = collection.columns();
    table.add_row(row![columns[0], columns[1], columns[2], columns[3], columns[4]]);
    table.add_empty_row();

    for record in collection {
        table.add_row(row![record.name(), record.area(), record.sales(), record.month(), record.year()]);
    }

    format!("{}", table)
}

pub fn month_label(month: u8) -> String {
    Month::try_from(month)
        .map(|m| m.to_string())
        .unwrap_or_else(|_| month.to_string())
}

/// Horizontal bars, one per group, scaled so the largest total spans `width`.
pub fn bar_chart<K: Display>(title: &str, groups: &[GroupTotal<K>], width: usize) -> String {
    let labels: Vec<String> = groups.iter().map(|g| g.key.to_string()).collect();
    render_chart(title, &labels, groups, width, |len| "█".repeat(len))
}

/// Month trend: one row per month with a marker placed at its scaled total.
pub fn line_chart(title: &str, groups: &[GroupTotal<u8>], width: usize) -> String {
    let labels: Vec<String> = groups.iter().map(|g| month_label(g.key)).collect();
    render_chart(title, &labels, groups, width, |len| {
        if len == 0 {
            "●".to_string()
        } else {
            format!("{}●", "·".repeat(len - 1))
        }
    })
}

fn render_chart<K>(
    title: &str,
    labels: &[String],
    groups: &[GroupTotal<K>],
    width: usize,
    draw: impl Fn(usize) -> String,
) -> String {
    let max = groups.iter().map(|g| g.total).max().unwrap_or(Decimal::ZERO);
    let label_width = labels.iter().map(|l| l.chars().count()).max().unwrap_or(0);

    let mut out = format!("{}\n", title);
    for (label, group) in labels.iter().zip(groups) {
        let len = scaled(group.total, max, width);
        out.push_str(&format!(
            "{:<label_width$} │ {:<width$} {}\n",
            label,
            draw(len),
            group.total,
            label_width = label_width,
            width = width,
        ));
    }
    out
}

fn scaled(value: Decimal, max: Decimal, width: usize) -> usize {
    if max.is_zero() {
        return 0;
    }
    (value / max * Decimal::from(width))
        .round()
        .to_usize()
        .unwrap_or(0)
        .min(width)
}
