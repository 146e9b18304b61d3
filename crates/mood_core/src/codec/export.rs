//! CSV export of stored entries.
//!
//! # Invariants
//! - Header is always `Date,Score,Reflection,Intention`.
//! - Every field is wrapped in `"` with inner `"` doubled; nothing else is
//!   escaped.
//! - Lines are joined with `\n`, without a trailing newline.

use crate::model::day::format_entry_date;
use crate::model::entry::Entry;
use chrono::NaiveDate;

pub const EXPORT_HEADER: &str = "Date,Score,Reflection,Intention";

/// Serializes `entries` in the given order.
pub fn export_csv(entries: &[Entry]) -> String {
    let mut lines = Vec::with_capacity(entries.len() + 1);
    lines.push(EXPORT_HEADER.to_string());
    lines.extend(entries.iter().map(export_line));
    lines.join("\n")
}

/// Suggested download name for an export made on `today`.
pub fn export_file_name(today: NaiveDate) -> String {
    format!("happiness-tracker-{}.csv", format_entry_date(today))
}

fn export_line(entry: &Entry) -> String {
    [
        format_entry_date(entry.date),
        entry.score.to_string(),
        entry.reflection.clone(),
        entry.intention.clone(),
    ]
    .iter()
    .map(|value| quote(value))
    .collect::<Vec<_>>()
    .join(",")
}

fn quote(value: &str) -> String {
    format!("\"{}\"", value.replace('"', "\"\""))
}
