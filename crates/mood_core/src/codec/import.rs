//! CSV import into an entry store.
//!
//! # Responsibility
//! - Parse a delimited text blob into entry drafts.
//! - Report structural and per-row failures as data, never as errors.
//!
//! # Invariants
//! - Structural failures (no data rows, missing columns) process zero rows.
//! - One bad row never aborts the batch; each good row is its own commit.
//! - Row numbers count surviving non-blank lines with the header as row 0.
//! - Splitting is naive: fields split on every comma and every `"` is
//!   removed. Commas inside quoted fields are not supported.

use crate::model::day::{has_entry_date_shape, parse_entry_date};
use crate::model::entry::{is_valid_score, EntryDraft};
use crate::repo::entry_repo::EntryRepository;
use log::{info, warn};
use std::collections::HashMap;
use std::path::Path;

const REQUIRED_COLUMNS: [&str; 2] = ["date", "score"];
const DEFAULT_PREVIEW_ERRORS: usize = 5;

/// Outcome of one CSV import.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportReport {
    /// Rows written to the store.
    pub success_count: usize,
    /// Human-readable failures in the order encountered.
    pub errors: Vec<String>,
}

impl ImportReport {
    fn structural_failure(message: impl Into<String>) -> Self {
        Self {
            success_count: 0,
            errors: vec![message.into()],
        }
    }

    /// Whether any row failed or the import was rejected outright.
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// One-line user-facing summary.
    pub fn summary(&self) -> String {
        match (self.success_count, self.errors.len()) {
            (0, 0) => "Nothing to import.".to_string(),
            (0, _) => "Import failed.".to_string(),
            (count, 0) => format!("Imported {count} entries."),
            (count, errors) => format!("Imported {count} entries. {errors} errors occurred."),
        }
    }

    /// First `limit` errors, plus a trailing `... and N more errors` line
    /// when the list was cut.
    pub fn preview_errors(&self, limit: usize) -> Vec<String> {
        let mut preview = self
            .errors
            .iter()
            .take(limit)
            .cloned()
            .collect::<Vec<_>>();
        if self.errors.len() > limit {
            preview.push(format!(
                "... and {} more errors",
                self.errors.len() - limit
            ));
        }
        preview
    }

    /// [`Self::preview_errors`] with the default panel size.
    pub fn default_preview_errors(&self) -> Vec<String> {
        self.preview_errors(DEFAULT_PREVIEW_ERRORS)
    }
}

/// Rejects file names that do not carry a `.csv` extension.
pub fn ensure_csv_file_name(path: &Path) -> Result<(), String> {
    let is_csv = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"));
    if is_csv {
        Ok(())
    } else {
        Err(format!(
            "invalid file type `{}`; please provide a CSV file",
            path.display()
        ))
    }
}

/// Imports `csv_text` into `repo`.
///
/// # Side effects
/// - Saves each valid row through `EntryRepository::save` (merge on date).
/// - Emits one `csv_import` summary event.
pub fn import_csv<R: EntryRepository + ?Sized>(repo: &R, csv_text: &str) -> ImportReport {
    let lines = csv_text
        .split('\n')
        .filter(|line| !line.trim().is_empty())
        .collect::<Vec<_>>();

    if lines.len() < 2 {
        warn!("event=csv_import module=codec status=rejected reason=no_data_rows");
        return ImportReport::structural_failure("Invalid CSV format: no data rows found");
    }

    let headers = split_fields(lines[0])
        .into_iter()
        .map(|header| header.to_lowercase())
        .collect::<Vec<_>>();
    let missing = REQUIRED_COLUMNS
        .iter()
        .filter(|required| !headers.iter().any(|header| header == *required))
        .copied()
        .collect::<Vec<_>>();
    if !missing.is_empty() {
        warn!(
            "event=csv_import module=codec status=rejected reason=missing_columns missing={}",
            missing.join("|")
        );
        return ImportReport::structural_failure(format!(
            "Missing required columns: {}",
            missing.join(", ")
        ));
    }

    let mut report = ImportReport::default();
    for (row_number, line) in lines.iter().enumerate().skip(1) {
        let row = map_row(&headers, line);
        match import_row(repo, &row) {
            Ok(()) => report.success_count += 1,
            Err(message) => report.errors.push(format!("Row {row_number}: {message}")),
        }
    }

    info!(
        "event=csv_import module=codec status=ok rows={} imported={} errors={}",
        lines.len() - 1,
        report.success_count,
        report.errors.len()
    );
    report
}

fn import_row<R: EntryRepository + ?Sized>(
    repo: &R,
    row: &HashMap<&str, String>,
) -> Result<(), String> {
    let raw_score = field(row, "score");
    let score = raw_score
        .parse::<f64>()
        .ok()
        .filter(|score| is_valid_score(*score))
        .ok_or_else(|| format!("Invalid score \"{raw_score}\" (must be 1-10)"))?;

    let raw_date = field(row, "date");
    if !has_entry_date_shape(raw_date) {
        return Err(format!(
            "Invalid date format \"{raw_date}\" (use YYYY-MM-DD)"
        ));
    }
    let date = parse_entry_date(raw_date).map_err(|err| err.to_string())?;

    let draft = EntryDraft::new(date, score)
        .with_reflection(field(row, "reflection"))
        .with_intention(field(row, "intention"));
    repo.save(draft).map_err(|err| err.to_string())?;
    Ok(())
}

fn field<'row>(row: &'row HashMap<&str, String>, name: &str) -> &'row str {
    row.get(name).map(String::as_str).unwrap_or("")
}

fn map_row<'h>(headers: &'h [String], line: &str) -> HashMap<&'h str, String> {
    let mut values = split_fields(line).into_iter();
    headers
        .iter()
        .map(|header| (header.as_str(), values.next().unwrap_or_default()))
        .collect()
}

fn split_fields(line: &str) -> Vec<String> {
    line.split(',')
        .map(|value| value.replace('"', "").trim().to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::{ensure_csv_file_name, map_row, split_fields, ImportReport};
    use std::path::Path;

    #[test]
    fn split_fields_strips_every_quote_and_whitespace() {
        assert_eq!(
            split_fields(" \"2024-01-01\" ,\"5\", say \"\"hi\"\" \r"),
            vec!["2024-01-01", "5", "say hi"]
        );
    }

    #[test]
    fn map_row_pads_missing_and_ignores_extra_fields() {
        let headers = vec!["date".to_string(), "score".to_string()];
        let short = map_row(&headers, "2024-01-01");
        assert_eq!(short["score"], "");

        let long = map_row(&headers, "2024-01-01,5,extra,more");
        assert_eq!(long.len(), 2);
        assert_eq!(long["score"], "5");
    }

    #[test]
    fn csv_file_name_check_is_case_insensitive() {
        assert!(ensure_csv_file_name(Path::new("/tmp/Export.CSV")).is_ok());
        assert!(ensure_csv_file_name(Path::new("/tmp/export.txt")).is_err());
        assert!(ensure_csv_file_name(Path::new("/tmp/csv")).is_err());
    }

    #[test]
    fn summary_and_preview_describe_partial_imports() {
        let report = ImportReport {
            success_count: 3,
            errors: (1..=7).map(|row| format!("Row {row}: bad")).collect(),
        };
        assert_eq!(report.summary(), "Imported 3 entries. 7 errors occurred.");

        let preview = report.default_preview_errors();
        assert_eq!(preview.len(), 6);
        assert_eq!(preview[5], "... and 2 more errors");

        let failed = ImportReport {
            success_count: 0,
            errors: vec!["Missing required columns: score".to_string()],
        };
        assert_eq!(failed.summary(), "Import failed.");
    }
}
