//! FFI use-case API for Flutter-facing calls.
//!
//! # Responsibility
//! - Expose journal use-cases (save, delete, browse, chart, CSV) to Dart.
//! - Flatten core types into string/number envelopes.
//!
//! # Invariants
//! - Exported functions must not panic across the FFI boundary.
//! - Dates cross the boundary as `YYYY-MM-DD`, ids as UUID strings,
//!   timestamps as ISO 8601 text.

use log::warn;
use mood_core::db::open_db;
use mood_core::model::entry::format_timestamp;
use mood_core::{
    core_version as core_version_inner, describe_score, export_file_name, format_entry_date,
    init_logging as init_logging_inner, parse_entry_date, ping as ping_inner, today_local, Entry,
    EntryDraft, EntryId, JournalConfig, JournalService, SqliteEntryRepository,
    RECENT_DEFAULT_LIMIT,
};
use std::sync::OnceLock;

const RECENT_LIMIT_MAX: u32 = 50;
static JOURNAL_CONFIG: OnceLock<JournalConfig> = OnceLock::new();

/// Minimal health-check API for FRB smoke integration.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Never throws; always returns a UTF-8 string.
#[flutter_rust_bridge::frb(sync)]
pub fn ping() -> String {
    ping_inner().to_owned()
}

/// Expose core crate version through FFI.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes Rust core logging once per process.
///
/// Input semantics:
/// - `level`: one of `trace|debug|info|warn|error` (case-insensitive).
/// - `log_dir`: absolute directory path where rolling logs are written.
///
/// # FFI contract
/// - Safe to call repeatedly with the same `level + log_dir` (idempotent).
/// - Never panics; returns empty string on success and error message on failure.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err,
    }
}

/// Flattened entry for UI display.
#[derive(Debug, Clone, PartialEq)]
pub struct EntryItem {
    pub id: String,
    pub date: String,
    pub score: f64,
    pub reflection: String,
    pub intention: String,
    pub created_at: String,
    pub updated_at: String,
}

impl From<Entry> for EntryItem {
    fn from(entry: Entry) -> Self {
        Self {
            id: entry.id.to_string(),
            date: format_entry_date(entry.date),
            score: entry.score,
            reflection: entry.reflection,
            intention: entry.intention,
            created_at: format_timestamp(entry.created_at),
            updated_at: format_timestamp(entry.updated_at),
        }
    }
}

/// Generic action response envelope for save/delete flows.
#[derive(Debug, Clone, PartialEq)]
pub struct EntryActionResponse {
    /// Whether operation succeeded.
    pub ok: bool,
    /// The stored entry after a successful save.
    pub entry: Option<EntryItem>,
    /// Human-readable response message for diagnostics/UI.
    pub message: String,
}

impl EntryActionResponse {
    fn success(message: impl Into<String>, entry: Option<EntryItem>) -> Self {
        Self {
            ok: true,
            entry,
            message: message.into(),
        }
    }

    fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            entry: None,
            message: message.into(),
        }
    }
}

/// List response for full and recent entry lists.
#[derive(Debug, Clone, PartialEq)]
pub struct EntryListResponse {
    pub items: Vec<EntryItem>,
    /// Relative day labels (`Today`, `Yesterday`, `Jan 5, 2024`); empty for
    /// full listings.
    pub day_labels: Vec<String>,
    /// Score bands (`low|neutral|good|high`), parallel to `items`.
    pub bands: Vec<String>,
    pub message: String,
}

impl EntryListResponse {
    fn empty(message: String) -> Self {
        Self {
            items: Vec::new(),
            day_labels: Vec::new(),
            bands: Vec::new(),
            message,
        }
    }
}

/// One chart sample.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartPointItem {
    pub date: String,
    pub score: f64,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChartResponse {
    pub points: Vec<ChartPointItem>,
    pub message: String,
}

/// Outcome of a CSV import.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsvImportResponse {
    pub success_count: u32,
    /// Full ordered error list.
    pub errors: Vec<String>,
    /// At most five errors plus a "more errors" line.
    pub preview_errors: Vec<String>,
    pub summary: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsvExportResponse {
    pub ok: bool,
    pub csv: String,
    /// Suggested download name, e.g. `happiness-tracker-2024-01-01.csv`.
    pub file_name: String,
    pub message: String,
}

/// Creates or updates the entry for `date`.
///
/// `None` text fields keep the stored values of an existing entry.
///
/// # FFI contract
/// - Sync call, DB-backed execution.
/// - Never panics; validation problems come back as `ok=false`.
#[flutter_rust_bridge::frb(sync)]
pub fn entry_save(
    date: String,
    score: f64,
    reflection: Option<String>,
    intention: Option<String>,
) -> EntryActionResponse {
    let date = match parse_entry_date(date.trim()) {
        Ok(date) => date,
        Err(err) => return EntryActionResponse::failure(format!("entry_save failed: {err}")),
    };
    let draft = EntryDraft {
        date,
        score,
        reflection,
        intention,
    };

    match with_journal_service(|service| service.save_entry(draft).map_err(|err| err.to_string()))
    {
        Ok(entry) => EntryActionResponse::success("Entry saved.", Some(entry.into())),
        Err(err) => EntryActionResponse::failure(format!("entry_save failed: {err}")),
    }
}

/// Deletes one entry by id.
///
/// Unknown ids are not failures: `ok=true` with a "not found" message.
#[flutter_rust_bridge::frb(sync)]
pub fn entry_delete(id: String) -> EntryActionResponse {
    let id = match EntryId::parse_str(id.trim()) {
        Ok(id) => id,
        Err(_) => return EntryActionResponse::failure(format!("entry_delete failed: invalid id `{id}`")),
    };

    match with_journal_service(|service| service.delete_entry(id).map_err(|err| err.to_string())) {
        Ok(true) => EntryActionResponse::success("Entry deleted.", None),
        Ok(false) => EntryActionResponse::success("Entry not found.", None),
        Err(err) => EntryActionResponse::failure(format!("entry_delete failed: {err}")),
    }
}

/// Gets the entry for one day; `None` when absent or on failure.
#[flutter_rust_bridge::frb(sync)]
pub fn entry_for_date(date: String) -> Option<EntryItem> {
    let date = parse_entry_date(date.trim()).ok()?;
    match with_journal_service(|service| service.entry_for_date(date).map_err(|err| err.to_string()))
    {
        Ok(entry) => entry.map(EntryItem::from),
        Err(err) => {
            warn!("event=ffi_entry_for_date module=ffi status=error error={err}");
            None
        }
    }
}

/// Lists every entry, most recent date first.
#[flutter_rust_bridge::frb(sync)]
pub fn entries_list() -> EntryListResponse {
    match with_journal_service(|service| service.list_entries().map_err(|err| err.to_string())) {
        Ok(entries) => {
            let message = format!("Found {} entries.", entries.len());
            let bands = entries
                .iter()
                .map(|entry| mood_core::ScoreBand::from_score(entry.score).as_str().to_string())
                .collect();
            EntryListResponse {
                items: entries.into_iter().map(EntryItem::from).collect(),
                day_labels: Vec::new(),
                bands,
                message,
            }
        }
        Err(err) => EntryListResponse::empty(format!("entries_list failed: {err}")),
    }
}

/// Most recent entries with relative day labels.
///
/// `limit` defaults to 5 and is clamped to 50.
#[flutter_rust_bridge::frb(sync)]
pub fn entries_recent(limit: Option<u32>) -> EntryListResponse {
    let limit = normalize_recent_limit(limit);
    let today = today_local();
    match with_journal_service(|service| {
        service
            .recent_entries(limit, today)
            .map_err(|err| err.to_string())
    }) {
        Ok(recent) => {
            let message = if recent.is_empty() {
                "No entries yet.".to_string()
            } else {
                format!("Showing {} recent entries.", recent.len())
            };
            let mut response = EntryListResponse::empty(message);
            for row in recent {
                response.day_labels.push(row.day_label);
                response.bands.push(row.band.as_str().to_string());
                response.items.push(row.entry.into());
            }
            response
        }
        Err(err) => EntryListResponse::empty(format!("entries_recent failed: {err}")),
    }
}

/// Chart series: latest 30 entries in chronological order.
#[flutter_rust_bridge::frb(sync)]
pub fn chart_points() -> ChartResponse {
    match with_journal_service(|service| service.chart_points().map_err(|err| err.to_string())) {
        Ok(points) => ChartResponse {
            message: format!("{} points.", points.len()),
            points: points
                .into_iter()
                .map(|point| ChartPointItem {
                    date: format_entry_date(point.date),
                    score: point.score,
                    label: point.label,
                })
                .collect(),
        },
        Err(err) => ChartResponse {
            points: Vec::new(),
            message: format!("chart_points failed: {err}"),
        },
    }
}

/// Imports CSV text; row problems are reported, never thrown.
#[flutter_rust_bridge::frb(sync)]
pub fn csv_import(csv_text: String) -> CsvImportResponse {
    match with_journal_service(|service| Ok(service.import_csv(&csv_text))) {
        Ok(report) => CsvImportResponse {
            success_count: u32::try_from(report.success_count).unwrap_or(u32::MAX),
            preview_errors: report.default_preview_errors(),
            summary: report.summary(),
            errors: report.errors,
        },
        Err(err) => {
            let message = format!("csv_import failed: {err}");
            CsvImportResponse {
                success_count: 0,
                errors: vec![message.clone()],
                preview_errors: vec![message.clone()],
                summary: message,
            }
        }
    }
}

/// Exports all entries as CSV text with a suggested file name.
#[flutter_rust_bridge::frb(sync)]
pub fn csv_export() -> CsvExportResponse {
    let file_name = export_file_name(today_local());
    match with_journal_service(|service| service.export_csv().map_err(|err| err.to_string())) {
        Ok(csv) => CsvExportResponse {
            ok: true,
            csv,
            file_name,
            message: "Export ready.".to_string(),
        },
        Err(err) => CsvExportResponse {
            ok: false,
            csv: String::new(),
            file_name,
            message: format!("csv_export failed: {err}"),
        },
    }
}

/// Scale description for a score; empty string outside 1-10.
#[flutter_rust_bridge::frb(sync)]
pub fn score_description(score: f64) -> String {
    describe_score(score).unwrap_or_default().to_string()
}

fn normalize_recent_limit(limit: Option<u32>) -> usize {
    let limit = match limit {
        None | Some(0) => return RECENT_DEFAULT_LIMIT,
        Some(value) => value.min(RECENT_LIMIT_MAX),
    };
    usize::try_from(limit).unwrap_or(RECENT_DEFAULT_LIMIT)
}

fn journal_config() -> &'static JournalConfig {
    JOURNAL_CONFIG.get_or_init(|| {
        JournalConfig::from_env().unwrap_or_else(|err| {
            warn!("event=ffi_config module=ffi status=fallback error={err}");
            JournalConfig::default()
        })
    })
}

fn with_journal_service<T>(
    f: impl FnOnce(&JournalService<SqliteEntryRepository<'_>>) -> Result<T, String>,
) -> Result<T, String> {
    let db_path = &journal_config().db_path;
    let conn = open_db(db_path).map_err(|err| format!("journal DB open failed: {err}"))?;
    let service = JournalService::new(SqliteEntryRepository::new(&conn));
    f(&service)
}
