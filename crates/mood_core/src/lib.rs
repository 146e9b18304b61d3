//! Core domain logic for the mood journal.
//! This crate is the single source of truth for entry invariants.

pub mod codec;
pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod projection;
pub mod repo;
pub mod service;

pub use codec::{ensure_csv_file_name, export_csv, export_file_name, import_csv, ImportReport};
pub use config::{ConfigError, JournalConfig, LogLevel};
pub use logging::{default_log_level, init_logging, init_logging_with_config, logging_status};
pub use model::day::{
    format_entry_date, next_day, parse_entry_date, previous_day, today_local,
};
pub use model::entry::{Entry, EntryDraft, EntryId, EntryValidationError};
pub use model::scale::{describe_score, ScoreBand};
pub use projection::chart::{chart_points, ChartPoint, CHART_POINT_LIMIT};
pub use projection::recent::{recent_entries, RecentEntry, RECENT_DEFAULT_LIMIT};
pub use repo::entry_repo::{EntryRepository, RepoError, RepoResult, SqliteEntryRepository};
pub use repo::memory_repo::MemoryEntryRepository;
pub use service::journal_service::JournalService;

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::{core_version, ping};

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
