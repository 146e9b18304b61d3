//! Recent-entry list projection.

use crate::model::day::relative_day_label;
use crate::model::entry::Entry;
use crate::model::scale::ScoreBand;
use chrono::NaiveDate;

/// Number of entries shown by default.
pub const RECENT_DEFAULT_LIMIT: usize = 5;

/// Display row for one recent entry.
#[derive(Debug, Clone, PartialEq)]
pub struct RecentEntry {
    pub entry: Entry,
    /// `Today`, `Yesterday`, or `Jan 5, 2024`.
    pub day_label: String,
    pub band: ScoreBand,
}

/// Takes the first `limit` entries (most recent first) and labels them
/// relative to `today`.
pub fn recent_entries(entries: &[Entry], limit: usize, today: NaiveDate) -> Vec<RecentEntry> {
    entries
        .iter()
        .take(limit)
        .map(|entry| RecentEntry {
            entry: entry.clone(),
            day_label: relative_day_label(entry.date, today),
            band: ScoreBand::from_score(entry.score),
        })
        .collect()
}
