//! Time-series projection for the score chart.

use crate::model::day::short_day_label;
use crate::model::entry::Entry;
use chrono::NaiveDate;
use serde::Serialize;

/// Maximum number of points rendered by the chart.
pub const CHART_POINT_LIMIT: usize = 30;

/// One chart sample.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartPoint {
    pub date: NaiveDate,
    pub score: f64,
    /// Short axis label, e.g. `Jan 5`.
    pub label: String,
}

/// Projects the most recent [`CHART_POINT_LIMIT`] entries in chronological
/// order.
///
/// `entries` must be ordered most recent first, as `list_all` returns them.
pub fn chart_points(entries: &[Entry]) -> Vec<ChartPoint> {
    entries
        .iter()
        .take(CHART_POINT_LIMIT)
        .rev()
        .map(|entry| ChartPoint {
            date: entry.date,
            score: entry.score,
            label: short_day_label(entry.date),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::chart_points;
    use crate::model::entry::{Entry, EntryDraft};
    use chrono::{NaiveDate, Utc};

    #[test]
    fn keeps_latest_points_in_ascending_order() {
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let mut entries = (0..35)
            .map(|offset| {
                let date = start + chrono::Days::new(offset);
                Entry::create(EntryDraft::new(date, 5.0), Utc::now()).unwrap()
            })
            .collect::<Vec<_>>();
        entries.reverse();

        let points = chart_points(&entries);
        assert_eq!(points.len(), 30);
        assert_eq!(points[0].date, NaiveDate::from_ymd_opt(2024, 1, 6).unwrap());
        assert_eq!(points[0].label, "Jan 6");
        assert_eq!(points[29].date, NaiveDate::from_ymd_opt(2024, 2, 4).unwrap());
        assert!(points.windows(2).all(|pair| pair[0].date < pair[1].date));
    }

    #[test]
    fn empty_store_projects_no_points() {
        assert!(chart_points(&[]).is_empty());
    }
}
