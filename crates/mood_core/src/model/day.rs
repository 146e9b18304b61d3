//! Calendar-day helpers for entry dates.
//!
//! # Invariants
//! - Entry dates are exchanged as ISO `YYYY-MM-DD` text.
//! - Accepted text must match the four-two-two digit shape exactly and name a
//!   real calendar day.

use crate::model::entry::EntryValidationError;
use chrono::{Local, NaiveDate};
use once_cell::sync::Lazy;
use regex::Regex;

const ENTRY_DATE_FORMAT: &str = "%Y-%m-%d";

static ENTRY_DATE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2}$").expect("valid entry date regex"));

/// Returns whether `raw` has the `YYYY-MM-DD` shape, without checking the
/// calendar.
pub fn has_entry_date_shape(raw: &str) -> bool {
    ENTRY_DATE_RE.is_match(raw)
}

/// Parses an entry date from ISO text.
///
/// # Errors
/// - `InvalidDateFormat` when the shape is wrong.
/// - `InvalidCalendarDate` when the shape is right but the day does not exist.
pub fn parse_entry_date(raw: &str) -> Result<NaiveDate, EntryValidationError> {
    if !has_entry_date_shape(raw) {
        return Err(EntryValidationError::InvalidDateFormat(raw.to_string()));
    }
    NaiveDate::parse_from_str(raw, ENTRY_DATE_FORMAT)
        .map_err(|_| EntryValidationError::InvalidCalendarDate(raw.to_string()))
}

pub fn format_entry_date(date: NaiveDate) -> String {
    date.format(ENTRY_DATE_FORMAT).to_string()
}

/// The day before `date`; `None` only at the calendar minimum.
pub fn previous_day(date: NaiveDate) -> Option<NaiveDate> {
    date.pred_opt()
}

/// The day after `date`; `None` only at the calendar maximum.
pub fn next_day(date: NaiveDate) -> Option<NaiveDate> {
    date.succ_opt()
}

/// Current date in the local timezone, the default selected day.
pub fn today_local() -> NaiveDate {
    Local::now().date_naive()
}

/// Short chart label, e.g. `Jan 5`.
pub fn short_day_label(date: NaiveDate) -> String {
    date.format("%b %-d").to_string()
}

/// Relative label used by recent-entry lists.
///
/// `Today` and `Yesterday` relative to `today`, otherwise `Jan 5, 2024`.
pub fn relative_day_label(date: NaiveDate, today: NaiveDate) -> String {
    if date == today {
        return "Today".to_string();
    }
    if previous_day(today) == Some(date) {
        return "Yesterday".to_string();
    }
    date.format("%b %-d, %Y").to_string()
}

#[cfg(test)]
mod tests {
    use super::{
        has_entry_date_shape, next_day, parse_entry_date, previous_day, relative_day_label,
        short_day_label,
    };
    use crate::model::entry::EntryValidationError;
    use chrono::NaiveDate;

    #[test]
    fn parse_rejects_loose_shapes_and_impossible_days() {
        assert!(parse_entry_date("2024-02-29").is_ok());
        assert_eq!(
            parse_entry_date("2024-1-5"),
            Err(EntryValidationError::InvalidDateFormat("2024-1-5".to_string()))
        );
        assert_eq!(
            parse_entry_date("2023-02-29"),
            Err(EntryValidationError::InvalidCalendarDate(
                "2023-02-29".to_string()
            ))
        );
        assert!(!has_entry_date_shape(" 2024-01-01"));
    }

    #[test]
    fn day_steps_cross_month_boundaries() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        assert_eq!(
            previous_day(date),
            NaiveDate::from_ymd_opt(2024, 2, 29)
        );
        assert_eq!(next_day(date), NaiveDate::from_ymd_opt(2024, 3, 2));
    }

    #[test]
    fn labels_match_display_conventions() {
        let today = NaiveDate::from_ymd_opt(2024, 1, 10).unwrap();
        let yesterday = NaiveDate::from_ymd_opt(2024, 1, 9).unwrap();
        let older = NaiveDate::from_ymd_opt(2024, 1, 5).unwrap();

        assert_eq!(short_day_label(older), "Jan 5");
        assert_eq!(relative_day_label(today, today), "Today");
        assert_eq!(relative_day_label(yesterday, today), "Yesterday");
        assert_eq!(relative_day_label(older, today), "Jan 5, 2024");
    }
}
