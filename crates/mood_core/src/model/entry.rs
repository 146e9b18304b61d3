//! Journal entry domain model.
//!
//! # Responsibility
//! - Define the canonical daily record and its write-side draft.
//! - Own create/merge lifecycle rules so every store backing applies them
//!   identically.
//!
//! # Invariants
//! - `id` is stable and never reused for another entry.
//! - `score` is finite and within `[SCORE_MIN, SCORE_MAX]`.
//! - `created_at <= updated_at`; each merge strictly advances `updated_at`.

use crate::model::day::format_entry_date;
use chrono::{DateTime, Duration, NaiveDate, SecondsFormat, SubsecRound, Utc};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Stable identifier for one journal entry.
pub type EntryId = Uuid;

/// Lowest accepted happiness score.
pub const SCORE_MIN: f64 = 1.0;
/// Highest accepted happiness score.
pub const SCORE_MAX: f64 = 10.0;

/// Validation errors for entry data.
#[derive(Debug, Clone, PartialEq)]
pub enum EntryValidationError {
    /// Score is NaN, infinite or outside `[1, 10]`.
    ScoreOutOfRange(f64),
    /// Date text does not look like `YYYY-MM-DD`.
    InvalidDateFormat(String),
    /// Date text has the right shape but names no calendar day.
    InvalidCalendarDate(String),
}

impl Display for EntryValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ScoreOutOfRange(score) => {
                write!(f, "score {score} is outside the accepted range 1-10")
            }
            Self::InvalidDateFormat(raw) => {
                write!(f, "date `{raw}` is not in YYYY-MM-DD format")
            }
            Self::InvalidCalendarDate(raw) => write!(f, "date `{raw}` is not a calendar day"),
        }
    }
}

impl Error for EntryValidationError {}

/// Returns whether `score` may be persisted.
pub fn is_valid_score(score: f64) -> bool {
    score.is_finite() && (SCORE_MIN..=SCORE_MAX).contains(&score)
}

/// Candidate values passed to a store `save`.
///
/// `None` text fields mean "not provided": a merge keeps the stored value,
/// a create stores an empty string.
#[derive(Debug, Clone, PartialEq)]
pub struct EntryDraft {
    pub date: NaiveDate,
    pub score: f64,
    pub reflection: Option<String>,
    pub intention: Option<String>,
}

impl EntryDraft {
    /// Creates a draft with only the required fields set.
    pub fn new(date: NaiveDate, score: f64) -> Self {
        Self {
            date,
            score,
            reflection: None,
            intention: None,
        }
    }

    pub fn with_reflection(mut self, reflection: impl Into<String>) -> Self {
        self.reflection = Some(reflection.into());
        self
    }

    pub fn with_intention(mut self, intention: impl Into<String>) -> Self {
        self.intention = Some(intention.into());
        self
    }

    /// Validates draft values before any persistence.
    pub fn validate(&self) -> Result<(), EntryValidationError> {
        if !is_valid_score(self.score) {
            return Err(EntryValidationError::ScoreOutOfRange(self.score));
        }
        Ok(())
    }
}

/// One day's happiness record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Entry {
    pub id: EntryId,
    pub date: NaiveDate,
    pub score: f64,
    #[serde(default)]
    pub reflection: String,
    #[serde(default)]
    pub intention: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Entry {
    /// Builds a fresh entry from a validated draft.
    ///
    /// # Invariants
    /// - A new random `id` is assigned.
    /// - `created_at == updated_at == now` (truncated to milliseconds).
    pub fn create(draft: EntryDraft, now: DateTime<Utc>) -> Result<Self, EntryValidationError> {
        draft.validate()?;
        let now = now.trunc_subsecs(3);
        Ok(Self {
            id: Uuid::new_v4(),
            date: draft.date,
            score: draft.score,
            reflection: draft.reflection.unwrap_or_default(),
            intention: draft.intention.unwrap_or_default(),
            created_at: now,
            updated_at: now,
        })
    }

    /// Applies provided draft fields onto this entry and bumps `updated_at`.
    ///
    /// `id`, `date` and `created_at` are left untouched.
    pub fn merge(
        &mut self,
        draft: EntryDraft,
        now: DateTime<Utc>,
    ) -> Result<(), EntryValidationError> {
        draft.validate()?;
        self.score = draft.score;
        if let Some(reflection) = draft.reflection {
            self.reflection = reflection;
        }
        if let Some(intention) = draft.intention {
            self.intention = intention;
        }
        self.updated_at = next_update_timestamp(self.updated_at, now);
        Ok(())
    }

    /// Checks the invariants of a stored entry.
    pub fn validate(&self) -> Result<(), EntryValidationError> {
        if !is_valid_score(self.score) {
            return Err(EntryValidationError::ScoreOutOfRange(self.score));
        }
        Ok(())
    }

    /// ISO `YYYY-MM-DD` rendering of `date`.
    pub fn date_string(&self) -> String {
        format_entry_date(self.date)
    }
}

/// Current time at the precision entries persist.
pub fn now_millis() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(3)
}

/// Renders a timestamp as ISO 8601 with millisecond precision (`...000Z`).
pub fn format_timestamp(value: DateTime<Utc>) -> String {
    value.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Parses a timestamp rendered by [`format_timestamp`] (or any RFC 3339 text).
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .ok()
        .map(|value| value.with_timezone(&Utc))
}

fn next_update_timestamp(previous: DateTime<Utc>, now: DateTime<Utc>) -> DateTime<Utc> {
    let now = now.trunc_subsecs(3);
    if now > previous {
        now
    } else {
        previous + Duration::milliseconds(1)
    }
}

#[cfg(test)]
mod tests {
    use super::{next_update_timestamp, Entry, EntryDraft, EntryValidationError};
    use chrono::{Duration, NaiveDate, TimeZone, Utc};

    fn date(raw: &str) -> NaiveDate {
        NaiveDate::parse_from_str(raw, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn create_defaults_missing_text_to_empty() {
        let now = Utc.with_ymd_and_hms(2024, 1, 1, 8, 0, 0).unwrap();
        let entry = Entry::create(EntryDraft::new(date("2024-01-01"), 6.0), now).unwrap();

        assert!(!entry.id.is_nil());
        assert_eq!(entry.reflection, "");
        assert_eq!(entry.intention, "");
        assert_eq!(entry.created_at, entry.updated_at);
    }

    #[test]
    fn merge_keeps_unprovided_text_fields() {
        let now = Utc.with_ymd_and_hms(2024, 1, 1, 8, 0, 0).unwrap();
        let draft = EntryDraft::new(date("2024-01-01"), 6.0)
            .with_reflection("calm")
            .with_intention("walk");
        let mut entry = Entry::create(draft, now).unwrap();

        entry
            .merge(EntryDraft::new(date("2024-01-01"), 8.5), now)
            .unwrap();

        assert_eq!(entry.score, 8.5);
        assert_eq!(entry.reflection, "calm");
        assert_eq!(entry.intention, "walk");
        assert!(entry.updated_at > entry.created_at);
    }

    #[test]
    fn rejects_out_of_range_and_non_finite_scores() {
        let now = Utc::now();
        for score in [0.0, 10.5, f64::NAN, f64::INFINITY] {
            let err = Entry::create(EntryDraft::new(date("2024-01-01"), score), now).unwrap_err();
            assert!(matches!(err, EntryValidationError::ScoreOutOfRange(_)));
        }
    }

    #[test]
    fn update_timestamp_never_goes_backwards() {
        let previous = Utc.with_ymd_and_hms(2024, 1, 1, 8, 0, 0).unwrap();
        let earlier = previous - Duration::seconds(5);

        assert_eq!(
            next_update_timestamp(previous, earlier),
            previous + Duration::milliseconds(1)
        );
        assert_eq!(
            next_update_timestamp(previous, previous + Duration::seconds(1)),
            previous + Duration::seconds(1)
        );
    }
}
