//! Entry store contract and SQLite implementation.
//!
//! # Responsibility
//! - Define the five-operation record store contract shared by all backings.
//! - Keep SQL details inside the core persistence boundary.
//!
//! # Invariants
//! - Write paths validate drafts before SQL mutations.
//! - At most one row per `date`; a second save for a date merges into it.
//! - Read paths reject invalid persisted state instead of masking it.

use crate::db::DbError;
use crate::model::day::{format_entry_date, parse_entry_date};
use crate::model::entry::{
    format_timestamp, now_millis, parse_timestamp, Entry, EntryDraft, EntryId,
    EntryValidationError,
};
use chrono::NaiveDate;
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

const ENTRY_SELECT_SQL: &str = "SELECT
    id,
    date,
    score,
    reflection,
    intention,
    created_at,
    updated_at
FROM entries";

pub type RepoResult<T> = Result<T, RepoError>;

/// Store error for entry persistence and query operations.
#[derive(Debug)]
pub enum RepoError {
    Validation(EntryValidationError),
    Db(DbError),
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::InvalidData(message) => write!(f, "invalid persisted entry data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Db(err) => Some(err),
            Self::InvalidData(_) => None,
        }
    }
}

impl From<EntryValidationError> for RepoError {
    fn from(value: EntryValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Record store contract for journal entries.
///
/// Any backing must honor the one-entry-per-date merge rule in `save`.
pub trait EntryRepository {
    /// Gets one entry by id; `None` when absent.
    fn get_by_id(&self, id: EntryId) -> RepoResult<Option<Entry>>;
    /// Gets the entry recorded for `date`; `None` when absent.
    fn get_by_date(&self, date: NaiveDate) -> RepoResult<Option<Entry>>;
    /// Lists all entries, most recent date first.
    fn list_all(&self) -> RepoResult<Vec<Entry>>;
    /// Creates the entry for `draft.date`, or merges into the existing one.
    fn save(&self, draft: EntryDraft) -> RepoResult<Entry>;
    /// Removes an entry; returns whether a removal happened.
    fn delete_by_id(&self, id: EntryId) -> RepoResult<bool>;
}

impl<R: EntryRepository + ?Sized> EntryRepository for &R {
    fn get_by_id(&self, id: EntryId) -> RepoResult<Option<Entry>> {
        (**self).get_by_id(id)
    }

    fn get_by_date(&self, date: NaiveDate) -> RepoResult<Option<Entry>> {
        (**self).get_by_date(date)
    }

    fn list_all(&self) -> RepoResult<Vec<Entry>> {
        (**self).list_all()
    }

    fn save(&self, draft: EntryDraft) -> RepoResult<Entry> {
        (**self).save(draft)
    }

    fn delete_by_id(&self, id: EntryId) -> RepoResult<bool> {
        (**self).delete_by_id(id)
    }
}

/// SQLite-backed entry store.
pub struct SqliteEntryRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteEntryRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }

    fn find_one(&self, where_sql: &str, key: String) -> RepoResult<Option<Entry>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{ENTRY_SELECT_SQL} WHERE {where_sql};"))?;
        let mut rows = stmt.query([key])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_entry_row(row)?));
        }
        Ok(None)
    }
}

impl EntryRepository for SqliteEntryRepository<'_> {
    fn get_by_id(&self, id: EntryId) -> RepoResult<Option<Entry>> {
        self.find_one("id = ?1", id.to_string())
    }

    fn get_by_date(&self, date: NaiveDate) -> RepoResult<Option<Entry>> {
        self.find_one("date = ?1", format_entry_date(date))
    }

    fn list_all(&self) -> RepoResult<Vec<Entry>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{ENTRY_SELECT_SQL} ORDER BY date DESC, id ASC;"))?;
        let mut rows = stmt.query([])?;
        let mut entries = Vec::new();

        while let Some(row) = rows.next()? {
            entries.push(parse_entry_row(row)?);
        }

        Ok(entries)
    }

    fn save(&self, draft: EntryDraft) -> RepoResult<Entry> {
        draft.validate()?;

        let tx = self.conn.unchecked_transaction()?;
        let existing = tx
            .query_row(
                &format!("{ENTRY_SELECT_SQL} WHERE date = ?1;"),
                [format_entry_date(draft.date)],
                |row| Ok(parse_entry_row(row)),
            )
            .optional()?
            .transpose()?;

        let entry = match existing {
            Some(mut entry) => {
                entry.merge(draft, now_millis())?;
                tx.execute(
                    "UPDATE entries
                     SET
                        score = ?1,
                        reflection = ?2,
                        intention = ?3,
                        updated_at = ?4
                     WHERE id = ?5;",
                    params![
                        entry.score,
                        entry.reflection.as_str(),
                        entry.intention.as_str(),
                        format_timestamp(entry.updated_at),
                        entry.id.to_string(),
                    ],
                )?;
                entry
            }
            None => {
                let entry = Entry::create(draft, now_millis())?;
                tx.execute(
                    "INSERT INTO entries (
                        id,
                        date,
                        score,
                        reflection,
                        intention,
                        created_at,
                        updated_at
                    ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7);",
                    params![
                        entry.id.to_string(),
                        format_entry_date(entry.date),
                        entry.score,
                        entry.reflection.as_str(),
                        entry.intention.as_str(),
                        format_timestamp(entry.created_at),
                        format_timestamp(entry.updated_at),
                    ],
                )?;
                entry
            }
        };
        tx.commit()?;

        Ok(entry)
    }

    fn delete_by_id(&self, id: EntryId) -> RepoResult<bool> {
        let changed = self
            .conn
            .execute("DELETE FROM entries WHERE id = ?1;", [id.to_string()])?;
        Ok(changed > 0)
    }
}

fn parse_entry_row(row: &Row<'_>) -> RepoResult<Entry> {
    let id_text: String = row.get("id")?;
    let id = Uuid::parse_str(&id_text).map_err(|_| {
        RepoError::InvalidData(format!("invalid id value `{id_text}` in entries.id"))
    })?;

    let date_text: String = row.get("date")?;
    let date = parse_entry_date(&date_text).map_err(|_| {
        RepoError::InvalidData(format!("invalid date value `{date_text}` in entries.date"))
    })?;

    let entry = Entry {
        id,
        date,
        score: row.get("score")?,
        reflection: row.get("reflection")?,
        intention: row.get("intention")?,
        created_at: parse_timestamp_column(row, "created_at")?,
        updated_at: parse_timestamp_column(row, "updated_at")?,
    };
    entry.validate()?;
    Ok(entry)
}

fn parse_timestamp_column(
    row: &Row<'_>,
    column: &'static str,
) -> RepoResult<chrono::DateTime<chrono::Utc>> {
    let raw: String = row.get(column)?;
    parse_timestamp(&raw).ok_or_else(|| {
        RepoError::InvalidData(format!("invalid timestamp `{raw}` in entries.{column}"))
    })
}
