//! Journal use-case service.
//!
//! # Responsibility
//! - Provide the use-case entry points consumed by presentation layers.
//! - Delegate persistence to an injected `EntryRepository`.
//! - Emit metadata-only log events for mutations.
//!
//! # Invariants
//! - Service APIs never bypass store validation or the per-date merge rule.
//! - Free-text fields never reach the log.

use crate::codec::{export_csv, import_csv, ImportReport};
use crate::model::entry::{Entry, EntryDraft, EntryId};
use crate::projection::chart::{chart_points, ChartPoint};
use crate::projection::recent::{recent_entries, RecentEntry};
use crate::repo::entry_repo::{EntryRepository, RepoResult};
use chrono::NaiveDate;
use log::{info, warn};
use std::time::Instant;

/// Use-case facade over one entry store.
pub struct JournalService<R: EntryRepository> {
    repo: R,
}

impl<R: EntryRepository> JournalService<R> {
    /// Creates a service using the provided store implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Borrows the underlying store.
    pub fn repository(&self) -> &R {
        &self.repo
    }

    /// Creates or updates the entry for `draft.date`.
    ///
    /// # Contract
    /// - Returns the stored entry after the write.
    /// - Re-saving a date keeps its `id` and `created_at`.
    pub fn save_entry(&self, draft: EntryDraft) -> RepoResult<Entry> {
        match self.repo.save(draft) {
            Ok(entry) => {
                let mode = if entry.created_at == entry.updated_at {
                    "create"
                } else {
                    "update"
                };
                info!(
                    "event=entry_save module=service status=ok mode={} entry_id={}",
                    mode, entry.id
                );
                Ok(entry)
            }
            Err(err) => {
                warn!(
                    "event=entry_save module=service status=error error={}",
                    err
                );
                Err(err)
            }
        }
    }

    /// Hard-deletes one entry; `Ok(false)` when the id is unknown.
    pub fn delete_entry(&self, id: EntryId) -> RepoResult<bool> {
        let removed = self.repo.delete_by_id(id)?;
        info!(
            "event=entry_delete module=service status=ok entry_id={} removed={}",
            id, removed
        );
        Ok(removed)
    }

    pub fn get_entry(&self, id: EntryId) -> RepoResult<Option<Entry>> {
        self.repo.get_by_id(id)
    }

    /// Gets the entry recorded for one day, if any.
    pub fn entry_for_date(&self, date: NaiveDate) -> RepoResult<Option<Entry>> {
        self.repo.get_by_date(date)
    }

    /// All entries, most recent date first.
    pub fn list_entries(&self) -> RepoResult<Vec<Entry>> {
        self.repo.list_all()
    }

    /// Imports CSV text; failures are reported inside the returned report.
    pub fn import_csv(&self, csv_text: &str) -> ImportReport {
        let started_at = Instant::now();
        let report = import_csv(&self.repo, csv_text);
        info!(
            "event=journal_import module=service status=ok imported={} errors={} duration_ms={}",
            report.success_count,
            report.errors.len(),
            started_at.elapsed().as_millis()
        );
        report
    }

    /// Exports every stored entry as CSV text, in `list_all` order.
    pub fn export_csv(&self) -> RepoResult<String> {
        let entries = self.repo.list_all()?;
        info!(
            "event=journal_export module=service status=ok entries={}",
            entries.len()
        );
        Ok(export_csv(&entries))
    }

    /// Latest chart points in chronological order.
    pub fn chart_points(&self) -> RepoResult<Vec<ChartPoint>> {
        Ok(chart_points(&self.repo.list_all()?))
    }

    /// Most recent `limit` entries labeled relative to `today`.
    pub fn recent_entries(&self, limit: usize, today: NaiveDate) -> RepoResult<Vec<RecentEntry>> {
        Ok(recent_entries(&self.repo.list_all()?, limit, today))
    }
}
