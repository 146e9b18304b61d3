//! In-memory entry store.
//!
//! Same contract as the SQLite store, kept for tests and for hosts that do
//! not need durability. Contents live as long as the repository value.

use crate::model::entry::{now_millis, Entry, EntryDraft, EntryId};
use crate::repo::entry_repo::{EntryRepository, RepoResult};
use chrono::NaiveDate;
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

/// Map-backed entry store keyed by entry id.
#[derive(Debug, Default)]
pub struct MemoryEntryRepository {
    entries: Mutex<HashMap<EntryId, Entry>>,
}

impl MemoryEntryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored entries.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<EntryId, Entry>> {
        // Mutations are single insert/remove calls; a poisoned map is still consistent.
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl EntryRepository for MemoryEntryRepository {
    fn get_by_id(&self, id: EntryId) -> RepoResult<Option<Entry>> {
        Ok(self.lock().get(&id).cloned())
    }

    fn get_by_date(&self, date: NaiveDate) -> RepoResult<Option<Entry>> {
        Ok(self
            .lock()
            .values()
            .find(|entry| entry.date == date)
            .cloned())
    }

    fn list_all(&self) -> RepoResult<Vec<Entry>> {
        let mut entries = self.lock().values().cloned().collect::<Vec<_>>();
        entries.sort_by(|a, b| b.date.cmp(&a.date).then_with(|| a.id.cmp(&b.id)));
        Ok(entries)
    }

    fn save(&self, draft: EntryDraft) -> RepoResult<Entry> {
        draft.validate()?;

        let mut entries = self.lock();
        if let Some(entry) = entries.values_mut().find(|entry| entry.date == draft.date) {
            entry.merge(draft, now_millis())?;
            return Ok(entry.clone());
        }

        let entry = Entry::create(draft, now_millis())?;
        entries.insert(entry.id, entry.clone());
        Ok(entry)
    }

    fn delete_by_id(&self, id: EntryId) -> RepoResult<bool> {
        Ok(self.lock().remove(&id).is_some())
    }
}
