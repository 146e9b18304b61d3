//! Domain model for the mood journal.
//!
//! # Responsibility
//! - Define the daily entry record, its draft and validation rules.
//! - Provide calendar-day and happiness-scale vocabulary shared by
//!   projections and presentation layers.
//!
//! # Invariants
//! - Every entry is identified by a stable `EntryId`.
//! - Deletion is a hard delete; there are no tombstones.

pub mod day;
pub mod entry;
pub mod scale;
