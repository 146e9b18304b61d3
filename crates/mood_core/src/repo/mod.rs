//! Record store abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define the entry store contract consumed by services and the codec.
//! - Isolate SQLite query details from service orchestration.
//!
//! # Invariants
//! - Store writes must validate drafts before persistence.
//! - Lookup misses are `Ok(None)`, never errors.

pub mod entry_repo;
pub mod memory_repo;
