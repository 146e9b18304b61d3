//! Read-only views derived from the entry store.
//!
//! Projections hold no state; each call recomputes from a `list_all`
//! snapshot (most recent date first).

pub mod chart;
pub mod recent;
