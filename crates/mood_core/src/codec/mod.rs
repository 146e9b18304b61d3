//! CSV import/export between the entry store and delimited text.
//!
//! # Responsibility
//! - Import: validate rows, save good ones, report bad ones in order.
//! - Export: render stored entries as quoted CSV.
//!
//! # Compatibility
//! The import side splits on bare commas and drops quote characters, which
//! is what files produced by earlier exports rely on. Exported reflections
//! containing commas therefore do not re-import intact.

pub mod export;
pub mod import;

pub use export::{export_csv, export_file_name, EXPORT_HEADER};
pub use import::{ensure_csv_file_name, import_csv, ImportReport};
