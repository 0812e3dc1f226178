//! Export module for journal-desk
//!
//! Writes a department's journal to disk:
//! - CSV: one row per entry, spreadsheet friendly
//! - JSON: entries plus schema version and summary
//! - YAML: same document as JSON, human readable

pub mod csv;
pub mod json;
pub mod yaml;

pub use self::csv::export_journal_csv;
pub use json::{export_journal_json, ExportMetadata, JournalExport, EXPORT_SCHEMA_VERSION};
pub use yaml::export_journal_yaml;
