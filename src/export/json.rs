//! JSON export of a department's journal
//!
//! Wraps the entries with a schema version and a small summary so the file
//! stands on its own.

use std::io::Write;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{JournalError, JournalResult};
use crate::models::{Department, JournalEntry};

/// Current export schema version
pub const EXPORT_SCHEMA_VERSION: &str = "1.0.0";

/// A department's journal as written to disk
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JournalExport {
    pub schema_version: String,

    pub exported_at: DateTime<Utc>,

    /// Application version that created the export
    pub app_version: String,

    pub department: Department,

    /// API the entries were fetched from
    pub source: String,

    pub entries: Vec<JournalEntry>,

    pub metadata: ExportMetadata,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportMetadata {
    pub entry_count: usize,

    pub priority_count: usize,

    /// Earliest and latest raw entry dates, compared as ISO strings
    pub earliest_entry: Option<String>,
    pub latest_entry: Option<String>,
}

impl JournalExport {
    pub fn new(department: Department, source: &str, entries: Vec<JournalEntry>) -> Self {
        let dates = || entries.iter().filter_map(|e| e.date.clone());
        let metadata = ExportMetadata {
            entry_count: entries.len(),
            priority_count: entries.iter().filter(|e| e.is_priority).count(),
            earliest_entry: dates().min(),
            latest_entry: dates().max(),
        };

        Self {
            schema_version: EXPORT_SCHEMA_VERSION.to_string(),
            exported_at: Utc::now(),
            app_version: env!("CARGO_PKG_VERSION").to_string(),
            department,
            source: source.to_string(),
            entries,
            metadata,
        }
    }
}

/// Write the export as JSON
pub fn export_journal_json<W: Write>(
    export: &JournalExport,
    writer: &mut W,
    pretty: bool,
) -> JournalResult<()> {
    if pretty {
        serde_json::to_writer_pretty(writer, export)
    } else {
        serde_json::to_writer(writer, export)
    }
    .map_err(|e| JournalError::Export(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::JournalEntryId;

    fn entry(id: u64, date: &str, priority: bool) -> JournalEntry {
        JournalEntry {
            id: JournalEntryId::new(id),
            date: Some(date.into()),
            department: Department::Sales,
            is_priority: priority,
            client: None,
            phone: None,
            vehicle: None,
            service: None,
            comment: None,
        }
    }

    #[test]
    fn test_metadata() {
        let export = JournalExport::new(
            Department::Sales,
            "http://crm.local/api/",
            vec![
                entry(1, "2025-03-14T09:30:00", false),
                entry(2, "2025-01-02T10:00:00", true),
            ],
        );
        assert_eq!(export.metadata.entry_count, 2);
        assert_eq!(export.metadata.priority_count, 1);
        assert_eq!(
            export.metadata.earliest_entry.as_deref(),
            Some("2025-01-02T10:00:00")
        );
        assert_eq!(
            export.metadata.latest_entry.as_deref(),
            Some("2025-03-14T09:30:00")
        );
    }

    #[test]
    fn test_json_export() {
        let export = JournalExport::new(
            Department::Sales,
            "http://crm.local/api/",
            vec![entry(1, "2025-03-14T09:30:00", false)],
        );
        let mut buffer = Vec::new();
        export_journal_json(&export, &mut buffer, true).unwrap();

        let value: serde_json::Value = serde_json::from_slice(&buffer).unwrap();
        assert_eq!(value["schema_version"], EXPORT_SCHEMA_VERSION);
        assert_eq!(value["department"], "sales");
        assert_eq!(value["entries"][0]["id"], 1);
    }
}
