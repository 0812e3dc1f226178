//! YAML export of a department's journal

use std::io::Write;

use crate::error::{JournalError, JournalResult};
use crate::export::json::JournalExport;

/// Write the export as YAML with a short header comment
pub fn export_journal_yaml<W: Write>(export: &JournalExport, writer: &mut W) -> JournalResult<()> {
    let header = format!(
        "# journal-desk {} journal export\n# Generated: {}\n# Source: {}\n\n",
        export.department, export.exported_at, export.source
    );
    writer
        .write_all(header.as_bytes())
        .map_err(|e| JournalError::Export(e.to_string()))?;

    serde_yaml::to_writer(writer, export).map_err(|e| JournalError::Export(e.to_string()))
}
