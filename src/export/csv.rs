//! CSV export of a department's journal
//!
//! One row per entry. Vehicle and service columns are always present so the
//! file layout does not depend on the department; sales rows leave them blank.

use std::io::Write;

use crate::error::{JournalError, JournalResult};
use crate::models::JournalEntry;

const HEADER: [&str; 11] = [
    "id",
    "date",
    "department",
    "priority",
    "client_id",
    "client",
    "phone",
    "plate_number",
    "vehicle",
    "service",
    "comment",
];

fn csv_error(err: csv::Error) -> JournalError {
    JournalError::Export(err.to_string())
}

/// Write entries as CSV, returning the number of rows written
pub fn export_journal_csv<W: Write>(entries: &[JournalEntry], writer: W) -> JournalResult<usize> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer.write_record(HEADER).map_err(csv_error)?;

    for entry in entries {
        let client_id = entry
            .client
            .as_ref()
            .map(|c| c.id.get().to_string())
            .unwrap_or_default();
        let client_name = entry.client.as_ref().map(|c| c.name.as_str()).unwrap_or("");
        let plate = entry
            .vehicle
            .as_ref()
            .map(|v| v.plate_number.as_str())
            .unwrap_or("");
        let vehicle = entry
            .vehicle
            .as_ref()
            .map(|v| format!("{} {}", v.brand, v.model))
            .unwrap_or_default();
        let service = entry.service.as_ref().map(|s| s.name.as_str()).unwrap_or("");

        csv_writer
            .write_record([
                entry.id.get().to_string().as_str(),
                entry.date.as_deref().unwrap_or(""),
                entry.department.as_str(),
                if entry.is_priority { "true" } else { "false" },
                client_id.as_str(),
                client_name,
                entry.display_phone().unwrap_or(""),
                plate,
                vehicle.as_str(),
                service,
                entry.comment.as_deref().unwrap_or(""),
            ])
            .map_err(csv_error)?;
    }

    csv_writer
        .flush()
        .map_err(|e| JournalError::Export(e.to_string()))?;
    Ok(entries.len())
}
