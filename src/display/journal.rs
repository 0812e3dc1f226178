//! Journal display formatting
//!
//! Formats journal entries for terminal output. Sales rows have no vehicle or
//! service columns.

use chrono::{DateTime, Local, NaiveDateTime};

use crate::models::{Department, JournalEntry};

/// Longest comment shown in a table row
const COMMENT_WIDTH: usize = 40;

/// Format a backend timestamp for display
///
/// RFC 3339 values are shown in local time; naive values as-is; anything
/// unparseable is echoed back. A missing date renders as `-`.
pub fn format_timestamp(raw: Option<&str>, format: &str) -> String {
    let Some(raw) = raw.map(str::trim).filter(|r| !r.is_empty()) else {
        return "-".to_string();
    };
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return parsed.with_timezone(&Local).format(format).to_string();
    }
    if let Ok(parsed) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return parsed.format(format).to_string();
    }
    raw.to_string()
}

/// First line of a comment, truncated to `max` characters
pub fn comment_preview(comment: Option<&str>, max: usize) -> String {
    let first_line = comment
        .and_then(|c| c.lines().find(|l| !l.trim().is_empty()))
        .unwrap_or("")
        .trim();
    truncate(first_line, max)
}

/// Truncate to `max` characters, marking the cut with `...`
pub fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else if max <= 3 {
        ".".repeat(max)
    } else {
        let kept: String = s.chars().take(max - 3).collect();
        format!("{}...", kept)
    }
}

fn width<'a>(header: &str, values: impl Iterator<Item = &'a str>) -> usize {
    values
        .map(|v| v.chars().count())
        .max()
        .unwrap_or(0)
        .max(header.chars().count())
}

struct Row {
    id: String,
    date: String,
    client: String,
    phone: String,
    vehicle: String,
    service: String,
    comment: String,
    priority: bool,
}

impl Row {
    fn from_entry(entry: &JournalEntry, date_format: &str) -> Self {
        Self {
            id: entry.id.to_string(),
            date: format_timestamp(entry.date.as_deref(), date_format),
            client: entry
                .client
                .as_ref()
                .map(|c| c.name.clone())
                .unwrap_or_default(),
            phone: entry.display_phone().unwrap_or("").to_string(),
            vehicle: entry
                .vehicle
                .as_ref()
                .map(|v| format!("{} {} {}", v.plate_number, v.brand, v.model))
                .unwrap_or_default(),
            service: entry
                .service
                .as_ref()
                .map(|s| s.name.clone())
                .unwrap_or_default(),
            comment: comment_preview(entry.comment.as_deref(), COMMENT_WIDTH),
            priority: entry.is_priority,
        }
    }
}

/// Format a department's journal as a table
pub fn format_journal_table(
    department: Department,
    entries: &[JournalEntry],
    date_format: &str,
) -> String {
    if entries.is_empty() {
        return format!("No {} journal entries found.\n", department);
    }

    let rows: Vec<Row> = entries
        .iter()
        .map(|e| Row::from_entry(e, date_format))
        .collect();

    let id_w = width("ID", rows.iter().map(|r| r.id.as_str()));
    let date_w = width("Date", rows.iter().map(|r| r.date.as_str()));
    let client_w = width("Client", rows.iter().map(|r| r.client.as_str()));
    let phone_w = width("Phone", rows.iter().map(|r| r.phone.as_str()));
    let vehicle_w = width("Vehicle", rows.iter().map(|r| r.vehicle.as_str()));
    let service_w = width("Service", rows.iter().map(|r| r.service.as_str()));
    let with_vehicle = department.requires_vehicle();

    let mut output = String::new();
    output.push_str(&format!(
        "  {:<id_w$}  {:<date_w$}  {:<client_w$}  {:<phone_w$}  ",
        "ID", "Date", "Client", "Phone",
    ));
    if with_vehicle {
        output.push_str(&format!(
            "{:<vehicle_w$}  {:<service_w$}  ",
            "Vehicle", "Service"
        ));
    }
    output.push_str("Comment\n");

    let mut rule = id_w + date_w + client_w + phone_w + 2 + 8 + COMMENT_WIDTH;
    if with_vehicle {
        rule += vehicle_w + service_w + 4;
    }
    output.push_str(&"-".repeat(rule));
    output.push('\n');

    for row in &rows {
        let marker = if row.priority { "!" } else { " " };
        output.push_str(&format!(
            "{} {:<id_w$}  {:<date_w$}  {:<client_w$}  {:<phone_w$}  ",
            marker, row.id, row.date, row.client, row.phone,
        ));
        if with_vehicle {
            output.push_str(&format!(
                "{:<vehicle_w$}  {:<service_w$}  ",
                row.vehicle, row.service
            ));
        }
        output.push_str(row.comment.trim_end());
        output.push('\n');
    }

    output.push_str(&format!("\n{} entries", rows.len()));
    let priority = rows.iter().filter(|r| r.priority).count();
    if priority > 0 {
        output.push_str(&format!(", {} priority (!)", priority));
    }
    output.push('\n');
    output
}

/// Format one entry in full, comment included
pub fn format_entry_details(entry: &JournalEntry, date_format: &str) -> String {
    let mut output = String::new();

    output.push_str(&format!("Journal entry: {}\n", entry.id));
    output.push_str(&format!("  Department: {}\n", entry.department.title()));
    output.push_str(&format!(
        "  Date:       {}\n",
        format_timestamp(entry.date.as_deref(), date_format)
    ));
    if let Some(client) = &entry.client {
        output.push_str(&format!("  Client:     {} ({})\n", client.name, client.id));
    }
    if let Some(phone) = entry.display_phone() {
        output.push_str(&format!("  Phone:      {}\n", phone));
    }
    if let Some(vehicle) = &entry.vehicle {
        output.push_str(&format!("  Vehicle:    {} ({})\n", vehicle, vehicle.id));
    }
    if let Some(service) = &entry.service {
        output.push_str(&format!("  Service:    {}\n", service.name));
    }
    if entry.is_priority {
        output.push_str("  Priority:   yes\n");
    }

    if let Some(comment) = entry.comment.as_deref().filter(|c| !c.trim().is_empty()) {
        output.push_str("\n  Comment:\n");
        for line in comment.lines() {
            output.push_str(&format!("    {}\n", line));
        }
    }

    output
}
