//! CLI command handlers
//!
//! This module contains the implementation of CLI commands, bridging the clap
//! argument parsing with the service layer. Handlers are async and generic
//! over the directory; the binary drives them with `block_on`.

pub mod client;
pub mod entries;
pub mod export;
pub mod service;
pub mod vehicle;

pub use client::{handle_client_command, ClientCommands};
pub use entries::{handle_entry_command, AddEntryArgs, EntryCommands};
pub use export::{handle_export_command, ExportArgs, ExportFormat};
pub use service::{handle_service_command, ServiceCommands};
pub use vehicle::{handle_vehicle_command, VehicleCommands};

use crate::config::Settings;
use crate::error::{JournalError, JournalResult};

/// Refuse search text shorter than the configured minimum
pub(crate) fn ensure_searchable(settings: &Settings, query: &str) -> JournalResult<()> {
    if query.trim().chars().count() < settings.min_query_len {
        return Err(JournalError::Validation(format!(
            "Search text must be at least {} characters",
            settings.min_query_len
        )));
    }
    Ok(())
}
