//! Display formatting for terminal output
//!
//! Plain-text tables for the CLI. The TUI renders the same data with ratatui
//! widgets but reuses the timestamp and comment helpers from here.

pub mod directory;
pub mod journal;

pub use directory::{format_client_list, format_service_list, format_vehicle_list};
pub use journal::{
    comment_preview, format_entry_details, format_journal_table, format_timestamp, truncate,
};
