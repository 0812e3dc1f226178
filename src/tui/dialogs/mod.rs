//! Dialog modules for the TUI
//!
//! Contains modal dialogs for various operations

pub mod comment;
pub mod help;
pub mod journal_entry;
