//! Terminal User Interface module
//!
//! This module provides the interactive journal using ratatui: department
//! tabs over the entry list, a new-entry dialog with search-as-you-type for
//! clients and vehicles, and a comment dialog.

pub mod app;
pub mod event;
pub mod handler;
pub mod remote;
pub mod terminal;

// Views
pub mod views;

// Widgets
pub mod widgets;

// Dialogs
pub mod dialogs;

// Layout
pub mod layout;

pub use app::App;
pub use terminal::run_tui;
