//! TUI Views module
//!
//! The journal list with its department tabs, and the status bar.

pub mod journal_list;
pub mod status_bar;

use ratatui::Frame;

use super::app::{ActiveDialog, App};
use super::dialogs;
use super::layout::AppLayout;

/// Render the entire application
pub fn render(frame: &mut Frame, app: &mut App) {
    let layout = AppLayout::new(frame.area());

    journal_list::render_tabs(frame, app, layout.header);
    journal_list::render(frame, app, layout.main);
    status_bar::render(frame, app, layout.status_bar);

    if app.has_dialog() {
        render_dialog(frame, app);
    }
}

/// Render active dialog
fn render_dialog(frame: &mut Frame, app: &mut App) {
    match app.active_dialog {
        ActiveDialog::Help => dialogs::help::render(frame, app),
        ActiveDialog::NewEntry => dialogs::journal_entry::render(frame, app),
        ActiveDialog::AppendComment(_) => dialogs::comment::render(frame, app),
        ActiveDialog::None => {}
    }
}
