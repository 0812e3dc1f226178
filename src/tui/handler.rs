//! Event handler for the TUI
//!
//! Routes keyboard events to the appropriate handlers based on the current
//! application state, and finished requests to [`App::apply_remote`].

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use super::app::{ActiveDialog, App};
use super::dialogs;
use super::event::Event;
use super::remote::Request;
use crate::models::Department;

/// Handle an incoming event
pub fn handle_event(app: &mut App, event: Event) -> Result<()> {
    match event {
        Event::Key(key) if key.kind == KeyEventKind::Press => handle_key_event(app, key),
        Event::Key(_) => Ok(()),
        Event::Remote(remote) => {
            app.apply_remote(remote);
            Ok(())
        }
        Event::Mouse(_) | Event::Tick | Event::Resize(_, _) => Ok(()),
    }
}

/// Handle a key event
fn handle_key_event(app: &mut App, key: KeyEvent) -> Result<()> {
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        app.quit();
        return Ok(());
    }

    if app.has_dialog() {
        return handle_dialog_key(app, key);
    }
    handle_normal_key(app, key)
}

/// Handle keys on the journal list
fn handle_normal_key(app: &mut App, key: KeyEvent) -> Result<()> {
    match key.code {
        KeyCode::Char('q') | KeyCode::Char('Q') => app.quit(),
        KeyCode::Char('?') => app.open_help(),

        KeyCode::Tab | KeyCode::BackTab => app.switch_department(app.department.toggle()),
        KeyCode::Char('1') => app.switch_department(Department::Sales),
        KeyCode::Char('2') => app.switch_department(Department::Service),
        KeyCode::Char('r') => {
            app.clear_status();
            app.refresh();
        }

        KeyCode::Char('j') | KeyCode::Down => app.move_down(),
        KeyCode::Char('k') | KeyCode::Up => app.move_up(),
        KeyCode::Char('g') | KeyCode::Home => app.selected_index = 0,
        KeyCode::Char('G') | KeyCode::End => {
            app.selected_index = app.entries().len().saturating_sub(1);
        }

        KeyCode::Char('n') | KeyCode::Char('a') => app.open_new_entry(),
        KeyCode::Char('c') | KeyCode::Enter => app.open_comment(),
        KeyCode::Char('p') => {
            let Some(id) = app.selected_entry().map(|e| e.id) else {
                app.set_status("No entry selected");
                return Ok(());
            };
            app.request(Request::TogglePriority(id));
            app.set_status(format!("Updating {}...", id));
        }

        KeyCode::Esc => app.clear_status(),
        _ => {}
    }
    Ok(())
}

/// Handle keys when a dialog is open
fn handle_dialog_key(app: &mut App, key: KeyEvent) -> Result<()> {
    match app.active_dialog {
        ActiveDialog::Help => {
            // Close help on any key
            app.close_dialog();
        }
        ActiveDialog::NewEntry => {
            dialogs::journal_entry::handle_key(app, key);
        }
        ActiveDialog::AppendComment(_) => {
            dialogs::comment::handle_key(app, key);
        }
        ActiveDialog::None => {}
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Settings;
    use crate::models::{JournalEntry, JournalEntryId};
    use crate::tui::app::JournalView;
    use crate::tui::remote::RemoteEvent;

    fn press(app: &mut App, code: KeyCode) {
        handle_event(app, Event::Key(KeyEvent::new(code, KeyModifiers::NONE))).unwrap();
    }

    fn app_with_entry() -> App {
        let mut app = App::new(Settings::default());
        app.take_requests();
        app.apply_remote(RemoteEvent::JournalLoaded {
            department: Department::Sales,
            result: Ok(vec![JournalEntry {
                id: JournalEntryId::new(4),
                date: None,
                department: Department::Sales,
                is_priority: false,
                client: None,
                phone: None,
                vehicle: None,
                service: None,
                comment: None,
            }]),
        });
        app
    }

    #[test]
    fn test_tab_switches_department() {
        let mut app = app_with_entry();
        press(&mut app, KeyCode::Tab);
        assert_eq!(app.department, Department::Service);
        assert_eq!(app.journal, JournalView::Loading);
        assert_eq!(
            app.take_requests(),
            vec![Request::LoadJournal(Department::Service)]
        );
    }

    #[test]
    fn test_priority_key_queues_toggle() {
        let mut app = app_with_entry();
        press(&mut app, KeyCode::Char('p'));
        assert_eq!(
            app.take_requests(),
            vec![Request::TogglePriority(JournalEntryId::new(4))]
        );
    }

    #[test]
    fn test_typing_in_dialog_does_not_quit() {
        let mut app = app_with_entry();
        press(&mut app, KeyCode::Char('n'));
        assert_eq!(app.active_dialog, ActiveDialog::NewEntry);

        press(&mut app, KeyCode::Char('q'));
        assert!(!app.should_quit);
        assert_eq!(app.entry_form.as_ref().unwrap().client_input.value(), "q");

        press(&mut app, KeyCode::Esc);
        assert_eq!(app.active_dialog, ActiveDialog::None);
        assert!(app.entry_form.is_none());
    }

    #[test]
    fn test_comment_flow_queues_append() {
        let mut app = app_with_entry();
        press(&mut app, KeyCode::Char('c'));
        for c in "ok".chars() {
            press(&mut app, KeyCode::Char(c));
        }
        press(&mut app, KeyCode::Enter);

        assert_eq!(app.active_dialog, ActiveDialog::None);
        assert_eq!(
            app.take_requests(),
            vec![Request::AppendComment {
                id: JournalEntryId::new(4),
                text: "ok".into(),
            }]
        );
    }

    #[test]
    fn test_submit_from_dialog_queues_request() {
        let mut app = app_with_entry();
        press(&mut app, KeyCode::Char('n'));
        for c in "Ivan".chars() {
            press(&mut app, KeyCode::Char(c));
        }
        app.take_requests();

        // No suggestions showing, so Enter submits
        press(&mut app, KeyCode::Enter);

        let requests = app.take_requests();
        assert_eq!(requests.len(), 1);
        assert!(matches!(requests[0], Request::Submit { .. }));
        assert!(app.entry_form.as_ref().unwrap().gate.is_submitting());
    }
}
