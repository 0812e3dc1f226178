//! Application state for the TUI
//!
//! The App struct holds all state needed for rendering and handling events.
//! It never talks to the network itself: handlers queue [`Request`]s and the
//! run loop feeds outcomes back through [`App::apply_remote`].

use crate::config::settings::Settings;
use crate::models::{Department, JournalEntry, JournalEntryId, Service};

use super::dialogs::comment::CommentFormState;
use super::dialogs::journal_entry::JournalEntryFormState;
use super::remote::{RemoteEvent, Request};

/// What the journal list currently shows
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JournalView {
    Loading,
    Loaded(Vec<JournalEntry>),
    /// Read failure, rendered in place of the list
    Failed(String),
}

/// Currently active dialog (if any)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ActiveDialog {
    #[default]
    None,
    NewEntry,
    AppendComment(JournalEntryId),
    Help,
}

/// Main application state
pub struct App {
    /// Application settings
    pub settings: Settings,

    /// Whether the app should quit
    pub should_quit: bool,

    /// Tab being shown
    pub department: Department,

    pub journal: JournalView,

    /// Selected row in the journal list
    pub selected_index: usize,

    /// Currently active dialog
    pub active_dialog: ActiveDialog,

    /// New entry dialog, present while it is open
    pub entry_form: Option<JournalEntryFormState>,

    /// Comment dialog, present while it is open
    pub comment_form: Option<CommentFormState>,

    /// Last service catalogue received
    pub services: Vec<Service>,

    /// Status message to display
    pub status_message: Option<String>,

    /// Session number handed to the next dialog
    next_session: u64,

    /// Work queued for the dispatcher
    requests: Vec<Request>,
}

impl App {
    /// Create the app and queue the initial list load
    pub fn new(settings: Settings) -> Self {
        let department = settings.default_department;
        let mut app = Self {
            settings,
            should_quit: false,
            department,
            journal: JournalView::Loading,
            selected_index: 0,
            active_dialog: ActiveDialog::default(),
            entry_form: None,
            comment_form: None,
            services: Vec::new(),
            status_message: None,
            next_session: 0,
            requests: Vec::new(),
        };
        app.request(Request::LoadJournal(department));
        app
    }

    /// Request to quit the application
    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    /// Set a status message
    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status_message = Some(message.into());
    }

    /// Clear the status message
    pub fn clear_status(&mut self) {
        self.status_message = None;
    }

    /// Queue work for the dispatcher
    pub fn request(&mut self, request: Request) {
        self.requests.push(request);
    }

    /// Drain queued work
    pub fn take_requests(&mut self) -> Vec<Request> {
        std::mem::take(&mut self.requests)
    }

    /// Entries of the current tab, empty while loading or failed
    pub fn entries(&self) -> &[JournalEntry] {
        match &self.journal {
            JournalView::Loaded(entries) => entries,
            _ => &[],
        }
    }

    pub fn selected_entry(&self) -> Option<&JournalEntry> {
        self.entries().get(self.selected_index)
    }

    /// Show another tab and load its list
    pub fn switch_department(&mut self, department: Department) {
        if department == self.department {
            return;
        }
        self.department = department;
        self.selected_index = 0;
        self.refresh();
    }

    /// Reload the current tab
    pub fn refresh(&mut self) {
        self.journal = JournalView::Loading;
        self.request(Request::LoadJournal(self.department));
    }

    fn new_session(&mut self) -> u64 {
        self.next_session += 1;
        self.next_session
    }

    /// Open the new entry dialog for the current tab
    pub fn open_new_entry(&mut self) {
        let session = self.new_session();
        let form = JournalEntryFormState::new(session, self.department, &self.settings, &self.services);
        self.entry_form = Some(form);
        self.active_dialog = ActiveDialog::NewEntry;
        if self.department.requires_vehicle() {
            self.request(Request::LoadServices);
        }
    }

    /// Open the comment dialog for the selected entry
    pub fn open_comment(&mut self) {
        let Some(entry) = self.selected_entry() else {
            self.set_status("No entry selected");
            return;
        };
        let form = CommentFormState::new(entry);
        self.active_dialog = ActiveDialog::AppendComment(form.entry_id);
        self.comment_form = Some(form);
    }

    pub fn open_help(&mut self) {
        self.active_dialog = ActiveDialog::Help;
    }

    /// Close the current dialog, discarding its state
    pub fn close_dialog(&mut self) {
        self.active_dialog = ActiveDialog::None;
        self.entry_form = None;
        self.comment_form = None;
    }

    /// Check if a dialog is active
    pub fn has_dialog(&self) -> bool {
        !matches!(self.active_dialog, ActiveDialog::None)
    }

    pub fn move_up(&mut self) {
        self.selected_index = self.selected_index.saturating_sub(1);
    }

    pub fn move_down(&mut self) {
        if self.selected_index + 1 < self.entries().len() {
            self.selected_index += 1;
        }
    }

    fn replace_list(&mut self, entries: Vec<JournalEntry>) {
        if self.selected_index >= entries.len() {
            self.selected_index = entries.len().saturating_sub(1);
        }
        self.journal = JournalView::Loaded(entries);
    }

    fn replace_entry(&mut self, entry: JournalEntry) {
        if let JournalView::Loaded(entries) = &mut self.journal {
            if let Some(slot) = entries.iter_mut().find(|e| e.id == entry.id) {
                *slot = entry;
            }
        }
    }

    /// The open entry form, if `session` is still the open dialog
    fn entry_form_for(&mut self, session: u64) -> Option<&mut JournalEntryFormState> {
        self.entry_form.as_mut().filter(|f| f.session == session)
    }

    /// Apply the outcome of a finished request
    pub fn apply_remote(&mut self, event: RemoteEvent) {
        match event {
            RemoteEvent::JournalLoaded { department, result } => {
                if department != self.department {
                    tracing::debug!(%department, "dropping journal list for inactive tab");
                    return;
                }
                match result {
                    Ok(entries) => self.replace_list(entries),
                    Err(err) => self.journal = JournalView::Failed(err.to_string()),
                }
            }

            RemoteEvent::ServicesLoaded(result) => match result {
                Ok(services) => {
                    if let Some(form) = self.entry_form.as_mut() {
                        form.set_services(&services);
                    }
                    self.services = services;
                }
                Err(err) => {
                    let message = format!("Could not load services: {}", err);
                    if let Some(form) = self.entry_form.as_mut() {
                        form.error_message = Some(message.clone());
                    }
                    self.set_status(message);
                }
            },

            RemoteEvent::ClientsFound {
                session,
                ticket,
                result,
            } => {
                if let Some(form) = self.entry_form_for(session) {
                    form.apply_clients(&ticket, result);
                }
            }

            RemoteEvent::VehiclesFound {
                session,
                ticket,
                result,
            } => {
                if let Some(form) = self.entry_form_for(session) {
                    form.apply_vehicles(&ticket, result);
                }
            }

            RemoteEvent::Submitted {
                session,
                selection,
                result,
            } => match result {
                Ok(outcome) => {
                    if self.entry_form_for(session).is_some() {
                        self.close_dialog();
                    }
                    self.set_status(format!("Entry {} saved", outcome.entry.id));
                    if outcome.entry.department == self.department {
                        match outcome.refreshed {
                            Ok(entries) => self.replace_list(entries),
                            Err(err) => {
                                self.set_status(format!(
                                    "Entry {} saved, but the list could not be reloaded: {}",
                                    outcome.entry.id, err
                                ));
                            }
                        }
                    }
                }
                Err(err) => match self.entry_form_for(session) {
                    Some(form) => form.submit_failed(&selection, &err),
                    None => self.set_status(format!("Entry not saved: {}", err)),
                },
            },

            RemoteEvent::EntryUpdated(result) => match result {
                Ok(entry) => {
                    self.set_status(format!("Entry {} updated", entry.id));
                    self.replace_entry(entry);
                }
                Err(err) => self.set_status(format!("Update failed: {}", err)),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::JournalError;
    use crate::models::{Client, ClientId, ServiceId};
    use crate::services::{SearchTicket, SelectionState, SubmitOutcome};

    fn entry(id: u64, department: Department) -> JournalEntry {
        JournalEntry {
            id: JournalEntryId::new(id),
            date: Some("2025-03-14T09:30:00".into()),
            department,
            is_priority: false,
            client: None,
            phone: None,
            vehicle: None,
            service: None,
            comment: None,
        }
    }

    fn loaded_app() -> App {
        let mut app = App::new(Settings::default());
        app.take_requests();
        app.apply_remote(RemoteEvent::JournalLoaded {
            department: Department::Sales,
            result: Ok(vec![entry(1, Department::Sales), entry(2, Department::Sales)]),
        });
        app
    }

    #[test]
    fn test_new_app_requests_default_tab() {
        let mut app = App::new(Settings::default());
        assert_eq!(app.journal, JournalView::Loading);
        assert_eq!(app.take_requests(), vec![Request::LoadJournal(Department::Sales)]);
        assert!(app.take_requests().is_empty());
    }

    #[test]
    fn test_list_for_inactive_tab_is_dropped() {
        let mut app = loaded_app();
        app.switch_department(Department::Service);
        assert_eq!(app.take_requests(), vec![Request::LoadJournal(Department::Service)]);

        app.apply_remote(RemoteEvent::JournalLoaded {
            department: Department::Sales,
            result: Ok(vec![entry(9, Department::Sales)]),
        });
        assert_eq!(app.journal, JournalView::Loading);

        app.apply_remote(RemoteEvent::JournalLoaded {
            department: Department::Service,
            result: Ok(vec![entry(3, Department::Service)]),
        });
        assert_eq!(app.entries().len(), 1);
    }

    #[test]
    fn test_read_failure_is_shown_in_place() {
        let mut app = App::new(Settings::default());
        app.apply_remote(RemoteEvent::JournalLoaded {
            department: Department::Sales,
            result: Err(JournalError::Network("connection refused".into())),
        });
        match &app.journal {
            JournalView::Failed(message) => assert!(message.contains("connection refused")),
            other => panic!("unexpected view {:?}", other),
        }
    }

    #[test]
    fn test_service_dialog_loads_services() {
        let mut app = loaded_app();
        app.switch_department(Department::Service);
        app.take_requests();

        app.open_new_entry();

        assert_eq!(app.take_requests(), vec![Request::LoadServices]);
        app.apply_remote(RemoteEvent::ServicesLoaded(Ok(vec![Service {
            id: ServiceId::new(5),
            name: "Tyres".into(),
            is_active: true,
        }])));
        let form = app.entry_form.as_ref().unwrap();
        assert_eq!(form.selected_service().unwrap().id, ServiceId::new(5));
    }

    #[test]
    fn test_search_for_closed_dialog_is_ignored() {
        let mut app = loaded_app();
        app.open_new_entry();
        let old_session = app.entry_form.as_ref().unwrap().session;
        app.close_dialog();
        app.open_new_entry();

        app.apply_remote(RemoteEvent::ClientsFound {
            session: old_session,
            ticket: SearchTicket {
                seq: 1,
                query: "An".into(),
            },
            result: Ok(vec![Client {
                id: ClientId::new(1),
                name: "Anna".into(),
                phone: None,
            }]),
        });

        assert!(app.entry_form.as_ref().unwrap().client_search.results().is_empty());
    }

    #[test]
    fn test_successful_submit_closes_dialog_and_refreshes() {
        let mut app = loaded_app();
        app.open_new_entry();
        let session = app.entry_form.as_ref().unwrap().session;

        app.apply_remote(RemoteEvent::Submitted {
            session,
            selection: SelectionState::new(),
            result: Ok(SubmitOutcome {
                entry: entry(3, Department::Sales),
                refreshed: Ok(vec![
                    entry(3, Department::Sales),
                    entry(1, Department::Sales),
                    entry(2, Department::Sales),
                ]),
            }),
        });

        assert_eq!(app.active_dialog, ActiveDialog::None);
        assert!(app.entry_form.is_none());
        assert_eq!(app.entries().len(), 3);
        assert!(app.status_message.as_deref().unwrap().contains("jr-3"));
    }

    #[test]
    fn test_failed_submit_keeps_dialog_open() {
        let mut app = loaded_app();
        app.open_new_entry();
        let session = app.entry_form.as_ref().unwrap().session;

        let mut returned = SelectionState::new();
        returned.bind_client(ClientId::new(77));
        app.apply_remote(RemoteEvent::Submitted {
            session,
            selection: returned,
            result: Err(JournalError::Validation("date: invalid".into())),
        });

        assert_eq!(app.active_dialog, ActiveDialog::NewEntry);
        let form = app.entry_form.as_ref().unwrap();
        assert_eq!(form.selection.selected_client_id(), Some(ClientId::new(77)));
        assert!(form.error_message.is_some());
    }

    #[test]
    fn test_entry_update_replaces_row() {
        let mut app = loaded_app();
        let mut updated = entry(2, Department::Sales);
        updated.is_priority = true;

        app.apply_remote(RemoteEvent::EntryUpdated(Ok(updated)));

        assert!(app.entries()[1].is_priority);
        assert!(!app.entries()[0].is_priority);
    }

    #[test]
    fn test_selection_stays_in_bounds() {
        let mut app = loaded_app();
        app.move_down();
        app.move_down();
        assert_eq!(app.selected_index, 1);

        app.apply_remote(RemoteEvent::JournalLoaded {
            department: Department::Sales,
            result: Ok(vec![entry(1, Department::Sales)]),
        });
        assert_eq!(app.selected_index, 0);
    }
}
