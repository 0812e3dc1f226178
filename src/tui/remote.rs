//! Bridge between the UI loop and the directory
//!
//! Key handlers never await. They queue a [`Request`] on the app; the run
//! loop hands queued requests to the [`Dispatcher`], which spawns each one on
//! the tokio runtime and posts the outcome back as [`Event::Remote`].
//! Requests are never cancelled. Dialog-scoped requests carry the dialog's
//! session number so late answers for a closed dialog can be recognised.

use std::future::Future;
use std::sync::{mpsc, Arc};

use tokio::runtime::Handle;

use crate::error::JournalResult;
use crate::models::{Client, Department, JournalEntry, JournalEntryId, Service, Vehicle};
use crate::remote::Directory;
use crate::services::{JournalForm, SearchTicket, SelectionState, SubmissionController, SubmitOutcome};

use super::event::Event;

/// Work the UI wants done
#[derive(Debug, Clone, PartialEq)]
pub enum Request {
    LoadJournal(Department),
    LoadServices,
    SearchClients {
        session: u64,
        ticket: SearchTicket,
    },
    SearchVehicles {
        session: u64,
        ticket: SearchTicket,
    },
    Submit {
        session: u64,
        selection: SelectionState,
        form: JournalForm,
    },
    AppendComment {
        id: JournalEntryId,
        text: String,
    },
    TogglePriority(JournalEntryId),
}

/// Outcome of a request
#[derive(Debug)]
pub enum RemoteEvent {
    JournalLoaded {
        department: Department,
        result: JournalResult<Vec<JournalEntry>>,
    },
    ServicesLoaded(JournalResult<Vec<Service>>),
    ClientsFound {
        session: u64,
        ticket: SearchTicket,
        result: JournalResult<Vec<Client>>,
    },
    VehiclesFound {
        session: u64,
        ticket: SearchTicket,
        result: JournalResult<Vec<Vehicle>>,
    },
    /// `selection` comes back with every ID bound during the attempt
    Submitted {
        session: u64,
        selection: SelectionState,
        result: JournalResult<SubmitOutcome>,
    },
    EntryUpdated(JournalResult<JournalEntry>),
}

/// Runs requests on the tokio runtime
pub struct Dispatcher {
    runtime: Handle,
    directory: Arc<dyn Directory>,
    sender: mpsc::Sender<Event>,
}

impl Dispatcher {
    pub fn new(runtime: Handle, directory: Arc<dyn Directory>, sender: mpsc::Sender<Event>) -> Self {
        Self {
            runtime,
            directory,
            sender,
        }
    }

    pub fn dispatch_all(&self, requests: Vec<Request>) {
        for request in requests {
            self.dispatch(request);
        }
    }

    pub fn dispatch(&self, request: Request) {
        tracing::debug!(?request, "dispatching");
        let directory = Arc::clone(&self.directory);

        match request {
            Request::LoadJournal(department) => self.spawn(async move {
                let result = directory.list_journal_entries(department).await;
                RemoteEvent::JournalLoaded { department, result }
            }),
            Request::LoadServices => self.spawn(async move {
                RemoteEvent::ServicesLoaded(directory.list_services().await)
            }),
            Request::SearchClients { session, ticket } => self.spawn(async move {
                let result = directory.search_clients(&ticket.query).await;
                RemoteEvent::ClientsFound {
                    session,
                    ticket,
                    result,
                }
            }),
            Request::SearchVehicles { session, ticket } => self.spawn(async move {
                let result = directory.search_vehicles_by_plate(&ticket.query).await;
                RemoteEvent::VehiclesFound {
                    session,
                    ticket,
                    result,
                }
            }),
            Request::Submit {
                session,
                mut selection,
                form,
            } => self.spawn(async move {
                let mut controller = SubmissionController::new(directory.as_ref());
                let result = controller.submit(&mut selection, &form).await;
                RemoteEvent::Submitted {
                    session,
                    selection,
                    result,
                }
            }),
            Request::AppendComment { id, text } => self.spawn(async move {
                RemoteEvent::EntryUpdated(directory.append_comment(id, &text).await)
            }),
            Request::TogglePriority(id) => self.spawn(async move {
                RemoteEvent::EntryUpdated(directory.toggle_priority(id).await)
            }),
        }
    }

    fn spawn<F>(&self, task: F)
    where
        F: Future<Output = RemoteEvent> + Send + 'static,
    {
        let sender = self.sender.clone();
        self.runtime.spawn(async move {
            let event = task.await;
            if sender.send(Event::Remote(event)).is_err() {
                tracing::debug!("UI loop gone, dropping response");
            }
        });
    }
}
