//! Service layer for journal-desk
//!
//! Business logic on top of the [`Directory`](crate::remote::Directory) port:
//! search-as-you-type, reuse-or-create resolution of clients and vehicles,
//! and ordered submission of journal entries.

pub mod autocomplete;
pub mod resolver;
pub mod selection;
pub mod submission;

pub use autocomplete::{Autocomplete, ClientSearch, SearchPhase, SearchTicket, VehicleSearch};
pub use resolver::EntityResolver;
pub use selection::SelectionState;
pub use submission::{submit_entry, JournalForm, SubmissionController, SubmitGate, SubmitOutcome};
