//! Remote directory client
//!
//! The journal backend is reached through the [`Directory`] port. Every call
//! is a single request: no caching, no retry, errors go straight back to the
//! caller. [`HttpDirectory`] is the production implementation.

pub mod http;

#[cfg(test)]
pub(crate) mod fake;

use async_trait::async_trait;

use crate::error::JournalResult;
use crate::models::{
    Client, Department, JournalEntry, JournalEntryId, NewClient, NewJournalEntry, NewVehicle,
    Service, Vehicle,
};

pub use http::HttpDirectory;

/// Port to the journal API
///
/// Search queries are passed through as typed; enforcing a minimum query
/// length is the caller's job.
#[async_trait]
pub trait Directory: Send + Sync {
    /// `GET journals/?department=`
    async fn list_journal_entries(&self, department: Department)
        -> JournalResult<Vec<JournalEntry>>;

    /// `GET services/`
    async fn list_services(&self) -> JournalResult<Vec<Service>>;

    /// `GET clients/auto_find/?q=`
    async fn search_clients(&self, query: &str) -> JournalResult<Vec<Client>>;

    /// `GET vehicles/auto_find_by_number/?plate_number=`
    async fn search_vehicles_by_plate(&self, query: &str) -> JournalResult<Vec<Vehicle>>;

    /// `POST clients/`
    async fn create_client(&self, client: &NewClient) -> JournalResult<Client>;

    /// `POST vehicles/`
    async fn create_vehicle(&self, vehicle: &NewVehicle) -> JournalResult<Vehicle>;

    /// `POST journals/`
    async fn create_journal_entry(&self, entry: &NewJournalEntry) -> JournalResult<JournalEntry>;

    /// `PATCH journals/{id}/`; the backend appends, it never replaces
    async fn append_comment(&self, id: JournalEntryId, comment: &str)
        -> JournalResult<JournalEntry>;

    /// `POST journals/{id}/toggle-priority/`
    async fn toggle_priority(&self, id: JournalEntryId) -> JournalResult<JournalEntry>;
}
