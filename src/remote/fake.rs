//! In-memory directory used by unit tests
//!
//! Records every call so tests can assert on call counts and payloads, and can
//! be told to fail the next vehicle creation.

use std::sync::Mutex;

use async_trait::async_trait;

use super::Directory;
use crate::error::{JournalError, JournalResult};
use crate::models::{
    Client, ClientId, Department, JournalEntry, JournalEntryId, NewClient, NewJournalEntry,
    NewVehicle, Service, ServiceId, Vehicle, VehicleId,
};

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Call {
    ListJournal(Department),
    ListServices,
    SearchClients(String),
    SearchVehicles(String),
    CreateClient(NewClient),
    CreateVehicle(NewVehicle),
    CreateJournal(NewJournalEntry),
    AppendComment(JournalEntryId, String),
    TogglePriority(JournalEntryId),
}

#[derive(Default)]
struct FakeState {
    clients: Vec<Client>,
    vehicles: Vec<Vehicle>,
    services: Vec<Service>,
    entries: Vec<JournalEntry>,
    next_id: u64,
    calls: Vec<Call>,
    fail_next_vehicle: Option<String>,
    fail_listing: Option<String>,
}

#[derive(Default)]
pub(crate) struct FakeDirectory {
    state: Mutex<FakeState>,
}

impl FakeDirectory {
    pub(crate) fn new() -> Self {
        let directory = Self::default();
        directory.lock().next_id = 100;
        directory
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, FakeState> {
        self.state.lock().unwrap()
    }

    pub(crate) fn with_client(self, id: u64, name: &str, phone: &str) -> Self {
        self.lock().clients.push(Client {
            id: ClientId::new(id),
            name: name.to_string(),
            phone: Some(phone.to_string()),
        });
        self
    }

    pub(crate) fn with_vehicle(self, id: u64, plate: &str, brand: &str, model: &str) -> Self {
        self.lock().vehicles.push(Vehicle {
            id: VehicleId::new(id),
            plate_number: plate.to_string(),
            brand: brand.to_string(),
            model: model.to_string(),
            client: None,
        });
        self
    }

    pub(crate) fn with_service(self, id: u64, name: &str) -> Self {
        self.lock().services.push(Service {
            id: ServiceId::new(id),
            name: name.to_string(),
            is_active: true,
        });
        self
    }

    /// Make the next `create_vehicle` fail with a network error
    pub(crate) fn fail_next_vehicle(&self, message: &str) {
        self.lock().fail_next_vehicle = Some(message.to_string());
    }

    /// Make every list call fail with a network error
    pub(crate) fn fail_listing(&self, message: &str) {
        self.lock().fail_listing = Some(message.to_string());
    }

    pub(crate) fn calls(&self) -> Vec<Call> {
        self.lock().calls.clone()
    }

    pub(crate) fn count(&self, predicate: impl Fn(&Call) -> bool) -> usize {
        self.lock().calls.iter().filter(|c| predicate(c)).count()
    }

    pub(crate) fn created_clients(&self) -> Vec<NewClient> {
        self.lock()
            .calls
            .iter()
            .filter_map(|c| match c {
                Call::CreateClient(new_client) => Some(new_client.clone()),
                _ => None,
            })
            .collect()
    }

    pub(crate) fn created_entries(&self) -> Vec<NewJournalEntry> {
        self.lock()
            .calls
            .iter()
            .filter_map(|c| match c {
                Call::CreateJournal(entry) => Some(entry.clone()),
                _ => None,
            })
            .collect()
    }

    pub(crate) fn search_count(&self) -> usize {
        self.count(|c| matches!(c, Call::SearchClients(_) | Call::SearchVehicles(_)))
    }
}

impl FakeState {
    fn allocate_id(&mut self) -> u64 {
        self.next_id += 1;
        self.next_id
    }

    fn entry_mut(&mut self, id: JournalEntryId) -> JournalResult<&mut JournalEntry> {
        self.entries
            .iter_mut()
            .find(|e| e.id == id)
            .ok_or_else(|| JournalError::entry_not_found(id.to_string()))
    }
}

#[async_trait]
impl Directory for FakeDirectory {
    async fn list_journal_entries(
        &self,
        department: Department,
    ) -> JournalResult<Vec<JournalEntry>> {
        let mut state = self.lock();
        state.calls.push(Call::ListJournal(department));
        if let Some(message) = state.fail_listing.clone() {
            return Err(JournalError::Network(message));
        }
        Ok(state
            .entries
            .iter()
            .filter(|e| e.department == department)
            .cloned()
            .collect())
    }

    async fn list_services(&self) -> JournalResult<Vec<Service>> {
        let mut state = self.lock();
        state.calls.push(Call::ListServices);
        Ok(state.services.clone())
    }

    async fn search_clients(&self, query: &str) -> JournalResult<Vec<Client>> {
        let mut state = self.lock();
        state.calls.push(Call::SearchClients(query.to_string()));
        let needle = query.to_lowercase();
        Ok(state
            .clients
            .iter()
            .filter(|c| c.name.to_lowercase().contains(&needle))
            .cloned()
            .collect())
    }

    async fn search_vehicles_by_plate(&self, query: &str) -> JournalResult<Vec<Vehicle>> {
        let mut state = self.lock();
        state.calls.push(Call::SearchVehicles(query.to_string()));
        let needle = query.to_lowercase();
        Ok(state
            .vehicles
            .iter()
            .filter(|v| v.plate_number.to_lowercase().contains(&needle))
            .cloned()
            .collect())
    }

    async fn create_client(&self, client: &NewClient) -> JournalResult<Client> {
        let mut state = self.lock();
        state.calls.push(Call::CreateClient(client.clone()));
        if client.name.is_empty() {
            return Err(JournalError::Validation(
                "name: This field may not be blank.".into(),
            ));
        }
        let created = Client {
            id: ClientId::new(state.allocate_id()),
            name: client.name.clone(),
            phone: Some(client.phone.clone()),
        };
        state.clients.push(created.clone());
        Ok(created)
    }

    async fn create_vehicle(&self, vehicle: &NewVehicle) -> JournalResult<Vehicle> {
        let mut state = self.lock();
        state.calls.push(Call::CreateVehicle(vehicle.clone()));
        if let Some(message) = state.fail_next_vehicle.take() {
            return Err(JournalError::Network(message));
        }
        let owner = state
            .clients
            .iter()
            .find(|c| c.id == vehicle.client_id)
            .cloned();
        let created = Vehicle {
            id: VehicleId::new(state.allocate_id()),
            plate_number: vehicle.plate_number.clone(),
            brand: vehicle.brand.clone(),
            model: vehicle.model.clone(),
            client: owner,
        };
        state.vehicles.push(created.clone());
        Ok(created)
    }

    async fn create_journal_entry(&self, entry: &NewJournalEntry) -> JournalResult<JournalEntry> {
        let mut state = self.lock();
        state.calls.push(Call::CreateJournal(entry.clone()));
        let client = state
            .clients
            .iter()
            .find(|c| c.id == entry.client_id())
            .cloned();
        let vehicle = entry
            .vehicle_id()
            .and_then(|id| state.vehicles.iter().find(|v| v.id == id).cloned());
        let service = entry
            .service_id()
            .and_then(|id| state.services.iter().find(|s| s.id == id).cloned());
        let body = serde_json::to_value(entry)?;
        let created = JournalEntry {
            id: JournalEntryId::new(state.allocate_id()),
            date: body["date"].as_str().map(str::to_string),
            department: entry.department(),
            is_priority: false,
            client,
            phone: None,
            vehicle,
            service,
            comment: body["comment"].as_str().map(str::to_string),
        };
        state.entries.push(created.clone());
        Ok(created)
    }

    async fn append_comment(
        &self,
        id: JournalEntryId,
        comment: &str,
    ) -> JournalResult<JournalEntry> {
        let mut state = self.lock();
        state
            .calls
            .push(Call::AppendComment(id, comment.to_string()));
        let entry = state.entry_mut(id)?;
        entry.comment = Some(match entry.comment.take() {
            Some(existing) if !existing.is_empty() => format!("{}\n\n{}", existing, comment),
            _ => comment.to_string(),
        });
        Ok(entry.clone())
    }

    async fn toggle_priority(&self, id: JournalEntryId) -> JournalResult<JournalEntry> {
        let mut state = self.lock();
        state.calls.push(Call::TogglePriority(id));
        let entry = state.entry_mut(id)?;
        entry.is_priority = !entry.is_priority;
        Ok(entry.clone())
    }
}
