//! Journal submission
//!
//! Resolves the client, then (service department only) the vehicle, builds the
//! entry and posts it. Steps run strictly in order. Entities created before a
//! later step fails stay on the backend and stay bound in the selection, so a
//! retry creates nothing twice.

use chrono::NaiveDateTime;

use crate::error::{JournalError, JournalResult};
use crate::models::{Department, JournalEntry, JournalEntryBuilder, ServiceId};
use crate::remote::Directory;

use super::resolver::EntityResolver;
use super::selection::SelectionState;

/// Raw form fields besides the client and vehicle
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JournalForm {
    pub department: Department,
    /// `None` means "now"
    pub date: Option<NaiveDateTime>,
    pub comment: String,
    pub service_id: Option<ServiceId>,
}

impl JournalForm {
    pub fn new(department: Department) -> Self {
        Self {
            department,
            ..Self::default()
        }
    }

    /// Checks that need no network round-trip
    fn precheck(&self) -> JournalResult<()> {
        if self.department.requires_vehicle() && self.service_id.is_none() {
            return Err(JournalError::Validation(
                "Choose a service for a service entry".into(),
            ));
        }
        Ok(())
    }
}

/// In-flight guard: `Idle -> Submitting -> Idle`
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SubmitGate {
    submitting: bool,
}

impl SubmitGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enter `Submitting`; fails while a submission is already in flight
    pub fn begin(&mut self) -> JournalResult<()> {
        if self.submitting {
            return Err(JournalError::SubmitInProgress);
        }
        self.submitting = true;
        Ok(())
    }

    pub fn finish(&mut self) {
        self.submitting = false;
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }
}

/// Resolve entities and create the journal entry
///
/// On error the selection keeps every ID bound so far.
pub async fn submit_entry<D: Directory + ?Sized>(
    directory: &D,
    selection: &mut SelectionState,
    form: &JournalForm,
) -> JournalResult<JournalEntry> {
    form.precheck()?;
    let resolver = EntityResolver::new(directory);

    let client_id = resolver.resolve_client(selection).await?;

    let mut builder = JournalEntryBuilder::new(form.department)
        .maybe_date(form.date)
        .comment(form.comment.as_str())
        .client(client_id);

    if form.department.requires_vehicle() {
        let vehicle_id = resolver.resolve_vehicle(selection, client_id).await?;
        builder = builder.vehicle(vehicle_id).service(form.service_id);
    }

    let new_entry = builder.build()?;
    let entry = directory.create_journal_entry(&new_entry).await?;
    tracing::info!(
        entry = %entry.id,
        department = %form.department,
        client = %client_id,
        "journal entry created"
    );
    Ok(entry)
}

/// Result of a successful submission
#[derive(Debug)]
pub struct SubmitOutcome {
    pub entry: JournalEntry,
    /// Reloaded list for the entry's department; a failed reload does not
    /// undo the submission
    pub refreshed: JournalResult<Vec<JournalEntry>>,
}

/// Owns the gate and drives one submit at a time
pub struct SubmissionController<'a, D: Directory + ?Sized> {
    directory: &'a D,
    gate: SubmitGate,
}

impl<'a, D: Directory + ?Sized> SubmissionController<'a, D> {
    pub fn new(directory: &'a D) -> Self {
        Self {
            directory,
            gate: SubmitGate::new(),
        }
    }

    pub fn gate(&self) -> &SubmitGate {
        &self.gate
    }

    pub fn gate_mut(&mut self) -> &mut SubmitGate {
        &mut self.gate
    }

    /// Submit, then discard the selection and reload the department list
    ///
    /// On failure the selection is left intact for a retry.
    pub async fn submit(
        &mut self,
        selection: &mut SelectionState,
        form: &JournalForm,
    ) -> JournalResult<SubmitOutcome> {
        self.gate.begin()?;
        let result = submit_entry(self.directory, selection, form).await;
        self.gate.finish();

        let entry = result?;
        selection.reset();
        let refreshed = self.directory.list_journal_entries(form.department).await;
        if let Err(err) = &refreshed {
            tracing::warn!(error = %err, "journal reload after submit failed");
        }
        Ok(SubmitOutcome { entry, refreshed })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Client, ClientId, Vehicle, VehicleId};
    use crate::remote::fake::{Call, FakeDirectory};
    use crate::services::autocomplete::{search_clients, search_vehicles, Autocomplete};
    use crate::config::SearchOrdering;

    fn created_clients(directory: &FakeDirectory) -> usize {
        directory.count(|c| matches!(c, Call::CreateClient(_)))
    }

    fn created_vehicles(directory: &FakeDirectory) -> usize {
        directory.count(|c| matches!(c, Call::CreateVehicle(_)))
    }

    #[tokio::test]
    async fn test_new_sales_client_is_created_then_entry() {
        let directory = FakeDirectory::new();
        let mut selection = SelectionState::new();
        selection.client.name = "Ivan".into();
        selection.client.phone = "0991112233".into();
        let form = JournalForm::new(Department::Sales);

        let entry = submit_entry(&directory, &mut selection, &form).await.unwrap();

        let clients = directory.created_clients();
        assert_eq!(clients.len(), 1);
        assert_eq!(clients[0].name, "Ivan");
        assert_eq!(clients[0].phone, "0991112233");

        let entries = directory.created_entries();
        assert_eq!(entries.len(), 1);
        let client_id = selection.selected_client_id().unwrap();
        assert_eq!(entries[0].client_id(), client_id);
        let body = serde_json::to_value(&entries[0]).unwrap();
        assert!(body.get("vehicle_id").is_none());
        assert!(body.get("service_id").is_none());
        assert_eq!(entry.department, Department::Sales);
        assert_eq!(created_vehicles(&directory), 0);
    }

    #[tokio::test]
    async fn test_selected_client_and_vehicle_are_reused() {
        let directory = FakeDirectory::new().with_service(3, "Diagnostics");
        let mut selection = SelectionState::new();
        selection.select_client(&Client {
            id: ClientId::new(42),
            name: "Anna".into(),
            phone: Some("0501234567".into()),
        });
        selection.select_vehicle(&Vehicle {
            id: VehicleId::new(7),
            plate_number: "AA1234BB".into(),
            brand: "Skoda".into(),
            model: "Octavia".into(),
            client: None,
        });
        let form = JournalForm {
            service_id: Some(ServiceId::new(3)),
            ..JournalForm::new(Department::Service)
        };

        submit_entry(&directory, &mut selection, &form).await.unwrap();

        assert_eq!(created_clients(&directory), 0);
        assert_eq!(created_vehicles(&directory), 0);
        let entries = directory.created_entries();
        assert_eq!(entries.len(), 1);
        let body = serde_json::to_value(&entries[0]).unwrap();
        assert_eq!(body["client_id"], 42);
        assert_eq!(body["vehicle_id"], 7);
        assert_eq!(body["service_id"], 3);
    }

    #[tokio::test]
    async fn test_picked_suggestions_submit_without_creates() {
        let directory = FakeDirectory::new()
            .with_client(42, "Anna", "0501234567")
            .with_vehicle(7, "AA1234BB", "Skoda", "Octavia")
            .with_service(3, "Diagnostics");
        let mut clients = Autocomplete::new(2, SearchOrdering::LastArrival);
        let mut vehicles = Autocomplete::new(2, SearchOrdering::LastArrival);
        let mut selection = SelectionState::new();

        search_clients(&directory, &mut clients, "Ann").await;
        selection.select_client(&clients.choose(0).unwrap());
        search_vehicles(&directory, &mut vehicles, "AA12").await;
        selection.select_vehicle(&vehicles.choose(0).unwrap());

        let form = JournalForm {
            service_id: Some(ServiceId::new(3)),
            ..JournalForm::new(Department::Service)
        };
        submit_entry(&directory, &mut selection, &form).await.unwrap();

        assert_eq!(created_clients(&directory), 0);
        assert_eq!(created_vehicles(&directory), 0);
        assert_eq!(directory.created_entries()[0].vehicle_id(), Some(VehicleId::new(7)));
    }

    #[tokio::test]
    async fn test_vehicle_failure_keeps_client_for_retry() {
        let directory = FakeDirectory::new().with_service(3, "Diagnostics");
        let mut selection = SelectionState::new();
        selection.client.name = "Petro".into();
        selection.client.phone = "0670000000".into();
        selection.vehicle.plate_number = "BC0001AA".into();
        selection.vehicle.brand = "Toyota".into();
        selection.vehicle.model = "Camry".into();
        let form = JournalForm {
            service_id: Some(ServiceId::new(3)),
            ..JournalForm::new(Department::Service)
        };
        directory.fail_next_vehicle("connection reset");

        let err = submit_entry(&directory, &mut selection, &form)
            .await
            .unwrap_err();
        assert!(err.is_network());
        assert!(directory.created_entries().is_empty());
        let client_id = selection.selected_client_id().unwrap();

        submit_entry(&directory, &mut selection, &form).await.unwrap();

        assert_eq!(created_clients(&directory), 1);
        assert_eq!(created_vehicles(&directory), 2);
        assert_eq!(directory.created_entries()[0].client_id(), client_id);
    }

    #[tokio::test]
    async fn test_service_entry_without_service_makes_no_calls() {
        let directory = FakeDirectory::new();
        let mut selection = SelectionState::new();
        selection.client.name = "Ivan".into();
        let form = JournalForm::new(Department::Service);

        let err = submit_entry(&directory, &mut selection, &form)
            .await
            .unwrap_err();

        assert!(err.is_validation());
        assert!(directory.calls().is_empty());
    }

    #[test]
    fn test_gate_rejects_reentry() {
        let mut gate = SubmitGate::new();
        gate.begin().unwrap();
        assert!(matches!(gate.begin(), Err(JournalError::SubmitInProgress)));
        gate.finish();
        assert!(gate.begin().is_ok());
    }

    #[tokio::test]
    async fn test_controller_refuses_while_submitting() {
        let directory = FakeDirectory::new();
        let mut controller = SubmissionController::new(&directory);
        let mut selection = SelectionState::new();
        selection.client.name = "Ivan".into();
        controller.gate_mut().begin().unwrap();

        let err = controller
            .submit(&mut selection, &JournalForm::new(Department::Sales))
            .await
            .unwrap_err();

        assert!(matches!(err, JournalError::SubmitInProgress));
        assert!(directory.calls().is_empty());
    }

    #[tokio::test]
    async fn test_controller_resets_selection_and_reloads() {
        let directory = FakeDirectory::new();
        let mut controller = SubmissionController::new(&directory);
        let mut selection = SelectionState::new();
        selection.client.name = "Ivan".into();

        let outcome = controller
            .submit(&mut selection, &JournalForm::new(Department::Sales))
            .await
            .unwrap();

        assert_eq!(selection, SelectionState::default());
        assert!(!controller.gate().is_submitting());
        let listed = outcome.refreshed.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].id, outcome.entry.id);
        assert_eq!(
            directory.calls().last(),
            Some(&Call::ListJournal(Department::Sales))
        );
    }

    #[tokio::test]
    async fn test_failed_reload_does_not_fail_submit() {
        let directory = FakeDirectory::new();
        directory.fail_listing("timed out");
        let mut controller = SubmissionController::new(&directory);
        let mut selection = SelectionState::new();
        selection.client.name = "Ivan".into();

        let outcome = controller
            .submit(&mut selection, &JournalForm::new(Department::Sales))
            .await
            .unwrap();

        assert!(outcome.refreshed.is_err());
        assert_eq!(directory.created_entries().len(), 1);
    }

    #[tokio::test]
    async fn test_controller_keeps_selection_on_failure() {
        let directory = FakeDirectory::new().with_service(3, "Diagnostics");
        directory.fail_next_vehicle("timed out");
        let mut controller = SubmissionController::new(&directory);
        let mut selection = SelectionState::new();
        selection.client.name = "Ivan".into();
        selection.vehicle.plate_number = "AA0000AA".into();
        selection.vehicle.brand = "Ford".into();
        selection.vehicle.model = "Focus".into();
        let form = JournalForm {
            service_id: Some(ServiceId::new(3)),
            ..JournalForm::new(Department::Service)
        };

        assert!(controller.submit(&mut selection, &form).await.is_err());

        assert!(selection.selected_client_id().is_some());
        assert_eq!(selection.vehicle.plate_number, "AA0000AA");
        assert!(!controller.gate().is_submitting());
    }
}
