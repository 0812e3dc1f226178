//! Selection state for one new-entry session
//!
//! Holds what the user typed for the client and vehicle fields, plus the IDs
//! bound by picking a search suggestion. Created fresh when the dialog opens,
//! consumed by submit, dropped when the dialog closes.

use crate::models::{Client, ClientId, Vehicle, VehicleId};

/// Client half of the selection
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClientSelection {
    pub name: String,
    pub phone: String,
    selected_id: Option<ClientId>,
}

impl ClientSelection {
    pub fn selected_id(&self) -> Option<ClientId> {
        self.selected_id
    }
}

/// Vehicle half of the selection
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VehicleSelection {
    pub plate_number: String,
    pub brand: String,
    pub model: String,
    selected_id: Option<VehicleId>,
}

impl VehicleSelection {
    pub fn selected_id(&self) -> Option<VehicleId> {
        self.selected_id
    }
}

/// Transient per-session binding of typed text to resolved entity IDs
///
/// Editing text after a suggestion was picked keeps the binding: the last
/// selection wins until the caller explicitly unbinds.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionState {
    pub client: ClientSelection,
    pub vehicle: VehicleSelection,
}

impl SelectionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Forget everything (dialog opened fresh or closed)
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Apply a picked client suggestion: copy its fields and bind its ID
    pub fn select_client(&mut self, client: &Client) {
        self.client.name = client.name.clone();
        self.client.phone = client.phone_or_empty().to_string();
        self.client.selected_id = Some(client.id);
    }

    /// Apply a picked vehicle suggestion: copy its fields and bind its ID
    pub fn select_vehicle(&mut self, vehicle: &Vehicle) {
        self.vehicle.plate_number = vehicle.plate_number.clone();
        self.vehicle.brand = vehicle.brand.clone();
        self.vehicle.model = vehicle.model.clone();
        self.vehicle.selected_id = Some(vehicle.id);
    }

    /// Bind a client ID without touching the text (resolution or explicit ID)
    pub fn bind_client(&mut self, id: ClientId) {
        self.client.selected_id = Some(id);
    }

    /// Bind a vehicle ID without touching the text
    pub fn bind_vehicle(&mut self, id: VehicleId) {
        self.vehicle.selected_id = Some(id);
    }

    pub fn unbind_client(&mut self) {
        self.client.selected_id = None;
    }

    pub fn unbind_vehicle(&mut self) {
        self.vehicle.selected_id = None;
    }

    pub fn selected_client_id(&self) -> Option<ClientId> {
        self.client.selected_id
    }

    pub fn selected_vehicle_id(&self) -> Option<VehicleId> {
        self.vehicle.selected_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn anna() -> Client {
        Client {
            id: ClientId::new(42),
            name: "Anna".into(),
            phone: Some("0501234567".into()),
        }
    }

    #[test]
    fn test_select_client_copies_fields_and_binds() {
        let mut selection = SelectionState::new();
        selection.select_client(&anna());

        assert_eq!(selection.client.name, "Anna");
        assert_eq!(selection.client.phone, "0501234567");
        assert_eq!(selection.selected_client_id(), Some(ClientId::new(42)));
    }

    #[test]
    fn test_editing_text_keeps_binding() {
        let mut selection = SelectionState::new();
        selection.select_client(&anna());
        selection.client.name = "Anna Petrenko".into();

        assert_eq!(selection.selected_client_id(), Some(ClientId::new(42)));
    }

    #[test]
    fn test_reset_clears_text_and_bindings() {
        let mut selection = SelectionState::new();
        selection.select_client(&anna());
        selection.bind_vehicle(VehicleId::new(7));
        selection.vehicle.plate_number = "AA1234BB".into();

        selection.reset();

        assert_eq!(selection, SelectionState::default());
    }

    #[test]
    fn test_unbind() {
        let mut selection = SelectionState::new();
        selection.bind_client(ClientId::new(1));
        selection.bind_vehicle(VehicleId::new(2));
        selection.unbind_client();
        selection.unbind_vehicle();
        assert_eq!(selection.selected_client_id(), None);
        assert_eq!(selection.selected_vehicle_id(), None);
    }
}
