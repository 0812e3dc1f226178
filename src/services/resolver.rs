//! Entity resolver
//!
//! Maps the client and vehicle fields of a selection to backend IDs: reuse the
//! ID bound by a picked suggestion, otherwise create the entity from the typed
//! text and bind the new ID so a second resolution creates nothing.

use crate::error::JournalResult;
use crate::models::{ClientId, NewClient, NewVehicle, VehicleId};
use crate::remote::Directory;

use super::selection::SelectionState;

/// Resolver over a directory
pub struct EntityResolver<'a, D: Directory + ?Sized> {
    directory: &'a D,
}

impl<'a, D: Directory + ?Sized> EntityResolver<'a, D> {
    pub fn new(directory: &'a D) -> Self {
        Self { directory }
    }

    /// Resolve the client role
    ///
    /// A bound ID is returned unchanged without any request, even if the
    /// name was edited after the suggestion was picked.
    pub async fn resolve_client(&self, selection: &mut SelectionState) -> JournalResult<ClientId> {
        if let Some(id) = selection.selected_client_id() {
            tracing::debug!(client = %id, "reusing selected client");
            return Ok(id);
        }

        let new_client = NewClient::new(&selection.client.name, &selection.client.phone);
        new_client.validate()?;

        let client = self.directory.create_client(&new_client).await?;
        tracing::info!(client = %client.id, name = %client.name, "created client");
        selection.bind_client(client.id);
        Ok(client.id)
    }

    /// Resolve the vehicle role; a new vehicle is linked to `client_id`
    pub async fn resolve_vehicle(
        &self,
        selection: &mut SelectionState,
        client_id: ClientId,
    ) -> JournalResult<VehicleId> {
        if let Some(id) = selection.selected_vehicle_id() {
            tracing::debug!(vehicle = %id, "reusing selected vehicle");
            return Ok(id);
        }

        let new_vehicle = NewVehicle::new(
            &selection.vehicle.plate_number,
            &selection.vehicle.brand,
            &selection.vehicle.model,
            client_id,
        );
        new_vehicle.validate()?;

        let vehicle = self.directory.create_vehicle(&new_vehicle).await?;
        tracing::info!(vehicle = %vehicle.id, client = %client_id, plate = %vehicle.plate_number, "created vehicle");
        selection.bind_vehicle(vehicle.id);
        Ok(vehicle.id)
    }
}
