//! Vehicle model

use serde::{Deserialize, Serialize};
use std::fmt;

use super::client::Client;
use super::ids::{ClientId, VehicleId};
use crate::error::{JournalError, JournalResult};

/// A vehicle as returned by the backend
///
/// Search results carry the owner nested as `client`; the short form embedded
/// in journal entries omits it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vehicle {
    pub id: VehicleId,

    pub plate_number: String,

    pub brand: String,

    pub model: String,

    #[serde(default)]
    pub client: Option<Client>,
}

impl Vehicle {
    /// ID of the owning client, if the backend reported one
    pub fn owner_id(&self) -> Option<ClientId> {
        self.client.as_ref().map(|c| c.id)
    }
}

impl fmt::Display for Vehicle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} — {} {}", self.plate_number, self.brand, self.model)
    }
}

/// Request body for creating a vehicle linked to a client
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewVehicle {
    pub plate_number: String,
    pub brand: String,
    pub model: String,
    pub client_id: ClientId,
}

impl NewVehicle {
    pub fn new(
        plate_number: impl Into<String>,
        brand: impl Into<String>,
        model: impl Into<String>,
        client_id: ClientId,
    ) -> Self {
        Self {
            plate_number: plate_number.into().trim().to_string(),
            brand: brand.into().trim().to_string(),
            model: model.into().trim().to_string(),
            client_id,
        }
    }

    /// Brand and model are mandatory for a new vehicle
    pub fn validate(&self) -> JournalResult<()> {
        if self.brand.is_empty() || self.model.is_empty() {
            return Err(JournalError::Validation(
                "A new vehicle needs both brand and model".into(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_with_owner() {
        let json = r#"{
            "id": 7, "brand": "Skoda", "model": "Octavia", "plate_number": "AA1234BB",
            "client": {"id": 42, "name": "Anna", "phone": "0501234567"}
        }"#;
        let vehicle: Vehicle = serde_json::from_str(json).unwrap();
        assert_eq!(vehicle.owner_id(), Some(ClientId::new(42)));
        assert_eq!(vehicle.to_string(), "AA1234BB — Skoda Octavia");
    }

    #[test]
    fn test_deserialize_short_form() {
        let json = r#"{"id": 7, "brand": "Skoda", "model": "Octavia", "plate_number": "AA1234BB"}"#;
        let vehicle: Vehicle = serde_json::from_str(json).unwrap();
        assert_eq!(vehicle.owner_id(), None);
    }

    #[test]
    fn test_new_vehicle_requires_brand_and_model() {
        let ok = NewVehicle::new("AA1234BB", "Skoda", "Octavia", ClientId::new(1));
        assert!(ok.validate().is_ok());

        let missing = NewVehicle::new("AA1234BB", "Skoda", " ", ClientId::new(1));
        assert!(missing.validate().unwrap_err().is_validation());
    }

    #[test]
    fn test_new_vehicle_wire_shape() {
        let body = serde_json::to_value(NewVehicle::new("AA1", "Kia", "Rio", ClientId::new(9)))
            .unwrap();
        assert_eq!(body["client_id"], 9);
        assert_eq!(body["plate_number"], "AA1");
    }
}
