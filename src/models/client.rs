//! Client model
//!
//! Clients are created and owned by the backend; this crate only reads them
//! and requests new ones.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::ClientId;
use crate::error::{JournalError, JournalResult};

/// A client as returned by the backend
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Client {
    pub id: ClientId,

    pub name: String,

    /// Free-form phone number, may be missing on older records
    #[serde(default)]
    pub phone: Option<String>,
}

impl Client {
    /// Phone number or an empty string
    pub fn phone_or_empty(&self) -> &str {
        self.phone.as_deref().unwrap_or("")
    }
}

impl fmt::Display for Client {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.phone.as_deref() {
            Some(phone) if !phone.is_empty() => write!(f, "{} — {}", self.name, phone),
            _ => write!(f, "{}", self.name),
        }
    }
}

/// Request body for creating a client
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewClient {
    pub name: String,
    pub phone: String,
}

impl NewClient {
    pub fn new(name: impl Into<String>, phone: impl Into<String>) -> Self {
        Self {
            name: name.into().trim().to_string(),
            phone: phone.into().trim().to_string(),
        }
    }

    /// The backend rejects a blank name; fail before the round trip
    pub fn validate(&self) -> JournalResult<()> {
        if self.name.is_empty() {
            return Err(JournalError::Validation(
                "Client name cannot be empty".into(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_null_phone() {
        let client: Client =
            serde_json::from_str(r#"{"id": 5, "name": "Anna", "phone": null, "vehicles": []}"#)
                .unwrap();
        assert_eq!(client.id, ClientId::new(5));
        assert_eq!(client.phone_or_empty(), "");
        assert_eq!(client.to_string(), "Anna");
    }

    #[test]
    fn test_display_with_phone() {
        let client = Client {
            id: ClientId::new(1),
            name: "Ivan".into(),
            phone: Some("0991112233".into()),
        };
        assert_eq!(client.to_string(), "Ivan — 0991112233");
    }

    #[test]
    fn test_new_client_trims_and_validates() {
        let new_client = NewClient::new("  Ivan ", " 0991112233");
        assert_eq!(new_client.name, "Ivan");
        assert_eq!(new_client.phone, "0991112233");
        assert!(new_client.validate().is_ok());

        assert!(NewClient::new("   ", "123").validate().unwrap_err().is_validation());
    }
}
