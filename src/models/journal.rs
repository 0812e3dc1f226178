//! Journal entry model
//!
//! `JournalEntry` is the record as the backend reports it. `NewJournalEntry`
//! is what we send: a tagged union per department, so a sales entry simply
//! has no vehicle or service to leak into the payload. It is constructed
//! through `JournalEntryBuilder`.

use chrono::{Local, NaiveDate, NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize, Serializer};

use super::client::Client;
use super::department::Department;
use super::ids::{ClientId, JournalEntryId, ServiceId, VehicleId};
use super::service::Service;
use super::vehicle::Vehicle;
use crate::error::{JournalError, JournalResult};

/// Wire format for the `date` field of new entries
pub const PAYLOAD_DATE_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Formats accepted when the user types an entry date
const INPUT_DATE_FORMATS: [&str; 4] = [
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S",
];

/// A journal entry as returned by the backend
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JournalEntry {
    pub id: JournalEntryId,

    /// Raw ISO timestamp; formatting is left to the display layer
    #[serde(default)]
    pub date: Option<String>,

    pub department: Department,

    #[serde(default)]
    pub is_priority: bool,

    #[serde(default)]
    pub client: Option<Client>,

    /// Phone captured on the entry itself (copied from the client by the backend)
    #[serde(default)]
    pub phone: Option<String>,

    #[serde(default)]
    pub vehicle: Option<Vehicle>,

    #[serde(default)]
    pub service: Option<Service>,

    #[serde(default)]
    pub comment: Option<String>,
}

impl JournalEntry {
    /// Phone on the entry, falling back to the client's phone
    pub fn display_phone(&self) -> Option<&str> {
        self.phone
            .as_deref()
            .filter(|p| !p.is_empty())
            .or_else(|| self.client.as_ref().and_then(|c| c.phone.as_deref()))
    }
}

/// A journal entry ready to be submitted
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NewJournalEntry {
    Sales {
        date: NaiveDateTime,
        comment: String,
        client_id: ClientId,
    },
    Service {
        date: NaiveDateTime,
        comment: String,
        client_id: ClientId,
        vehicle_id: VehicleId,
        service_id: ServiceId,
    },
}

impl NewJournalEntry {
    pub fn department(&self) -> Department {
        match self {
            Self::Sales { .. } => Department::Sales,
            Self::Service { .. } => Department::Service,
        }
    }

    pub fn client_id(&self) -> ClientId {
        match self {
            Self::Sales { client_id, .. } | Self::Service { client_id, .. } => *client_id,
        }
    }

    pub fn vehicle_id(&self) -> Option<VehicleId> {
        match self {
            Self::Sales { .. } => None,
            Self::Service { vehicle_id, .. } => Some(*vehicle_id),
        }
    }

    pub fn service_id(&self) -> Option<ServiceId> {
        match self {
            Self::Sales { .. } => None,
            Self::Service { service_id, .. } => Some(*service_id),
        }
    }

    fn payload(&self) -> JournalPayload<'_> {
        let (date, comment) = match self {
            Self::Sales { date, comment, .. } | Self::Service { date, comment, .. } => {
                (date, comment)
            }
        };
        JournalPayload {
            date: date.format(PAYLOAD_DATE_FORMAT).to_string(),
            comment,
            department: self.department(),
            client_id: self.client_id(),
            vehicle_id: self.vehicle_id(),
            service_id: self.service_id(),
        }
    }
}

/// Canonical request body for `POST journals/`
#[derive(Serialize)]
struct JournalPayload<'a> {
    date: String,
    comment: &'a str,
    department: Department,
    client_id: ClientId,
    #[serde(skip_serializing_if = "Option::is_none")]
    vehicle_id: Option<VehicleId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    service_id: Option<ServiceId>,
}

impl Serialize for NewJournalEntry {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.payload().serialize(serializer)
    }
}

/// Builder for `NewJournalEntry`
///
/// Vehicle and service are only kept for the service department; for sales
/// they are dropped regardless of what was supplied.
#[derive(Debug, Clone, Default)]
pub struct JournalEntryBuilder {
    department: Department,
    date: Option<NaiveDateTime>,
    comment: String,
    client_id: Option<ClientId>,
    vehicle_id: Option<VehicleId>,
    service_id: Option<ServiceId>,
}

impl JournalEntryBuilder {
    pub fn new(department: Department) -> Self {
        Self {
            department,
            ..Self::default()
        }
    }

    pub fn date(mut self, date: NaiveDateTime) -> Self {
        self.date = Some(date);
        self
    }

    pub fn maybe_date(mut self, date: Option<NaiveDateTime>) -> Self {
        self.date = date;
        self
    }

    pub fn comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = comment.into();
        self
    }

    pub fn client(mut self, client_id: ClientId) -> Self {
        self.client_id = Some(client_id);
        self
    }

    pub fn vehicle(mut self, vehicle_id: VehicleId) -> Self {
        self.vehicle_id = Some(vehicle_id);
        self
    }

    pub fn service(mut self, service_id: Option<ServiceId>) -> Self {
        self.service_id = service_id;
        self
    }

    /// Build the entry; the date defaults to the current local time
    pub fn build(self) -> JournalResult<NewJournalEntry> {
        let client_id = self.client_id.ok_or_else(|| {
            JournalError::Validation("A journal entry needs a client".into())
        })?;
        let date = self.date.unwrap_or_else(now_to_the_second);
        let comment = self.comment.trim().to_string();

        match self.department {
            Department::Sales => Ok(NewJournalEntry::Sales {
                date,
                comment,
                client_id,
            }),
            Department::Service => {
                let vehicle_id = self.vehicle_id.ok_or_else(|| {
                    JournalError::Validation("A service entry needs a vehicle".into())
                })?;
                let service_id = self.service_id.ok_or_else(|| {
                    JournalError::Validation("A service entry needs a service".into())
                })?;
                Ok(NewJournalEntry::Service {
                    date,
                    comment,
                    client_id,
                    vehicle_id,
                    service_id,
                })
            }
        }
    }
}

fn now_to_the_second() -> NaiveDateTime {
    let now = Local::now().naive_local();
    now.with_nanosecond(0).unwrap_or(now)
}

/// Parse a user-typed entry date
///
/// Accepts `YYYY-MM-DD HH:MM`, the `T`-separated variants, optional seconds,
/// and a bare `YYYY-MM-DD` (midnight).
pub fn parse_entry_date(input: &str) -> JournalResult<NaiveDateTime> {
    let input = input.trim();
    for format in INPUT_DATE_FORMATS {
        if let Ok(parsed) = NaiveDateTime::parse_from_str(input, format) {
            return Ok(parsed);
        }
    }
    NaiveDate::parse_from_str(input, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .ok_or_else(|| {
            JournalError::Validation(format!(
                "Invalid date '{}'. Use YYYY-MM-DD HH:MM",
                input
            ))
        })
}
