//! Core data models for journal-desk
//!
//! These types mirror the records the journal API exposes (clients, vehicles,
//! services, journal entries) plus the request bodies used to create them.

pub mod client;
pub mod department;
pub mod ids;
pub mod journal;
pub mod service;
pub mod vehicle;

pub use client::{Client, NewClient};
pub use department::Department;
pub use ids::{ClientId, JournalEntryId, ServiceId, VehicleId};
pub use journal::{parse_entry_date, JournalEntry, JournalEntryBuilder, NewJournalEntry};
pub use service::Service;
pub use vehicle::{NewVehicle, Vehicle};
