//! Custom error types for journal-desk
//!
//! This module defines the error hierarchy for the application using thiserror
//! for ergonomic error definitions. The first three variants mirror the failure
//! classes of the remote journal API; the rest cover the local environment.

use thiserror::Error;

/// The main error type for journal-desk operations
#[derive(Error, Debug)]
pub enum JournalError {
    /// Transport failure: connection refused, DNS, timeout, truncated body
    #[error("Network error: {0}")]
    Network(String),

    /// The backend answered, but not with something we can use
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Rejected payload, either locally or by the backend (HTTP 400)
    #[error("Validation error: {0}")]
    Validation(String),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// Export errors
    #[error("Export error: {0}")]
    Export(String),

    /// Entity not found errors
    #[error("{entity_type} not found: {identifier}")]
    NotFound {
        entity_type: &'static str,
        identifier: String,
    },

    /// A submission is already in flight
    #[error("A journal entry is already being submitted")]
    SubmitInProgress,

    /// TUI errors
    #[error("TUI error: {0}")]
    Tui(String),
}

impl JournalError {
    /// Create a "not found" error for services
    pub fn service_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Service",
            identifier: identifier.into(),
        }
    }

    /// Create a "not found" error for journal entries
    pub fn entry_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Journal entry",
            identifier: identifier.into(),
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// Check if this error came from the transport layer
    pub fn is_network(&self) -> bool {
        matches!(self, Self::Network(_))
    }
}

impl From<std::io::Error> for JournalError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for JournalError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

/// Result type alias for journal-desk operations
pub type JournalResult<T> = Result<T, JournalError>;
