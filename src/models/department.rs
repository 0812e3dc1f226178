//! Department model
//!
//! The business context of a journal entry. The department decides whether a
//! vehicle and a service belong to the entry.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::JournalError;

/// Department a journal entry belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Department {
    #[default]
    Sales,
    Service,
}

impl Department {
    /// All departments in tab order
    pub const ALL: [Department; 2] = [Department::Sales, Department::Service];

    /// Wire name used in query strings and payloads
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Sales => "sales",
            Self::Service => "service",
        }
    }

    /// Human readable title for tabs and headers
    pub fn title(&self) -> &'static str {
        match self {
            Self::Sales => "Sales",
            Self::Service => "Service",
        }
    }

    /// Whether entries of this department carry a vehicle and a service
    pub fn requires_vehicle(&self) -> bool {
        matches!(self, Self::Service)
    }

    /// The other department (tab switching)
    pub fn toggle(self) -> Self {
        match self {
            Self::Sales => Self::Service,
            Self::Service => Self::Sales,
        }
    }
}

impl fmt::Display for Department {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Department {
    type Err = JournalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "sales" => Ok(Self::Sales),
            "service" => Ok(Self::Service),
            other => Err(JournalError::Validation(format!(
                "Unknown department '{}': expected 'sales' or 'service'",
                other
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse() {
        assert_eq!("sales".parse::<Department>().unwrap(), Department::Sales);
        assert_eq!(" Service ".parse::<Department>().unwrap(), Department::Service);
        assert!("parts".parse::<Department>().unwrap_err().is_validation());
    }

    #[test]
    fn test_requires_vehicle() {
        assert!(!Department::Sales.requires_vehicle());
        assert!(Department::Service.requires_vehicle());
    }

    #[test]
    fn test_serde_lowercase() {
        assert_eq!(
            serde_json::to_string(&Department::Service).unwrap(),
            "\"service\""
        );
    }

    #[test]
    fn test_toggle() {
        assert_eq!(Department::Sales.toggle(), Department::Service);
        assert_eq!(Department::Service.toggle(), Department::Sales);
    }
}
