//! User settings for journal-desk
//!
//! Manages the API endpoint, search behaviour and display preferences.

use serde::{Deserialize, Serialize};

use super::paths::JournalPaths;
use crate::error::JournalError;
use crate::models::Department;

/// How autocomplete responses that arrive out of order are applied
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SearchOrdering {
    /// Whatever response arrives last is displayed, even if its query is older
    #[default]
    LastArrival,
    /// Responses older than the last applied one are discarded
    Sequenced,
}

/// User settings for journal-desk
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Base URL of the journal API, e.g. `http://127.0.0.1:8000/api/`
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    /// Per-request timeout
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    /// Minimum number of typed characters before a search is issued
    #[serde(default = "default_min_query_len")]
    pub min_query_len: usize,

    #[serde(default)]
    pub search_ordering: SearchOrdering,

    /// Tab shown when the TUI starts
    #[serde(default)]
    pub default_department: Department,

    /// Display format for entry timestamps (strftime format)
    #[serde(default = "default_date_format")]
    pub date_format: String,

    /// Default tracing filter, overridden by `JOURNAL_DESK_LOG`
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_schema_version() -> u32 {
    1
}

fn default_api_base_url() -> String {
    "http://127.0.0.1:8000/api/".to_string()
}

fn default_request_timeout_secs() -> u64 {
    10
}

fn default_min_query_len() -> usize {
    2
}

fn default_date_format() -> String {
    "%d.%m.%y %H:%M".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            api_base_url: default_api_base_url(),
            request_timeout_secs: default_request_timeout_secs(),
            min_query_len: default_min_query_len(),
            search_ordering: SearchOrdering::default(),
            default_department: Department::default(),
            date_format: default_date_format(),
            log_level: default_log_level(),
        }
    }
}

impl Settings {
    /// Load settings from disk, or return defaults if the file doesn't exist
    pub fn load_or_create(paths: &JournalPaths) -> Result<Self, JournalError> {
        let settings_path = paths.settings_file();

        if !settings_path.exists() {
            // Don't save yet - let caller decide when to persist
            return Ok(Settings::default());
        }

        let contents = std::fs::read_to_string(&settings_path)
            .map_err(|e| JournalError::Io(format!("Failed to read settings file: {}", e)))?;

        let settings: Settings = serde_json::from_str(&contents)
            .map_err(|e| JournalError::Config(format!("Failed to parse settings file: {}", e)))?;

        settings.validate()?;
        Ok(settings)
    }

    /// Save settings to disk
    pub fn save(&self, paths: &JournalPaths) -> Result<(), JournalError> {
        paths.ensure_directories()?;

        let contents = serde_json::to_string_pretty(self)
            .map_err(|e| JournalError::Config(format!("Failed to serialize settings: {}", e)))?;

        std::fs::write(paths.settings_file(), contents)
            .map_err(|e| JournalError::Io(format!("Failed to write settings file: {}", e)))?;

        Ok(())
    }

    /// Reject values the rest of the application cannot work with
    pub fn validate(&self) -> Result<(), JournalError> {
        if self.api_base_url.trim().is_empty() {
            return Err(JournalError::Config("api_base_url cannot be empty".into()));
        }
        if self.min_query_len == 0 {
            return Err(JournalError::Config(
                "min_query_len must be at least 1".into(),
            ));
        }
        if self.request_timeout_secs == 0 {
            return Err(JournalError::Config(
                "request_timeout_secs must be at least 1".into(),
            ));
        }
        Ok(())
    }

    /// Apply a command-line/environment override of the API URL
    pub fn with_api_base_url(mut self, url: Option<String>) -> Self {
        if let Some(url) = url {
            self.api_base_url = url;
        }
        self
    }
}
