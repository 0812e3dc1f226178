//! Tracing setup
//!
//! The CLI logs to stderr. The TUI owns the terminal, so it logs to a file
//! under the config directory instead. `JOURNAL_DESK_LOG` takes an
//! `EnvFilter` directive and overrides the `log_level` setting.

use std::fs::OpenOptions;
use std::sync::Mutex;

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::{JournalPaths, Settings};
use crate::error::{JournalError, JournalResult};

/// Environment variable holding a filter directive
pub const LOG_ENV_VAR: &str = "JOURNAL_DESK_LOG";

/// Where log lines go
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogTarget {
    Stderr,
    File,
}

/// Build the filter from the environment, falling back to `default_level`
pub fn build_filter(default_level: &str) -> JournalResult<EnvFilter> {
    match std::env::var(LOG_ENV_VAR) {
        Ok(directive) if !directive.trim().is_empty() => EnvFilter::try_new(directive.trim())
            .map_err(|e| JournalError::Config(format!("Invalid {}: {}", LOG_ENV_VAR, e))),
        _ => EnvFilter::try_new(default_level)
            .map_err(|e| JournalError::Config(format!("Invalid log_level: {}", e))),
    }
}

/// Install the global subscriber
pub fn init(target: LogTarget, paths: &JournalPaths, settings: &Settings) -> JournalResult<()> {
    let filter = build_filter(&settings.log_level)?;

    let installed = match target {
        LogTarget::Stderr => tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
            .try_init(),
        LogTarget::File => {
            paths.ensure_directories()?;
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(paths.log_file())
                .map_err(|e| JournalError::Io(format!("Failed to open log file: {}", e)))?;
            tracing_subscriber::registry()
                .with(filter)
                .with(fmt::layer().with_writer(Mutex::new(file)).with_ansi(false))
                .try_init()
        }
    };

    installed.map_err(|e| JournalError::Config(format!("Failed to initialise logging: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_level_filter() {
        assert!(EnvFilter::try_new("info").is_ok());
        assert!(EnvFilter::try_new("journal_desk=debug,reqwest=warn").is_ok());
    }

    #[test]
    fn test_bad_level_is_config_error() {
        if std::env::var(LOG_ENV_VAR).is_ok() {
            return;
        }
        let err = build_filter("journal_desk=loudest").unwrap_err();
        assert!(matches!(err, JournalError::Config(_)));
    }
}
