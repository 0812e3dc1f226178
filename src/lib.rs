//! journal-desk - terminal client for the sales and service journal
//!
//! This library provides the core of the `journal` binary: a typed client for
//! the journal API, reuse-or-create resolution of clients and vehicles,
//! search-as-you-type state, and the submission controller that turns a
//! filled-in form into a journal entry.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Configuration and path management
//! - `error`: Custom error types
//! - `models`: Records exchanged with the API (clients, vehicles, entries)
//! - `remote`: The [`Directory`](remote::Directory) port and its HTTP client
//! - `services`: Resolution, autocomplete and submission logic
//! - `cli`, `display`, `export`: The non-interactive command surface
//! - `tui`: The interactive interface
//! - `logging`: tracing subscriber setup
//!
//! # Example
//!
//! ```rust,ignore
//! use journal_desk::config::{JournalPaths, Settings};
//! use journal_desk::remote::HttpDirectory;
//!
//! let paths = JournalPaths::new()?;
//! let settings = Settings::load_or_create(&paths)?;
//! let directory = HttpDirectory::from_settings(&settings)?;
//! ```

pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod export;
pub mod logging;
pub mod models;
pub mod remote;
pub mod services;
pub mod tui;

pub use error::{JournalError, JournalResult};
