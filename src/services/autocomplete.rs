//! Search-as-you-type state machine
//!
//! One `Autocomplete` per searchable field. Phases:
//! `Idle -> Searching -> ShowingResults -> Idle`.
//!
//! Requests are never cancelled. Under [`SearchOrdering::LastArrival`] the
//! last response to arrive wins, whichever query it answers; under
//! [`SearchOrdering::Sequenced`] responses older than the last applied one are
//! dropped.

use crate::config::SearchOrdering;
use crate::error::JournalResult;
use crate::models::{Client, Vehicle};
use crate::remote::Directory;

/// Current phase of a search field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SearchPhase {
    #[default]
    Idle,
    Searching,
    ShowingResults,
}

/// A search that was issued and whose response is pending
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchTicket {
    pub seq: u64,
    pub query: String,
}

/// State of one searchable field
#[derive(Debug, Clone)]
pub struct Autocomplete<T> {
    phase: SearchPhase,
    results: Vec<T>,
    error: Option<String>,
    min_query_len: usize,
    ordering: SearchOrdering,
    next_seq: u64,
    last_applied: Option<u64>,
}

pub type ClientSearch = Autocomplete<Client>;
pub type VehicleSearch = Autocomplete<Vehicle>;

impl<T> Autocomplete<T> {
    pub fn new(min_query_len: usize, ordering: SearchOrdering) -> Self {
        Self {
            phase: SearchPhase::Idle,
            results: Vec::new(),
            error: None,
            min_query_len,
            ordering,
            next_seq: 0,
            last_applied: None,
        }
    }

    pub fn phase(&self) -> SearchPhase {
        self.phase
    }

    pub fn results(&self) -> &[T] {
        &self.results
    }

    /// Message of the last failed search, shown in place of results
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn min_query_len(&self) -> usize {
        self.min_query_len
    }

    /// Whether `text` is long enough to be searched
    pub fn accepts(&self, text: &str) -> bool {
        text.chars().count() >= self.min_query_len
    }

    /// React to a text change
    ///
    /// Returns the ticket of the search to issue, or `None` when the text is
    /// too short. A short text leaves whatever results are displayed alone.
    pub fn on_input(&mut self, text: &str) -> Option<SearchTicket> {
        if !self.accepts(text) {
            return None;
        }
        self.next_seq += 1;
        self.phase = SearchPhase::Searching;
        Some(SearchTicket {
            seq: self.next_seq,
            query: text.to_string(),
        })
    }

    /// Apply the outcome of the search identified by `ticket`
    ///
    /// Returns `false` when the response was discarded as stale.
    pub fn apply(&mut self, ticket: &SearchTicket, outcome: JournalResult<Vec<T>>) -> bool {
        if self.ordering == SearchOrdering::Sequenced
            && self.last_applied.is_some_and(|last| ticket.seq <= last)
        {
            tracing::debug!(seq = ticket.seq, query = %ticket.query, "dropping stale search response");
            return false;
        }
        self.last_applied = Some(ticket.seq);

        match outcome {
            Ok(items) => {
                self.results = items;
                self.error = None;
                self.phase = SearchPhase::ShowingResults;
            }
            Err(err) => {
                tracing::warn!(query = %ticket.query, error = %err, "search failed");
                self.results.clear();
                self.error = Some(err.to_string());
                self.phase = SearchPhase::Idle;
            }
        }
        true
    }

    /// Drop results and error, back to `Idle`
    pub fn clear(&mut self) {
        self.results.clear();
        self.error = None;
        self.phase = SearchPhase::Idle;
    }
}

impl<T: Clone> Autocomplete<T> {
    /// Take the result at `index` and close the list
    pub fn choose(&mut self, index: usize) -> Option<T> {
        let chosen = self.results.get(index).cloned()?;
        self.clear();
        Some(chosen)
    }
}

/// Run a client search to completion for `text`
///
/// Issues nothing when the text is too short.
pub async fn search_clients<D: Directory + ?Sized>(
    directory: &D,
    search: &mut ClientSearch,
    text: &str,
) -> bool {
    let Some(ticket) = search.on_input(text) else {
        return false;
    };
    let outcome = directory.search_clients(&ticket.query).await;
    search.apply(&ticket, outcome)
}

/// Run a vehicle search by plate to completion for `text`
pub async fn search_vehicles<D: Directory + ?Sized>(
    directory: &D,
    search: &mut VehicleSearch,
    text: &str,
) -> bool {
    let Some(ticket) = search.on_input(text) else {
        return false;
    };
    let outcome = directory.search_vehicles_by_plate(&ticket.query).await;
    search.apply(&ticket, outcome)
}
