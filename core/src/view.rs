//! State machine behind the filterable character list.
//!
//! # Design
//! The view never performs I/O. Every filter change hands back a
//! `FetchTicket`; the host executes the request for `ticket.filters` and
//! reports the result through `finish_fetch`. Each ticket carries a
//! `FetchToken` from a monotonically increasing counter, and only the latest
//! issued token may change the list. A response for a superseded filter pair
//! is dropped even if it arrives last.
//!
//! A failed fetch clears the loading flag and keeps whatever list is shown.

use tracing::{debug, error};

use crate::client::CharacterClient;
use crate::error::FetchError;
use crate::transport::Transport;
use crate::types::{Character, Filters, GenderFilter, StatusFilter};

/// Identifies one issued fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FetchToken(u64);

impl FetchToken {
    pub fn new(raw: u64) -> Self {
        Self(raw)
    }

    pub fn get(self) -> u64 {
        self.0
    }
}

/// A fetch the host must execute: request `filters`, then report back with
/// `token`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchTicket {
    pub token: FetchToken,
    pub filters: Filters,
}

/// What a picker reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection<F> {
    /// A candidate value, or `All` to clear the filter.
    Pick(F),
    Cancel,
}

/// How `finish_fetch` handled a result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOutcome {
    /// The list was replaced.
    Applied,
    /// The fetch failed; the list was kept.
    Failed,
    /// A newer fetch was issued after this one; the result was dropped.
    Stale,
}

#[derive(Debug)]
pub struct CharacterListView {
    filters: Filters,
    characters: Vec<Character>,
    loading: bool,
    gender_picker_open: bool,
    status_picker_open: bool,
    issued: u64,
}

impl Default for CharacterListView {
    fn default() -> Self {
        Self::new()
    }
}

impl CharacterListView {
    pub fn new() -> Self {
        Self {
            filters: Filters::default(),
            characters: Vec::new(),
            loading: true,
            gender_picker_open: false,
            status_picker_open: false,
            issued: 0,
        }
    }

    pub fn filters(&self) -> Filters {
        self.filters
    }

    pub fn characters(&self) -> &[Character] {
        &self.characters
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn is_gender_picker_open(&self) -> bool {
        self.gender_picker_open
    }

    pub fn is_status_picker_open(&self) -> bool {
        self.status_picker_open
    }

    /// Token of the most recently issued fetch, if any.
    pub fn latest_token(&self) -> Option<FetchToken> {
        (self.issued > 0).then_some(FetchToken(self.issued))
    }

    /// Initial load for the current filters.
    pub fn mount(&mut self) -> FetchTicket {
        self.issue()
    }

    pub fn open_gender_picker(&mut self) {
        self.gender_picker_open = true;
    }

    pub fn open_status_picker(&mut self) {
        self.status_picker_open = true;
    }

    /// Apply the gender picker's result and close it. Returns a ticket only
    /// when the filter value actually changed.
    pub fn choose_gender(&mut self, selection: Selection<GenderFilter>) -> Option<FetchTicket> {
        self.gender_picker_open = false;
        match selection {
            Selection::Pick(gender) if gender != self.filters.gender => {
                self.filters.gender = gender;
                Some(self.issue())
            }
            _ => None,
        }
    }

    /// Apply the status picker's result and close it. Returns a ticket only
    /// when the filter value actually changed.
    pub fn choose_status(&mut self, selection: Selection<StatusFilter>) -> Option<FetchTicket> {
        self.status_picker_open = false;
        match selection {
            Selection::Pick(status) if status != self.filters.status => {
                self.filters.status = status;
                Some(self.issue())
            }
            _ => None,
        }
    }

    /// Report the result of the fetch issued as `token`. Nothing has been
    /// issued before `mount`, so every result is stale until then.
    pub fn finish_fetch(
        &mut self,
        token: FetchToken,
        result: Result<Vec<Character>, FetchError>,
    ) -> FetchOutcome {
        if self.issued == 0 || token.0 != self.issued {
            debug!(token = token.0, latest = self.issued, "dropping stale fetch result");
            return FetchOutcome::Stale;
        }
        self.loading = false;
        match result {
            Ok(characters) => {
                self.characters = characters;
                FetchOutcome::Applied
            }
            Err(e) => {
                error!(error = %e, token = token.0, filters = ?self.filters, "fetch failed, keeping current list");
                FetchOutcome::Failed
            }
        }
    }

    /// Execute `ticket` through `transport` and apply the result.
    pub fn fulfill<T: Transport + ?Sized>(
        &mut self,
        client: &CharacterClient,
        transport: &T,
        ticket: FetchTicket,
    ) -> FetchOutcome {
        let result = client.fetch_characters(transport, ticket.filters);
        self.finish_fetch(ticket.token, result)
    }

    fn issue(&mut self) -> FetchTicket {
        self.issued += 1;
        self.loading = true;
        let ticket = FetchTicket {
            token: FetchToken(self.issued),
            filters: self.filters,
        };
        debug!(token = self.issued, filters = ?self.filters, "issuing fetch");
        ticket
    }
}
