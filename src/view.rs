//! State behind the filterable match list.
//!
//! Every filter change starts a new fetch cycle. Cycles are numbered and only
//! the most recent one may write its result, so a slow response for a filter
//! the user already left is dropped instead of overwriting the list.

use std::fmt::Display;

use chrono::TimeZone;
use itertools::Itertools;
use tracing::debug;

use crate::error::Result;
use crate::model::{FilterKey, Match};
use crate::pipeline::{self, MatchApi};
use crate::render;

/// Shown for any failed cycle; the underlying error is only logged.
pub const LOAD_ERROR_MESSAGE: &str = "Failed to load matches.";
pub const EMPTY_MESSAGE: &str = "No matches found.";
pub const LOADING_MESSAGE: &str = "Loading...";

/// Handle for one in-flight fetch cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchTicket {
    seq: u64,
    filter: FilterKey,
}

impl FetchTicket {
    pub fn filter(&self) -> FilterKey {
        self.filter
    }
}

#[derive(Debug)]
pub struct MatchListView {
    matches: Vec<Match>,
    loading: bool,
    error: Option<String>,
    filter: FilterKey,
    seq: u64,
}

impl MatchListView {
    pub fn new(filter: FilterKey) -> Self {
        Self {
            matches: Vec::new(),
            loading: true,
            error: None,
            filter,
            seq: 0,
        }
    }

    pub fn matches(&self) -> &[Match] {
        &self.matches
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn filter(&self) -> FilterKey {
        self.filter
    }

    /// Start the initial cycle.
    pub fn mount(&mut self) -> FetchTicket {
        self.begin_fetch()
    }

    /// Switch filters. Re-selecting the active filter starts nothing.
    pub fn select_filter(&mut self, filter: FilterKey) -> Option<FetchTicket> {
        if filter == self.filter {
            return None;
        }
        self.filter = filter;
        Some(self.begin_fetch())
    }

    /// Enter the loading state and hand out a ticket for the new cycle.
    pub fn begin_fetch(&mut self) -> FetchTicket {
        self.seq += 1;
        self.loading = true;
        self.error = None;
        FetchTicket {
            seq: self.seq,
            filter: self.filter,
        }
    }

    /// Apply the result of a cycle. Returns `false` if a newer cycle has
    /// started since `ticket` was issued, in which case nothing changes.
    pub fn complete(&mut self, ticket: FetchTicket, result: Result<Vec<Match>>) -> bool {
        if ticket.seq != self.seq {
            debug!(
                stale = ticket.seq,
                current = self.seq,
                "dropping superseded match list"
            );
            return false;
        }
        match result {
            Ok(matches) => self.matches = matches,
            Err(e) => {
                debug!(error = %e, filter = %ticket.filter, "match list failed");
                self.matches.clear();
                self.error = Some(LOAD_ERROR_MESSAGE.to_string());
            }
        }
        self.loading = false;
        true
    }

    /// Run the cycle for `ticket` and apply its result.
    pub async fn load<A: MatchApi>(&mut self, api: &A, ticket: FetchTicket) -> bool {
        let result = pipeline::fetch_matches(api, ticket.filter).await;
        self.complete(ticket, result)
    }

    /// Start and run a fresh cycle for the current filter.
    pub async fn refresh<A: MatchApi>(&mut self, api: &A) -> bool {
        let ticket = self.begin_fetch();
        self.load(api, ticket).await
    }

    /// Render the page: loading beats error, error beats content.
    pub fn render<Tz>(&self, base_url: &str, tz: &Tz) -> String
    where
        Tz: TimeZone,
        Tz::Offset: Display,
    {
        if self.loading {
            return LOADING_MESSAGE.to_string();
        }
        if let Some(error) = &self.error {
            return error.clone();
        }
        let body = if self.matches.is_empty() {
            EMPTY_MESSAGE.to_string()
        } else {
            self.matches
                .iter()
                .map(|m| render::render_card(m, base_url, tz))
                .join("\n\n")
        };
        format!("{}\n\n{body}", render::render_filter_bar(self.filter))
    }
}

impl Default for MatchListView {
    fn default() -> Self {
        Self::new(FilterKey::default())
    }
}
