//! RemoteDataFetcher - Request Cycle and Stale-Response Discard
//!
//! Every dependency change starts a new cycle: the state flips to `Loading`
//! and a [`FetchTicket`] is handed out for the request. A completion is
//! committed only if its ticket still belongs to the current cycle, so a
//! slow response for old parameters can never overwrite newer state.

use std::fmt::Debug;
use std::sync::Arc;

use tracing::{debug, error, warn};

use crate::error::Error;
use crate::state::fetch_state::FetchState;

/// The dependency snapshot an in-flight request was issued with
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchTicket<P> {
    generation: u64,
    params: P,
}

impl<P> FetchTicket<P> {
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn params(&self) -> &P {
        &self.params
    }
}

/// Owns one view's [`FetchState`] and the parameters it belongs to
#[derive(Debug)]
pub struct RemoteDataFetcher<P, T> {
    /// View name (for logging)
    view: &'static str,
    /// What is fetched, used in failure reasons ("Failed to fetch <what>")
    what: &'static str,
    /// Parameters of the current cycle
    params: Option<P>,
    /// Current cycle number; bumped on every issued request
    generation: u64,
    state: FetchState<T>,
}

impl<P, T> RemoteDataFetcher<P, T>
where
    P: Clone + PartialEq + Debug,
{
    pub fn new(view: &'static str, what: &'static str) -> Self {
        Self {
            view,
            what,
            params: None,
            generation: 0,
            state: FetchState::Idle,
        }
    }

    /// Start a cycle for `params`
    ///
    /// Flips to `Loading` before returning. Returns `None` when `params` are
    /// the parameters of the current cycle: no duplicate call is issued.
    pub fn fetch(&mut self, params: P) -> Option<FetchTicket<P>> {
        if !matches!(self.state, FetchState::Idle) && self.params.as_ref() == Some(&params) {
            debug!(view = self.view, ?params, "Parameters unchanged, not refetching");
            return None;
        }

        self.generation += 1;
        self.params = Some(params.clone());
        self.state = FetchState::Loading;
        debug!(view = self.view, generation = self.generation, ?params, "Fetch started");

        Some(FetchTicket {
            generation: self.generation,
            params,
        })
    }

    /// Commit the outcome of the request issued with `ticket`
    ///
    /// Returns `false` (and leaves the state untouched) when the ticket is
    /// stale.
    pub fn complete(&mut self, ticket: FetchTicket<P>, result: Result<T, Error>) -> bool {
        if !self.is_current(&ticket) {
            debug!(
                view = self.view,
                generation = ticket.generation,
                current = self.generation,
                params = ?ticket.params,
                "Discarding stale response"
            );
            return false;
        }

        self.state = match result {
            Ok(data) => FetchState::Success(data),
            Err(e) => {
                if e.is_fetch_error() {
                    warn!(view = self.view, params = ?ticket.params, error = %e, "Fetch failed");
                } else {
                    error!(view = self.view, params = ?ticket.params, error = %e, "Fetch failed");
                }
                FetchState::Failure(Arc::from(format!("Failed to fetch {}: {e}", self.what)))
            }
        };
        true
    }

    /// Whether `ticket` belongs to the cycle that is still loading
    pub fn is_current(&self, ticket: &FetchTicket<P>) -> bool {
        self.state.is_loading()
            && ticket.generation == self.generation
            && self.params.as_ref() == Some(&ticket.params)
    }

    pub fn state(&self) -> &FetchState<T> {
        &self.state
    }

    /// Parameters of the current cycle
    pub fn params(&self) -> Option<&P> {
        self.params.as_ref()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn view(&self) -> &'static str {
        self.view
    }
}
