//! AggregateState - Histogram and Statistics View State
//!
//! Both aggregation views re-fetch on the selected month only; they have no
//! local state besides their fetch state.

use tracing::debug;

use crate::domain::aggregate::{AggregateStats, PriceHistogram};
use crate::domain::month::Month;
use crate::error::Result;
use crate::state::fetch_state::FetchState;
use crate::state::fetcher::{FetchTicket, RemoteDataFetcher};
use crate::state::selector::BucketSubscription;

/// Ticket of an in-flight aggregate request
pub type AggregateTicket = FetchTicket<Month>;

/// Month-keyed remote data for one aggregation view
#[derive(Debug)]
pub struct AggregateState<T> {
    bucket: BucketSubscription,
    month: Month,
    fetcher: RemoteDataFetcher<Month, T>,
}

/// Price range histogram view state
pub type HistogramState = AggregateState<PriceHistogram>;

/// Summary statistics view state
pub type StatisticsState = AggregateState<AggregateStats>;

impl<T> AggregateState<T> {
    pub fn new(bucket: BucketSubscription, view: &'static str, what: &'static str) -> Self {
        let month = bucket.current();
        Self {
            bucket,
            month,
            fetcher: RemoteDataFetcher::new(view, what),
        }
    }

    /// React to a month change and request the month if not already
    /// loaded or loading
    pub fn sync(&mut self) -> Option<AggregateTicket> {
        if let Some(month) = self.bucket.take_change() {
            debug!(view = self.fetcher.view(), month = %month, "Month changed");
            self.month = month;
        }
        self.fetcher.fetch(self.month)
    }

    /// Apply a finished request; `false` if it was stale
    pub fn complete(&mut self, ticket: AggregateTicket, result: Result<T>) -> bool {
        self.fetcher.complete(ticket, result)
    }

    pub fn month(&self) -> Month {
        self.month
    }

    pub fn state(&self) -> &FetchState<T> {
        self.fetcher.state()
    }

    pub fn is_loading(&self) -> bool {
        self.fetcher.state().is_loading()
    }
}

impl HistogramState {
    pub fn histogram(bucket: BucketSubscription) -> Self {
        Self::new(bucket, "histogram", "price range statistics")
    }
}

impl StatisticsState {
    pub fn statistics(bucket: BucketSubscription) -> Self {
        Self::new(bucket, "statistics", "statistics")
    }
}
