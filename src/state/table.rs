//! TableState - Record Table View State
//!
//! Combines the month subscription, server pagination, the record page
//! fetcher and the client-side search filter. The filtered rows are derived
//! on every read from the page held right now, so a page or month change can
//! never leave rows of an older page behind.

use tracing::info;

use crate::domain::month::Month;
use crate::domain::record::{Record, RecordPage, RecordsQuery};
use crate::error::Result;
use crate::state::fetch_state::FetchState;
use crate::state::fetcher::{FetchTicket, RemoteDataFetcher};
use crate::state::filter::FilterState;
use crate::state::pagination::PaginationController;
use crate::state::selector::BucketSubscription;

/// Ticket of an in-flight record page request
pub type RecordsTicket = FetchTicket<RecordsQuery>;

/// State of the "All Transactions" table
#[derive(Debug)]
pub struct TableState {
    bucket: BucketSubscription,
    month: Month,
    pagination: PaginationController,
    filter: FilterState,
    fetcher: RemoteDataFetcher<RecordsQuery, RecordPage>,
}

impl TableState {
    pub fn new(bucket: BucketSubscription) -> Self {
        let month = bucket.current();
        Self {
            bucket,
            month,
            pagination: PaginationController::new(),
            filter: FilterState::default(),
            fetcher: RemoteDataFetcher::new("table", "transactions"),
        }
    }

    // ==================== Dependency Changes ====================

    /// React to a month change (page back to 1) and request the current page
    /// if it is not already loaded or loading
    pub fn sync(&mut self) -> Option<RecordsTicket> {
        if let Some(month) = self.bucket.take_change() {
            info!(month = %month, from_page = self.pagination.current_page(), "Table month changed");
            self.month = month;
            self.pagination.reset();
        }
        self.request_current()
    }

    /// Go to the next page; `None` when already on the last page
    pub fn next_page(&mut self) -> Option<RecordsTicket> {
        if !self.pagination.next_page() {
            return None;
        }
        self.request_current()
    }

    /// Go to the previous page; `None` when already on page 1
    pub fn prev_page(&mut self) -> Option<RecordsTicket> {
        if !self.pagination.prev_page() {
            return None;
        }
        self.request_current()
    }

    /// Replace the search text. Never triggers a fetch.
    pub fn set_query(&mut self, query: impl Into<String>) -> bool {
        self.filter.set_query(query)
    }

    fn request_current(&mut self) -> Option<RecordsTicket> {
        let query = RecordsQuery::new(self.month, self.pagination.current_page());
        self.fetcher.fetch(query)
    }

    // ==================== Completions ====================

    /// Apply a finished record page request
    ///
    /// Returns a follow-up ticket when the server reported fewer pages than
    /// the current page, which is then clamped and refetched.
    pub fn complete(
        &mut self,
        ticket: RecordsTicket,
        result: Result<RecordPage>,
    ) -> Option<RecordsTicket> {
        if !self.fetcher.complete(ticket, result) {
            return None;
        }

        let total_pages = self.fetcher.state().data()?.total_pages;
        if self.pagination.apply_total(total_pages) {
            info!(
                total_pages,
                page = self.pagination.current_page(),
                "Current page past the last page, clamping"
            );
            return self.request_current();
        }
        None
    }

    /// Whether `ticket` belongs to the request the table is waiting for
    pub fn is_current(&self, ticket: &RecordsTicket) -> bool {
        self.fetcher.is_current(ticket)
    }

    // ==================== Getters ====================

    pub fn month(&self) -> Month {
        self.month
    }

    pub fn state(&self) -> &FetchState<RecordPage> {
        self.fetcher.state()
    }

    pub fn pagination(&self) -> &PaginationController {
        &self.pagination
    }

    pub fn filter(&self) -> &FilterState {
        &self.filter
    }

    pub fn is_loading(&self) -> bool {
        self.fetcher.state().is_loading()
    }

    /// Loaded page records matching the search text
    pub fn visible_records(&self) -> Vec<&Record> {
        match self.fetcher.state() {
            FetchState::Success(page) => self.filter.filter(&page.records),
            _ => Vec::new(),
        }
    }
}
