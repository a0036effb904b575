//! Dashboard - Owner of the Month Selector and the Three Views
//!
//! User actions are handled synchronously: the selection is committed, every
//! view syncs, and the resulting requests are issued before the call returns.
//! Completions come back as [`ServiceEvent`]s and are applied one at a time
//! by whoever owns the dashboard, so an older completion can never be applied
//! before the dependency change that superseded it.

use std::time::{Duration, Instant};

use chrono::{DateTime, Local};
use crossbeam_channel::{Receiver, RecvTimeoutError};
use tracing::debug;

use crate::domain::month::Month;
use crate::services::{ServiceEvent, ServiceHub};
use crate::state::aggregate::{HistogramState, StatisticsState};
use crate::state::selector::TimeBucketSelector;
use crate::state::table::TableState;

/// Monthly sales dashboard state
pub struct Dashboard {
    selector: TimeBucketSelector,
    table: TableState,
    histogram: HistogramState,
    statistics: StatisticsState,
    hub: ServiceHub,
    /// Completions from the service layer
    events: Receiver<ServiceEvent>,
    /// When a completion was last committed to a view
    last_update: Option<DateTime<Local>>,
}

impl Dashboard {
    /// Create the dashboard on `month` and request all three views
    pub fn new(hub: ServiceHub, month: Month) -> Self {
        let selector = TimeBucketSelector::new(month);
        let table = TableState::new(selector.subscribe());
        let histogram = HistogramState::histogram(selector.subscribe());
        let statistics = StatisticsState::statistics(selector.subscribe());
        let events = hub.events();

        let mut dashboard = Self {
            selector,
            table,
            histogram,
            statistics,
            hub,
            events,
            last_update: None,
        };
        dashboard.sync();
        dashboard
    }

    /// Let every view react to the current selection and issue what it needs
    fn sync(&mut self) {
        if let Some(ticket) = self.table.sync() {
            self.hub.request_records(ticket);
        }
        if let Some(ticket) = self.histogram.sync() {
            self.hub.request_histogram(ticket);
        }
        if let Some(ticket) = self.statistics.sync() {
            self.hub.request_statistics(ticket);
        }
    }

    // ==================== User Actions ====================

    /// Select a month; `false` (and no request) when it is already selected
    pub fn select_month(&mut self, month: Month) -> bool {
        if !self.selector.select(month) {
            return false;
        }
        self.sync();
        true
    }

    /// Go to the next table page; `false` when already on the last page
    pub fn next_page(&mut self) -> bool {
        match self.table.next_page() {
            Some(ticket) => {
                self.hub.request_records(ticket);
                true
            }
            None => false,
        }
    }

    /// Go to the previous table page; `false` when already on page 1
    pub fn prev_page(&mut self) -> bool {
        match self.table.prev_page() {
            Some(ticket) => {
                self.hub.request_records(ticket);
                true
            }
            None => false,
        }
    }

    /// Replace the table search text
    pub fn set_search(&mut self, query: impl Into<String>) -> bool {
        self.table.set_query(query)
    }

    // ==================== Event Processing ====================

    /// Apply every completion already received; returns how many were taken
    pub fn process_pending(&mut self) -> usize {
        let batch: Vec<ServiceEvent> = self.events.try_iter().collect();
        let count = batch.len();
        for event in batch {
            self.apply_event(event);
        }
        count
    }

    /// Wait up to `timeout` for one completion and apply it
    ///
    /// Returns `false` if nothing arrived in time.
    pub fn wait_for_event(&mut self, timeout: Duration) -> bool {
        match self.events.recv_timeout(timeout) {
            Ok(event) => {
                self.apply_event(event);
                true
            }
            Err(RecvTimeoutError::Timeout) => false,
            // The hub keeps a sender alive for as long as the dashboard lives
            Err(RecvTimeoutError::Disconnected) => false,
        }
    }

    /// Apply completions until no view is loading or `timeout` elapses
    ///
    /// Returns `true` if every view settled.
    pub fn settle(&mut self, timeout: Duration) -> bool {
        let deadline = Instant::now() + timeout;
        loop {
            self.process_pending();
            if !self.is_loading() {
                return true;
            }
            let remaining = deadline.saturating_duration_since(Instant::now());
            if remaining.is_zero() || !self.wait_for_event(remaining) {
                return !self.is_loading();
            }
        }
    }

    /// Apply a single completion to the view it belongs to
    fn apply_event(&mut self, event: ServiceEvent) {
        let view = event.view();
        let applied = match event {
            ServiceEvent::RecordsFetched { ticket, result } => {
                let applied = self.table.is_current(&ticket);
                if let Some(follow_up) = self.table.complete(ticket, result) {
                    self.hub.request_records(follow_up);
                }
                applied
            }
            ServiceEvent::HistogramFetched { ticket, result } => {
                self.histogram.complete(ticket, result)
            }
            ServiceEvent::StatisticsFetched { ticket, result } => {
                self.statistics.complete(ticket, result)
            }
        };

        if applied {
            self.last_update = Some(Local::now());
            debug!(view, "Completion applied");
        }
    }

    // ==================== Getters ====================

    /// Whether any view is waiting for a response
    pub fn is_loading(&self) -> bool {
        self.table.is_loading() || self.histogram.is_loading() || self.statistics.is_loading()
    }

    pub fn current_month(&self) -> Month {
        self.selector.current_bucket()
    }

    pub fn table(&self) -> &TableState {
        &self.table
    }

    pub fn histogram(&self) -> &HistogramState {
        &self.histogram
    }

    pub fn statistics(&self) -> &StatisticsState {
        &self.statistics
    }

    pub fn last_update(&self) -> Option<DateTime<Local>> {
        self.last_update
    }
}

impl std::fmt::Debug for Dashboard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dashboard")
            .field("month", &self.current_month())
            .field("page", &self.table.pagination().current_page())
            .field("table", &self.table.state().label())
            .field("histogram", &self.histogram.state().label())
            .field("statistics", &self.statistics.state().label())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::aggregate::{AggregateStats, PriceHistogram};
    use crate::domain::record::{RecordPage, RecordsQuery, RecordsResponse};
    use crate::error::{Error, Result};
    use crate::services::SalesApi;
    use crate::state::fetch_state::FetchState;
    use futures::FutureExt;
    use futures::future::BoxFuture;
    use serde_json::{Value, json};
    use std::sync::{Arc, Mutex};
    use tokio::runtime::Runtime;
    use tokio::sync::oneshot;

    const WAIT: Duration = Duration::from_secs(5);

    type Gate = oneshot::Sender<Result<Value>>;

    /// Sales API whose responses are released by the test
    #[derive(Default)]
    struct ManualApi {
        gates: Mutex<Vec<(String, Gate)>>,
    }

    impl ManualApi {
        fn gate(&self, key: String) -> oneshot::Receiver<Result<Value>> {
            let (tx, rx) = oneshot::channel();
            self.gates.lock().expect("gates").push((key, tx));
            rx
        }

        fn pending(&self) -> Vec<String> {
            let gates = self.gates.lock().expect("gates");
            gates.iter().map(|(key, _)| key.clone()).collect()
        }

        fn release(&self, key: &str, result: Result<Value>) {
            let mut gates = self.gates.lock().expect("gates");
            let index = gates
                .iter()
                .position(|(k, _)| k == key)
                .unwrap_or_else(|| panic!("no pending request {key}"));
            let (_, tx) = gates.remove(index);
            let _ = tx.send(result);
        }
    }

    async fn released(rx: oneshot::Receiver<Result<Value>>) -> Result<Value> {
        rx.await.map_err(|_| Error::Runtime {
            message: "gate dropped".to_string(),
        })?
    }

    async fn records(rx: oneshot::Receiver<Result<Value>>, query: RecordsQuery) -> Result<RecordPage> {
        let response: RecordsResponse = serde_json::from_value(released(rx).await?)?;
        Ok(RecordPage::from_response(query, response))
    }

    async fn histogram(rx: oneshot::Receiver<Result<Value>>) -> Result<PriceHistogram> {
        PriceHistogram::from_json(&released(rx).await?)
    }

    async fn summary(rx: oneshot::Receiver<Result<Value>>) -> Result<AggregateStats> {
        AggregateStats::from_json(&released(rx).await?)
    }

    impl SalesApi for ManualApi {
        fn fetch_records(&self, query: RecordsQuery) -> BoxFuture<'static, Result<RecordPage>> {
            let rx = self.gate(format!("records {} {}", query.month.code(), query.page));
            records(rx, query).boxed()
        }

        fn fetch_price_histogram(&self, month: Month) -> BoxFuture<'static, Result<PriceHistogram>> {
            histogram(self.gate(format!("histogram {month}"))).boxed()
        }

        fn fetch_summary(&self, month: Month) -> BoxFuture<'static, Result<AggregateStats>> {
            summary(self.gate(format!("summary {month}"))).boxed()
        }
    }

    fn runtime() -> Runtime {
        tokio::runtime::Builder::new_multi_thread()
            .worker_threads(1)
            .enable_all()
            .build()
            .expect("runtime")
    }

    fn dashboard(runtime: &Runtime, month: Month) -> (Dashboard, Arc<ManualApi>) {
        let api = Arc::new(ManualApi::default());
        let hub = ServiceHub::new(api.clone(), runtime.handle().clone());
        (Dashboard::new(hub, month), api)
    }

    fn page_body(title: &str, total_pages: u32) -> Value {
        json!({
            "records": [{
                "id": 1,
                "title": title,
                "description": "",
                "price": 9.5,
                "category": "Tools",
                "sold": false,
                "image": ""
            }],
            "totalPages": total_pages
        })
    }

    fn summary_body(amount: f64) -> Value {
        json!({ "totalSaleAmount": amount, "totalSoldItems": 1, "totalNotSoldItems": 0 })
    }

    #[test]
    fn test_creation_requests_all_views() {
        let rt = runtime();
        let (dashboard, api) = dashboard(&rt, Month::Mar);

        assert!(dashboard.is_loading());
        assert!(dashboard.table().is_loading());
        assert!(dashboard.histogram().is_loading());
        assert!(dashboard.statistics().is_loading());

        let mut pending = api.pending();
        pending.sort();
        assert_eq!(
            pending,
            vec!["histogram Mar", "records 03 1", "summary Mar"]
        );
    }

    #[test]
    fn test_reselecting_same_month_issues_nothing() {
        let rt = runtime();
        let (mut dashboard, api) = dashboard(&rt, Month::Mar);

        assert!(!dashboard.select_month(Month::Mar));
        assert_eq!(api.pending().len(), 3);
    }

    #[test]
    fn test_stale_completion_does_not_overwrite_newer_month() {
        let rt = runtime();
        let (mut dashboard, api) = dashboard(&rt, Month::Jan);
        assert!(dashboard.select_month(Month::Feb));

        api.release("summary Feb", Ok(summary_body(200.0)));
        api.release("summary Jan", Ok(summary_body(100.0)));
        assert!(dashboard.wait_for_event(WAIT));
        assert!(dashboard.wait_for_event(WAIT));

        assert_eq!(dashboard.statistics().month(), Month::Feb);
        let stats = dashboard.statistics().state().data().expect("feb summary");
        assert_eq!(stats.total_sale_amount, 200.0);
    }

    #[test]
    fn test_month_change_resets_page_and_reloads_all_views() {
        let rt = runtime();
        let (mut dashboard, api) = dashboard(&rt, Month::Mar);

        api.release("records 03 1", Ok(page_body("Widget", 3)));
        api.release("histogram Mar", Ok(json!({ "0-50": 1 })));
        api.release("summary Mar", Ok(summary_body(9.5)));
        assert!(dashboard.settle(WAIT));
        assert!(dashboard.last_update().is_some());

        assert!(dashboard.next_page());
        api.release("records 03 2", Ok(page_body("Gadget", 3)));
        assert!(dashboard.settle(WAIT));
        assert_eq!(dashboard.table().pagination().current_page(), 2);

        assert!(dashboard.select_month(Month::Apr));
        assert_eq!(dashboard.table().pagination().current_page(), 1);
        assert!(dashboard.table().is_loading());
        assert!(dashboard.histogram().is_loading());
        assert!(dashboard.statistics().is_loading());
        assert!(api.pending().contains(&"records 04 1".to_string()));
    }

    #[test]
    fn test_failure_stays_local_to_its_view() {
        let rt = runtime();
        let (mut dashboard, api) = dashboard(&rt, Month::Mar);

        api.release("records 03 1", Ok(page_body("Widget", 1)));
        api.release("histogram Mar", Ok(json!({ "0-50": 3, "51-100": 0 })));
        api.release(
            "summary Mar",
            Err(Error::Server {
                status: reqwest::StatusCode::INTERNAL_SERVER_ERROR,
            }),
        );
        assert!(dashboard.settle(WAIT));

        assert!(dashboard.table().state().is_success());
        assert!(dashboard.histogram().state().is_success());
        let reason = dashboard
            .statistics()
            .state()
            .error_message()
            .expect("failure");
        assert!(reason.starts_with("Failed to fetch statistics"));
    }

    #[test]
    fn test_shrinking_page_count_refetches_last_page() {
        let rt = runtime();
        let (mut dashboard, api) = dashboard(&rt, Month::Mar);
        api.release("records 03 1", Ok(page_body("Widget", 3)));
        assert!(dashboard.wait_for_event(WAIT));

        assert!(dashboard.next_page());
        api.release("records 03 2", Ok(page_body("Widget", 3)));
        assert!(dashboard.wait_for_event(WAIT));

        assert!(dashboard.next_page());
        api.release("records 03 3", Ok(page_body("Gone", 2)));
        assert!(dashboard.wait_for_event(WAIT));

        assert_eq!(dashboard.table().pagination().current_page(), 2);
        assert!(dashboard.table().is_loading());
        api.release("records 03 2", Ok(page_body("Widget", 2)));
        assert!(dashboard.wait_for_event(WAIT));
        assert!(matches!(dashboard.table().state(), FetchState::Success(page) if page.page_number == 2));
    }

    #[test]
    fn test_search_never_fetches() {
        let rt = runtime();
        let (mut dashboard, api) = dashboard(&rt, Month::Mar);
        api.release("records 03 1", Ok(page_body("Widget", 1)));
        assert!(dashboard.wait_for_event(WAIT));

        assert!(dashboard.set_search("gadget"));
        assert!(dashboard.table().visible_records().is_empty());
        assert!(dashboard.set_search(" WID "));
        assert_eq!(dashboard.table().visible_records().len(), 1);
        assert_eq!(api.pending().len(), 2);
    }
}
