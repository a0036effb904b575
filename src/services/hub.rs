//! Service Hub
//!
//! Issues remote requests for the state layer and multiplexes their
//! completions into a single channel, drained by the [`Dashboard`] on its
//! own thread.
//!
//! [`Dashboard`]: crate::state::Dashboard

use std::sync::Arc;

use crossbeam_channel::{Receiver, Sender};
use tokio::runtime::Handle;
use tracing::info;

use crate::error::Result;
use crate::services::{ServiceEvent, SalesApi, runtime_handle, spawn_named};
use crate::state::{AggregateTicket, RecordsTicket};

/// Central hub for remote requests
pub struct ServiceHub {
    /// Remote sales service
    api: Arc<dyn SalesApi>,
    /// Runtime the requests are awaited on
    runtime: Handle,
    /// Event sender (cloned into every request task)
    tx: Sender<ServiceEvent>,
    /// Event receiver (for the state layer)
    rx: Receiver<ServiceEvent>,
}

impl ServiceHub {
    /// Create a hub awaiting requests on `runtime`
    pub fn new(api: Arc<dyn SalesApi>, runtime: Handle) -> Self {
        let (tx, rx) = crossbeam_channel::unbounded();
        Self {
            api,
            runtime,
            tx,
            rx,
        }
    }

    /// Create a hub on the shared runtime
    pub fn with_shared_runtime(api: Arc<dyn SalesApi>) -> Result<Self> {
        Ok(Self::new(api, runtime_handle()?))
    }

    /// Get the event receiver for the state layer
    pub fn events(&self) -> Receiver<ServiceEvent> {
        self.rx.clone()
    }

    // ==================== Requests ====================
    //
    // The request is issued before returning; only its completion is
    // awaited on the runtime.

    /// Request the record page of `ticket`
    pub fn request_records(&self, ticket: RecordsTicket) {
        info!(query = %ticket.params(), generation = ticket.generation(), "Fetching records");
        let response = self.api.fetch_records(*ticket.params());
        let tx = self.tx.clone();
        spawn_named(&self.runtime, "records", async move {
            let result = response.await;
            let _ = tx.send(ServiceEvent::RecordsFetched { ticket, result });
        });
    }

    /// Request the price histogram of `ticket`
    pub fn request_histogram(&self, ticket: AggregateTicket) {
        info!(month = %ticket.params(), generation = ticket.generation(), "Fetching price histogram");
        let response = self.api.fetch_price_histogram(*ticket.params());
        let tx = self.tx.clone();
        spawn_named(&self.runtime, "price-histogram", async move {
            let result = response.await;
            let _ = tx.send(ServiceEvent::HistogramFetched { ticket, result });
        });
    }

    /// Request the summary statistics of `ticket`
    pub fn request_statistics(&self, ticket: AggregateTicket) {
        info!(month = %ticket.params(), generation = ticket.generation(), "Fetching statistics");
        let response = self.api.fetch_summary(*ticket.params());
        let tx = self.tx.clone();
        spawn_named(&self.runtime, "statistics", async move {
            let result = response.await;
            let _ = tx.send(ServiceEvent::StatisticsFetched { ticket, result });
        });
    }
}

impl std::fmt::Debug for ServiceHub {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceHub")
            .field("pending_events", &self.rx.len())
            .finish()
    }
}
