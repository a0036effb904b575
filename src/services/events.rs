//! Service Events
//!
//! Completions emitted by the service layer to be consumed by the state
//! layer. Each event carries the ticket its request was issued with, so the
//! owning view can tell whether the result is still wanted.

use crate::domain::aggregate::{AggregateStats, PriceHistogram};
use crate::domain::record::RecordPage;
use crate::error::Result;
use crate::state::{AggregateTicket, RecordsTicket};

/// Events emitted by the service layer
#[derive(Debug)]
pub enum ServiceEvent {
    /// A record page request finished
    RecordsFetched {
        ticket: RecordsTicket,
        result: Result<RecordPage>,
    },

    /// A price histogram request finished
    HistogramFetched {
        ticket: AggregateTicket,
        result: Result<PriceHistogram>,
    },

    /// A summary statistics request finished
    StatisticsFetched {
        ticket: AggregateTicket,
        result: Result<AggregateStats>,
    },
}

impl ServiceEvent {
    /// Name of the view the event belongs to
    pub fn view(&self) -> &'static str {
        match self {
            ServiceEvent::RecordsFetched { .. } => "table",
            ServiceEvent::HistogramFetched { .. } => "histogram",
            ServiceEvent::StatisticsFetched { .. } => "statistics",
        }
    }
}
