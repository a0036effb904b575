//! Domain - Pure Data Structures and Wire Types
//!
//! These types don't depend on the runtime and represent the sales domain.

pub mod aggregate;
pub mod config;
pub mod month;
pub mod record;

pub use aggregate::{AggregateStats, HistogramBucket, PriceHistogram};
pub use config::AppConfig;
pub use month::Month;
pub use record::{Record, RecordId, RecordPage, RecordsQuery};
