//! State - Dashboard View State
//!
//! One module per concern: the shared month selector, the generic remote
//! fetch lifecycle, and the per-view wiring built on top of them. Nothing in
//! here blocks or locks; completions are applied by the [`Dashboard`] owner.

pub mod aggregate;
pub mod dashboard;
pub mod fetch_state;
pub mod fetcher;
pub mod filter;
pub mod pagination;
pub mod selector;
pub mod table;

pub use aggregate::{AggregateState, AggregateTicket, HistogramState, StatisticsState};
pub use dashboard::Dashboard;
pub use fetch_state::FetchState;
pub use fetcher::{FetchTicket, RemoteDataFetcher};
pub use filter::FilterState;
pub use pagination::PaginationController;
pub use selector::{BucketSubscription, TimeBucketSelector};
pub use table::{RecordsTicket, TableState};
