//! Service Layer
//!
//! The service layer talks to the remote sales service and hands request
//! completions back to the state layer as events.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                      ServiceHub                             │
//! │  ┌──────────────────┐         ┌────────────────────────┐    │
//! │  │  dyn SalesApi    │         │  tokio runtime handle  │    │
//! │  │  (HttpSalesApi)  │         │  (request tasks)       │    │
//! │  └──────────────────┘         └────────────────────────┘    │
//! └─────────────────────────────────────────────────────────────┘
//!                            │
//!                            ▼ ServiceEvent
//! ┌─────────────────────────────────────────────────────────────┐
//! │                      State Layer                            │
//! │                      (Dashboard)                            │
//! └─────────────────────────────────────────────────────────────┘
//! ```

mod api;
mod events;
mod hub;
mod runtime;

pub use api::*;
pub use events::*;
pub use hub::*;
pub use runtime::*;
