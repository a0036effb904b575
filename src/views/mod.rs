//! Views
//!
//! Pure projections of view state into display structs, plus their plain
//! text rendering for the console.
//!
//! ## Layout
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                 Sales Dashboard - <month>                   │
//! ├─────────────────────────────────────────────────────────────┤
//! │                 TableDisplay (All Transactions)             │
//! ├──────────────────────────────┬──────────────────────────────┤
//! │  StatisticsDisplay           │  HistogramDisplay            │
//! └──────────────────────────────┴──────────────────────────────┘
//! ```

mod histogram;
mod statistics;
mod table;

pub use histogram::*;
pub use statistics::*;
pub use table::*;

use std::fmt;

use crate::state::{Dashboard, FetchState};
use crate::utils::format::format_time;

/// What a view shows in place of (or as) its data
#[derive(Debug, Clone, PartialEq)]
pub enum Panel<T> {
    Loading(&'static str),
    Failed(String),
    Empty(&'static str),
    Ready(T),
}

impl<T> Panel<T> {
    /// Project a fetch state; `Idle` and empty data show `empty`
    pub fn project<U>(
        state: &FetchState<U>,
        loading: &'static str,
        empty: &'static str,
        project: impl FnOnce(&U) -> Option<T>,
    ) -> Self {
        match state {
            FetchState::Idle => Panel::Empty(empty),
            FetchState::Loading => Panel::Loading(loading),
            FetchState::Failure(reason) => Panel::Failed(reason.to_string()),
            FetchState::Success(data) => match project(data) {
                Some(ready) => Panel::Ready(ready),
                None => Panel::Empty(empty),
            },
        }
    }

    pub fn ready(&self) -> Option<&T> {
        match self {
            Panel::Ready(data) => Some(data),
            _ => None,
        }
    }

    /// Write the non-data states; returns the data if there is any
    fn write_status(&self, f: &mut fmt::Formatter<'_>) -> Result<Option<&T>, fmt::Error> {
        match self {
            Panel::Loading(message) | Panel::Empty(message) => {
                writeln!(f, "  {message}")?;
                Ok(None)
            }
            Panel::Failed(reason) => {
                writeln!(f, "  Error: {reason}")?;
                Ok(None)
            }
            Panel::Ready(data) => Ok(Some(data)),
        }
    }
}

/// Everything the dashboard shows at one instant
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardDisplay {
    pub title: String,
    pub updated_at: Option<String>,
    pub table: TableDisplay,
    pub statistics: StatisticsDisplay,
    pub histogram: HistogramDisplay,
}

impl DashboardDisplay {
    pub fn project(dashboard: &Dashboard, histogram_width: usize) -> Self {
        Self {
            title: format!("Sales Dashboard - {}", dashboard.current_month().name()),
            updated_at: dashboard.last_update().as_ref().map(format_time),
            table: TableDisplay::project(dashboard.table()),
            statistics: StatisticsDisplay::project(
                dashboard.statistics().month(),
                dashboard.statistics().state(),
            ),
            histogram: HistogramDisplay::project(
                dashboard.histogram().month(),
                dashboard.histogram().state(),
                histogram_width,
            ),
        }
    }
}

impl fmt::Display for DashboardDisplay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rule = "=".repeat(self.title.chars().count());
        writeln!(f, "{rule}")?;
        writeln!(f, "{}", self.title)?;
        writeln!(f, "{rule}")?;
        writeln!(f)?;
        writeln!(f, "{}", self.table)?;
        writeln!(f, "{}", self.statistics)?;
        write!(f, "{}", self.histogram)?;
        if let Some(updated_at) = &self.updated_at {
            writeln!(f)?;
            writeln!(f, "Last updated {updated_at}")?;
        }
        Ok(())
    }
}
