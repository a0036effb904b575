//! Summary Statistics View

use std::fmt;

use crate::domain::aggregate::AggregateStats;
use crate::domain::month::Month;
use crate::state::FetchState;
use crate::utils::format::{format_count, format_currency};
use crate::views::Panel;

pub const STATISTICS_LOADING: &str = "Loading statistics...";
pub const STATISTICS_EMPTY: &str = "No statistics available";

/// Display-ready summary figures
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatsFigures {
    pub total_sale: String,
    pub sold: String,
    pub unsold: String,
}

impl From<&AggregateStats> for StatsFigures {
    fn from(stats: &AggregateStats) -> Self {
        Self {
            total_sale: format_currency(stats.total_sale_amount),
            sold: format_count(stats.total_sold_count),
            unsold: format_count(stats.total_unsold_count),
        }
    }
}

/// Projection of the summary statistics fetch state
#[derive(Debug, Clone, PartialEq)]
pub struct StatisticsDisplay {
    pub title: String,
    pub body: Panel<StatsFigures>,
}

impl StatisticsDisplay {
    pub fn project(month: Month, state: &FetchState<AggregateStats>) -> Self {
        Self {
            title: format!("Statistics for {month}"),
            body: Panel::project(state, STATISTICS_LOADING, STATISTICS_EMPTY, |stats| {
                Some(StatsFigures::from(stats))
            }),
        }
    }
}

impl fmt::Display for StatisticsDisplay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.title)?;
        if let Some(figures) = self.body.write_status(f)? {
            writeln!(f, "  Total Sales:  {}", figures.total_sale)?;
            writeln!(f, "  Sold Items:   {}", figures.sold)?;
            writeln!(f, "  Unsold Items: {}", figures.unsold)?;
        }
        Ok(())
    }
}
