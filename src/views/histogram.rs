//! Price Range Histogram View

use std::fmt;

use crate::domain::aggregate::PriceHistogram;
use crate::domain::month::Month;
use crate::state::FetchState;
use crate::utils::format::format_count;
use crate::views::Panel;

pub const HISTOGRAM_LOADING: &str = "Loading price range statistics...";
pub const HISTOGRAM_EMPTY: &str = "No data available";

/// One bar of the chart, in server order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BarDisplay {
    pub range_label: String,
    pub count: String,
    /// Bar length in characters, scaled against the largest count
    pub length: usize,
}

/// Projection of the price histogram fetch state
#[derive(Debug, Clone, PartialEq)]
pub struct HistogramDisplay {
    pub title: String,
    pub body: Panel<Vec<BarDisplay>>,
}

impl HistogramDisplay {
    pub fn project(month: Month, state: &FetchState<PriceHistogram>, width: usize) -> Self {
        Self {
            title: format!("Price Range Statistics - {month}"),
            body: Panel::project(state, HISTOGRAM_LOADING, HISTOGRAM_EMPTY, |histogram| {
                (!histogram.is_empty()).then(|| bars(histogram, width))
            }),
        }
    }

    pub fn bars(&self) -> &[BarDisplay] {
        self.body.ready().map(Vec::as_slice).unwrap_or_default()
    }
}

fn bars(histogram: &PriceHistogram, width: usize) -> Vec<BarDisplay> {
    let max = histogram.max_count();
    histogram
        .buckets()
        .iter()
        .map(|bucket| BarDisplay {
            range_label: bucket.range_label.clone(),
            count: format_count(bucket.count),
            length: bar_length(bucket.count, max, width),
        })
        .collect()
}

/// Scale `count` to `width`; any non-zero count gets at least one cell
fn bar_length(count: u64, max: u64, width: usize) -> usize {
    if count == 0 || max == 0 {
        return 0;
    }
    let scaled = (count as f64 / max as f64 * width as f64).round() as usize;
    scaled.clamp(1, width.max(1))
}

impl fmt::Display for HistogramDisplay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.title)?;
        if let Some(bars) = self.body.write_status(f)? {
            let label_width = bars
                .iter()
                .map(|bar| bar.range_label.chars().count())
                .max()
                .unwrap_or(0);
            for bar in bars {
                writeln!(
                    f,
                    "  {:>label_width$} | {} {}",
                    bar.range_label,
                    "#".repeat(bar.length),
                    bar.count
                )?;
            }
        }
        Ok(())
    }
}
