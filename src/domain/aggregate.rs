//! Aggregate - Summary Statistics and Price Histogram
//!
//! Aggregate endpoints are decoded leniently: missing, null or non-numeric
//! values become zero instead of failing the whole response. Only a body of
//! the wrong overall shape is rejected.

use serde::Serialize;
use serde_json::Value;

use crate::error::{Error, Result};

/// Sales summary for one month. Replaced wholesale per fetch.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregateStats {
    pub total_sale_amount: f64,
    pub total_sold_count: u64,
    pub total_unsold_count: u64,
}

impl AggregateStats {
    /// Decode the summary endpoint body
    pub fn from_json(body: &Value) -> Result<Self> {
        let Value::Object(fields) = body else {
            return Err(Error::Parse {
                message: format!("expected a summary object, got {}", kind_of(body)),
            });
        };

        let field = |name: &str| fields.get(name).unwrap_or(&Value::Null);
        Ok(Self {
            total_sale_amount: coerce_amount(field("totalSaleAmount")),
            total_sold_count: coerce_count(field("totalSoldItems")),
            total_unsold_count: coerce_count(field("totalNotSoldItems")),
        })
    }

    /// Total number of items in the month
    pub fn total_items(&self) -> u64 {
        self.total_sold_count.saturating_add(self.total_unsold_count)
    }
}

/// Item count within one price range
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HistogramBucket {
    pub range_label: String,
    pub count: u64,
}

impl HistogramBucket {
    pub fn new(range_label: impl Into<String>, count: u64) -> Self {
        Self {
            range_label: range_label.into(),
            count,
        }
    }
}

/// Price-range histogram in server order. The order encodes the ranges and
/// is never re-sorted.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(transparent)]
pub struct PriceHistogram {
    buckets: Vec<HistogramBucket>,
}

impl PriceHistogram {
    pub fn new(buckets: Vec<HistogramBucket>) -> Self {
        Self { buckets }
    }

    /// Decode the histogram endpoint body (`{ "<range>": <count>, ... }`)
    pub fn from_json(body: &Value) -> Result<Self> {
        let Value::Object(ranges) = body else {
            return Err(Error::Parse {
                message: format!("expected a price range object, got {}", kind_of(body)),
            });
        };

        // serde_json is built with `preserve_order`, so iteration follows the body
        let buckets = ranges
            .iter()
            .map(|(label, count)| HistogramBucket::new(label.as_str(), coerce_count(count)))
            .collect();
        Ok(Self { buckets })
    }

    pub fn buckets(&self) -> &[HistogramBucket] {
        &self.buckets
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    /// Largest count across all ranges (0 when empty)
    pub fn max_count(&self) -> u64 {
        self.buckets.iter().map(|b| b.count).max().unwrap_or(0)
    }

    pub fn total_count(&self) -> u64 {
        self.buckets.iter().map(|b| b.count).sum()
    }
}

/// Numeric coercion: numbers pass, numeric strings parse, booleans are 0/1,
/// anything else is 0.
fn coerce_number(value: &Value) -> f64 {
    let number = match value {
        Value::Number(n) => n.as_f64().unwrap_or(0.0),
        Value::String(s) => s.trim().parse::<f64>().unwrap_or(0.0),
        Value::Bool(b) => f64::from(u8::from(*b)),
        _ => 0.0,
    };
    if number.is_finite() { number } else { 0.0 }
}

pub(crate) fn coerce_amount(value: &Value) -> f64 {
    coerce_number(value).max(0.0)
}

pub(crate) fn coerce_count(value: &Value) -> u64 {
    if let Some(n) = value.as_u64() {
        return n;
    }
    let number = coerce_number(value);
    if number <= 0.0 { 0 } else { number.trunc() as u64 }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
