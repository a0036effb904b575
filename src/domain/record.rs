//! Record - Sales Catalog Items and Record Pages

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::domain::aggregate::{coerce_amount, coerce_count};
use crate::domain::month::Month;

/// Unique record identifier (the service may send a number or a string)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct RecordId(pub Arc<str>);

impl RecordId {
    pub fn new(id: impl Into<Arc<str>>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for RecordId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<u64> for RecordId {
    fn from(n: u64) -> Self {
        Self::new(n.to_string())
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for RecordId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawId {
            Text(String),
            Number(serde_json::Number),
        }

        Ok(match RawId::deserialize(deserializer)? {
            RawId::Text(text) => Self::new(text),
            RawId::Number(number) => Self::new(number.to_string()),
        })
    }
}

/// One catalog/transaction item. Immutable once fetched.
///
/// Decoded leniently: null or mistyped fields fall back to their defaults
/// instead of failing the whole page.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct Record {
    pub id: RecordId,
    #[serde(deserialize_with = "lenient_text")]
    pub title: String,
    #[serde(deserialize_with = "lenient_text")]
    pub description: String,
    #[serde(deserialize_with = "lenient_price")]
    pub price: f64,
    #[serde(deserialize_with = "lenient_text")]
    pub category: String,
    #[serde(deserialize_with = "lenient_bool")]
    pub sold: bool,
    /// Opaque image reference (URL)
    #[serde(rename = "image", alias = "imageRef", deserialize_with = "lenient_text")]
    pub image_ref: String,
}

fn lenient_text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::String(text) => text,
        Value::Number(number) => number.to_string(),
        Value::Bool(flag) => flag.to_string(),
        _ => String::new(),
    })
}

fn lenient_bool<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::Bool(flag) => flag,
        Value::Number(number) => number.as_f64().is_some_and(|n| n != 0.0),
        Value::String(text) => text.trim().eq_ignore_ascii_case("true"),
        _ => false,
    })
}

/// Non-negative price; numeric strings accepted
fn lenient_price<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    Ok(coerce_amount(&Value::deserialize(deserializer)?))
}

/// Parameters of one record page request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RecordsQuery {
    pub month: Month,
    /// 1-based page number
    pub page: u32,
}

impl RecordsQuery {
    pub fn new(month: Month, page: u32) -> Self {
        Self {
            month,
            page: page.max(1),
        }
    }
}

impl fmt::Display for RecordsQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} page {}", self.month, self.page)
    }
}

/// Wire shape of the records endpoint
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RecordsResponse {
    #[serde(default, alias = "products", deserialize_with = "null_as_empty")]
    pub records: Vec<Record>,
    #[serde(default, deserialize_with = "lenient_total_pages")]
    pub total_pages: Option<u32>,
}

/// Page count; null stays unknown, anything else is coerced to a count
fn lenient_total_pages<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<u32>, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::Null => None,
        value => Some(u32::try_from(coerce_count(&value)).unwrap_or(u32::MAX)),
    })
}

fn null_as_empty<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<Record>, D::Error> {
    Ok(Option::<Vec<Record>>::deserialize(deserializer)?.unwrap_or_default())
}

/// One server page of records
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RecordPage {
    pub records: Vec<Record>,
    /// The 1-based page these records belong to
    pub page_number: u32,
    /// Server-reported page count; 0 means the month has no data
    pub total_pages: u32,
}

impl RecordPage {
    /// Build a page from the wire response of `query`
    pub(crate) fn from_response(query: RecordsQuery, response: RecordsResponse) -> Self {
        Self {
            records: response.records,
            page_number: query.page,
            total_pages: response.total_pages.unwrap_or(1),
        }
    }
}
