//! ClientSideFilter - Text Search over the Loaded Record Page
//!
//! Searching only ever looks at the page currently held by the table; it
//! never triggers a fetch and never finds records on other server pages.

use crate::domain::record::Record;

/// Search text typed by the user and its normalized form
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterState {
    query: String,
    normalized_query: String,
}

impl FilterState {
    pub fn new(query: impl Into<String>) -> Self {
        let query = query.into();
        let normalized_query = normalize(&query);
        Self {
            query,
            normalized_query,
        }
    }

    /// Text as typed
    pub fn query(&self) -> &str {
        &self.query
    }

    /// Lowercased, with surrounding whitespace trimmed
    pub fn normalized_query(&self) -> &str {
        &self.normalized_query
    }

    pub fn is_empty(&self) -> bool {
        self.normalized_query.is_empty()
    }

    /// Replace the query; returns `false` if it is unchanged
    pub fn set_query(&mut self, query: impl Into<String>) -> bool {
        let query = query.into();
        if query == self.query {
            return false;
        }
        *self = Self::new(query);
        true
    }

    /// Whether `record` matches this filter
    pub fn matches(&self, record: &Record) -> bool {
        matches_normalized(record, &self.normalized_query)
    }

    /// The records of `records` matching this filter, in order
    pub fn filter<'a>(&self, records: &'a [Record]) -> Vec<&'a Record> {
        records.iter().filter(|r| self.matches(r)).collect()
    }
}

/// Lowercase and trim the ends; inner whitespace is kept
pub fn normalize(query: &str) -> String {
    query.trim().to_lowercase()
}

/// Records whose title or category contains `query`, case-insensitively.
/// An empty query keeps every record.
pub fn apply(records: &[Record], query: &str) -> Vec<Record> {
    let needle = normalize(query);
    records
        .iter()
        .filter(|r| matches_normalized(r, &needle))
        .cloned()
        .collect()
}

fn matches_normalized(record: &Record, needle: &str) -> bool {
    needle.is_empty()
        || record.title.to_lowercase().contains(needle)
        || record.category.to_lowercase().contains(needle)
}
