//! Format - Formatting Utilities

use chrono::{DateTime, Local};

/// Format an amount as dollars with exactly two fractional digits.
/// Cent ties round away from zero.
pub fn format_currency(amount: f64) -> String {
    let cents = (amount * 100.0).round() / 100.0;
    format!("${cents:.2}")
}

/// Format a count as a plain integer
pub fn format_count(count: u64) -> String {
    count.to_string()
}

/// Format just the time portion
pub fn format_time(dt: &DateTime<Local>) -> String {
    dt.format("%H:%M:%S").to_string()
}

/// Truncate a string to `max_len` characters with an ellipsis
pub fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else if max_len <= 3 {
        s.chars().take(max_len).collect()
    } else {
        let head: String = s.chars().take(max_len - 3).collect();
        format!("{head}...")
    }
}

/// Pad or truncate to exactly `width` characters
pub fn fit(s: &str, width: usize) -> String {
    format!("{:<width$}", truncate(s, width))
}
