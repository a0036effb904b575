//! PaginationController - Server Page Navigation for the Record Table
//!
//! Tracks the 1-based current page and the page count reported by the last
//! successful fetch. Navigation is clamped at both ends.

/// Page navigation state
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaginationController {
    current_page: u32,
    /// Server-reported page count; `None` until the first successful fetch
    reported_total: Option<u32>,
}

impl PaginationController {
    pub fn new() -> Self {
        Self {
            current_page: 1,
            reported_total: None,
        }
    }

    pub fn current_page(&self) -> u32 {
        self.current_page
    }

    /// Page count; 1 before the first successful fetch, 0 when the month has
    /// no data
    pub fn total_pages(&self) -> u32 {
        self.reported_total.unwrap_or(1)
    }

    /// Whether a successful fetch has reported a page count
    pub fn is_known(&self) -> bool {
        self.reported_total.is_some()
    }

    /// Whether the server reported that there is nothing to page through
    pub fn is_empty(&self) -> bool {
        self.reported_total == Some(0)
    }

    pub fn can_prev(&self) -> bool {
        self.current_page > 1
    }

    pub fn can_next(&self) -> bool {
        self.current_page < self.total_pages()
    }

    /// Move forward one page. No-op (returns `false`) on the last page.
    pub fn next_page(&mut self) -> bool {
        if !self.can_next() {
            return false;
        }
        self.current_page += 1;
        true
    }

    /// Move back one page. No-op (returns `false`) on page 1.
    pub fn prev_page(&mut self) -> bool {
        if !self.can_prev() {
            return false;
        }
        self.current_page -= 1;
        true
    }

    /// Back to page 1; the page count of another month is not meaningful
    pub fn reset(&mut self) {
        self.current_page = 1;
        self.reported_total = None;
    }

    /// Record the page count of a successful fetch
    ///
    /// Returns `true` when the current page was past the new last page and
    /// had to be clamped. A count of 0 puts the pager back on page 1 with
    /// nothing to fetch.
    pub fn apply_total(&mut self, total_pages: u32) -> bool {
        self.reported_total = Some(total_pages);
        if total_pages == 0 {
            self.current_page = 1;
            return false;
        }
        if self.current_page > total_pages {
            self.current_page = total_pages;
            return true;
        }
        false
    }

    /// Display label, e.g. `Page 1 of 3`; `None` when there is no data
    pub fn label(&self) -> Option<String> {
        if self.is_empty() {
            return None;
        }
        Some(format!("Page {} of {}", self.current_page, self.total_pages()))
    }
}

impl Default for PaginationController {
    fn default() -> Self {
        Self::new()
    }
}
