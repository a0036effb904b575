//! Transactions Table View
//!
//! Rows of the current page that match the search text, with the server
//! pagination underneath.

use std::fmt;

use crate::constants::{
    CATEGORY_COLUMN_WIDTH, DESCRIPTION_COLUMN_WIDTH, IMAGE_COLUMN_WIDTH, TITLE_COLUMN_WIDTH,
};
use crate::domain::record::Record;
use crate::state::{FetchState, TableState};
use crate::utils::format::{fit, format_currency};
use crate::views::Panel;

pub const TABLE_TITLE: &str = "All Transactions";
pub const TABLE_LOADING: &str = "Loading transactions...";
pub const TABLE_EMPTY: &str = "No transactions found";

/// Column definition for the transactions table
#[derive(Debug, Clone, Copy)]
pub struct Column {
    pub label: &'static str,
    /// Width in characters
    pub width: usize,
}

impl Column {
    const fn new(label: &'static str, width: usize) -> Self {
        Self { label, width }
    }
}

pub const COLUMNS: [Column; 7] = [
    Column::new("ID", 6),
    Column::new("Title", TITLE_COLUMN_WIDTH),
    Column::new("Description", DESCRIPTION_COLUMN_WIDTH),
    Column::new("Price", 10),
    Column::new("Category", CATEGORY_COLUMN_WIDTH),
    Column::new("Sold", 4),
    Column::new("Image", IMAGE_COLUMN_WIDTH),
];

/// One displayed record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowDisplay {
    pub id: String,
    pub title: String,
    pub description: String,
    pub price: String,
    pub category: String,
    pub sold: &'static str,
    pub image: String,
}

impl RowDisplay {
    pub fn from_record(record: &Record) -> Self {
        Self {
            id: record.id.to_string(),
            title: record.title.clone(),
            description: record.description.clone(),
            price: format_currency(record.price),
            category: record.category.clone(),
            sold: if record.sold { "Yes" } else { "No" },
            image: record.image_ref.clone(),
        }
    }

    fn cells(&self) -> [&str; 7] {
        [
            &self.id,
            &self.title,
            &self.description,
            &self.price,
            &self.category,
            self.sold,
            &self.image,
        ]
    }
}

/// Projection of [`TableState`]
#[derive(Debug, Clone, PartialEq)]
pub struct TableDisplay {
    pub title: &'static str,
    pub query: String,
    pub body: Panel<Vec<RowDisplay>>,
    /// `None` when the month has no pages at all
    pub page_label: Option<String>,
    pub can_prev: bool,
    pub can_next: bool,
}

impl TableDisplay {
    pub fn project(table: &TableState) -> Self {
        let pagination = table.pagination();
        let body = match table.state() {
            // Rows are derived from the loaded page and the current query
            FetchState::Success(_) => {
                let rows: Vec<RowDisplay> = table
                    .visible_records()
                    .into_iter()
                    .map(RowDisplay::from_record)
                    .collect();
                if rows.is_empty() {
                    Panel::Empty(TABLE_EMPTY)
                } else {
                    Panel::Ready(rows)
                }
            }
            state => Panel::project(state, TABLE_LOADING, TABLE_EMPTY, |_| None),
        };

        Self {
            title: TABLE_TITLE,
            query: table.filter().query().to_string(),
            body,
            page_label: pagination.label(),
            can_prev: pagination.can_prev(),
            can_next: pagination.can_next(),
        }
    }

    pub fn rows(&self) -> &[RowDisplay] {
        self.body.ready().map(Vec::as_slice).unwrap_or_default()
    }
}

fn write_cells(f: &mut fmt::Formatter<'_>, cells: [&str; 7]) -> fmt::Result {
    let line: Vec<String> = COLUMNS
        .iter()
        .zip(cells)
        .map(|(column, cell)| fit(cell, column.width))
        .collect();
    writeln!(f, "  {}", line.join(" | ").trim_end())
}

impl fmt::Display for TableDisplay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.title)?;
        if self.query.is_empty() {
            writeln!(f, "  Search by title or category...")?;
        } else {
            writeln!(f, "  Search: {}", self.query)?;
        }
        writeln!(f)?;

        if let Some(rows) = self.body.write_status(f)? {
            write_cells(f, COLUMNS.map(|column| column.label))?;
            let rule: Vec<String> = COLUMNS.iter().map(|c| "-".repeat(c.width)).collect();
            writeln!(f, "  {}", rule.join("-+-"))?;
            for row in rows {
                write_cells(f, row.cells())?;
            }
        }

        if let Some(label) = &self.page_label {
            writeln!(f)?;
            let prev = if self.can_prev { "< Previous" } else { "          " };
            let next = if self.can_next { "Next >" } else { "" };
            writeln!(f, "  {prev}   {label}   {next}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::month::Month;
    use crate::domain::record::{RecordPage, RecordsQuery, RecordsResponse};
    use crate::state::TimeBucketSelector;
    use serde_json::json;

    fn widget_page(total_pages: u32) -> RecordPage {
        let response: RecordsResponse = serde_json::from_value(json!({
            "records": [{
                "id": 1,
                "title": "Widget",
                "description": "A widget",
                "price": 9.5,
                "category": "Tools",
                "sold": false,
                "image": "https://img/1.png"
            }],
            "totalPages": total_pages
        }))
        .expect("response");
        RecordPage::from_response(RecordsQuery::new(Month::Mar, 1), response)
    }

    fn loaded_table(selector: &TimeBucketSelector, total_pages: u32) -> TableState {
        let mut table = TableState::new(selector.subscribe());
        let ticket = table.sync().expect("initial fetch");
        assert_eq!(ticket.params().month.code(), "03");
        table.complete(ticket, Ok(widget_page(total_pages)));
        table
    }

    #[test]
    fn test_loaded_page_renders_rows_and_pagination() {
        let selector = TimeBucketSelector::new(Month::Mar);
        let table = loaded_table(&selector, 3);
        let display = TableDisplay::project(&table);

        assert_eq!(display.rows().len(), 1);
        let row = &display.rows()[0];
        assert_eq!(row.title, "Widget");
        assert_eq!(row.price, "$9.50");
        assert_eq!(row.sold, "No");
        assert_eq!(display.page_label.as_deref(), Some("Page 1 of 3"));
        assert!(!display.can_prev);
        assert!(display.can_next);

        let text = display.to_string();
        assert!(text.starts_with("All Transactions"));
        assert!(text.contains("$9.50"));
        assert!(text.contains("Page 1 of 3"));
    }

    #[test]
    fn test_search_narrows_or_empties_rows() {
        let selector = TimeBucketSelector::new(Month::Mar);
        let mut table = loaded_table(&selector, 3);

        table.set_query("wid");
        assert_eq!(TableDisplay::project(&table).rows().len(), 1);

        table.set_query("gadget");
        let display = TableDisplay::project(&table);
        assert_eq!(display.body, Panel::Empty(TABLE_EMPTY));
        assert!(display.to_string().contains("No transactions found"));
    }

    #[test]
    fn test_zero_pages_shows_empty_state_without_page_label() {
        let selector = TimeBucketSelector::new(Month::Mar);
        let mut table = TableState::new(selector.subscribe());
        let ticket = table.sync().expect("fetch");
        let response: RecordsResponse =
            serde_json::from_value(json!({ "records": [], "totalPages": 0 })).expect("response");
        table.complete(
            ticket,
            Ok(RecordPage::from_response(RecordsQuery::new(Month::Mar, 1), response)),
        );

        let display = TableDisplay::project(&table);
        assert_eq!(display.body, Panel::Empty(TABLE_EMPTY));
        assert_eq!(display.page_label, None);
        assert!(!display.to_string().contains("Page 1 of 0"));
    }

    #[test]
    fn test_loading_message() {
        let selector = TimeBucketSelector::new(Month::Mar);
        let mut table = TableState::new(selector.subscribe());
        table.sync();
        let display = TableDisplay::project(&table);
        assert_eq!(display.body, Panel::Loading(TABLE_LOADING));
        assert!(display.to_string().contains("Loading transactions..."));
    }
}
