//! Dashboard Constants
//!
//! Centralized defaults for the remote service contract and console layout.

/// Default base URL of the sales service
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:3000/api";

/// Record page endpoint (`?bucket=<2-digit code>&page=<n>`)
pub const RECORDS_PATH: &str = "records";

/// Price histogram endpoint (`?bucket=<label>`)
pub const PRICE_HISTOGRAM_PATH: &str = "aggregate/price-histogram";

/// Summary statistics endpoint (`?bucket=<label>`)
pub const SUMMARY_PATH: &str = "aggregate/summary";

/// Request timeout
pub const REQUEST_TIMEOUT_SECS: u64 = 30;

/// Width (in characters) of the longest histogram bar
pub const HISTOGRAM_BAR_WIDTH: usize = 40;

/// Column widths of the record table
pub const TITLE_COLUMN_WIDTH: usize = 24;
pub const DESCRIPTION_COLUMN_WIDTH: usize = 32;
pub const CATEGORY_COLUMN_WIDTH: usize = 16;
pub const IMAGE_COLUMN_WIDTH: usize = 28;

/// Config file name inside the platform config directory
pub const CONFIG_FILE_NAME: &str = "sales-dashboard.toml";

/// Rolling log file prefix
pub const LOG_FILE_PREFIX: &str = "sales-dashboard.log";
