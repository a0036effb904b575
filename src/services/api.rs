//! Sales API
//!
//! The remote sales service contract and its HTTP implementation.
//!
//! ```text
//! GET {base}/records?bucket=03&page=1          -> { records: [...], totalPages: 3 }
//! GET {base}/aggregate/price-histogram?bucket=Mar -> { "0-100": 3, "101-200": 0, ... }
//! GET {base}/aggregate/summary?bucket=Mar       -> { totalSaleAmount, totalSoldItems, totalNotSoldItems }
//! ```

use std::sync::Arc;

use futures::FutureExt;
use futures::future::BoxFuture;
use serde_json::Value;
use snafu::ResultExt;

use crate::constants::{PRICE_HISTOGRAM_PATH, RECORDS_PATH, SUMMARY_PATH};
use crate::domain::aggregate::{AggregateStats, PriceHistogram};
use crate::domain::config::ApiConfig;
use crate::domain::month::Month;
use crate::domain::record::{RecordPage, RecordsQuery, RecordsResponse};
use crate::error::{Result, ServerSnafu, TransportSnafu};

/// Remote sales service
///
/// Calling a method issues the request; the returned future resolves with
/// its outcome.
pub trait SalesApi: Send + Sync + 'static {
    /// One page of records for a month
    fn fetch_records(&self, query: RecordsQuery) -> BoxFuture<'static, Result<RecordPage>>;

    /// Item counts per price range for a month
    fn fetch_price_histogram(&self, month: Month) -> BoxFuture<'static, Result<PriceHistogram>>;

    /// Sales summary for a month
    fn fetch_summary(&self, month: Month) -> BoxFuture<'static, Result<AggregateStats>>;
}

/// [`SalesApi`] over HTTP/JSON
#[derive(Clone)]
pub struct HttpSalesApi {
    client: reqwest::Client,
    base_url: Arc<str>,
}

impl HttpSalesApi {
    /// Create a client for the configured service
    pub fn new(config: &ApiConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout())
            .build()
            .context(TransportSnafu)?;
        Ok(Self::with_client(client, &config.base_url))
    }

    /// Create from an existing client
    pub fn with_client(client: reqwest::Client, base_url: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').into(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    fn request(&self, path: &str, query: &[(&str, String)]) -> reqwest::RequestBuilder {
        self.client.get(self.endpoint(path)).query(query)
    }
}

impl SalesApi for HttpSalesApi {
    fn fetch_records(&self, query: RecordsQuery) -> BoxFuture<'static, Result<RecordPage>> {
        let request = self.request(
            RECORDS_PATH,
            &[
                ("bucket", query.month.code().to_string()),
                ("page", query.page.to_string()),
            ],
        );
        load_records(request, query).boxed()
    }

    fn fetch_price_histogram(&self, month: Month) -> BoxFuture<'static, Result<PriceHistogram>> {
        let request = self.request(PRICE_HISTOGRAM_PATH, &[("bucket", month.label().to_string())]);
        load_price_histogram(request).boxed()
    }

    fn fetch_summary(&self, month: Month) -> BoxFuture<'static, Result<AggregateStats>> {
        let request = self.request(SUMMARY_PATH, &[("bucket", month.label().to_string())]);
        load_summary(request).boxed()
    }
}

/// Send `request`; any non-2xx status is an error
async fn get_json(request: reqwest::RequestBuilder) -> Result<Value> {
    let response = request.send().await.context(TransportSnafu)?;
    let status = response.status();
    tracing::debug!(url = %response.url(), %status, "Response received");
    if !status.is_success() {
        return ServerSnafu { status }.fail();
    }

    let body = response.bytes().await.context(TransportSnafu)?;
    Ok(serde_json::from_slice(&body)?)
}

async fn load_records(request: reqwest::RequestBuilder, query: RecordsQuery) -> Result<RecordPage> {
    let response: RecordsResponse = serde_json::from_value(get_json(request).await?)?;
    Ok(RecordPage::from_response(query, response))
}

async fn load_price_histogram(request: reqwest::RequestBuilder) -> Result<PriceHistogram> {
    PriceHistogram::from_json(&get_json(request).await?)
}

async fn load_summary(request: reqwest::RequestBuilder) -> Result<AggregateStats> {
    AggregateStats::from_json(&get_json(request).await?)
}

impl std::fmt::Debug for HttpSalesApi {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpSalesApi")
            .field("base_url", &self.base_url)
            .finish()
    }
}
