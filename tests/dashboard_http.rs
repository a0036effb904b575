//! Dashboard end-to-end tests.
//!
//! Starts an axum sales service and drives a Dashboard against it over HTTP.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use axum::extract::Query;
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use serde_json::json;
use tokio::runtime::Runtime;

use sales_dashboard::domain::config::ApiConfig;
use sales_dashboard::domain::month::Month;
use sales_dashboard::services::{HttpSalesApi, ServiceHub};
use sales_dashboard::state::Dashboard;
use sales_dashboard::views::{DashboardDisplay, Panel};

const SETTLE: Duration = Duration::from_secs(10);

type Params = Query<HashMap<String, String>>;

fn param<'a>(params: &'a HashMap<String, String>, key: &str) -> &'a str {
    params.get(key).map(String::as_str).unwrap_or_default()
}

async fn records(Query(params): Params) -> Response {
    let records = match (param(&params, "bucket"), param(&params, "page")) {
        ("03", "1") => json!([{
            "id": 1,
            "title": "Widget",
            "description": "A small widget",
            "price": 9.5,
            "category": "Tools",
            "sold": false,
            "image": "https://img.example/widget.png"
        }]),
        ("03", page) => json!([{ "id": page, "title": format!("Item {page}"), "category": "Misc" }]),
        _ => json!([]),
    };
    let total_pages = if param(&params, "bucket") == "03" { 3 } else { 0 };
    axum::Json(json!({ "records": records, "totalPages": total_pages })).into_response()
}

async fn price_histogram(Query(params): Params) -> Response {
    match param(&params, "bucket") {
        "Mar" => (
            [(header::CONTENT_TYPE, "application/json")],
            r#"{"0-50": 3, "51-100": 0}"#,
        )
            .into_response(),
        _ => axum::Json(json!({})).into_response(),
    }
}

async fn summary(Query(params): Params) -> Response {
    match param(&params, "bucket") {
        "Mar" => axum::Json(json!({
            "totalSaleAmount": 1234.5,
            "totalSoldItems": 10,
            "totalNotSoldItems": 2
        }))
        .into_response(),
        _ => (StatusCode::INTERNAL_SERVER_ERROR, "boom").into_response(),
    }
}

/// Bind to port 0 and return the base URL
async fn start_server() -> String {
    let app = Router::new()
        .route("/api/records", get(records))
        .route("/api/aggregate/price-histogram", get(price_histogram))
        .route("/api/aggregate/summary", get(summary));
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind");
    let addr = listener.local_addr().expect("addr");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("serve");
    });
    format!("http://{addr}/api")
}

fn dashboard(runtime: &Runtime, month: Month) -> Dashboard {
    let base_url = runtime.block_on(start_server());
    let api = HttpSalesApi::new(&ApiConfig {
        base_url,
        timeout_secs: 5,
    })
    .expect("client");
    let hub = ServiceHub::new(Arc::new(api), runtime.handle().clone());
    Dashboard::new(hub, month)
}

#[test]
fn march_dashboard_renders_all_views() {
    let runtime = Runtime::new().expect("runtime");
    let mut dashboard = dashboard(&runtime, Month::Mar);
    assert!(dashboard.settle(SETTLE));

    let display = DashboardDisplay::project(&dashboard, 20);

    let rows = display.table.rows();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].title, "Widget");
    assert_eq!(rows[0].price, "$9.50");
    assert_eq!(display.table.page_label.as_deref(), Some("Page 1 of 3"));

    let bars = display.histogram.bars();
    assert_eq!(bars.len(), 2);
    assert_eq!(bars[0].range_label, "0-50");
    assert_eq!(bars[0].count, "3");
    assert_eq!(bars[1].range_label, "51-100");
    assert_eq!(bars[1].count, "0");

    let figures = display.statistics.body.ready().expect("statistics");
    assert_eq!(figures.total_sale, "$1234.50");
    assert_eq!(figures.sold, "10");
    assert_eq!(figures.unsold, "2");

    let text = display.to_string();
    assert!(text.contains("All Transactions"));
    assert!(text.contains("Price Range Statistics - Mar"));
    assert!(text.contains("Statistics for Mar"));
}

#[test]
fn search_filters_the_loaded_page() {
    let runtime = Runtime::new().expect("runtime");
    let mut dashboard = dashboard(&runtime, Month::Mar);
    assert!(dashboard.settle(SETTLE));

    dashboard.set_search("wid");
    let display = DashboardDisplay::project(&dashboard, 20);
    assert_eq!(display.table.rows().len(), 1);

    dashboard.set_search("gadget");
    let display = DashboardDisplay::project(&dashboard, 20);
    assert_eq!(display.table.body, Panel::Empty("No transactions found"));
    assert!(!dashboard.is_loading());
}

#[test]
fn paging_then_month_change_resets_to_first_page() {
    let runtime = Runtime::new().expect("runtime");
    let mut dashboard = dashboard(&runtime, Month::Mar);
    assert!(dashboard.settle(SETTLE));

    assert!(!dashboard.prev_page());
    assert!(dashboard.next_page());
    assert!(dashboard.settle(SETTLE));
    assert_eq!(dashboard.table().pagination().current_page(), 2);
    let display = DashboardDisplay::project(&dashboard, 20);
    assert_eq!(display.table.rows()[0].title, "Item 2");

    assert!(dashboard.select_month(Month::Apr));
    assert_eq!(dashboard.table().pagination().current_page(), 1);
    assert!(dashboard.table().is_loading());
    assert!(dashboard.histogram().is_loading());
    assert!(dashboard.statistics().is_loading());
    assert!(dashboard.settle(SETTLE));

    let display = DashboardDisplay::project(&dashboard, 20);
    assert_eq!(display.table.body, Panel::Empty("No transactions found"));
    assert_eq!(display.table.page_label, None);
    assert_eq!(display.histogram.body, Panel::Empty("No data available"));
}

#[test]
fn summary_failure_leaves_other_views_intact() {
    let runtime = Runtime::new().expect("runtime");
    let mut dashboard = dashboard(&runtime, Month::Apr);
    assert!(dashboard.settle(SETTLE));

    assert!(dashboard.table().state().is_success());
    assert!(dashboard.histogram().state().is_success());
    let reason = dashboard
        .statistics()
        .state()
        .error_message()
        .expect("statistics failure");
    assert!(reason.starts_with("Failed to fetch statistics"));
    assert!(reason.contains("500"));

    // Reselecting a month is the only retry
    assert!(dashboard.select_month(Month::Mar));
    assert!(dashboard.settle(SETTLE));
    assert!(dashboard.statistics().state().is_success());
}
