//! Endpoint tests driving the router directly, with a stub provider in
//! place of the live market-data client.

use analytics::AnalyticsEngine;
use api_client::error::ApiError;
use api_client::{BenchmarkCache, MarketDataProvider, SystemClock};
use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use chrono::{Duration, NaiveDate};
use configuration::Config;
use core_types::PricePoint;
use http_body_util::BodyExt;
use rust_decimal::Decimal;
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;
use web_server::{router, AppState};

/// Serves `days` synthetic daily closes starting at the requested date;
/// zero days models the provider having no data.
struct FixedProvider {
    days: i64,
}

#[async_trait]
impl MarketDataProvider for FixedProvider {
    async fn fetch_history(
        &self,
        _instrument: &str,
        start: NaiveDate,
        _end: NaiveDate,
    ) -> Result<Vec<PricePoint>, ApiError> {
        Ok((0..self.days)
            .map(|i| PricePoint {
                date: start + Duration::days(i),
                // Alternating drift keeps the derived returns non-constant.
                close: Decimal::from(100 + i * 2 + (i % 3)),
            })
            .collect())
    }
}

fn state_with(days: i64) -> Arc<AppState> {
    let provider = Arc::new(FixedProvider { days });
    let cache = Arc::new(BenchmarkCache::new(
        provider,
        Arc::new(SystemClock),
        Duration::hours(1),
    ));
    Arc::new(AppState { engine: AnalyticsEngine::new(), cache, config: Config::default() })
}

fn date_str(day: u32) -> String {
    format!("2024-05-{day:02}")
}

/// Portfolio return rows starting 2024-05-02 (the first benchmark day
/// carries no derived return).
fn portfolio_rows(count: u32) -> Vec<Value> {
    let first = NaiveDate::from_ymd_opt(2024, 5, 2).unwrap();
    (0..count)
        .map(|i| {
            json!({
                "date": (first + Duration::days(i as i64)).format("%Y-%m-%d").to_string(),
                "value": 0.01 * ((i % 5) as f64 - 2.0) + 0.001,
            })
        })
        .collect()
}

async fn post_json(state: Arc<AppState>, uri: &str, body: Value) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    let response = router(state).oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

#[tokio::test]
async fn health_endpoint_responds() {
    let request = Request::builder().uri("/api/health").body(Body::empty()).unwrap();
    let response = router(state_with(0)).oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn benchmark_comparison_returns_full_report() {
    let (status, body) = post_json(
        state_with(25),
        "/api/analytics/benchmark-comparison",
        json!({
            "returns": portfolio_rows(20),
            "start_date": "2024-05-01",
            "end_date": "2024-05-25",
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data_points"], json!(20));
    assert!(body["portfolio_sharpe"].is_f64());
    assert!(body["beta"].is_f64());
    assert_eq!(body["time_series"]["dates"].as_array().unwrap().len(), 20);
    assert!(body.get("error").is_none());
}

#[tokio::test]
async fn missing_benchmark_data_yields_defined_error_payload() {
    let (status, body) = post_json(
        state_with(0),
        "/api/analytics/benchmark-comparison",
        json!({
            "returns": portfolio_rows(20),
            "start_date": "2024-05-01",
            "end_date": "2024-05-25",
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["error"], json!("Could not fetch benchmark data"));
}

#[tokio::test]
async fn thin_overlap_reports_the_actual_count() {
    let (status, body) = post_json(
        state_with(25),
        "/api/analytics/benchmark-comparison",
        json!({
            "returns": portfolio_rows(5),
            "start_date": "2024-05-01",
            "end_date": "2024-05-25",
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["error"], json!("Insufficient overlapping data points"));
    assert_eq!(body["data_points"], json!(5));
}

#[tokio::test]
async fn rolling_metrics_respect_the_window() {
    let (status, body) = post_json(
        state_with(0),
        "/api/analytics/rolling-metrics",
        json!({ "returns": portfolio_rows(12), "window": 5 }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let dates = body["dates"].as_array().unwrap();
    assert_eq!(dates.len(), 8);
    assert_eq!(body["rolling_sharpe"].as_array().unwrap().len(), dates.len());
    assert_eq!(body["rolling_volatility"].as_array().unwrap().len(), dates.len());
}

#[tokio::test]
async fn distribution_reports_day_counts() {
    let (status, body) = post_json(
        state_with(0),
        "/api/analytics/distribution",
        json!({
            "returns": [
                { "date": date_str(2), "value": 0.01 },
                { "date": date_str(3), "value": -0.02 },
                { "date": date_str(4), "value": 0.015 },
                { "date": date_str(5), "value": -0.005 },
                { "date": date_str(6), "value": 0.03 },
            ],
            "bins": 5,
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["histogram"]["bins"].as_array().unwrap().len(), 5);
    assert_eq!(body["statistics"]["total_days"], json!(5));
    assert_eq!(body["statistics"]["positive_days"], json!(3));
    assert_eq!(body["statistics"]["negative_days"], json!(2));
}

#[tokio::test]
async fn risk_metrics_reject_invalid_confidence() {
    let (status, body) = post_json(
        state_with(0),
        "/api/analytics/risk-metrics",
        json!({ "returns": portfolio_rows(20), "confidence_level": 2.0 }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("confidence_level"));
}

#[tokio::test]
async fn var_endpoint_supports_the_parametric_method() {
    let (status, body) = post_json(
        state_with(0),
        "/api/analytics/var",
        json!({ "returns": portfolio_rows(30), "method": "parametric" }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["method"], json!("parametric"));
    assert!(body["var"].as_f64().unwrap() < 0.0);
    assert!(body["cvar"].is_f64());
}

#[tokio::test]
async fn performance_payload_bundles_the_blocks() {
    let (status, body) = post_json(
        state_with(0),
        "/api/analytics/performance",
        json!({
            "returns": portfolio_rows(40),
            "rolling_window": 10,
            "bins": 8,
            "include_benchmark": false,
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["distribution"]["histogram"]["bins"].as_array().unwrap().len(), 8);
    assert!(!body["rolling_metrics"]["dates"].as_array().unwrap().is_empty());
    assert!(body.get("benchmark_comparison").is_none());
}

#[tokio::test]
async fn cache_clear_returns_no_content() {
    let (status, body) = post_json(state_with(0), "/api/admin/cache/clear", json!({})).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert_eq!(body, Value::Null);
}
