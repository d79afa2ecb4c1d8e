use crate::error::ApiError;
use crate::responses::{ApiErrorResponse, RawBar};
use async_trait::async_trait;
use chrono::{Duration, NaiveDate, NaiveTime, TimeZone, Utc};
use configuration::settings::BenchmarkConfig;
use core_types::PricePoint;
use rust_decimal::Decimal;
use std::str::FromStr;

pub mod cache;
pub mod error;
pub mod responses;

// --- Public API ---
pub use cache::{BenchmarkCache, BenchmarkSeries, Clock, SystemClock};

/// The generic, abstract interface for a daily market-data provider.
/// This trait is the contract that the benchmark cache consumes, allowing
/// the underlying implementation (live HTTP or test stub) to be swapped out.
#[async_trait]
pub trait MarketDataProvider: Send + Sync {
    /// Fetches daily close-price history for an instrument.
    ///
    /// Both endpoint dates are inclusive. An empty vector is a valid
    /// no-data response and must be tolerated by callers.
    async fn fetch_history(
        &self,
        instrument: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<PricePoint>, ApiError>;
}

/// A concrete implementation of `MarketDataProvider` for a kline-style
/// REST endpoint, configured with the provider's base URL.
#[derive(Clone)]
pub struct HttpMarketDataClient {
    client: reqwest::Client,
    base_url: String,
}

impl HttpMarketDataClient {
    pub fn new(config: &BenchmarkConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
        }
    }
}

#[async_trait]
impl MarketDataProvider for HttpMarketDataClient {
    async fn fetch_history(
        &self,
        instrument: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<PricePoint>, ApiError> {
        let url = format!("{}/api/v3/klines", self.base_url);

        // The provider filters on bar open time in epoch milliseconds; the
        // end date is made inclusive by extending to the last millisecond
        // of that day.
        let start_ms = start.and_time(NaiveTime::MIN).and_utc().timestamp_millis();
        let end_ms =
            (end + Duration::days(1)).and_time(NaiveTime::MIN).and_utc().timestamp_millis() - 1;

        let response = self
            .client
            .get(&url)
            .query(&[
                ("symbol", instrument),
                ("interval", "1d"),
                ("startTime", &start_ms.to_string()),
                ("endTime", &end_ms.to_string()),
                ("limit", "1000"),
            ])
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            let api_error: ApiErrorResponse = serde_json::from_str(&text).map_err(|e| {
                ApiError::Deserialization(format!(
                    "Failed to deserialize error response: {}. Original text: {}",
                    e, text
                ))
            })?;
            return Err(ApiError::Provider(api_error.code, api_error.msg));
        }

        let bars: Vec<RawBar> =
            serde_json::from_str(&text).map_err(|e| ApiError::Deserialization(e.to_string()))?;

        bars.into_iter()
            .map(|raw| {
                let open_time = Utc
                    .timestamp_millis_opt(raw.0)
                    .single()
                    .ok_or_else(|| ApiError::InvalidData(format!("Invalid open_time: {}", raw.0)))?;
                let close = Decimal::from_str(&raw.4)
                    .map_err(|e| ApiError::Deserialization(e.to_string()))?;
                Ok(PricePoint { date: open_time.date_naive(), close })
            })
            .collect::<Result<Vec<PricePoint>, ApiError>>()
    }
}
