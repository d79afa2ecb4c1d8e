use crate::MarketDataProvider;
use chrono::{DateTime, Duration, NaiveDate, Utc};
use core_types::{PriceSeries, ReturnSeries};
use parking_lot::RwLock;
use serde::Serialize;
use std::collections::HashMap;
use std::sync::Arc;

/// The time source used for cache staleness decisions.
///
/// Injected so that tests can drive TTL expiry without sleeping.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// The wall clock. Used everywhere outside of tests.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// One instrument's benchmark data over a date range: the close prices plus
/// the derived daily and cumulative return series.
///
/// An empty value is the defined data-unavailable state; the cache never
/// surfaces a provider failure as an error.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BenchmarkSeries {
    pub prices: PriceSeries,
    pub daily_returns: ReturnSeries,
    pub cumulative_returns: Vec<f64>,
}

impl BenchmarkSeries {
    fn from_prices(prices: PriceSeries) -> Self {
        let daily_returns = prices.daily_returns();
        let cumulative_returns = daily_returns.cumulative();
        Self { prices, daily_returns, cumulative_returns }
    }

    pub fn is_empty(&self) -> bool {
        self.prices.is_empty()
    }
}

/// Cache key at day granularity.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct CacheKey {
    instrument: String,
    start: NaiveDate,
    end: NaiveDate,
}

struct CacheEntry {
    series: BenchmarkSeries,
    fetched_at: DateTime<Utc>,
}

/// TTL-memoized access to benchmark price history.
///
/// Entries become stale `ttl` after creation and are then bypassed and
/// overwritten on the next fetch; nothing is evicted proactively.
/// Concurrent callers may race on a miss and fetch the same key twice --
/// the last writer wins, and both writes carry equivalent data for the
/// same key, so this is an accepted inefficiency rather than a bug.
pub struct BenchmarkCache {
    provider: Arc<dyn MarketDataProvider>,
    clock: Arc<dyn Clock>,
    ttl: Duration,
    entries: RwLock<HashMap<CacheKey, CacheEntry>>,
}

impl BenchmarkCache {
    pub fn new(provider: Arc<dyn MarketDataProvider>, clock: Arc<dyn Clock>, ttl: Duration) -> Self {
        Self {
            provider,
            clock,
            ttl,
            entries: RwLock::new(HashMap::new()),
        }
    }

    /// Returns benchmark data for the instrument and date range.
    ///
    /// Defaults when a bound is unspecified: `end` = today, `start` =
    /// `end` - 365 days. A non-stale cached entry is returned without a
    /// provider call when `use_cache` is set. Provider failures and empty
    /// responses both resolve to an empty series and leave the cache
    /// untouched.
    pub async fn get_series(
        &self,
        instrument: &str,
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
        use_cache: bool,
    ) -> BenchmarkSeries {
        let end = end.unwrap_or_else(|| self.clock.now().date_naive());
        let start = start.unwrap_or(end - Duration::days(365));
        let key = CacheKey { instrument: instrument.to_string(), start, end };

        if use_cache {
            if let Some(series) = self.lookup(&key) {
                tracing::debug!(instrument, %start, %end, "using cached benchmark data");
                return series;
            }
        }

        tracing::info!(instrument, %start, %end, "fetching benchmark history");

        let points = match self.provider.fetch_history(instrument, start, end).await {
            Ok(points) => points,
            Err(e) => {
                tracing::error!(error = %e, instrument, "error fetching benchmark data");
                return BenchmarkSeries::default();
            }
        };

        let prices = PriceSeries::new(points);
        if prices.is_empty() {
            tracing::warn!(instrument, "no benchmark data returned from provider");
            return BenchmarkSeries::default();
        }

        let series = BenchmarkSeries::from_prices(prices);
        let entry = CacheEntry { series: series.clone(), fetched_at: self.clock.now() };
        self.entries.write().insert(key, entry);

        tracing::info!(instrument, days = series.prices.len(), "fetched benchmark data");
        series
    }

    fn lookup(&self, key: &CacheKey) -> Option<BenchmarkSeries> {
        let entries = self.entries.read();
        entries
            .get(key)
            .filter(|entry| self.clock.now() - entry.fetched_at < self.ttl)
            .map(|entry| entry.series.clone())
    }

    /// Wipes all entries unconditionally. Administrative forced refresh,
    /// not part of the normal request path.
    pub fn clear(&self) {
        self.entries.write().clear();
        tracing::info!("benchmark cache cleared");
    }
}
