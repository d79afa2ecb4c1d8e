//! Integration tests for the benchmark cache: TTL behavior, failure
//! tolerance, and forced refresh.

use api_client::error::ApiError;
use api_client::{BenchmarkCache, Clock, MarketDataProvider};
use async_trait::async_trait;
use chrono::{DateTime, Duration, NaiveDate, TimeZone, Utc};
use core_types::PricePoint;
use parking_lot::Mutex;
use rust_decimal::Decimal;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq)]
enum StubBehavior {
    Data,
    Empty,
    Fail,
}

/// Provider double that records call counts and the last requested range.
struct StubProvider {
    behavior: StubBehavior,
    calls: AtomicUsize,
    last_range: Mutex<Option<(NaiveDate, NaiveDate)>>,
}

impl StubProvider {
    fn new(behavior: StubBehavior) -> Arc<Self> {
        Arc::new(Self { behavior, calls: AtomicUsize::new(0), last_range: Mutex::new(None) })
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl MarketDataProvider for StubProvider {
    async fn fetch_history(
        &self,
        _instrument: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<PricePoint>, ApiError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_range.lock() = Some((start, end));

        match self.behavior {
            StubBehavior::Fail => Err(ApiError::InvalidData("stub failure".to_string())),
            StubBehavior::Empty => Ok(Vec::new()),
            StubBehavior::Data => {
                let days = (end - start).num_days().min(19);
                Ok((0..=days)
                    .map(|i| PricePoint {
                        date: start + Duration::days(i),
                        close: Decimal::from(100 + i),
                    })
                    .collect())
            }
        }
    }
}

/// Deterministic time source the tests can step forward.
struct ManualClock {
    now: Mutex<DateTime<Utc>>,
}

impl ManualClock {
    fn new() -> Arc<Self> {
        let start = Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap();
        Arc::new(Self { now: Mutex::new(start) })
    }

    fn advance(&self, by: Duration) {
        *self.now.lock() += by;
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        *self.now.lock()
    }
}

fn date(day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 5, day).unwrap()
}

fn cache_with(
    provider: Arc<StubProvider>,
    clock: Arc<ManualClock>,
) -> BenchmarkCache {
    BenchmarkCache::new(provider, clock, Duration::hours(1))
}

#[tokio::test]
async fn second_call_within_ttl_reuses_the_entry() {
    let provider = StubProvider::new(StubBehavior::Data);
    let clock = ManualClock::new();
    let cache = cache_with(provider.clone(), clock.clone());

    let first = cache.get_series("BTCUSDT", Some(date(1)), Some(date(20)), true).await;
    clock.advance(Duration::minutes(30));
    let second = cache.get_series("BTCUSDT", Some(date(1)), Some(date(20)), true).await;

    assert_eq!(provider.calls(), 1);
    assert_eq!(first, second);
    assert!(!first.is_empty());
}

#[tokio::test]
async fn stale_entry_is_bypassed_and_refetched() {
    let provider = StubProvider::new(StubBehavior::Data);
    let clock = ManualClock::new();
    let cache = cache_with(provider.clone(), clock.clone());

    cache.get_series("BTCUSDT", Some(date(1)), Some(date(20)), true).await;
    clock.advance(Duration::hours(1) + Duration::seconds(1));
    cache.get_series("BTCUSDT", Some(date(1)), Some(date(20)), true).await;

    assert_eq!(provider.calls(), 2);
}

#[tokio::test]
async fn clear_forces_a_refetch_within_ttl() {
    let provider = StubProvider::new(StubBehavior::Data);
    let clock = ManualClock::new();
    let cache = cache_with(provider.clone(), clock.clone());

    cache.get_series("BTCUSDT", Some(date(1)), Some(date(20)), true).await;
    cache.clear();
    cache.get_series("BTCUSDT", Some(date(1)), Some(date(20)), true).await;

    assert_eq!(provider.calls(), 2);
}

#[tokio::test]
async fn bypassing_the_cache_always_fetches() {
    let provider = StubProvider::new(StubBehavior::Data);
    let clock = ManualClock::new();
    let cache = cache_with(provider.clone(), clock.clone());

    cache.get_series("BTCUSDT", Some(date(1)), Some(date(20)), true).await;
    cache.get_series("BTCUSDT", Some(date(1)), Some(date(20)), false).await;

    assert_eq!(provider.calls(), 2);
}

#[tokio::test]
async fn distinct_ranges_get_distinct_entries() {
    let provider = StubProvider::new(StubBehavior::Data);
    let clock = ManualClock::new();
    let cache = cache_with(provider.clone(), clock.clone());

    cache.get_series("BTCUSDT", Some(date(1)), Some(date(20)), true).await;
    cache.get_series("BTCUSDT", Some(date(1)), Some(date(21)), true).await;
    cache.get_series("BTCUSDT", Some(date(1)), Some(date(20)), true).await;

    assert_eq!(provider.calls(), 2);
}

#[tokio::test]
async fn provider_failure_resolves_to_empty_and_is_not_cached() {
    let provider = StubProvider::new(StubBehavior::Fail);
    let clock = ManualClock::new();
    let cache = cache_with(provider.clone(), clock.clone());

    let series = cache.get_series("BTCUSDT", Some(date(1)), Some(date(20)), true).await;
    assert!(series.is_empty());

    // The failure was not memoized; the next call tries again.
    cache.get_series("BTCUSDT", Some(date(1)), Some(date(20)), true).await;
    assert_eq!(provider.calls(), 2);
}

#[tokio::test]
async fn empty_provider_response_is_tolerated_and_not_cached() {
    let provider = StubProvider::new(StubBehavior::Empty);
    let clock = ManualClock::new();
    let cache = cache_with(provider.clone(), clock.clone());

    let series = cache.get_series("BTCUSDT", Some(date(1)), Some(date(20)), true).await;
    assert!(series.is_empty());

    cache.get_series("BTCUSDT", Some(date(1)), Some(date(20)), true).await;
    assert_eq!(provider.calls(), 2);
}

#[tokio::test]
async fn default_range_is_one_year_back_from_today() {
    let provider = StubProvider::new(StubBehavior::Data);
    let clock = ManualClock::new();
    let cache = cache_with(provider.clone(), clock.clone());

    cache.get_series("BTCUSDT", None, None, true).await;

    let today = clock.now().date_naive();
    let range = *provider.last_range.lock();
    let (start, end) = range.unwrap();
    assert_eq!(end, today);
    assert_eq!(start, today - Duration::days(365));
}

#[tokio::test]
async fn derived_series_are_consistent_with_the_prices() {
    let provider = StubProvider::new(StubBehavior::Data);
    let clock = ManualClock::new();
    let cache = cache_with(provider.clone(), clock.clone());

    let series = cache.get_series("BTCUSDT", Some(date(1)), Some(date(20)), true).await;

    // The first price row has no defined return.
    assert_eq!(series.daily_returns.len(), series.prices.len() - 1);
    assert_eq!(series.cumulative_returns.len(), series.daily_returns.len());

    let direct: f64 = series
        .daily_returns
        .values()
        .iter()
        .map(|r| 1.0 + r)
        .product::<f64>()
        - 1.0;
    let last = series.cumulative_returns.last().copied().unwrap();
    assert!((last - direct).abs() < 1e-12);
}
