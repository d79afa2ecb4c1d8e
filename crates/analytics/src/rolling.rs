use crate::report::RollingMetrics;
use crate::stats;
use crate::TRADING_DAYS_PER_YEAR;
use core_types::ReturnSeries;

/// Computes windowed Sharpe, volatility, and annualized return over a
/// single series.
///
/// A series shorter than the window yields the defined all-empty result,
/// not an error. Windows with zero variance have no defined Sharpe and are
/// omitted from the output entirely -- this intentionally differs from the
/// scalar calculator's zero fallback and is pinned by tests.
pub fn rolling_metrics(series: &ReturnSeries, window: usize) -> RollingMetrics {
    if window == 0 || series.len() < window {
        return RollingMetrics::default();
    }

    let points = series.points();
    let values = series.values();
    let mut metrics = RollingMetrics::default();

    for end in window..=values.len() {
        let slice = &values[end - window..end];
        let mean = stats::mean(slice);
        let std = stats::sample_std(slice);

        // Undefined rows (zero variance, or a NaN inside the window) are
        // dropped, never coerced to 0.
        if std == 0.0 || !std.is_finite() {
            continue;
        }
        let sharpe = TRADING_DAYS_PER_YEAR.sqrt() * mean / std;
        if !sharpe.is_finite() {
            continue;
        }

        metrics.dates.push(points[end - 1].date);
        metrics.rolling_sharpe.push(sharpe);
        metrics.rolling_volatility.push(std * TRADING_DAYS_PER_YEAR.sqrt());
        metrics.rolling_return.push(mean * TRADING_DAYS_PER_YEAR);
    }

    metrics
}
