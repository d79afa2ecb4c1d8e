use crate::align::AlignedPair;
use crate::report::{ComparisonReport, ComparisonTimeSeries};
use crate::stats;
use crate::TRADING_DAYS_PER_YEAR;

/// Annualized Sharpe ratio, 0 when the series has no variance.
pub(crate) fn sharpe_ratio(values: &[f64]) -> f64 {
    let std = stats::sample_std(values);
    if std > 0.0 {
        TRADING_DAYS_PER_YEAR.sqrt() * stats::mean(values) / std
    } else {
        0.0
    }
}

/// Computes the full benchmark-relative comparison over an aligned pair.
///
/// Annualization uses the trading-day convention throughout. Every ratio
/// with a degenerate denominator resolves to 0 via a guarded branch; that
/// fallback is part of the contract, not error suppression.
pub fn compare(pair: &AlignedPair) -> ComparisonReport {
    let portfolio = pair.portfolio();
    let benchmark = pair.benchmark();

    let portfolio_sharpe = sharpe_ratio(portfolio);
    let benchmark_sharpe = sharpe_ratio(benchmark);

    // CAPM regression of the portfolio on the benchmark.
    let benchmark_variance = stats::sample_variance(benchmark);
    let beta = if benchmark_variance > 0.0 {
        stats::sample_covariance(portfolio, benchmark) / benchmark_variance
    } else {
        0.0
    };
    let alpha =
        (stats::mean(portfolio) - beta * stats::mean(benchmark)) * TRADING_DAYS_PER_YEAR;

    let excess: Vec<f64> =
        portfolio.iter().zip(benchmark).map(|(p, b)| p - b).collect();
    let tracking_error = stats::sample_std(&excess) * TRADING_DAYS_PER_YEAR.sqrt();
    let excess_return =
        (stats::mean(portfolio) - stats::mean(benchmark)) * TRADING_DAYS_PER_YEAR;
    let information_ratio = if tracking_error > 0.0 {
        excess_return / tracking_error
    } else {
        0.0
    };

    let portfolio_cumulative = stats::compound(portfolio);
    let benchmark_cumulative = stats::compound(benchmark);

    ComparisonReport {
        portfolio_sharpe,
        benchmark_sharpe,
        beta,
        alpha,
        information_ratio,
        tracking_error,
        correlation: stats::correlation(portfolio, benchmark),
        data_points: pair.len(),
        portfolio_cumulative_return: portfolio_cumulative.last().copied().unwrap_or(0.0),
        benchmark_cumulative_return: benchmark_cumulative.last().copied().unwrap_or(0.0),
        time_series: ComparisonTimeSeries {
            dates: pair.dates().to_vec(),
            portfolio_cumulative,
            benchmark_cumulative,
        },
    }
}
