use crate::report::RiskMetrics;
use crate::stats;
use crate::TRADING_DAYS_PER_YEAR;
use chrono::NaiveDate;
use core_types::ReturnSeries;
use statrs::distribution::{ContinuousCDF, Normal};
use std::collections::BTreeMap;

/// Overlap required before beta/alpha are computed against a benchmark.
///
/// A strict inequality over the raw date intersection with no row
/// filtering; this is a separate contract from the aligner's and must not
/// be unified with it.
const BETA_MIN_POINTS: usize = 10;

/// Loss threshold at the given confidence, historical-simulation method.
pub fn historical_var(returns: &[f64], confidence_level: f64) -> f64 {
    if returns.is_empty() {
        return 0.0;
    }
    stats::percentile(returns, (1.0 - confidence_level) * 100.0)
}

/// Loss threshold under a normal-distribution assumption: mean + z * std
/// with z at the left tail of the standard normal.
pub fn parametric_var(returns: &[f64], confidence_level: f64) -> f64 {
    if returns.is_empty() {
        return 0.0;
    }
    let normal = Normal::new(0.0, 1.0).expect("standard normal parameters are valid");
    let z_score = normal.inverse_cdf(1.0 - confidence_level);
    stats::mean(returns) + z_score * stats::sample_std(returns)
}

/// Expected shortfall: the mean of all returns at or below the historical
/// VaR threshold, falling back to the threshold itself when nothing
/// breaches it.
pub fn conditional_var(returns: &[f64], confidence_level: f64) -> f64 {
    if returns.is_empty() {
        return 0.0;
    }
    let var = historical_var(returns, confidence_level);
    let tail: Vec<f64> = returns.iter().copied().filter(|&r| r <= var).collect();
    if tail.is_empty() { var } else { stats::mean(&tail) }
}

/// The fixed-shape portfolio risk bundle: historical VaR, CVaR, annualized
/// volatility, and benchmark-relative beta/alpha when enough common history
/// exists.
///
/// Empty input returns the all-zero default; a missing or thin benchmark
/// leaves beta and alpha at 0.
pub fn risk_metrics(
    returns: &ReturnSeries,
    confidence_level: f64,
    benchmark: Option<&ReturnSeries>,
) -> RiskMetrics {
    if returns.is_empty() {
        return RiskMetrics::default();
    }

    let values = returns.values();
    let mut metrics = RiskMetrics {
        var: historical_var(&values, confidence_level),
        cvar: conditional_var(&values, confidence_level),
        volatility: stats::sample_std(&values) * TRADING_DAYS_PER_YEAR.sqrt(),
        ..RiskMetrics::default()
    };

    if let Some(benchmark) = benchmark {
        let benchmark_by_date: BTreeMap<NaiveDate, f64> =
            benchmark.points().iter().map(|p| (p.date, p.value)).collect();

        let mut own = Vec::new();
        let mut common = Vec::new();
        for point in returns.points() {
            if let Some(&bench) = benchmark_by_date.get(&point.date) {
                own.push(point.value);
                common.push(bench);
            }
        }

        if own.len() > BETA_MIN_POINTS {
            let benchmark_variance = stats::sample_variance(&common);
            if benchmark_variance > 0.0 {
                metrics.beta = stats::sample_covariance(&own, &common) / benchmark_variance;
            }
            metrics.alpha = stats::mean(&own) * TRADING_DAYS_PER_YEAR
                - metrics.beta * stats::mean(&common) * TRADING_DAYS_PER_YEAR;
        }
    }

    metrics
}
