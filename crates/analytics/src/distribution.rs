use crate::report::{DistributionReport, DistributionStatistics, Histogram, PercentileTable};
use crate::stats;
use core_types::ReturnSeries;

/// Analyzes the shape of a return distribution: histogram, moments, tail
/// risk, and a fixed percentile table.
///
/// Non-finite entries are dropped first. Fewer than two valid observations
/// yield the default all-empty report rather than an error.
pub fn distribution(series: &ReturnSeries, bins: usize) -> DistributionReport {
    let values: Vec<f64> = series.values().into_iter().filter(|v| v.is_finite()).collect();
    if values.len() < 2 || bins == 0 {
        return DistributionReport::default();
    }

    let histogram = build_histogram(&values, bins);

    let var_95 = stats::percentile(&values, 5.0);
    let tail: Vec<f64> = values.iter().copied().filter(|&v| v <= var_95).collect();
    let cvar_95 = if tail.is_empty() { var_95 } else { stats::mean(&tail) };

    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);

    let statistics = DistributionStatistics {
        mean: stats::mean(&values),
        std: stats::sample_std(&values),
        skewness: stats::skewness(&values),
        kurtosis: stats::excess_kurtosis(&values),
        var_95,
        cvar_95,
        min,
        max,
        positive_days: values.iter().filter(|&&v| v > 0.0).count(),
        negative_days: values.iter().filter(|&&v| v < 0.0).count(),
        total_days: values.len(),
    };

    let percentiles = PercentileTable {
        p1: stats::percentile(&values, 1.0),
        p5: stats::percentile(&values, 5.0),
        p25: stats::percentile(&values, 25.0),
        p50: stats::percentile(&values, 50.0),
        p75: stats::percentile(&values, 75.0),
        p95: stats::percentile(&values, 95.0),
        p99: stats::percentile(&values, 99.0),
    };

    DistributionReport {
        histogram,
        statistics: Some(statistics),
        percentiles: Some(percentiles),
    }
}

/// Equal-width bins over the observed range. A degenerate (single-valued)
/// range is widened by half a unit on each side so every observation still
/// lands in a real bin.
fn build_histogram(values: &[f64], bins: usize) -> Histogram {
    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let (lo, hi) = if min == max { (min - 0.5, max + 0.5) } else { (min, max) };

    let width = (hi - lo) / bins as f64;
    let mut counts = vec![0u64; bins];
    for &value in values {
        // The top edge is inclusive, so the maximum falls into the last bin.
        let index = (((value - lo) / width) as usize).min(bins - 1);
        counts[index] += 1;
    }

    let centers = (0..bins).map(|i| lo + width * (i as f64 + 0.5)).collect();
    Histogram { bins: centers, counts }
}
