//! Pure statistical helpers over `f64` slices.
//!
//! Every variance-family statistic uses the sample (n-1) convention. The
//! degenerate cases (empty input, fewer observations than the estimator
//! needs) resolve to 0 here so that callers never divide by a NaN.

use statrs::statistics::Statistics;

pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    Statistics::mean(values)
}

pub fn sample_variance(values: &[f64]) -> f64 {
    if values.len() < 2 {
        return 0.0;
    }
    Statistics::variance(values)
}

pub fn sample_std(values: &[f64]) -> f64 {
    if values.len() < 2 {
        return 0.0;
    }
    Statistics::std_dev(values)
}

pub fn sample_covariance(xs: &[f64], ys: &[f64]) -> f64 {
    if xs.len() != ys.len() || xs.len() < 2 {
        return 0.0;
    }
    Statistics::covariance(xs, ys)
}

/// Pearson correlation, 0 when either side has no variance.
pub fn correlation(xs: &[f64], ys: &[f64]) -> f64 {
    let std_x = sample_std(xs);
    let std_y = sample_std(ys);
    if std_x == 0.0 || std_y == 0.0 {
        return 0.0;
    }
    sample_covariance(xs, ys) / (std_x * std_y)
}

/// Linear-interpolation percentile estimate at `pct` in [0, 100].
///
/// The rank is `pct/100 * (n-1)`; values between adjacent order statistics
/// are interpolated linearly.
pub fn percentile(values: &[f64], pct: f64) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);

    let max_rank = (sorted.len() - 1) as f64;
    let rank = (pct / 100.0 * max_rank).clamp(0.0, max_rank);
    let lower = rank.floor() as usize;
    let upper = rank.ceil() as usize;
    if lower == upper {
        return sorted[lower];
    }
    let weight = rank - lower as f64;
    sorted[lower] * (1.0 - weight) + sorted[upper] * weight
}

/// Bias-adjusted sample skewness (Fisher-Pearson G1).
///
/// Needs at least 3 observations and non-degenerate variance; 0 otherwise.
pub fn skewness(values: &[f64]) -> f64 {
    let n = values.len();
    if n < 3 {
        return 0.0;
    }
    let std = sample_std(values);
    if std == 0.0 {
        return 0.0;
    }
    let m = mean(values);
    let nf = n as f64;
    let sum_cubed: f64 = values.iter().map(|v| ((v - m) / std).powi(3)).sum();
    nf / ((nf - 1.0) * (nf - 2.0)) * sum_cubed
}

/// Bias-adjusted sample excess kurtosis (G2).
///
/// Needs at least 4 observations and non-degenerate variance; 0 otherwise.
pub fn excess_kurtosis(values: &[f64]) -> f64 {
    let n = values.len();
    if n < 4 {
        return 0.0;
    }
    let std = sample_std(values);
    if std == 0.0 {
        return 0.0;
    }
    let m = mean(values);
    let nf = n as f64;
    let sum_fourth: f64 = values.iter().map(|v| ((v - m) / std).powi(4)).sum();
    nf * (nf + 1.0) / ((nf - 1.0) * (nf - 2.0) * (nf - 3.0)) * sum_fourth
        - 3.0 * (nf - 1.0).powi(2) / ((nf - 2.0) * (nf - 3.0))
}

/// Compounded growth of one unit, minus one, at each position.
pub(crate) fn compound(values: &[f64]) -> Vec<f64> {
    let mut growth = 1.0;
    values
        .iter()
        .map(|v| {
            growth *= 1.0 + v;
            growth - 1.0
        })
        .collect()
}
