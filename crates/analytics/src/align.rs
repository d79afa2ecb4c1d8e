use crate::error::AnalyticsError;
use chrono::NaiveDate;
use core_types::ReturnSeries;
use std::collections::BTreeMap;

/// Minimum number of overlapping observations required before ratio and
/// beta computations are meaningful.
pub const MIN_OVERLAP: usize = 10;

/// Two return series restricted to their common dates.
///
/// Invariant: all three vectors have identical length, and dates are
/// strictly increasing. Constructible only through [`align`], so downstream
/// calculators never see mismatched or undersized inputs.
#[derive(Debug, Clone, PartialEq)]
pub struct AlignedPair {
    dates: Vec<NaiveDate>,
    portfolio: Vec<f64>,
    benchmark: Vec<f64>,
}

impl AlignedPair {
    pub fn len(&self) -> usize {
        self.dates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    pub fn dates(&self) -> &[NaiveDate] {
        &self.dates
    }

    pub fn portfolio(&self) -> &[f64] {
        &self.portfolio
    }

    pub fn benchmark(&self) -> &[f64] {
        &self.benchmark
    }
}

/// Intersects two return series on date and drops rows where either value
/// is not finite.
///
/// Fails with the surviving row count when fewer than [`MIN_OVERLAP`] rows
/// remain, so callers can render a defined "not enough data" result instead
/// of attempting downstream division.
pub fn align(
    portfolio: &ReturnSeries,
    benchmark: &ReturnSeries,
) -> Result<AlignedPair, AnalyticsError> {
    let benchmark_by_date: BTreeMap<NaiveDate, f64> =
        benchmark.points().iter().map(|p| (p.date, p.value)).collect();

    let mut dates = Vec::new();
    let mut portfolio_values = Vec::new();
    let mut benchmark_values = Vec::new();

    for point in portfolio.points() {
        if let Some(&bench) = benchmark_by_date.get(&point.date) {
            if point.value.is_finite() && bench.is_finite() {
                dates.push(point.date);
                portfolio_values.push(point.value);
                benchmark_values.push(bench);
            }
        }
    }

    if dates.len() < MIN_OVERLAP {
        return Err(AnalyticsError::InsufficientOverlap { data_points: dates.len() });
    }

    Ok(AlignedPair { dates, portfolio: portfolio_values, benchmark: benchmark_values })
}
