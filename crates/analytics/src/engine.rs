use crate::align::{self, AlignedPair};
use crate::error::AnalyticsError;
use crate::report::{ComparisonReport, DistributionReport, RiskMetrics, RollingMetrics};
use crate::{compare, distribution, risk, rolling};
use core_types::ReturnSeries;

/// A stateless calculator exposing the full analytics surface.
///
/// The engine has no knowledge of where series come from and holds no
/// state between calls. Alignment preconditions are enforced by the type
/// system: `compare` only accepts an [`AlignedPair`], which can only be
/// produced by a successful [`AnalyticsEngine::align`].
#[derive(Debug, Clone, Copy, Default)]
pub struct AnalyticsEngine {}

impl AnalyticsEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Intersects a portfolio series with a benchmark series on date.
    pub fn align(
        &self,
        portfolio: &ReturnSeries,
        benchmark: &ReturnSeries,
    ) -> Result<AlignedPair, AnalyticsError> {
        align::align(portfolio, benchmark)
    }

    /// Benchmark-relative performance comparison over an aligned pair.
    pub fn compare(&self, pair: &AlignedPair) -> ComparisonReport {
        compare::compare(pair)
    }

    /// Windowed Sharpe/volatility/return series.
    pub fn rolling_metrics(&self, series: &ReturnSeries, window: usize) -> RollingMetrics {
        rolling::rolling_metrics(series, window)
    }

    /// Histogram, moments, and tail statistics of a return distribution.
    pub fn distribution(&self, series: &ReturnSeries, bins: usize) -> DistributionReport {
        distribution::distribution(series, bins)
    }

    /// The fixed-shape VaR/CVaR/volatility/beta/alpha bundle.
    pub fn risk_metrics(
        &self,
        returns: &ReturnSeries,
        confidence_level: f64,
        benchmark: Option<&ReturnSeries>,
    ) -> RiskMetrics {
        risk::risk_metrics(returns, confidence_level, benchmark)
    }

    /// Historical-simulation VaR at the given confidence level.
    pub fn historical_var(&self, returns: &ReturnSeries, confidence_level: f64) -> f64 {
        risk::historical_var(&returns.values(), confidence_level)
    }

    /// Normal-assumption VaR, exposed as a distinct entry point rather than
    /// blended into the default risk bundle.
    pub fn parametric_var(&self, returns: &ReturnSeries, confidence_level: f64) -> f64 {
        risk::parametric_var(&returns.values(), confidence_level)
    }

    /// Expected shortfall beyond the historical VaR threshold.
    pub fn conditional_var(&self, returns: &ReturnSeries, confidence_level: f64) -> f64 {
        risk::conditional_var(&returns.values(), confidence_level)
    }
}
