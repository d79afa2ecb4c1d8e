use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// The full benchmark-relative comparison produced by the calculator.
///
/// This struct is the data transfer object for comparison results: scalar
/// metrics for the summary cards plus the aligned cumulative-return series
/// for charting. Produced fresh on every call, never cached.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonReport {
    pub portfolio_sharpe: f64,
    pub benchmark_sharpe: f64,
    pub beta: f64,
    /// Annualized CAPM residual.
    pub alpha: f64,
    pub information_ratio: f64,
    pub tracking_error: f64,
    pub correlation: f64,
    /// Number of overlapping observations the metrics were computed from.
    pub data_points: usize,
    pub portfolio_cumulative_return: f64,
    pub benchmark_cumulative_return: f64,
    pub time_series: ComparisonTimeSeries,
}

/// Aligned per-date cumulative returns for charting.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ComparisonTimeSeries {
    pub dates: Vec<NaiveDate>,
    pub portfolio_cumulative: Vec<f64>,
    pub benchmark_cumulative: Vec<f64>,
}

/// Windowed metrics as parallel vectors, one entry per date where a full
/// trailing window exists and the rolling Sharpe is defined.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RollingMetrics {
    pub dates: Vec<NaiveDate>,
    pub rolling_sharpe: Vec<f64>,
    pub rolling_volatility: Vec<f64>,
    pub rolling_return: Vec<f64>,
}

/// Equal-width histogram over the observed return range.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Histogram {
    /// Bin centers (midpoint of each edge pair).
    pub bins: Vec<f64>,
    pub counts: Vec<u64>,
}

/// Moment and tail statistics of a return distribution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DistributionStatistics {
    pub mean: f64,
    pub std: f64,
    pub skewness: f64,
    pub kurtosis: f64,
    pub var_95: f64,
    pub cvar_95: f64,
    pub min: f64,
    pub max: f64,
    pub positive_days: usize,
    pub negative_days: usize,
    pub total_days: usize,
}

/// Linear-interpolation percentile estimates at the fixed reporting points.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PercentileTable {
    pub p1: f64,
    pub p5: f64,
    pub p25: f64,
    pub p50: f64,
    pub p75: f64,
    pub p95: f64,
    pub p99: f64,
}

/// Distribution analysis result. Fewer than two valid observations yield
/// the default value: an empty histogram and absent statistics.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DistributionReport {
    pub histogram: Histogram,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub statistics: Option<DistributionStatistics>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub percentiles: Option<PercentileTable>,
}

impl DistributionReport {
    pub fn is_empty(&self) -> bool {
        self.statistics.is_none()
    }
}

/// The fixed-shape portfolio risk bundle. Empty input produces the default
/// all-zero value rather than an error.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct RiskMetrics {
    pub var: f64,
    pub cvar: f64,
    pub volatility: f64,
    pub beta: f64,
    pub alpha: f64,
}
