use crate::{error::AppError, AppState};
use analytics::{
    AnalyticsError, ComparisonReport, DistributionReport, RiskMetrics, RollingMetrics,
};
use axum::{extract::State, http::StatusCode, Json};
use chrono::NaiveDate;
use core_types::ReturnSeries;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// The defined error payloads the analytics surface can resolve to.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorPayload {
    pub error: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_points: Option<usize>,
}

impl ErrorPayload {
    fn benchmark_unavailable() -> Self {
        Self { error: "Could not fetch benchmark data".to_string(), data_points: None }
    }

    fn insufficient_overlap(data_points: usize) -> Self {
        Self {
            error: "Insufficient overlapping data points".to_string(),
            data_points: Some(data_points),
        }
    }
}

/// A comparison either succeeds with a full report or resolves to one of
/// the defined error payloads. Both are complete, well-typed 200 responses;
/// the engine never surfaces an exception to the caller.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum ComparisonResponse {
    Report(Box<ComparisonReport>),
    Error(ErrorPayload),
}

#[derive(Debug, Deserialize)]
pub struct ComparisonRequest {
    /// The portfolio's daily return series, date-indexed.
    pub returns: ReturnSeries,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

/// # POST /api/analytics/benchmark-comparison
pub async fn benchmark_comparison(
    State(state): State<Arc<AppState>>,
    Json(request): Json<ComparisonRequest>,
) -> Json<ComparisonResponse> {
    let response =
        run_comparison(&state, &request.returns, request.start_date, request.end_date).await;
    Json(response)
}

/// Shared comparison flow used by the dedicated endpoint and the aggregate
/// performance payload.
pub(crate) async fn run_comparison(
    state: &AppState,
    returns: &ReturnSeries,
    start_date: Option<NaiveDate>,
    end_date: Option<NaiveDate>,
) -> ComparisonResponse {
    let instrument = &state.config.benchmark.instrument;
    let benchmark = state.cache.get_series(instrument, start_date, end_date, true).await;

    if benchmark.is_empty() {
        return ComparisonResponse::Error(ErrorPayload::benchmark_unavailable());
    }

    match state.engine.align(returns, &benchmark.daily_returns) {
        Ok(pair) => ComparisonResponse::Report(Box::new(state.engine.compare(&pair))),
        Err(AnalyticsError::InsufficientOverlap { data_points }) => {
            ComparisonResponse::Error(ErrorPayload::insufficient_overlap(data_points))
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct RollingRequest {
    pub returns: ReturnSeries,
    /// Window size in trading days; the configured default applies when
    /// omitted.
    pub window: Option<usize>,
}

/// # POST /api/analytics/rolling-metrics
pub async fn rolling_metrics(
    State(state): State<Arc<AppState>>,
    Json(request): Json<RollingRequest>,
) -> Json<RollingMetrics> {
    let window = request.window.unwrap_or(state.config.analytics.rolling_window);
    Json(state.engine.rolling_metrics(&request.returns, window))
}

#[derive(Debug, Deserialize)]
pub struct DistributionRequest {
    pub returns: ReturnSeries,
    pub bins: Option<usize>,
}

/// # POST /api/analytics/distribution
pub async fn distribution(
    State(state): State<Arc<AppState>>,
    Json(request): Json<DistributionRequest>,
) -> Json<DistributionReport> {
    let bins = request.bins.unwrap_or(state.config.analytics.histogram_bins);
    Json(state.engine.distribution(&request.returns, bins))
}

#[derive(Debug, Deserialize)]
pub struct RiskMetricsRequest {
    pub returns: ReturnSeries,
    pub confidence_level: Option<f64>,
    /// Optional benchmark series for the beta/alpha block.
    pub benchmark: Option<ReturnSeries>,
}

/// # POST /api/analytics/risk-metrics
pub async fn risk_metrics(
    State(state): State<Arc<AppState>>,
    Json(request): Json<RiskMetricsRequest>,
) -> Result<Json<RiskMetrics>, AppError> {
    let confidence = resolve_confidence(&state, request.confidence_level)?;
    Ok(Json(state.engine.risk_metrics(
        &request.returns,
        confidence,
        request.benchmark.as_ref(),
    )))
}

/// VaR calculation method for the dedicated endpoint.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VarMethod {
    #[default]
    Historical,
    Parametric,
}

#[derive(Debug, Deserialize)]
pub struct VarRequest {
    pub returns: ReturnSeries,
    pub confidence_level: Option<f64>,
    #[serde(default)]
    pub method: VarMethod,
}

#[derive(Debug, Serialize)]
pub struct VarResponse {
    pub var: f64,
    pub cvar: f64,
    pub confidence_level: f64,
    pub method: &'static str,
}

/// # POST /api/analytics/var
///
/// The parametric method is a distinct entry point here; it is never
/// blended into the default risk-metrics bundle.
pub async fn value_at_risk(
    State(state): State<Arc<AppState>>,
    Json(request): Json<VarRequest>,
) -> Result<Json<VarResponse>, AppError> {
    let confidence = resolve_confidence(&state, request.confidence_level)?;
    let (var, method) = match request.method {
        VarMethod::Historical => {
            (state.engine.historical_var(&request.returns, confidence), "historical")
        }
        VarMethod::Parametric => {
            (state.engine.parametric_var(&request.returns, confidence), "parametric")
        }
    };
    let cvar = state.engine.conditional_var(&request.returns, confidence);

    Ok(Json(VarResponse { var, cvar, confidence_level: confidence, method }))
}

#[derive(Debug, Deserialize)]
pub struct PerformanceRequest {
    pub returns: ReturnSeries,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub rolling_window: Option<usize>,
    pub bins: Option<usize>,
    #[serde(default = "default_include_benchmark")]
    pub include_benchmark: bool,
}

fn default_include_benchmark() -> bool {
    true
}

/// The single structured analytics payload bundling the independent metric
/// blocks for one portfolio series.
#[derive(Debug, Serialize)]
pub struct PerformanceResponse {
    pub distribution: DistributionReport,
    pub rolling_metrics: RollingMetrics,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub benchmark_comparison: Option<ComparisonResponse>,
}

/// # POST /api/analytics/performance
pub async fn performance(
    State(state): State<Arc<AppState>>,
    Json(request): Json<PerformanceRequest>,
) -> Json<PerformanceResponse> {
    let window = request.rolling_window.unwrap_or(state.config.analytics.rolling_window);
    let bins = request.bins.unwrap_or(state.config.analytics.histogram_bins);

    let distribution = state.engine.distribution(&request.returns, bins);
    let rolling_metrics = state.engine.rolling_metrics(&request.returns, window);

    let benchmark_comparison = if request.include_benchmark {
        Some(run_comparison(&state, &request.returns, request.start_date, request.end_date).await)
    } else {
        None
    };

    Json(PerformanceResponse { distribution, rolling_metrics, benchmark_comparison })
}

/// # POST /api/admin/cache/clear
///
/// Administrative forced refresh; not part of the normal request paths.
pub async fn clear_cache(State(state): State<Arc<AppState>>) -> StatusCode {
    state.cache.clear();
    StatusCode::NO_CONTENT
}

fn resolve_confidence(state: &AppState, requested: Option<f64>) -> Result<f64, AppError> {
    let confidence = requested.unwrap_or(state.config.analytics.confidence_level);
    if !(0.0..1.0).contains(&confidence) {
        return Err(AppError::InvalidParameter(
            "confidence_level must be between 0 and 1".to_string(),
        ));
    }
    Ok(confidence)
}
