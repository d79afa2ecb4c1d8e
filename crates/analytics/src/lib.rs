//! # Meridian Analytics Engine
//!
//! This crate provides the quantitative core of the system: benchmark
//! alignment and the statistical computations built on aligned series.
//!
//! ## Architectural Principles
//!
//! - **Layer 1 Logic:** This is a pure logic crate. It has no knowledge of
//!   external systems and depends only on `core-types` (Layer 0). Fetching
//!   and caching benchmark data is the `api-client` crate's concern.
//! - **Stateless Calculation:** The `AnalyticsEngine` is a stateless
//!   calculator. It takes return series as input and produces report
//!   structs as output, which makes it highly reliable and easy to test.
//! - **Degenerate inputs are contracts, not faults:** zero-variance
//!   denominators resolve to documented fallbacks, undersized series to
//!   defined empty results. The only error this crate returns is
//!   `InsufficientOverlap`.
//!
//! ## Public API
//!
//! - `AnalyticsEngine`: the facade over every calculation.
//! - `align` / `AlignedPair`: date-intersection of two return series.
//! - Report structs: `ComparisonReport`, `RollingMetrics`,
//!   `DistributionReport`, `RiskMetrics`.
//! - `AnalyticsError`: the error type returned by alignment.

pub mod align;
pub mod compare;
pub mod distribution;
pub mod engine;
pub mod error;
pub mod report;
pub mod risk;
pub mod rolling;
pub mod stats;

// Re-export the key components to create a clean, public-facing API.
pub use align::{align, AlignedPair, MIN_OVERLAP};
pub use engine::AnalyticsEngine;
pub use error::AnalyticsError;
pub use report::{
    ComparisonReport, ComparisonTimeSeries, DistributionReport, DistributionStatistics,
    Histogram, PercentileTable, RiskMetrics, RollingMetrics,
};

/// Trading days per year under the daily-bar annualization convention.
pub const TRADING_DAYS_PER_YEAR: f64 = 252.0;
