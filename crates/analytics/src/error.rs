use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AnalyticsError {
    #[error("Insufficient overlapping data points: {data_points}")]
    InsufficientOverlap { data_points: usize },
}
