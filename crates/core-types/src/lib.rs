pub mod series;

// Re-export the core types to provide a clean public API.
pub use series::{PricePoint, PriceSeries, ReturnPoint, ReturnSeries};
