use serde::Deserialize;

/// Intermediate struct for deserializing one daily bar from the provider.
///
/// The provider returns each bar as a positional JSON array:
/// `[open_time_ms, open, high, low, close, volume, close_time_ms, ...]`.
/// Only the open time and the close price survive into a `PricePoint`; the
/// trailing fields vary by provider and are ignored.
#[derive(Deserialize)]
pub struct RawBar(
    pub i64,
    pub String,
    pub String,
    pub String,
    pub String,
    pub String,
    pub i64,
    #[serde(default)] pub serde_json::Value,
    #[serde(default)] pub serde_json::Value,
    #[serde(default)] pub serde_json::Value,
    #[serde(default)] pub serde_json::Value,
    #[serde(default)] pub serde_json::Value,
);

/// Represents an error response from the provider API.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorResponse {
    pub code: i64,
    pub msg: String,
}
