use serde::Deserialize;

/// The root configuration structure for the entire application.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub benchmark: BenchmarkConfig,
    #[serde(default)]
    pub cache: CacheConfig,
    #[serde(default)]
    pub analytics: AnalyticsDefaults,
}

/// Bind address for the HTTP analytics service.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

/// Which instrument serves as the benchmark, and where to fetch it from.
#[derive(Debug, Clone, Deserialize)]
pub struct BenchmarkConfig {
    /// The provider symbol for the benchmark index (e.g., "BTCUSDT").
    #[serde(default = "default_instrument")]
    pub instrument: String,
    /// Base URL of the market-data provider's REST API.
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

/// Benchmark cache behavior.
#[derive(Debug, Clone, Deserialize)]
pub struct CacheConfig {
    /// Seconds before a cached benchmark series is considered stale.
    #[serde(default = "default_ttl_secs")]
    pub ttl_secs: u64,
}

/// Server-side defaults applied when a request omits a parameter.
#[derive(Debug, Clone, Deserialize)]
pub struct AnalyticsDefaults {
    /// Rolling window size in trading days.
    #[serde(default = "default_rolling_window")]
    pub rolling_window: usize,
    /// Number of histogram bins for the distribution report.
    #[serde(default = "default_histogram_bins")]
    pub histogram_bins: usize,
    /// Confidence level for VaR/CVaR.
    #[serde(default = "default_confidence_level")]
    pub confidence_level: f64,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_instrument() -> String {
    "BTCUSDT".to_string()
}

fn default_base_url() -> String {
    "https://api.binance.com".to_string()
}

fn default_ttl_secs() -> u64 {
    3600
}

fn default_rolling_window() -> usize {
    30
}

fn default_histogram_bins() -> usize {
    50
}

fn default_confidence_level() -> f64 {
    0.95
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { host: default_host(), port: default_port() }
    }
}

impl Default for BenchmarkConfig {
    fn default() -> Self {
        Self { instrument: default_instrument(), base_url: default_base_url() }
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self { ttl_secs: default_ttl_secs() }
    }
}

impl Default for AnalyticsDefaults {
    fn default() -> Self {
        Self {
            rolling_window: default_rolling_window(),
            histogram_bins: default_histogram_bins(),
            confidence_level: default_confidence_level(),
        }
    }
}
