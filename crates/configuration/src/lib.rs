use crate::error::ConfigError;

// Declare the modules that make up this crate.
pub mod error;
pub mod settings;

// Re-export the core types to provide a clean public API.
pub use settings::{AnalyticsDefaults, BenchmarkConfig, CacheConfig, Config, ServerConfig};

/// Loads the application configuration from the `config.toml` file.
///
/// Every section and field carries a default, so a missing file is treated
/// as an empty one and the built-in defaults apply.
pub fn load_config() -> Result<Config, ConfigError> {
    let builder = config::Config::builder()
        // Tells the builder to look for a file named `config.toml`.
        .add_source(config::File::with_name("config.toml").required(false))
        // Optionally, one could add environment variables here as well.
        // .add_source(config::Environment::with_prefix("APP"));
        .build()?;

    // Attempt to deserialize the entire configuration into our `Config` struct
    let config = builder.try_deserialize::<Config>()?;

    if !(0.0..1.0).contains(&config.analytics.confidence_level) {
        return Err(ConfigError::ValidationError(
            "analytics.confidence_level must be between 0 and 1".to_string(),
        ));
    }

    Ok(config)
}
