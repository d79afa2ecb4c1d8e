use analytics::AnalyticsEngine;
use api_client::{BenchmarkCache, HttpMarketDataClient, SystemClock};
use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use chrono::Duration;
use configuration::Config;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{
    cors::{AllowHeaders, AllowOrigin, Any, CorsLayer, ExposeHeaders},
    trace::TraceLayer,
};

pub mod error;
pub mod handlers;

/// The shared application state that all handlers can access.
pub struct AppState {
    pub engine: AnalyticsEngine,
    pub cache: Arc<BenchmarkCache>,
    pub config: Config,
}

/// Wires the production provider, clock, and cache into an `AppState`.
pub fn build_state(config: Config) -> AppState {
    let provider = Arc::new(HttpMarketDataClient::new(&config.benchmark));
    let cache = Arc::new(BenchmarkCache::new(
        provider,
        Arc::new(SystemClock),
        Duration::seconds(config.cache.ttl_secs as i64),
    ));

    AppState { engine: AnalyticsEngine::new(), cache, config }
}

/// Builds the application router.
///
/// Kept separate from `run_server` so tests can drive the routes without
/// binding a socket.
pub fn router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(AllowOrigin::any())
        .allow_methods(Any)
        .allow_headers(AllowHeaders::any())
        .expose_headers(ExposeHeaders::any());

    // --- DEFINE THE APPLICATION ROUTES ---
    Router::new()
        .route("/api/health", get(|| async { "OK" }))
        .route("/api/analytics/benchmark-comparison", post(handlers::benchmark_comparison))
        .route("/api/analytics/rolling-metrics", post(handlers::rolling_metrics))
        .route("/api/analytics/distribution", post(handlers::distribution))
        .route("/api/analytics/risk-metrics", post(handlers::risk_metrics))
        .route("/api/analytics/var", post(handlers::value_at_risk))
        .route("/api/analytics/performance", post(handlers::performance))
        .route("/api/admin/cache/clear", post(handlers::clear_cache))
        .with_state(state)
        .layer(cors)
        // This middleware will automatically log information about every incoming request.
        .layer(TraceLayer::new_for_http())
        .layer(DefaultBodyLimit::max(1024 * 1024 * 50)) // Set a 50MB body limit
}

/// The main function to configure and run the web server.
pub async fn run_server(addr: SocketAddr, state: AppState) -> anyhow::Result<()> {
    let app = router(Arc::new(state));

    tracing::info!("Analytics server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
