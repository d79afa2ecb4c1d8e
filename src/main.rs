use analytics::AnalyticsEngine;
use anyhow::Context;
use api_client::{BenchmarkCache, HttpMarketDataClient, SystemClock};
use chrono::{Duration, NaiveDate};
use clap::{Parser, Subcommand};
use comfy_table::Table;
use configuration::Config;
use core_types::{ReturnPoint, ReturnSeries};
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

/// The main entry point for the Meridian analytics application.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from a .env file when present.
    dotenvy::dotenv().ok();

    let subscriber = FmtSubscriber::builder()
        .with_env_filter(EnvFilter::from_default_env())
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    // Parse command-line arguments
    let cli = Cli::parse();
    let config = configuration::load_config()?;

    // Execute the appropriate command
    match cli.command {
        Commands::Serve(args) => handle_serve(args, config).await?,
        Commands::Benchmark(args) => handle_benchmark(args, config).await?,
    }

    Ok(())
}

// ==============================================================================
// CLI Structure
// ==============================================================================

/// A modular portfolio returns & risk analytics service.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP analytics service.
    Serve(ServeArgs),
    /// Compare a portfolio return series against the benchmark and print
    /// the resulting metrics.
    Benchmark(BenchmarkArgs),
}

#[derive(Parser)]
struct ServeArgs {
    /// Override the port configured in config.toml.
    #[arg(long)]
    port: Option<u16>,
}

#[derive(Parser)]
struct BenchmarkArgs {
    /// Path to a CSV file of daily returns ("date,value" rows).
    #[arg(long)]
    returns: PathBuf,

    /// The start date of the comparison window (format: YYYY-MM-DD).
    #[arg(long)]
    from: Option<NaiveDate>,

    /// The end date of the comparison window (format: YYYY-MM-DD).
    #[arg(long)]
    to: Option<NaiveDate>,

    /// Confidence level for the VaR/CVaR block.
    #[arg(long, default_value_t = 0.95)]
    confidence: f64,
}

// ==============================================================================
// Command Logic
// ==============================================================================

async fn handle_serve(args: ServeArgs, mut config: Config) -> anyhow::Result<()> {
    if let Some(port) = args.port {
        config.server.port = port;
    }
    let addr = SocketAddr::new(
        config.server.host.parse().context("invalid server.host in configuration")?,
        config.server.port,
    );

    let state = web_server::build_state(config);
    web_server::run_server(addr, state).await
}

/// Fetches the benchmark, aligns it with the supplied portfolio returns,
/// and prints the comparison and risk tables.
async fn handle_benchmark(args: BenchmarkArgs, config: Config) -> anyhow::Result<()> {
    let returns = load_returns_csv(&args.returns)?;
    println!(
        "Loaded {} daily returns from {}",
        returns.len(),
        args.returns.display()
    );

    let provider = Arc::new(HttpMarketDataClient::new(&config.benchmark));
    let cache = BenchmarkCache::new(
        provider,
        Arc::new(SystemClock),
        Duration::seconds(config.cache.ttl_secs as i64),
    );

    let benchmark = cache
        .get_series(&config.benchmark.instrument, args.from, args.to, true)
        .await;
    if benchmark.is_empty() {
        anyhow::bail!(
            "could not fetch benchmark data for {}",
            config.benchmark.instrument
        );
    }

    let engine = AnalyticsEngine::new();
    let pair = engine.align(&returns, &benchmark.daily_returns)?;
    let report = engine.compare(&pair);

    let mut comparison = Table::new();
    comparison.set_header(vec!["Metric", "Portfolio", "Benchmark"]);
    comparison.add_row(vec![
        "Sharpe".to_string(),
        format!("{:.3}", report.portfolio_sharpe),
        format!("{:.3}", report.benchmark_sharpe),
    ]);
    comparison.add_row(vec![
        "Cumulative return".to_string(),
        format!("{:.2}%", report.portfolio_cumulative_return * 100.0),
        format!("{:.2}%", report.benchmark_cumulative_return * 100.0),
    ]);
    comparison.add_row(vec![
        "Beta".to_string(),
        format!("{:.3}", report.beta),
        "1.000".to_string(),
    ]);
    comparison.add_row(vec![
        "Alpha (annualized)".to_string(),
        format!("{:.4}", report.alpha),
        "-".to_string(),
    ]);
    comparison.add_row(vec![
        "Information ratio".to_string(),
        format!("{:.3}", report.information_ratio),
        "-".to_string(),
    ]);
    comparison.add_row(vec![
        "Tracking error".to_string(),
        format!("{:.4}", report.tracking_error),
        "-".to_string(),
    ]);
    comparison.add_row(vec![
        "Correlation".to_string(),
        format!("{:.3}", report.correlation),
        "-".to_string(),
    ]);

    println!("\nBenchmark comparison over {} common days:", report.data_points);
    println!("{comparison}");

    let risk = engine.risk_metrics(&returns, args.confidence, Some(&benchmark.daily_returns));
    let mut risk_table = Table::new();
    risk_table.set_header(vec!["Risk metric", "Value"]);
    risk_table.add_row(vec![
        format!("VaR ({:.0}%)", args.confidence * 100.0),
        format!("{:.4}", risk.var),
    ]);
    risk_table.add_row(vec![
        format!("CVaR ({:.0}%)", args.confidence * 100.0),
        format!("{:.4}", risk.cvar),
    ]);
    risk_table.add_row(vec![
        "Volatility (annualized)".to_string(),
        format!("{:.4}", risk.volatility),
    ]);
    risk_table.add_row(vec!["Beta".to_string(), format!("{:.3}", risk.beta)]);
    risk_table.add_row(vec!["Alpha".to_string(), format!("{:.4}", risk.alpha)]);

    println!("\nPortfolio risk metrics:");
    println!("{risk_table}");

    Ok(())
}

/// Reads a "date,value" CSV into a `ReturnSeries`, skipping a header row
/// when one is present.
fn load_returns_csv(path: &Path) -> anyhow::Result<ReturnSeries> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read returns file {}", path.display()))?;

    let mut points = Vec::new();
    for line in content.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with("date") {
            continue;
        }
        let (date_str, value_str) = line
            .split_once(',')
            .with_context(|| format!("malformed returns row: {line}"))?;
        let date = NaiveDate::parse_from_str(date_str.trim(), "%Y-%m-%d")
            .with_context(|| format!("invalid date in returns row: {line}"))?;
        let value: f64 = value_str
            .trim()
            .parse()
            .with_context(|| format!("invalid return value in row: {line}"))?;
        points.push(ReturnPoint { date, value });
    }

    Ok(ReturnSeries::new(points))
}
