use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use surfcast::config::{LoggingConfig, StormGlassConfig};
use surfcast::{
    Beach, ForecastAggregator, ForecastCache, HttpRequest, InMemoryCache, PersistentCache,
    StormGlass, SurfcastConfig, TimeForecast, VERSION,
};

#[derive(Parser)]
#[command(name = "surfcast")]
#[command(version, about = "Rated surf forecast for your beaches, merged by hour", long_about = None)]
struct Cli {
    /// JSON file with the beaches to forecast
    beaches: PathBuf,

    /// Configuration file (defaults to <config dir>/surfcast/config.toml)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Log at debug level unless RUST_LOG is set
    #[arg(short, long)]
    verbose: bool,
}

fn init_tracing(logging: &LoggingConfig, verbose: bool) {
    let level = if verbose { "debug" } else { logging.level.as_str() };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("surfcast={level}")));
    let registry = tracing_subscriber::registry().with(filter);

    // stdout carries the forecast feed
    if logging.format == "json" {
        registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry.with(fmt::layer().with_writer(std::io::stderr)).init();
    }
}

async fn run_forecast<C: ForecastCache>(
    request: HttpRequest,
    cache: C,
    stormglass: &StormGlassConfig,
    beaches: &[Beach],
) -> Result<Vec<TimeForecast>> {
    let client = StormGlass::new(request, cache, stormglass.clone());
    let aggregator = ForecastAggregator::new(client);
    Ok(aggregator.process_forecast_for_beaches(beaches).await?)
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = SurfcastConfig::load_from_path(cli.config)?;
    init_tracing(&config.logging, cli.verbose);
    tracing::info!("surfcast {} starting", VERSION);

    config.validate_api_token()?;

    let raw = fs::read_to_string(&cli.beaches)
        .with_context(|| format!("Failed to read beaches file: {}", cli.beaches.display()))?;
    let beaches: Vec<Beach> =
        serde_json::from_str(&raw).with_context(|| "Failed to parse beaches file")?;
    tracing::info!("Loaded {} beaches", beaches.len());

    let request = HttpRequest::new(config.stormglass.timeout())?;
    let feed = if config.cache.enabled {
        let location = config.cache.resolved_location();
        let cache = PersistentCache::open(&location, config.cache.ttl())
            .with_context(|| format!("Failed to open cache database at {}", location.display()))?;
        run_forecast(request, cache, &config.stormglass, &beaches).await?
    } else {
        run_forecast(request, InMemoryCache::new(), &config.stormglass, &beaches).await?
    };

    println!("{}", serde_json::to_string_pretty(&feed)?);
    Ok(())
}
