use airport_weather::config::LoggingConfig;
use airport_weather::{WeatherService, WeatherServiceConfig, loader, web};
use anyhow::{Context, Result};
use tracing::info;
use tracing_subscriber::EnvFilter;

fn init_tracing(logging: &LoggingConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&logging.level));

    let builder = tracing_subscriber::fmt().with_env_filter(filter).with_target(true);
    if logging.format == "json" {
        builder.json().init();
    } else {
        builder.pretty().init();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let config = WeatherServiceConfig::load().context("Failed to load configuration")?;
    init_tracing(&config.logging);

    info!(
        version = airport_weather::VERSION,
        duplicate_policy = ?config.store.duplicate_policy,
        "Starting airport weather service"
    );

    let service = WeatherService::new(&config);

    if let Some(path) = &config.loader.airports_file {
        let summary = loader::load_file(path, &service)
            .with_context(|| format!("Failed to load airports from {}", path.display()))?;
        info!(loaded = summary.loaded, skipped = summary.skipped, "Airports loaded");
    }

    web::run(&config.server, service).await
}
