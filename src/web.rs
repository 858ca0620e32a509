use anyhow::{Context, Result};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::api;
use crate::config::ServerConfig;
use crate::service::WeatherService;

/// Full application router with CORS and request tracing
pub fn app(service: WeatherService) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    api::router(service)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}

/// Serve the API until Ctrl-C is received
pub async fn run(config: &ServerConfig, service: WeatherService) -> Result<()> {
    let addr = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    tracing::info!("Weather server running at http://{}", addr);

    axum::serve(listener, app(service))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server terminated with an error")?;

    tracing::info!("Weather server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}
