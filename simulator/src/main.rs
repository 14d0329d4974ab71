mod api;
mod telemetry;

use anyhow::Context;
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "simulator", about = "Serves simulated device telemetry over HTTP")]
struct Config {
    /// Address for the telemetry HTTP API
    #[arg(long, env = "HTTP_ADDR", default_value = "0.0.0.0:5000")]
    http_addr: String,

    /// Number of simulated devices
    #[arg(long, env = "DEVICES", default_value_t = 5)]
    devices: usize,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    info!("Starting Device Simulator");
    info!("HTTP server: {}, Devices: {}", config.http_addr, config.devices);

    let app = api::create_router(config.devices);

    let listener = tokio::net::TcpListener::bind(&config.http_addr)
        .await
        .with_context(|| format!("failed to bind to {}", config.http_addr))?;

    info!("Device Simulator API listening on {}", config.http_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            info!("Received shutdown signal");
        })
        .await
        .context("HTTP server error")?;

    info!("Shutting down");
    Ok(())
}
