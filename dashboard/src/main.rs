use anyhow::Context;
use chrono::Utc;
use clap::Parser;
use dashboard::client::TelemetryClient;
use dashboard::config::Config;
use dashboard::poller::Poller;
use dashboard::{metrics, render, rest};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    info!("Starting Device Telemetry Dashboard");
    info!("Telemetry source: {}", config.telemetry_url);
    info!("HTTP server: {}", config.http_addr);

    // Initialize metrics
    metrics::init_metrics();

    let poller = Poller::new(
        TelemetryClient::new(&config.telemetry_url),
        config.poll_interval(),
    );
    let mut render_rx = poller.subscribe();
    let app = rest::create_router(poller.subscribe());
    let handle = poller.start();

    // Render every published state change
    let render_handle = tokio::spawn(async move {
        render::render(&render_rx.borrow_and_update().view(Utc::now()));
        while render_rx.changed().await.is_ok() {
            let view = render_rx.borrow_and_update().view(Utc::now());
            render::render(&view);
        }
    });

    let listener = tokio::net::TcpListener::bind(&config.http_addr)
        .await
        .with_context(|| format!("failed to bind to {}", config.http_addr))?;

    info!("HTTP server listening on {}", config.http_addr);

    let server_handle = tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap_or_else(|e| {
            error!("HTTP server error: {}", e);
        });
    });

    tokio::select! {
        _ = render_handle => {
            error!("Render task terminated");
        }
        _ = server_handle => {
            error!("HTTP server terminated");
        }
        _ = tokio::signal::ctrl_c() => {
            info!("Received shutdown signal");
        }
    }

    handle.stop();
    info!("Shutting down");
    Ok(())
}
