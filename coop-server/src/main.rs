//! coop-server — ordering backend of the parts cooperative
//!
//! Long-running HTTP service that:
//! - Serves the public parts catalog and home page news
//! - Takes orders from signed-in members at snapshot prices
//! - Lets staff adjust, advance and delete orders
//! - Manages member accounts and reports delivered sales

mod api;
mod auth;
mod config;
mod db;
mod error;
mod orders;
mod state;
mod util;

use config::Config;
use state::AppState;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[tokio::main]
async fn main() -> Result<(), BoxError> {
    // Load .env file
    let _ = dotenvy::dotenv();

    let config = Config::from_env()?;

    // Initialize tracing
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "coop_server=info,tower_http=info".into());
    if config.log_format.as_deref() == Some("json") {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }

    tracing::info!("Starting coop-server (env: {})", config.environment);

    let state = AppState::new(&config).await?;
    let app = api::create_router(state, &config.api_base);

    let http_addr = format!("0.0.0.0:{}", config.http_port);
    let listener = tokio::net::TcpListener::bind(&http_addr).await?;
    tracing::info!(
        "coop-server HTTP listening on {http_addr} (api base {})",
        config.api_base
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("coop-server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {e}");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
