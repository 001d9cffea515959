//! Sheetboard — Entry Point
//!
//! Loads configuration, initializes the Sheets client, and serves the API.
//! Handles graceful shutdown on SIGINT/SIGTERM.

use std::sync::Arc;

use tokio::signal;
use tracing::info;

use sheetboard::config::Config;
use sheetboard::logging;
use sheetboard::sheets::client::SheetsClient;
use sheetboard::web::server::WebServer;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file (ignore if missing)
    let _ = dotenvy::dotenv();

    // Load configuration
    let config = Config::load()?;

    // Initialize logging
    logging::structured::init_logging(&config.logging);

    info!(
        version = env!("CARGO_PKG_VERSION"),
        port = config.server.port,
        spreadsheet = %config.sheets.spreadsheet_id,
        "sheetboard starting"
    );

    // Initialize the Sheets client. A bad service-account key must never
    // come up half-broken, so a parse failure here is fatal.
    let sheets = Arc::new(SheetsClient::new(&config)?);
    info!(client_email = %config.google.client_email, "sheets client initialized");

    let server = WebServer::new(Arc::new(config), sheets);
    server.start(shutdown_signal()).await?;

    info!("shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = signal::ctrl_c();
    #[cfg(unix)]
    let mut sigterm = signal::unix::signal(signal::unix::SignalKind::terminate())
        .expect("failed to install SIGTERM handler");

    #[cfg(unix)]
    tokio::select! {
        _ = ctrl_c => { info!("received SIGINT"); }
        _ = sigterm.recv() => { info!("received SIGTERM"); }
    }

    #[cfg(not(unix))]
    {
        let _ = ctrl_c.await;
        info!("received SIGINT");
    }
}
