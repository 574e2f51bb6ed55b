use std::sync::Arc;

use clap::Parser;
use expense_tracker::config::{self, ServerConfig};
use expense_tracker::db::ExpenseStore;
use expense_tracker::server;
use tracing::{error, info};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Loads .env before clap reads its env fallbacks
    let filter = config::log_filter(None, "info");
    let config = ServerConfig::parse();

    // Initialize logging; defaults to info when RUST_LOG is unset
    let (writer, _guard) = tracing_appender::non_blocking(std::io::stdout());
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .init();

    info!("Loading expenses from {}", config.data_file.display());
    let store = match ExpenseStore::open(&config.data_file) {
        Ok(store) => Arc::new(store),
        Err(e) => {
            error!("Failed to load expenses: {}", e);
            return Err(e.into());
        },
    };

    server::serve(&config, store).await?;

    Ok(())
}
