//! HTTP service exposing the expense collection.
//!
//! Routes are defined in `handlers`; error rendering lives in `error`.

mod error;
mod handlers;

pub use error::{ApiError, NOT_FOUND_MESSAGE};
pub use handlers::create_router;

use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::config::ServerConfig;
use crate::db::ExpenseStore;
use crate::error::Result;

/// Bind to the configured address and serve until Ctrl-C.
pub async fn serve(config: &ServerConfig, store: Arc<ExpenseStore>) -> Result<()> {
    let app = create_router(store).layer(TraceLayer::new_for_http());

    let listener = tokio::net::TcpListener::bind(config.bind_address()).await?;
    info!("Expense API listening on {}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Expense API stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for Ctrl-C: {}", e);
        // Without a signal handler, keep serving.
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
