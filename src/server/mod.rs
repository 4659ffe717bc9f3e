//! HTTP surface: a single `GET /` route backed by the counter store.

pub mod handlers;
pub mod state;

#[cfg(test)]
mod tests;

pub use handlers::{hello, render_greeting, HandlerError};
pub use state::AppState;

use axum::{routing::get, Router};
use tokio::net::TcpListener;
use tracing::{info, warn};

use crate::config::ServerConfig;
use crate::error::Result;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::hello))
        .with_state(state)
}

/// Binds `config.bind:config.port` and serves until Ctrl-C.
pub async fn serve(config: &ServerConfig, state: AppState) -> Result<()> {
    let listener = TcpListener::bind((config.bind.as_str(), config.port)).await?;
    let local_addr = listener.local_addr()?;

    if config.debug {
        warn!("Debug mode is on; error details are returned to clients");
    }
    info!(%local_addr, "hit_counter listening");

    axum::serve(listener, build_router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("hit_counter stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        warn!(error = %err, "Failed to listen for Ctrl-C; shutting down");
    }
}
