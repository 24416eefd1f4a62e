mod identity;
mod logging;
mod routes;
mod singleton;
mod state;

use anyhow::{Context, Result};
use axum::Router;
use clap::Parser;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use cycledir_core::CycledirConfig;

use crate::state::AppState;

#[derive(Parser)]
#[command(name = "cycledir-server")]
#[command(about = "Serve cycledir records, settings and predictions over HTTP")]
struct Cli {
    /// Keep data in memory only; nothing is written to disk
    #[arg(long)]
    ephemeral: bool,

    /// Port to listen on (overrides server.port from config)
    #[arg(short, long)]
    port: Option<u16>,
}

/// The full HTTP application for `state`.
pub fn app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .merge(routes::predict::router())
        .merge(routes::settings::router())
        .merge(routes::periods::router())
        .merge(routes::prediction::router())
        .merge(routes::events::router())
        .with_state(state)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = CycledirConfig::load().context("Failed to load configuration")?;
    if let Some(port) = cli.port {
        config.server.port = port;
    }

    logging::init(&config.log_level);

    // Ensure only one instance writes to the data directory
    let _lock = if cli.ephemeral {
        None
    } else {
        Some(singleton::acquire_lock(&config.data_path())?)
    };

    let state = AppState::from_config(&config, cli.ephemeral);

    let addr = config.server.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;

    tracing::info!(
        %addr,
        ephemeral = cli.ephemeral,
        data_dir = %config.data_path().display(),
        "cycledir-server listening"
    );

    axum::serve(listener, app(state)).await?;

    Ok(())
}
