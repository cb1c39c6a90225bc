//! Connect4 game server.
//!
//! Spawns one game actor and serves it over HTTP until Ctrl+C.

use anyhow::{Context, Error};
use c4_server::{
    api::{self, AppState},
    config::ServerConfig,
    logging, metrics,
};
use connect4::GameActor;
use pico_args::Arguments;
use std::net::SocketAddr;

const HELP: &str = "\
Run a Connect4 game server

USAGE:
  c4_server [OPTIONS]

OPTIONS:
  --bind            IP:PORT  Server socket bind address  [default: env SERVER_BIND or 127.0.0.1:5000]
  --metrics-bind    IP:PORT  Prometheus scrape address   [default: env METRICS_BIND, disabled when unset]
  --inbox-capacity  N        Queued game requests        [default: env GAME_INBOX_CAPACITY or 64]

FLAGS:
  -h, --help                 Print help information

ENVIRONMENT:
  SERVER_BIND                Server bind address (e.g., 0.0.0.0:5000)
  METRICS_BIND               Prometheus exporter address (e.g., 0.0.0.0:9090)
  GAME_INBOX_CAPACITY        Capacity of the game actor's request queue
  RUST_LOG                   Log filter (e.g., debug,hyper=warn)
";

struct Args {
    bind: Option<SocketAddr>,
    metrics_bind: Option<SocketAddr>,
    inbox_capacity: Option<usize>,
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    // Load .env file if it exists
    let _ = dotenvy::dotenv();

    let mut pargs = Arguments::from_env();

    // Help has a higher priority and should be handled separately.
    if pargs.contains(["-h", "--help"]) {
        print!("{HELP}");
        std::process::exit(0);
    }

    let args = Args {
        bind: pargs.opt_value_from_str("--bind")?,
        metrics_bind: pargs.opt_value_from_str("--metrics-bind")?,
        inbox_capacity: pargs.opt_value_from_str("--inbox-capacity")?,
    };

    logging::init();

    let config = ServerConfig::from_env(args.bind, args.metrics_bind, args.inbox_capacity)?;
    config.validate()?;

    if let Some(addr) = config.metrics_bind {
        metrics::init_metrics(addr).map_err(|e| anyhow::anyhow!(e))?;
        tracing::info!("Prometheus metrics exported at http://{}/metrics", addr);
    }

    let game = GameActor::spawn(&config.game);
    let app = api::create_router(AppState { game: game.clone() });

    let listener = tokio::net::TcpListener::bind(config.bind)
        .await
        .with_context(|| format!("Failed to bind to {}", config.bind))?;

    tracing::info!(
        "Server is running at http://{}. Press Ctrl+C to stop.",
        config.bind
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    tracing::info!("Shutting down server...");
    game.close().await?;

    Ok(())
}

/// Graceful shutdown signal
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for Ctrl+C: {}", e);
        std::future::pending::<()>().await;
    }
}
