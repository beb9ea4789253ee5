//! Danmaku conversion server
//!
//! Converts binary danmaku comment streams into XML markup or ASS subtitles,
//! either once from the command line or as an HTTP service, using the
//! danmaku-lib core.

mod cli;
mod config;
mod config_file;
mod convert;
mod error;
mod http;
mod metrics;
mod state;

use clap::Parser;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::signal;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::cli::{Cli, Commands};
use crate::config::ServerConfig;
use crate::error::{Result, ServerError};
use crate::http::create_router;
use crate::state::AppState;

/// Application version
const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Application name
const APP_NAME: &str = "danmaku-server";

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Commands::InitConfig { path } = &cli.command {
        config_file::generate_default_config(path)?;
        println!("Wrote default configuration to {}", path.display());
        return Ok(());
    }

    let config = config_file::load_server_config(cli.config.as_deref())?;
    init_logging(&config);

    match cli.command {
        Commands::Convert(args) => {
            let layout = config.layout.clone();
            tokio::task::spawn_blocking(move || convert::run(&args, &layout))
                .await
                .map_err(|e| ServerError::Internal(e.to_string()))?
        }
        Commands::Serve => serve(config).await,
        Commands::InitConfig { .. } => Ok(()),
    }
}

async fn serve(config: ServerConfig) -> Result<()> {
    tracing::info!("{} v{} starting", APP_NAME, VERSION);
    tracing::info!("Configuration loaded: {:?}", config);

    let addr: SocketAddr = config
        .socket_addr()
        .parse()
        .map_err(|e| ServerError::Config(format!("bad listen address: {}", e)))?;

    let state = Arc::new(AppState::new(config));
    let app = create_router(state);

    tracing::info!("Starting HTTP server on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}

/// Initialize logging with tracing. Output goes to stderr so `convert` can
/// write documents to stdout.
fn init_logging(config: &ServerConfig) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        default_filter(&config.log_level).into()
    });

    let (json, pretty) = if config.json_logs() {
        (
            Some(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr)),
            None,
        )
    } else {
        (
            None,
            Some(tracing_subscriber::fmt::layer().with_writer(std::io::stderr)),
        )
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(json)
        .with(pretty)
        .init();
}

fn default_filter(level: &str) -> String {
    format!(
        "danmaku_server={level},danmaku_lib={level},tower_http={level}",
        level = level
    )
}
