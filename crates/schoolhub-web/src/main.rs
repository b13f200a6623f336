//! `SchoolHub` portal service
//!
//! Serves the approval, admin-panel and settings operations as JSON over
//! HTTP, forwarding decisions to the `SchoolHub` REST backend.

#![forbid(unsafe_code)]
#![warn(
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    missing_docs,
    rust_2018_idioms
)]

use clap::Parser;
use schoolhub_core::{Config, Error, LogFormat, Result, init_logging};
use schoolhub_web::build_app;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use tokio::net::TcpListener;
use tracing::{info, warn};

/// Command line interface for the portal service
#[derive(Debug, Parser)]
#[command(
    name = "schoolhub-portal",
    version = env!("CARGO_PKG_VERSION"),
    about = "Approval and settings portal for the SchoolHub learning platform"
)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, value_name = "FILE", env = "SCHOOLHUB_CONFIG")]
    config: Option<PathBuf>,

    /// Address to bind to
    #[arg(long)]
    host: Option<String>,

    /// Port to listen on
    #[arg(short, long)]
    port: Option<u16>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long)]
    log_level: Option<String>,

    /// Log format (json, pretty)
    #[arg(long, value_name = "FORMAT")]
    log_format: Option<LogFormat>,

    /// Shorthand for `--log-format json`
    #[arg(long, conflicts_with = "log_format")]
    json: bool,
}

impl Cli {
    fn apply(&self, config: &mut Config) {
        if let Some(host) = &self.host {
            config.server.host.clone_from(host);
        }
        if let Some(port) = self.port {
            config.server.port = port;
        }
        if let Some(level) = &self.log_level {
            config.logging.level.clone_from(level);
        }
        if let Some(format) = self.log_format {
            config.logging.format = format;
        } else if self.json {
            config.logging.format = LogFormat::Json;
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let (mut config, load_error) = match &cli.config {
        Some(path) => (Config::load_from(path)?, None),
        None => match Config::load() {
            Ok(config) => (config, None),
            Err(e) => (Config::default(), Some(e)),
        },
    };
    cli.apply(&mut config);
    config.validate()?;

    // Held until shutdown so buffered file output is flushed.
    let _log_guard = init_logging(&config.logging)?;
    if let Some(e) = load_error {
        warn!("Failed to load config: {e}, using defaults");
    }

    let host: IpAddr = config.server.host.parse().map_err(|e| Error::Configuration {
        message: format!("invalid server host '{}': {e}", config.server.host),
    })?;
    let addr = SocketAddr::new(host, config.server.port);
    let backend = config.backend.base_url.clone();

    let app = build_app(config)?;
    let listener = TcpListener::bind(addr).await?;
    info!(%addr, %backend, "SchoolHub portal listening");

    axum::serve(listener, app.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("portal shut down");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!("failed to listen for Ctrl+C: {e}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                warn!("failed to install SIGTERM handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => info!("received Ctrl+C, shutting down"),
        () = terminate => info!("received terminate signal, shutting down"),
    }
}
