//! Core types and utilities for `SchoolHub`

#![forbid(unsafe_code)]
#![warn(
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    missing_docs,
    rust_2018_idioms
)]

pub mod config;
pub mod error;
pub mod settings;
pub mod types;

// Re-export commonly used types
pub use config::{Config, LogFormat, LoggingConfig};
pub use error::{Error, Result};
pub use settings::{AccountSettings, PasswordChange, Theme, Toggle};
pub use types::{
    AccountId, AccountStatus, ApprovalAuthority, Envelope, Role, Session, Stats, UserAccount,
    UsersPayload,
};

use std::path::Path;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::fmt::writer::BoxMakeWriter;

/// Initialize the logging system
///
/// `RUST_LOG` takes precedence over the configured level. When a log file is
/// configured the returned guard must be held until shutdown so buffered
/// lines are flushed.
///
/// # Errors
///
/// Returns an error if the level directive is invalid or a global
/// subscriber is already installed.
pub fn init_logging(config: &LoggingConfig) -> Result<Option<WorkerGuard>> {
    use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.level))
        .map_err(|e| Error::Configuration {
            message: format!("invalid log level '{}': {e}", config.level),
        })?;

    let (writer, guard) = match &config.file {
        Some(path) => {
            let file_name = path.file_name().ok_or_else(|| Error::Configuration {
                message: format!("log file path '{}' has no file name", path.display()),
            })?;
            let directory = path
                .parent()
                .filter(|p| !p.as_os_str().is_empty())
                .unwrap_or_else(|| Path::new("."));
            let appender = tracing_appender::rolling::never(directory, file_name);
            let (non_blocking, guard) = tracing_appender::non_blocking(appender);
            (BoxMakeWriter::new(non_blocking), Some(guard))
        }
        None => (BoxMakeWriter::new(std::io::stdout), None),
    };

    let registry = tracing_subscriber::registry().with(filter);
    let installed = match config.format {
        LogFormat::Json => registry
            .with(fmt::layer().json().with_writer(writer))
            .try_init(),
        LogFormat::Pretty => registry.with(fmt::layer().with_writer(writer)).try_init(),
    };

    installed.map_err(|e| Error::Configuration {
        message: format!("failed to install log subscriber: {e}"),
    })?;

    Ok(guard)
}
