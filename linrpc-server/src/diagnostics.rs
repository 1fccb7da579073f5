//! Diagnostic log initialization
//!
//! The loop itself only emits `tracing` events; where those events go is
//! decided here, once, at process startup. The binary points the
//! subscriber at an append-only log file so the protocol channel
//! (stdout) stays clean; without a configured file, diagnostics fall
//! back to stderr.
//!
//! Records carry a timestamp, a level, and the message, which is the
//! whole contract the loop asks of its diagnostic collaborator.
//!
//! # Environment
//!
//! - `LINRPC_LOG_FILE`: path of the append-only log file
//! - `LINRPC_LOG`: default level filter when `RUST_LOG` is unset
//!   (e.g. `info`, `debug`, `linrpc_server=trace`)

use linrpc_core::{Error, Result};
use std::path::PathBuf;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

/// Where and how verbosely to write diagnostics.
#[derive(Debug, Clone)]
pub struct DiagnosticsConfig {
    /// Append-only log file; `None` sends diagnostics to stderr.
    pub log_file: Option<PathBuf>,
    /// Level filter used when `RUST_LOG` is not set.
    pub log_level: String,
}

impl Default for DiagnosticsConfig {
    fn default() -> Self {
        Self {
            log_file: None,
            log_level: "info".to_string(),
        }
    }
}

impl DiagnosticsConfig {
    /// Read the configuration from `LINRPC_LOG_FILE` and `LINRPC_LOG`.
    pub fn from_env() -> Self {
        Self {
            log_file: std::env::var_os("LINRPC_LOG_FILE").map(PathBuf::from),
            log_level: std::env::var("LINRPC_LOG").unwrap_or_else(|_| "info".to_string()),
        }
    }

    /// Set the log file path.
    pub fn with_log_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.log_file = Some(path.into());
        self
    }

    /// Set the default level filter.
    pub fn with_log_level(mut self, level: impl Into<String>) -> Self {
        self.log_level = level.into();
        self
    }
}

/// Install the global `tracing` subscriber.
///
/// Call once at startup, before the loop runs. Returns the appender's
/// worker guard when logging to a file; hold it for the process
/// lifetime or buffered records are lost on exit.
///
/// # Errors
///
/// [`Error::Stream`] if the log file cannot be opened for append, or
/// [`Error::Internal`] if a global subscriber is already installed.
pub fn init_diagnostics(config: &DiagnosticsConfig) -> Result<Option<WorkerGuard>> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    match &config.log_file {
        Some(path) => {
            let file = std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)?;
            let (writer, guard) = tracing_appender::non_blocking(file);
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(writer)
                .with_ansi(false)
                .try_init()
                .map_err(|e| Error::Internal(e.to_string()))?;
            Ok(Some(guard))
        }
        None => {
            // stdout is the protocol channel; diagnostics must not touch it.
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .with_ansi(false)
                .try_init()
                .map_err(|e| Error::Internal(e.to_string()))?;
            Ok(None)
        }
    }
}
