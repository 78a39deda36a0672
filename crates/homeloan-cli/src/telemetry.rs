//! Log output for the CLI. Everything goes to stderr so stdout carries only
//! the calculation result.

use thiserror::Error;
use tracing_subscriber::filter::ParseError;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Error)]
pub enum TelemetryError {
    #[error("invalid --log-level '{directive}': {source}")]
    LogLevel {
        directive: String,
        #[source]
        source: ParseError,
    },
    #[error("could not install log subscriber: {0}")]
    Install(#[source] Box<dyn std::error::Error + Send + Sync>),
}

/// Install the stderr subscriber for this run.
pub fn init(log_level: &str) -> Result<(), TelemetryError> {
    let filter = log_filter(std::env::var("RUST_LOG").ok().as_deref(), log_level)?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .compact()
        .try_init()
        .map_err(TelemetryError::Install)
}

/// A usable `RUST_LOG` takes precedence; otherwise `--log-level` must parse.
fn log_filter(rust_log: Option<&str>, log_level: &str) -> Result<EnvFilter, TelemetryError> {
    if let Some(filter) = rust_log
        .filter(|v| !v.trim().is_empty())
        .and_then(|v| EnvFilter::try_new(v).ok())
    {
        return Ok(filter);
    }
    EnvFilter::try_new(log_level).map_err(|source| TelemetryError::LogLevel {
        directive: log_level.to_string(),
        source,
    })
}
