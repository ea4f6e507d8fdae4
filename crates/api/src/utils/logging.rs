use pumpsync_domain::constants::DEFAULT_LOG_LEVEL;
use pumpsync_domain::{LogFormat, LoggingConfig, PumpSyncError};
use tracing::Subscriber;
use tracing_subscriber::EnvFilter;

/// Build the filter for the configured level.
///
/// Accepts anything `RUST_LOG` accepts, e.g. `info` or `pumpsync_infra=debug,warn`.
///
/// # Errors
/// Returns `PumpSyncError::Config` if the directive does not parse.
pub fn env_filter(level: &str) -> Result<EnvFilter, PumpSyncError> {
    EnvFilter::try_new(level)
        .map_err(|e| PumpSyncError::Config(format!("Invalid log level {level:?}: {e}")))
}

/// Subscriber for the startup phase, before configuration is known.
///
/// Honors `RUST_LOG`, otherwise logs at the default level. Use it scoped
/// with [`tracing::subscriber::with_default`] so the configured subscriber
/// can still be installed globally afterwards.
pub fn bootstrap_subscriber() -> impl Subscriber + Send + Sync + 'static {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_LEVEL));

    tracing_subscriber::fmt().with_env_filter(filter).with_target(true).finish()
}

/// Install the global tracing subscriber.
///
/// `RUST_LOG` takes precedence over the configured level.
///
/// # Errors
/// Returns error if the level is invalid or a subscriber is already set.
pub fn init_tracing(config: &LoggingConfig) -> Result<(), PumpSyncError> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => env_filter(&config.level)?,
    };

    let builder = tracing_subscriber::fmt().with_env_filter(filter).with_target(true);

    let installed = match config.format {
        LogFormat::Json => builder.json().try_init(),
        LogFormat::Pretty => builder.try_init(),
    };

    installed
        .map_err(|e| PumpSyncError::Internal(format!("Failed to install tracing subscriber: {e}")))
}
