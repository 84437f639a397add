//! Tracing subscriber initialization.

use tracing_subscriber::EnvFilter;

use crate::config::logging::LoggingConfig;
use crate::error::AppError;
use crate::result::AppResult;

/// Install the global tracing subscriber from configuration.
///
/// Fails if the level filter does not parse or a subscriber is already
/// installed.
pub fn init_tracing(config: &LoggingConfig) -> AppResult<()> {
    let filter = EnvFilter::try_new(&config.level).map_err(|e| {
        AppError::configuration(format!("Invalid log level '{}': {e}", config.level))
    })?;

    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    let result = if config.format == "json" {
        builder.json().try_init()
    } else {
        builder.pretty().try_init()
    };
    result.map_err(|e| AppError::configuration(format!("Failed to install subscriber: {e}")))
}
