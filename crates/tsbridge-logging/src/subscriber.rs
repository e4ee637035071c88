//! Global subscriber installation

use crate::reload::{ReloadHandle, level_filter};
use tracing_subscriber::filter::{EnvFilter, LevelFilter};
use tracing_subscriber::fmt;
use tracing_subscriber::prelude::*;
use tracing_subscriber::reload;
use tsbridge_core::{ConfigResult, LogLevel, LoggingConfig};

/// Initialize logging at `level`, writing to stderr.
///
/// When `RUST_LOG` holds a valid filter it decides what is logged and the
/// reloadable level starts fully open. Returns `false` when a global
/// subscriber was already installed, in which case nothing changes.
pub fn init_logging(level: LogLevel) -> bool {
    let env_filter = env_filter();
    let initial = if env_filter.is_some() {
        LevelFilter::TRACE
    } else {
        level_filter(level)
    };
    let (filter, handle) = reload::Layer::new(initial);

    let subscriber = tracing_subscriber::registry()
        .with(filter)
        .with(env_filter)
        .with(fmt::layer().with_writer(std::io::stderr).with_target(true));

    match tracing::subscriber::set_global_default(subscriber) {
        Ok(()) => {
            ReloadHandle::global().set_handle(handle);
            tracing::debug!(%level, "Logging initialized");
            true
        }
        Err(_) => false,
    }
}

/// Initialize logging from the `[logging]` configuration section
pub fn init_logging_from_config(config: &LoggingConfig) -> ConfigResult<bool> {
    Ok(init_logging(config.log_level()?))
}

fn env_filter() -> Option<EnvFilter> {
    std::env::var(EnvFilter::DEFAULT_ENV)
        .ok()
        .filter(|directives| !directives.trim().is_empty())
        .and_then(|directives| EnvFilter::try_new(directives).ok())
}
