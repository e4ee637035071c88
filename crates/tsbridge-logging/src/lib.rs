//! tsbridge-logging - Tracing subscriber setup
//!
//! This crate provides:
//! - [`init_logging`] installing a stderr `fmt` subscriber behind a reloadable
//!   level filter
//! - [`ReloadHandle`] for changing the level while running

mod reload;
mod subscriber;

pub use reload::{ReloadError, ReloadHandle, level_filter};
pub use subscriber::{init_logging, init_logging_from_config};
pub use tsbridge_core::LogLevel;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{LogLevel, ReloadHandle, init_logging};
}
