//! Configuration error types

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for configuration operations
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Error type for configuration loading and validation
///
/// Configuration errors are fatal and reported before any processing begins.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// No endpoint marker annotation was configured
    #[error("no endpoint annotation configured: at least one endpoint annotation name is required")]
    MissingEndpointAnnotation,

    /// Failed to read a configuration file
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The configuration file is not well-formed
    #[error("malformed configuration: {0}")]
    Parse(String),

    /// A configuration value is out of range or otherwise invalid
    #[error("invalid value for {field}: {message}")]
    InvalidValue { field: String, message: String },

    /// A plugin name that no known plugin answers to
    #[error("unknown plugin: {0}")]
    UnknownPlugin(String),

    /// A plugin requires another plugin that is absent or ordered after it
    #[error("plugin {plugin} requires {requires} to run before it")]
    PluginOrder { plugin: String, requires: String },
}

impl From<toml::de::Error> for ConfigError {
    fn from(err: toml::de::Error) -> Self {
        ConfigError::Parse(err.to_string())
    }
}
