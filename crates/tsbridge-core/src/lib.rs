//! tsbridge-core - Intermediate document, configuration and shared primitives
//!
//! This crate provides the types shared by every stage of the pipeline:
//! - [`OpenApi`] and [`Schema`], the OpenAPI-shaped intermediate representation
//! - [`SchemaLocation`] for addressing a schema nested anywhere in the document
//! - [`GeneratorConfig`] and [`ParserConfig`] for run configuration
//! - [`ConfigError`] for configuration failures

mod config;
mod error;
mod location;
mod openapi;

pub use config::{
    BackboneConfig, GeneratorConfig, LoggingConfig, NonnullConfig, OutputConfig, ParserConfig,
    ParserConfigBuilder, UnsupportedPolicy,
};
pub use error::{ConfigError, ConfigResult};
pub use location::{SchemaLocation, SchemaRoot, SchemaStep};
pub use openapi::{
    COMPONENTS_SCHEMAS_REF, Components, Constraint, Discriminator, Info, JSON_MEDIA_TYPE,
    MediaType, OpenApi, Operation, PathItem, RequestBody, Response, Schema, SchemaType, Tag,
};

/// Log levels shared by the logging crate and configuration
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    Trace = 0,
    Debug = 1,
    Info = 2,
    Warn = 3,
    Error = 4,
    Off = 5,
}

impl LogLevel {
    pub fn from_u8(value: u8) -> Self {
        match value {
            0 => LogLevel::Trace,
            1 => LogLevel::Debug,
            2 => LogLevel::Info,
            3 => LogLevel::Warn,
            4 => LogLevel::Error,
            _ => LogLevel::Off,
        }
    }
}

impl std::str::FromStr for LogLevel {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "trace" => Ok(LogLevel::Trace),
            "debug" => Ok(LogLevel::Debug),
            "info" => Ok(LogLevel::Info),
            "warn" | "warning" => Ok(LogLevel::Warn),
            "error" => Ok(LogLevel::Error),
            "off" | "none" => Ok(LogLevel::Off),
            other => Err(ConfigError::InvalidValue {
                field: "logging.level".to_string(),
                message: format!("unknown log level '{other}'"),
            }),
        }
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LogLevel::Trace => write!(f, "TRACE"),
            LogLevel::Debug => write!(f, "DEBUG"),
            LogLevel::Info => write!(f, "INFO"),
            LogLevel::Warn => write!(f, "WARN"),
            LogLevel::Error => write!(f, "ERROR"),
            LogLevel::Off => write!(f, "OFF"),
        }
    }
}

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        ConfigError, GeneratorConfig, LogLevel, OpenApi, ParserConfig, Schema, SchemaLocation,
        SchemaType,
    };
}
