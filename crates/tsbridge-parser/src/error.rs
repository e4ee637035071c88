//! Parser error types

use thiserror::Error;
use tsbridge_core::ConfigError;
use tsbridge_model::ModelError;

/// Result type alias for parser operations
pub type ParserResult<T> = Result<T, ParserError>;

/// Error type for discovery and plugin execution
///
/// Any of these aborts the run: a partially built document is never handed to
/// the generator.
#[derive(Error, Debug)]
pub enum ParserError {
    /// Invalid or incomplete configuration
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Class metadata could not be loaded
    #[error("class metadata error: {0}")]
    Model(#[from] ModelError),

    /// Two endpoint methods map to the same route
    #[error("duplicate route {route}: endpoint method names must be unique per endpoint")]
    DuplicateRoute { route: String },

    /// A method or property shape that cannot be described in the document
    #[error("unsupported {element}: {reason}")]
    Unsupported { element: String, reason: String },

    /// A plugin gave up on the document
    #[error("plugin {plugin} failed: {message}")]
    Plugin { plugin: String, message: String },

    /// Serialization/deserialization error
    #[error("serialization error: {0}")]
    Serialization(String),
}

impl ParserError {
    /// Stable numeric code for hosts that classify failures
    pub fn error_code(&self) -> u32 {
        match self {
            ParserError::Config(_) => 1,
            ParserError::Model(_) => 2,
            ParserError::DuplicateRoute { .. } => 3,
            ParserError::Unsupported { .. } => 4,
            ParserError::Plugin { .. } => 5,
            ParserError::Serialization(_) => 6,
        }
    }

    /// Whether the error comes from user configuration rather than input classes
    pub fn is_config_error(&self) -> bool {
        matches!(self, ParserError::Config(_))
    }
}

impl From<serde_json::Error> for ParserError {
    fn from(err: serde_json::Error) -> Self {
        ParserError::Serialization(err.to_string())
    }
}
