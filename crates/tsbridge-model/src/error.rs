//! Type model error types

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for type model operations
pub type ModelResult<T> = Result<T, ModelError>;

/// Error type for metadata loading and signature parsing
#[derive(Error, Debug)]
pub enum ModelError {
    /// A JVM generic signature or descriptor does not follow the grammar
    #[error("malformed signature '{signature}' at offset {position}: {message}")]
    MalformedSignature {
        signature: String,
        position: usize,
        message: String,
    },

    /// A class descriptor file could not be read
    #[error("failed to read class descriptor {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A class descriptor file is not valid descriptor JSON
    #[error("invalid class descriptor {path}: {message}")]
    Descriptor { path: PathBuf, message: String },

    /// A class name was looked up that no source provides
    #[error("unknown class: {0}")]
    UnknownClass(String),
}

#[cfg(test)]
#[path = "error/error_tests.rs"]
mod error_tests;
