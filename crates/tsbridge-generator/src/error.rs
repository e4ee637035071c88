//! Generator error types

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for generator operations
pub type GeneratorResult<T> = Result<T, GeneratorError>;

/// Error type for TypeScript generation
#[derive(Error, Debug)]
pub enum GeneratorError {
    /// A `$ref` names a component the document does not contain.
    ///
    /// The parser resolves every reference before generation starts, so this
    /// always points at a pipeline bug rather than bad input.
    #[error("dangling reference to {name} in {context}")]
    DanglingReference { name: String, context: String },

    /// A schema shape the generator has no TypeScript form for
    #[error("unsupported schema in {context}: {reason}")]
    UnsupportedSchema { context: String, reason: String },

    /// Failed to write generated output
    #[error("failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl GeneratorError {
    pub(crate) fn dangling(name: &str, context: &str) -> Self {
        GeneratorError::DanglingReference {
            name: name.to_string(),
            context: context.to_string(),
        }
    }

    /// Whether the error reveals an inconsistent document
    pub fn is_fatal_document_error(&self) -> bool {
        matches!(self, GeneratorError::DanglingReference { .. })
    }
}

#[cfg(test)]
#[path = "error/error_tests.rs"]
mod error_tests;
