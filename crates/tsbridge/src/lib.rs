//! # tsbridge
//!
//! Generate typed TypeScript clients from annotated JVM endpoint classes.
//!
//! tsbridge reads class metadata, builds an OpenAPI-shaped intermediate
//! document and emits TypeScript modules from it:
//! - a reflective type model over scanned or registered classes
//! - a parser driving an ordered plugin pipeline
//! - a TypeScript generator with form models and an endpoint barrel
//! - value and list signals for server-held shared state
//!
//! ## Quick Start
//!
//! ```
//! use std::sync::Arc;
//! use tsbridge::model::reflect::{ReflectAnnotation, ReflectMethod, ReflectType, ReflectedClass};
//! use tsbridge::prelude::*;
//!
//! let registry = ReflectRegistry::new();
//! registry.define(
//!     ReflectedClass::builder("com.example.HelloEndpoint")
//!         .annotated(ReflectAnnotation::new("com.example.Endpoint"))
//!         .method(
//!             ReflectMethod::new("sayHello", ReflectType::class("java.lang.String"))
//!                 .parameter("name", ReflectType::class("java.lang.String")),
//!         )
//!         .build(),
//! );
//! let config = ParserConfig::builder()
//!     .endpoint_annotation("com.example.Endpoint")
//!     .finish()
//!     .unwrap();
//!
//! let openapi = Parser::with_class_path(config, ClassPath::with_source(Arc::new(registry)))
//!     .execute()
//!     .unwrap();
//! let files = Generator::default().generate(&openapi).unwrap();
//!
//! assert!(files.iter().any(|file| file.path == "HelloEndpoint.ts"));
//! ```
//!
//! ## Crate Structure
//!
//! This is a facade crate that re-exports from:
//! - [`tsbridge_core`] - Intermediate document, configuration, log levels
//! - [`tsbridge_model`] - Class path, class models and signatures
//! - [`tsbridge_parser`] - Endpoint discovery and the plugin pipeline
//! - [`tsbridge_generator`] - TypeScript generation
//! - [`tsbridge_signals`] - Value and list signals
//! - [`tsbridge_logging`] - Subscriber setup

pub use tsbridge_generator as generator;
pub use tsbridge_logging as logging;
pub use tsbridge_model as model;
pub use tsbridge_parser as parser;
pub use tsbridge_signals as signals;

// Re-export core types
pub use tsbridge_core::{
    ConfigError, ConfigResult, GeneratorConfig, LogLevel, OpenApi, OutputConfig, ParserConfig,
    Schema, SchemaType,
};

// Re-export the pipeline stages
pub use tsbridge_generator::{GeneratedFile, Generator, GeneratorError, write_files};
pub use tsbridge_logging::{ReloadHandle, init_logging};
pub use tsbridge_model::{ClassPath, ModelError, ReflectRegistry, ScanIndex};
pub use tsbridge_parser::{Parser, ParserError, Plugin, PluginPipeline};

// Re-export signals
pub use tsbridge_signals::{ListSignal, SignalError, SignalRegistry, StateEvent, ValueSignal};

// Re-export common dependencies that integrators need
pub use serde;
pub use serde_json;
pub use tracing;

/// Prelude module for convenient imports.
///
/// Use `use tsbridge::prelude::*;` to import commonly used types.
pub mod prelude {
    // Pipeline
    pub use crate::{
        ClassPath, GeneratedFile, Generator, GeneratorConfig, OpenApi, Parser, ParserConfig,
        ReflectRegistry, ScanIndex, write_files,
    };

    // Signals
    pub use crate::{ListSignal, SignalRegistry, ValueSignal};

    // Errors
    pub use crate::{ConfigError, GeneratorError, ModelError, ParserError, SignalError};
}
