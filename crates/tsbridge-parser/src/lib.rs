//! tsbridge-parser - Endpoint discovery and the plugin pipeline
//!
//! The parser turns a class path into the intermediate [`OpenApi`]
//! document:
//! 1. endpoint classes are found by annotation ([`discover_endpoints`])
//! 2. entities are found by walking the types those endpoints use
//!    ([`discover_entities`])
//! 3. an ordered [`PluginPipeline`] transforms a [`SharedStorage`] that
//!    starts empty and ends holding the finished document
//!
//! The built-in plugins live in [`plugins`].
//!
//! [`OpenApi`]: tsbridge_core::OpenApi

mod accessor;
mod discovery;
mod endpoint;
mod error;
mod parser;
mod plugin;
mod schema;
mod storage;

pub mod plugins;

#[cfg(test)]
mod test_fixtures;

pub use accessor::{Accessor, JSON_IGNORE, JSON_PROPERTY, accessors, decapitalize, property_name};
pub use discovery::{discover_entities, entity_dependencies};
pub use endpoint::{Bindings, EndpointMethod, EndpointModel, discover_endpoints, endpoint_name};
pub use error::{ParserError, ParserResult};
pub use parser::Parser;
pub use plugin::{Plugin, PluginPipeline, Scope};
pub use schema::{SchemaBuilder, Unsupported, constraints};
pub use storage::{Association, EntityState, Replacement, SharedStorage};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        Parser, ParserError, ParserResult, Plugin, PluginPipeline, Scope, SharedStorage,
    };
}
