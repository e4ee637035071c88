//! Parser entry point
//!
//! One run: validate the configuration, let plugins prepare the class path,
//! discover endpoints and entities, then thread the shared storage through
//! the plugin pipeline and hand back the finished document.

use crate::discovery::discover_entities;
use crate::endpoint::discover_endpoints;
use crate::error::ParserResult;
use crate::plugin::{Plugin, PluginPipeline, Scope};
use crate::plugins::builtin_plugins;
use crate::storage::SharedStorage;
use std::sync::Arc;
use tracing::info;
use tsbridge_core::{OpenApi, ParserConfig};
use tsbridge_model::{ClassPath, ScanIndex};

/// Produces the intermediate document for one class path
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use tsbridge_core::ParserConfig;
/// use tsbridge_model::reflect::{ReflectAnnotation, ReflectMethod, ReflectType, ReflectedClass};
/// use tsbridge_model::{ClassPath, ReflectRegistry};
/// use tsbridge_parser::Parser;
///
/// let registry = ReflectRegistry::new();
/// registry.define(
///     ReflectedClass::builder("com.example.HelloEndpoint")
///         .annotated(ReflectAnnotation::new("com.example.Endpoint"))
///         .method(
///             ReflectMethod::new("sayHello", ReflectType::class("java.lang.String"))
///                 .parameter("name", ReflectType::class("java.lang.String")),
///         )
///         .build(),
/// );
/// let config = ParserConfig::builder()
///     .endpoint_annotation("com.example.Endpoint")
///     .finish()
///     .unwrap();
///
/// let openapi = Parser::with_class_path(config, ClassPath::with_source(Arc::new(registry)))
///     .execute()
///     .unwrap();
///
/// assert!(openapi.paths.contains_key("/HelloEndpoint/sayHello"));
/// ```
pub struct Parser {
    config: ParserConfig,
    class_path: Arc<ClassPath>,
    plugins: Vec<Box<dyn Plugin>>,
}

impl Parser {
    /// Load scanned class descriptors from the configured class path
    pub fn new(config: ParserConfig) -> ParserResult<Self> {
        config.validate()?;
        let index = ScanIndex::load(&config.class_path)?;
        info!(classes = index.len(), "Loaded class descriptors");
        Ok(Self::with_class_path(config, ClassPath::with_source(Arc::new(index))))
    }

    /// Parse an already assembled class path with the built-in plugins
    pub fn with_class_path(config: ParserConfig, class_path: Arc<ClassPath>) -> Self {
        Self {
            config,
            class_path,
            plugins: builtin_plugins(),
        }
    }

    /// Replace the plugin list; the configured allow/deny lists still apply
    pub fn with_plugins(mut self, plugins: Vec<Box<dyn Plugin>>) -> Self {
        self.plugins = plugins;
        self
    }

    /// Add a plugin next to the ones already registered
    pub fn add_plugin(mut self, plugin: Box<dyn Plugin>) -> Self {
        self.plugins.push(plugin);
        self
    }

    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    pub fn class_path(&self) -> &Arc<ClassPath> {
        &self.class_path
    }

    pub fn execute(self) -> ParserResult<OpenApi> {
        self.config.validate()?;
        let pipeline = PluginPipeline::new(self.plugins, &self.config)?;
        info!(plugins = ?pipeline.names(), "Starting parser");

        let mut storage = SharedStorage::new(self.config.clone());
        pipeline.prepare(&self.class_path, &mut storage)?;

        let endpoints = discover_endpoints(&self.class_path, &self.config);
        let entities = discover_entities(&endpoints, &self.class_path, &mut storage);
        info!(
            endpoints = endpoints.len(),
            entities = entities.len(),
            "Discovery complete"
        );

        let scope = Scope::new(endpoints, entities, self.class_path);
        let storage = pipeline.execute(&scope, storage)?;
        let openapi = storage.into_openapi();
        info!(
            operations = openapi.paths.len(),
            schemas = openapi.components.schemas.len(),
            "Parser complete"
        );
        Ok(openapi)
    }
}

impl std::fmt::Debug for Parser {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Parser")
            .field("config", &self.config)
            .field("class_path", &self.class_path)
            .field("plugins", &self.plugins.iter().map(|p| p.name()).collect::<Vec<_>>())
            .finish()
    }
}

#[cfg(test)]
#[path = "parser/parser_tests.rs"]
mod parser_tests;
