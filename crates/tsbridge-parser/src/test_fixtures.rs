//! Class builders shared by unit tests

use crate::discovery::discover_entities;
use crate::endpoint::discover_endpoints;
use crate::plugin::{Plugin, Scope};
use crate::plugins::BackbonePlugin;
use crate::storage::SharedStorage;
use std::sync::Arc;
use tsbridge_core::ParserConfig;
use tsbridge_model::reflect::{ClassBuilder, ReflectAnnotation, ReflectType, ReflectedClass};
use tsbridge_model::{ClassPath, ReflectRegistry};

pub const ENDPOINT: &str = "com.example.annotation.Endpoint";
pub const ENDPOINT_EXPOSED: &str = "com.example.annotation.EndpointExposed";
pub const NONNULL: &str = "org.jspecify.annotations.NonNull";

pub fn config() -> ParserConfig {
    ParserConfig::builder()
        .endpoint_annotation(ENDPOINT)
        .endpoint_exposed_annotation(ENDPOINT_EXPOSED)
        .nonnull_annotation(NONNULL)
        .finish()
        .expect("valid config")
}

pub fn class_path(classes: Vec<ReflectedClass>) -> Arc<ClassPath> {
    let registry = ReflectRegistry::new();
    for class in classes {
        registry.define(class);
    }
    ClassPath::with_source(Arc::new(registry))
}

pub fn endpoint(name: &str) -> ClassBuilder {
    ReflectedClass::builder(name).annotated(ReflectAnnotation::new(ENDPOINT))
}

pub fn string() -> ReflectType {
    ReflectType::class("java.lang.String")
}

pub fn list(item: ReflectType) -> ReflectType {
    ReflectType::generic("java.util.List", vec![item])
}

pub fn map(key: ReflectType, value: ReflectType) -> ReflectType {
    ReflectType::generic("java.util.Map", vec![key, value])
}

/// Discover endpoints and entities with a fresh storage
pub fn scope(class_path: &Arc<ClassPath>, config: ParserConfig) -> (Scope, SharedStorage) {
    let mut storage = SharedStorage::new(config);
    let endpoints = discover_endpoints(class_path, storage.config());
    let entities = discover_entities(&endpoints, class_path, &mut storage);
    (Scope::new(endpoints, entities, class_path.clone()), storage)
}

/// Scope plus the storage after the backbone has run
pub fn backbone(class_path: &Arc<ClassPath>, config: ParserConfig) -> (Scope, SharedStorage) {
    let (scope, storage) = scope(class_path, config);
    let storage = BackbonePlugin
        .execute(&scope, storage)
        .expect("backbone succeeds");
    (scope, storage)
}
