//! State shared by the parser and its plugins
//!
//! [`SharedStorage`] is threaded through the pipeline by value: every plugin
//! receives it, transforms it and hands it back. It carries the document
//! under construction plus the bookkeeping later plugins rely on.

use std::collections::{BTreeMap, BTreeSet};
use tsbridge_core::{OpenApi, ParserConfig, Schema, SchemaLocation};
use tsbridge_model::{
    AnnotationInfoModel, FieldInfoModel, MethodInfoModel, MethodParameterInfoModel, SignatureModel,
};

/// The model a schema was generated from
#[derive(Debug, Clone)]
pub enum Association {
    /// An entity property, with the field backing it when one has the same name
    Property {
        getter: MethodInfoModel,
        field: Option<FieldInfoModel>,
    },
    /// An endpoint method parameter
    Parameter(MethodParameterInfoModel),
    /// An endpoint method result
    Result(MethodInfoModel),
    /// A nested signature: array component, map value or type argument
    Signature(SignatureModel),
}

impl Association {
    /// Annotations on the member plus type-use annotations on its type
    pub fn annotations(&self) -> Vec<AnnotationInfoModel> {
        match self {
            Association::Property { getter, field } => {
                let mut all: Vec<AnnotationInfoModel> = getter.annotations().to_vec();
                all.extend(getter.result_type().annotations().iter().cloned());
                if let Some(field) = field {
                    all.extend(field.annotations().iter().cloned());
                    all.extend(field.signature().annotations().iter().cloned());
                }
                all
            }
            Association::Parameter(parameter) => {
                let mut all = parameter.annotations().to_vec();
                all.extend(parameter.signature().annotations().iter().cloned());
                all
            }
            Association::Result(method) => {
                let mut all = method.annotations().to_vec();
                all.extend(method.result_type().annotations().iter().cloned());
                all
            }
            Association::Signature(signature) => signature.annotations().to_vec(),
        }
    }

    pub fn has_any_annotation(&self, names: &[String]) -> bool {
        self.annotations()
            .iter()
            .any(|a| names.iter().any(|n| n == a.name()))
    }
}

/// Replacement of a host class during discovery and generation
#[derive(Debug, Clone, PartialEq)]
pub enum Replacement {
    /// Use another class in place of this one
    Class(String),
    /// Emit a fixed schema in place of this class
    Schema(Schema),
}

/// Discovery progress of an entity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityState {
    /// Queued for schema generation
    Seen,
    /// Registered in `components.schemas`
    Emitted,
}

/// Document under construction plus plugin bookkeeping
#[derive(Debug, Clone)]
pub struct SharedStorage {
    openapi: OpenApi,
    config: ParserConfig,
    origins: BTreeMap<SchemaLocation, Association>,
    dependents: BTreeMap<String, BTreeSet<String>>,
    replacements: BTreeMap<String, Replacement>,
    entity_states: BTreeMap<String, EntityState>,
}

impl SharedStorage {
    pub fn new(config: ParserConfig) -> Self {
        let openapi = OpenApi::new(config.title.clone(), config.version.clone());
        Self {
            openapi,
            config,
            origins: BTreeMap::new(),
            dependents: BTreeMap::new(),
            replacements: BTreeMap::new(),
            entity_states: BTreeMap::new(),
        }
    }

    pub fn openapi(&self) -> &OpenApi {
        &self.openapi
    }

    pub fn openapi_mut(&mut self) -> &mut OpenApi {
        &mut self.openapi
    }

    pub fn into_openapi(self) -> OpenApi {
        self.openapi
    }

    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    /// Record the model a schema at `location` was generated from
    pub fn associate(&mut self, location: SchemaLocation, association: Association) {
        self.origins.insert(location, association);
    }

    pub fn association(&self, location: &SchemaLocation) -> Option<&Association> {
        self.origins.get(location)
    }

    /// Every recorded schema origin, ordered by location
    pub fn associations(&self) -> impl Iterator<Item = (&SchemaLocation, &Association)> {
        self.origins.iter()
    }

    /// Record that `dependent` references `dependency`
    pub fn add_dependent(&mut self, dependency: &str, dependent: &str) {
        self.dependents
            .entry(dependency.to_string())
            .or_default()
            .insert(dependent.to_string());
    }

    /// Classes and endpoints that directly reference a class
    pub fn dependents_of(&self, dependency: &str) -> Vec<&str> {
        self.dependents
            .get(dependency)
            .map(|set| set.iter().map(String::as_str).collect())
            .unwrap_or_default()
    }

    pub fn add_replacement(&mut self, class_name: impl Into<String>, replacement: Replacement) {
        self.replacements.insert(class_name.into(), replacement);
    }

    pub fn replacement(&self, class_name: &str) -> Option<&Replacement> {
        self.replacements.get(class_name)
    }

    pub fn replacements(&self) -> &BTreeMap<String, Replacement> {
        &self.replacements
    }

    pub fn entity_state(&self, name: &str) -> Option<EntityState> {
        self.entity_states.get(name).copied()
    }

    /// Mark an entity as queued.
    ///
    /// Returns `false` when the entity was already seen or emitted.
    pub fn mark_seen(&mut self, name: &str) -> bool {
        if self.entity_states.contains_key(name) {
            return false;
        }
        self.entity_states.insert(name.to_string(), EntityState::Seen);
        true
    }

    pub fn mark_emitted(&mut self, name: &str) {
        self.entity_states
            .insert(name.to_string(), EntityState::Emitted);
    }
}
