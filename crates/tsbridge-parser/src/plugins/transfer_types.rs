//! Transfer type replacement
//!
//! Framework types that do not serialize as their own shape are swapped for
//! an equivalent. Paging types are replaced by mapped classes provided under
//! [`MAPPED_TYPES_PACKAGE`]; `UUID` becomes a string and Jackson trees become
//! opaque. Replacements are registered before discovery so the mapped classes
//! are what gets walked, then every reference left in the document is
//! rewritten once the backbone has run.

use crate::error::ParserResult;
use crate::plugin::{Plugin, Scope};
use crate::storage::{Replacement, SharedStorage};
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::debug;
use tsbridge_core::Schema;
use tsbridge_model::jvm::BaseType;
use tsbridge_model::reflect::{ReflectMethod, ReflectRegistry, ReflectType, ReflectedClass};
use tsbridge_model::{ClassPath, Modifiers};

pub const NAME: &str = "transfer-types";

/// Package of the classes standing in for framework paging types
pub const MAPPED_TYPES_PACKAGE: &str = "dev.tsbridge.mappedtypes";

const SPRING_DOMAIN: &str = "org.springframework.data.domain";

fn mapped(simple_name: &str) -> String {
    format!("{MAPPED_TYPES_PACKAGE}.{simple_name}")
}

fn spring(simple_name: &str) -> String {
    format!("{SPRING_DOMAIN}.{simple_name}")
}

/// Default replacements, keyed by the replaced class
pub fn default_replacements() -> BTreeMap<String, Replacement> {
    let mut replacements = BTreeMap::new();
    for (from, to) in [
        ("Pageable", "Pageable"),
        ("PageRequest", "Pageable"),
        ("Sort", "Sort"),
        ("Sort$Order", "Order"),
        ("Sort$Direction", "Direction"),
        ("Sort$NullHandling", "NullHandling"),
    ] {
        replacements.insert(spring(from), Replacement::Class(mapped(to)));
    }
    replacements.insert("java.util.UUID".to_string(), Replacement::Schema(Schema::string()));
    for opaque in [
        "com.fasterxml.jackson.databind.JsonNode",
        "com.fasterxml.jackson.databind.node.ObjectNode",
        "com.fasterxml.jackson.databind.node.ArrayNode",
    ] {
        replacements.insert(opaque.to_string(), Replacement::Schema(Schema::unknown(None)));
    }
    replacements
}

fn getter(name: &str, result: ReflectType) -> ReflectMethod {
    ReflectMethod::new(name, result)
}

fn mapped_enum(simple_name: &str, constants: &[&str]) -> ReflectedClass {
    constants
        .iter()
        .fold(
            ReflectedClass::builder(mapped(simple_name))
                .modifiers(Modifiers::PUBLIC | Modifiers::FINAL),
            |builder, constant| builder.enum_constant(*constant),
        )
        .build()
}

/// Class definitions for the mapped paging types
pub fn mapped_types() -> ReflectRegistry {
    let registry = ReflectRegistry::new();
    registry.define(
        ReflectedClass::builder(mapped("Pageable"))
            .modifiers(Modifiers::PUBLIC)
            .method(getter("getPageNumber", ReflectType::primitive(BaseType::Int)))
            .method(getter("getPageSize", ReflectType::primitive(BaseType::Int)))
            .method(getter("getSort", ReflectType::class(mapped("Sort"))))
            .build(),
    );
    registry.define(
        ReflectedClass::builder(mapped("Sort"))
            .modifiers(Modifiers::PUBLIC)
            .method(getter(
                "getOrders",
                ReflectType::generic("java.util.List", vec![ReflectType::class(mapped("Order"))]),
            ))
            .build(),
    );
    registry.define(
        ReflectedClass::builder(mapped("Order"))
            .modifiers(Modifiers::PUBLIC)
            .method(getter("getDirection", ReflectType::class(mapped("Direction"))))
            .method(getter("getProperty", ReflectType::class("java.lang.String")))
            .method(getter("getIgnoreCase", ReflectType::primitive(BaseType::Boolean)))
            .method(getter("getNullHandling", ReflectType::class(mapped("NullHandling"))))
            .build(),
    );
    registry.define(mapped_enum("Direction", &["ASC", "DESC"]));
    registry.define(mapped_enum("NullHandling", &["NATIVE", "NULLS_FIRST", "NULLS_LAST"]));
    registry
}

pub struct TransferTypesPlugin;

impl Plugin for TransferTypesPlugin {
    fn name(&self) -> &'static str {
        NAME
    }

    fn order(&self) -> i32 {
        5
    }

    fn requires(&self) -> &'static [&'static str] {
        &["backbone"]
    }

    fn prepare(&self, class_path: &ClassPath, storage: &mut SharedStorage) -> ParserResult<()> {
        if !class_path.contains(&mapped("Pageable")) {
            class_path.add_source(Arc::new(mapped_types()));
        }
        for (class_name, replacement) in default_replacements() {
            if storage.replacement(&class_name).is_none() {
                storage.add_replacement(class_name, replacement);
            }
        }
        Ok(())
    }

    fn execute(&self, _scope: &Scope, mut storage: SharedStorage) -> ParserResult<SharedStorage> {
        let replacements = storage.replacements().clone();
        if replacements.is_empty() {
            return Ok(storage);
        }
        let mut replaced = 0usize;
        let mut visit = |schema: &mut Schema| {
            if replace(schema, &replacements) {
                replaced += 1;
            }
        };
        let openapi = storage.openapi_mut();
        for schema in openapi.components.schemas.values_mut() {
            schema.walk_mut(&mut visit);
        }
        openapi.for_each_operation_schema_mut(|schema| schema.walk_mut(&mut visit));
        debug!(replaced, "Replaced transfer types");
        Ok(storage)
    }
}

/// Rewrite one schema node, keeping its nullability and constraints
fn replace(schema: &mut Schema, replacements: &BTreeMap<String, Replacement>) -> bool {
    let class_name = match schema.ref_name() {
        Some(name) => name.to_string(),
        None if schema.is_unknown() => match &schema.java_type {
            Some(java_type) => java_type.clone(),
            None => return false,
        },
        None => return false,
    };
    let Some(replacement) = replacements.get(&class_name) else {
        return false;
    };
    let nullable = schema.nullable;
    let validation = schema.validation.take();
    *schema = match replacement {
        Replacement::Class(target) => Schema::reference(target),
        Replacement::Schema(replacement) => replacement.clone(),
    };
    schema.nullable = nullable;
    schema.validation = validation;
    true
}
