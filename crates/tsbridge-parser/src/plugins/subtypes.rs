//! Polymorphic hierarchies
//!
//! A base class with known subclasses, either sealed or declared through
//! `@JsonSubTypes`, gets a `{Base}Union` component: a `oneOf` over the
//! subclasses with a discriminator. Each subclass gains a single-value enum
//! property carrying its type name, and properties and operations that
//! referred to the base refer to the union instead.

use crate::error::ParserResult;
use crate::plugin::{Plugin, Scope};
use crate::storage::SharedStorage;
use serde_json::Value;
use std::collections::BTreeMap;
use tracing::debug;
use tsbridge_core::{COMPONENTS_SCHEMAS_REF, Discriminator, OpenApi, Schema};
use tsbridge_model::ClassInfoModel;

pub const NAME: &str = "subtypes";

pub const JSON_SUB_TYPES: &str = "com.fasterxml.jackson.annotation.JsonSubTypes";
pub const JSON_TYPE_INFO: &str = "com.fasterxml.jackson.annotation.JsonTypeInfo";
pub const JSON_TYPE_NAME: &str = "com.fasterxml.jackson.annotation.JsonTypeName";

/// Discriminator property when `@JsonTypeInfo` names none
pub const DEFAULT_DISCRIMINATOR: &str = "@type";

/// Subclass names listed by `@JsonSubTypes`.
///
/// Entries are either class names or `{"value": className, "name": ...}`
/// objects.
pub fn declared_subtypes(class: &ClassInfoModel) -> Vec<String> {
    let Some(Value::Array(entries)) = class
        .annotation(JSON_SUB_TYPES)
        .and_then(|annotation| annotation.value("value"))
    else {
        return Vec::new();
    };
    entries
        .iter()
        .filter_map(|entry| match entry {
            Value::String(name) => Some(name.clone()),
            Value::Object(entry) => entry.get("value").and_then(Value::as_str).map(String::from),
            _ => None,
        })
        .collect()
}

/// Name of the discriminator property for a base class
pub fn discriminator_property(base: &ClassInfoModel) -> String {
    base.annotation(JSON_TYPE_INFO)
        .and_then(|annotation| annotation.string_value("property"))
        .filter(|property| !property.is_empty())
        .unwrap_or(DEFAULT_DISCRIMINATOR)
        .to_string()
}

/// Discriminator value identifying a subclass
pub fn type_name(subclass: &ClassInfoModel) -> String {
    subclass
        .annotation(JSON_TYPE_NAME)
        .and_then(|annotation| annotation.string_value("value"))
        .filter(|name| !name.is_empty())
        .unwrap_or(subclass.simple_name())
        .to_string()
}

pub fn union_name(base: &str) -> String {
    format!("{base}Union")
}

pub struct SubtypesPlugin;

impl Plugin for SubtypesPlugin {
    fn name(&self) -> &'static str {
        NAME
    }

    fn order(&self) -> i32 {
        30
    }

    fn requires(&self) -> &'static [&'static str] {
        &["backbone"]
    }

    fn execute(&self, scope: &Scope, mut storage: SharedStorage) -> ParserResult<SharedStorage> {
        let mut unions = BTreeMap::new();
        for base in scope.entities() {
            let openapi = storage.openapi_mut();
            if !openapi.contains_schema(base.name()) {
                continue;
            }
            let subclasses = subclasses(base, scope);
            let subclasses: Vec<ClassInfoModel> = subclasses
                .into_iter()
                .filter(|subclass| openapi.contains_schema(subclass.name()))
                .collect();
            if subclasses.is_empty() {
                continue;
            }
            let name = union_name(base.name());
            if !openapi.contains_schema(&name) {
                add_union(openapi, base, &subclasses, &name);
            }
            unions.insert(base.name().to_string(), name);
        }
        if unions.is_empty() {
            return Ok(storage);
        }

        let openapi = storage.openapi_mut();
        let mut visit = |schema: &mut Schema| retarget(schema, &unions);
        openapi.for_each_operation_schema_mut(|schema| schema.walk_mut(&mut visit));
        for schema in openapi.components.schemas.values_mut() {
            match schema.any_of.as_mut() {
                Some(elements) => {
                    // a direct anyOf reference is the superclass, not a use
                    for element in elements.iter_mut().filter(|e| e.ref_name().is_none()) {
                        element.walk_mut(&mut visit);
                    }
                }
                None => schema.walk_mut(&mut visit),
            }
        }
        Ok(storage)
    }
}

/// Permitted subclasses first, then declared ones not already listed
fn subclasses(base: &ClassInfoModel, scope: &Scope) -> Vec<ClassInfoModel> {
    let mut subclasses = base.permitted_subclasses();
    for name in declared_subtypes(base) {
        if let Some(subclass) = scope.class_path().class(&name)
            && !subclasses.contains(&subclass)
        {
            subclasses.push(subclass);
        }
    }
    subclasses
}

fn add_union(openapi: &mut OpenApi, base: &ClassInfoModel, subclasses: &[ClassInfoModel], name: &str) {
    let property = discriminator_property(base);
    let mut mapping = BTreeMap::new();
    let mut members = Vec::new();
    for subclass in subclasses {
        let value = type_name(subclass);
        add_discriminator_value(openapi, subclass.name(), &property, &value);
        mapping.insert(value, format!("{COMPONENTS_SCHEMAS_REF}{}", subclass.name()));
        members.push(Schema::reference(subclass.name()));
    }
    let mut union = Schema::one_of(members);
    union.discriminator = Some(Discriminator {
        property_name: property,
        mapping,
    });
    union.union_of = Some(base.name().to_string());
    openapi.register_schema(name, union);
    debug!(base = %base, union = name, members = subclasses.len(), "Added union schema");
}

/// Add the type name property to a subclass schema, or to its own part when
/// it extends another schema
fn add_discriminator_value(openapi: &mut OpenApi, subclass: &str, property: &str, value: &str) {
    let Some(schema) = openapi.components.schemas.get_mut(subclass) else {
        return;
    };
    let target = if schema.any_of.as_ref().is_some_and(|elements| !elements.is_empty()) {
        match schema.any_of.as_mut().and_then(|elements| elements.last_mut()) {
            Some(own) => own,
            None => return,
        }
    } else {
        schema
    };
    target.add_property(property, Schema::string_enum(vec![value.to_string()]));
}

fn retarget(schema: &mut Schema, unions: &BTreeMap<String, String>) {
    if let Some(union) = schema.ref_name().and_then(|name| unions.get(name)) {
        let union = union.clone();
        schema.set_ref_name(&union);
    }
}
