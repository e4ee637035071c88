//! Accessor naming convention
//!
//! An entity's properties are its public instance getters: methods without
//! parameters whose name starts with one of the configured prefixes. The
//! property name is the rest of the method name decapitalised the JavaBeans
//! way, so `getFirstName` becomes `firstName` and `getURL` stays `URL`.
//!
//! Jackson annotations on the getter or on the field of the same name apply:
//! `@JsonIgnore` drops the property and `@JsonProperty("name")` renames it.

use std::collections::BTreeSet;
use tracing::debug;
use tsbridge_model::{AnnotationInfoModel, ClassInfoModel, FieldInfoModel, MethodInfoModel};

pub const JSON_IGNORE: &str = "com.fasterxml.jackson.annotation.JsonIgnore";
pub const JSON_PROPERTY: &str = "com.fasterxml.jackson.annotation.JsonProperty";

/// `Object.getClass()` is never a property
const IGNORED_ACCESSORS: &[&str] = &["getClass"];

/// A property discovered through its getter
#[derive(Debug, Clone)]
pub struct Accessor {
    /// Serialized name, after any `@JsonProperty` rename
    pub property: String,
    pub getter: MethodInfoModel,
    /// Field named after the getter, if the class declares one
    pub field: Option<FieldInfoModel>,
}

impl Accessor {
    /// Annotations of the getter followed by those of the backing field
    pub fn annotations(&self) -> Vec<AnnotationInfoModel> {
        let mut annotations = self.getter.annotations().to_vec();
        if let Some(field) = &self.field {
            annotations.extend(field.annotations().iter().cloned());
        }
        annotations
    }
}

/// Lowercase the first character, unless the first two are both uppercase
pub fn decapitalize(name: &str) -> String {
    let mut chars = name.chars();
    let Some(first) = chars.next() else {
        return String::new();
    };
    if first.is_uppercase() && chars.clone().next().is_some_and(char::is_uppercase) {
        return name.to_string();
    }
    first.to_lowercase().chain(chars).collect()
}

/// Property name for a method, if it follows the accessor convention
pub fn property_name(method_name: &str, prefixes: &[String]) -> Option<String> {
    prefixes.iter().find_map(|prefix| {
        let rest = method_name.strip_prefix(prefix.as_str())?;
        // `get` alone or `getter` are not accessors
        rest.chars()
            .next()
            .filter(|c| c.is_uppercase())
            .map(|_| decapitalize(rest))
    })
}

/// Accessors declared by the class itself, in declaration order.
///
/// The first getter for a property wins when several prefixes match or a
/// rename collides with another property.
pub fn accessors(class: &ClassInfoModel, prefixes: &[String]) -> Vec<Accessor> {
    let mut found: Vec<Accessor> = Vec::new();
    let mut seen = BTreeSet::new();
    for method in class.methods() {
        if !method.is_public()
            || method.is_static()
            || method.is_generated()
            || !method.parameters().is_empty()
            || method.result_type().is_void()
            || IGNORED_ACCESSORS.contains(&method.name())
        {
            continue;
        }
        let Some(bean_name) = property_name(method.name(), prefixes) else {
            continue;
        };
        if !seen.insert(bean_name.clone()) {
            continue;
        }
        let accessor = Accessor {
            field: class.field(&bean_name).cloned(),
            property: bean_name,
            getter: method.clone(),
        };
        let annotations = accessor.annotations();
        if is_ignored(&annotations) {
            debug!(class = %class, property = %accessor.property, "Skipping ignored property");
            continue;
        }
        let property = renamed(&annotations).unwrap_or_else(|| accessor.property.clone());
        if found.iter().any(|a| a.property == property) {
            continue;
        }
        found.push(Accessor { property, ..accessor });
    }
    found
}

/// `@JsonIgnore`, unless given `false`
fn is_ignored(annotations: &[AnnotationInfoModel]) -> bool {
    annotations
        .iter()
        .filter(|a| a.name() == JSON_IGNORE)
        .any(|a| a.value("value").and_then(|v| v.as_bool()).unwrap_or(true))
}

/// Name given by `@JsonProperty`, if not empty
fn renamed(annotations: &[AnnotationInfoModel]) -> Option<String> {
    annotations
        .iter()
        .filter(|a| a.name() == JSON_PROPERTY)
        .find_map(|a| a.string_value("value").filter(|name| !name.is_empty()))
        .map(str::to_string)
}
