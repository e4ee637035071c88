//! Generic specialisation
//!
//! Generic entity schemas leave the backbone as templates: components with
//! `x-type-parameters` whose properties hold `x-type-variable` placeholders.
//! This plugin removes the templates and gives every use site its own
//! concrete component. `Box<String>` becomes `Box_String`, a raw `Box`
//! becomes `Box` with opaque arguments. Specialising can expose new use
//! sites, so passes repeat until nothing changes.

use crate::error::ParserResult;
use crate::plugin::{Plugin, Scope};
use crate::storage::SharedStorage;
use std::collections::{BTreeMap, BTreeSet, HashMap};
use tracing::{debug, warn};
use tsbridge_core::{Schema, SchemaType};

pub const NAME: &str = "generics";

const MAX_PASSES: usize = 64;

const RAW: &str = "raw";

pub struct GenericsPlugin;

impl Plugin for GenericsPlugin {
    fn name(&self) -> &'static str {
        NAME
    }

    fn order(&self) -> i32 {
        20
    }

    fn requires(&self) -> &'static [&'static str] {
        &["backbone"]
    }

    fn execute(&self, _scope: &Scope, mut storage: SharedStorage) -> ParserResult<SharedStorage> {
        let openapi = storage.openapi_mut();
        let template_names: Vec<String> = openapi
            .components
            .schemas
            .iter()
            .filter(|(_, schema)| schema.type_parameters.is_some())
            .map(|(name, _)| name.clone())
            .collect();
        if template_names.is_empty() {
            return Ok(storage);
        }

        let mut templates = BTreeMap::new();
        for name in template_names {
            if let Some(template) = openapi.components.schemas.remove(&name) {
                templates.insert(name, template);
            }
        }
        let mut specializer = Specializer {
            taken: openapi.components.schemas.keys().cloned().collect(),
            templates,
            specialized: HashMap::new(),
        };

        let mut settled = false;
        for pass in 0..MAX_PASSES {
            let mut created = Vec::new();
            let mut changed = false;
            let mut visit = |schema: &mut Schema| {
                changed |= specializer.rewrite(schema, &mut created);
            };
            for schema in openapi.components.schemas.values_mut() {
                schema.walk_mut(&mut visit);
            }
            openapi.for_each_operation_schema_mut(|schema| schema.walk_mut(&mut visit));

            let created_any = !created.is_empty();
            for (name, schema) in created {
                openapi.register_schema(name, schema);
            }
            if !changed && !created_any {
                debug!(passes = pass + 1, "Generic specialisation settled");
                settled = true;
                break;
            }
        }
        if !settled {
            warn!(passes = MAX_PASSES, "Generic specialisation did not settle");
        }
        Ok(storage)
    }
}

struct Specializer {
    templates: BTreeMap<String, Schema>,
    /// (template, argument key) to specialised component name
    specialized: HashMap<(String, String), String>,
    taken: BTreeSet<String>,
}

impl Specializer {
    /// Point a template use site at its specialisation
    fn rewrite(&mut self, schema: &mut Schema, created: &mut Vec<(String, Schema)>) -> bool {
        let Some(target) = schema.ref_name().map(str::to_string) else {
            return false;
        };
        if !self.templates.contains_key(&target) {
            return false;
        }
        let arguments = match &schema.type_arguments {
            None => None,
            Some(arguments) if arguments.iter().all(is_concrete) => Some(arguments.clone()),
            // nested use sites go first; this one settles on a later pass
            Some(_) => return false,
        };
        let Some(name) = self.specialize(&target, arguments, created) else {
            return false;
        };
        let changed = name != target || schema.type_arguments.is_some();
        schema.set_ref_name(&name);
        schema.type_arguments = None;
        changed
    }

    fn specialize(
        &mut self,
        template_name: &str,
        arguments: Option<Vec<Schema>>,
        created: &mut Vec<(String, Schema)>,
    ) -> Option<String> {
        let template = self.templates.get(template_name)?.clone();
        let parameters = template.type_parameters.clone().unwrap_or_default();
        let (key, base, mut arguments) = match arguments {
            None => (RAW.to_string(), template_name.to_string(), Vec::new()),
            Some(arguments) => {
                let labels: Vec<String> = arguments.iter().map(label).collect();
                (
                    format!("{arguments:?}"),
                    format!("{template_name}_{}", labels.join("_")),
                    arguments,
                )
            }
        };
        let key = (template_name.to_string(), key);
        if let Some(name) = self.specialized.get(&key) {
            return Some(name.clone());
        }

        if arguments.len() < parameters.len() {
            arguments.resize(parameters.len(), Schema::unknown(None).nullable(true));
        }
        let bindings: BTreeMap<String, Schema> = parameters.into_iter().zip(arguments).collect();
        let mut schema = template;
        schema.type_parameters = None;
        substitute(&mut schema, &bindings);

        let name = self.allocate(base);
        debug!(template = template_name, specialization = %name, "Specialised generic schema");
        self.specialized.insert(key, name.clone());
        created.push((name.clone(), schema));
        Some(name)
    }

    /// First free component name: `base`, then `base_1`, `base_2`, ...
    fn allocate(&mut self, base: String) -> String {
        if self.taken.insert(base.clone()) {
            return base;
        }
        let mut suffix = 1;
        loop {
            let candidate = format!("{base}_{suffix}");
            if self.taken.insert(candidate.clone()) {
                return candidate;
            }
            suffix += 1;
        }
    }
}

/// No placeholders and no unspecialised generic uses inside
fn is_concrete(argument: &Schema) -> bool {
    let mut concrete = true;
    argument.walk(&mut |schema| {
        if schema.type_variable.is_some() || schema.type_arguments.is_some() {
            concrete = false;
        }
    });
    concrete
}

/// Replace placeholders with their arguments.
///
/// The result is nullable only when both the placeholder and the argument
/// are; constraints on the placeholder survive.
fn substitute(schema: &mut Schema, bindings: &BTreeMap<String, Schema>) {
    schema.walk_mut(&mut |schema: &mut Schema| {
        let Some(argument) = schema.type_variable.as_ref().and_then(|v| bindings.get(v)) else {
            return;
        };
        let nullable = schema.is_nullable() && argument.is_nullable();
        let validation = schema.validation.take();
        *schema = argument.clone();
        schema.nullable = nullable.then_some(true);
        if validation.is_some() {
            schema.validation = validation;
        }
    });
}

/// Name fragment describing a type argument
pub fn label(schema: &Schema) -> String {
    if let Some(name) = schema.ref_name() {
        return simple_name(name).to_string();
    }
    let format = schema.format.as_deref();
    match schema.schema_type {
        Some(SchemaType::String) => match format {
            Some("date") => "Date".to_string(),
            Some("date-time") => "DateTime".to_string(),
            _ => "String".to_string(),
        },
        Some(SchemaType::Integer) => match format {
            Some("int64") => "Long".to_string(),
            _ => "Integer".to_string(),
        },
        Some(SchemaType::Number) => match format {
            Some("float") => "Float".to_string(),
            Some("double") => "Double".to_string(),
            _ => "Number".to_string(),
        },
        Some(SchemaType::Boolean) => "Boolean".to_string(),
        Some(SchemaType::Array) => match schema.items.as_deref() {
            Some(items) => format!("{}Array", label(items)),
            None => "Array".to_string(),
        },
        Some(SchemaType::Object) => match schema.additional_properties.as_deref() {
            Some(values) => format!("{}Map", label(values)),
            None => "Object".to_string(),
        },
        _ => "Object".to_string(),
    }
}

fn simple_name(name: &str) -> &str {
    let tail = name.rsplit('.').next().unwrap_or(name);
    tail.rsplit('$').next().unwrap_or(tail)
}

#[cfg(test)]
#[path = "generics/generics_tests.rs"]
mod generics_tests;
