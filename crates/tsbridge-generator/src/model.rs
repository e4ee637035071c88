//! Form models
//!
//! A form model mirrors an entity for client-side binding and validation:
//!
//! ```text
//! class PersonModel<T extends Person_1 = Person_1> extends ObjectModel_1<T> {
//!     declare readonly name: StringModel_1;
//!     static override readonly validators = { name: [new NotBlank_1()] };
//! }
//! ```
//!
//! Enums get an `EnumModel` over the enum object. Generic templates and
//! `oneOf` unions get no model; properties of those types use `ObjectModel`.

use crate::ast::{ClassMember, Declaration, TypeNode, TypeParameter};
use crate::entity::is_enum;
use crate::error::{GeneratorError, GeneratorResult};
use crate::module::{GeneratedFile, ModuleBuilder};
use crate::naming::{
    identifier, model_module_path, module_path, property_key, relative_specifier, simple_name,
};
use tracing::debug;
use tsbridge_core::{Constraint, OpenApi, Schema, SchemaType};

/// Package providing the model and validator classes
pub const FORM_PACKAGE: &str = "@tsbridge/form";

const OBJECT_MODEL: &str = "ObjectModel";

/// Whether a component gets a form model
pub fn has_model(schema: &Schema) -> bool {
    if schema.type_parameters.is_some() || schema.one_of.is_some() {
        return false;
    }
    is_enum(schema)
        || schema.any_of.is_some()
        || (schema.schema_type == Some(SchemaType::Object)
            && schema.additional_properties.is_none())
}

fn model_name(component: &str) -> String {
    format!("{}Model", identifier(simple_name(component)))
}

/// Generate the form model of component `name`
pub fn model_module(document: &OpenApi, name: &str, schema: &Schema) -> GeneratorResult<GeneratedFile> {
    debug!(entity = name, "Generating form model");
    let module = model_module_path(name);
    let mut builder = ModuleBuilder::new(document, module.clone());
    let class_name = model_name(name);
    let entity_specifier = relative_specifier(&module, &module_path(name));
    let entity_name = identifier(simple_name(name));

    let declaration = if is_enum(schema) {
        let enum_model = builder.imports().named_import(FORM_PACKAGE, "EnumModel", false);
        let entity = builder
            .imports()
            .default_import(&entity_specifier, &entity_name, false);
        Declaration::Class {
            name: class_name.clone(),
            type_parameters: Vec::new(),
            extends: TypeNode::generic(enum_model, vec![TypeNode::TypeOf(entity.clone())]),
            members: vec![ClassMember::StaticField {
                name: "enum".to_string(),
                value: entity,
            }],
        }
    } else {
        let entity = builder
            .imports()
            .default_import(&entity_specifier, &entity_name, true);
        let mut parameter = TypeParameter::new("T");
        parameter.constraint = Some(TypeNode::reference(entity.clone()));
        parameter.default = Some(TypeNode::reference(entity));

        let mut parent = None;
        let mut properties = Vec::new();
        match &schema.any_of {
            Some(parts) => {
                for part in parts {
                    if let Some(parent_name) = part.ref_name() {
                        parent.get_or_insert(parent_name);
                    } else if let Some(own) = &part.properties {
                        properties.extend(own.iter());
                    }
                }
            }
            None => properties.extend(schema.properties.iter().flatten()),
        }

        let base = match parent {
            Some(parent_name) => parent_model(&mut builder, name, parent_name)?,
            None => builder.imports().named_import(FORM_PACKAGE, OBJECT_MODEL, false),
        };

        let mut members = Vec::with_capacity(properties.len() + 1);
        let mut validators = Vec::new();
        for (property, property_schema) in properties {
            let context = format!("{name}.{property}");
            members.push(ClassMember::DeclaredField {
                name: property.clone(),
                ty: model_type(&mut builder, name, property_schema, &context)?,
            });
            if let Some(constraints) = property_schema.validation.as_deref()
                && !constraints.is_empty()
            {
                let calls: Vec<String> = constraints
                    .iter()
                    .map(|c| validator_call(&mut builder, c))
                    .collect();
                validators.push(format!("{}: [{}]", property_key(property), calls.join(", ")));
            }
        }
        if !validators.is_empty() {
            members.push(ClassMember::StaticField {
                name: "validators".to_string(),
                value: format!("{{ {} }}", validators.join(", ")),
            });
        }

        Declaration::Class {
            name: class_name.clone(),
            type_parameters: vec![parameter],
            extends: TypeNode::generic(base, vec![TypeNode::reference("T")]),
            members,
        }
    };

    builder.declare(declaration);
    builder.declare(Declaration::ExportDefault(class_name));
    Ok(builder.finish())
}

/// Base class for a model whose entity extends `parent`
fn parent_model(builder: &mut ModuleBuilder<'_>, name: &str, parent: &str) -> GeneratorResult<String> {
    let document = builder.document;
    let Some(parent_schema) = document.schema(parent) else {
        return Err(GeneratorError::dangling(parent, name));
    };
    if !has_model(parent_schema) {
        return Ok(builder
            .imports()
            .named_import(FORM_PACKAGE, OBJECT_MODEL, false));
    }
    let specifier = relative_specifier(&builder.module, &model_module_path(parent));
    Ok(builder
        .imports()
        .default_import(&specifier, &model_name(parent), false))
}

/// Model class of a property schema
fn model_type(
    builder: &mut ModuleBuilder<'_>,
    component: &str,
    schema: &Schema,
    context: &str,
) -> GeneratorResult<TypeNode> {
    if let Some(target) = schema.ref_name() {
        let document = builder.document;
        let Some(target_schema) = document.schema(target) else {
            return Err(GeneratorError::dangling(target, context));
        };
        if !has_model(target_schema) {
            return Ok(form_type(builder, OBJECT_MODEL));
        }
        if target == component {
            return Ok(TypeNode::reference(model_name(component)));
        }
        let specifier = relative_specifier(&builder.module, &model_module_path(target));
        let local = builder
            .imports()
            .default_import(&specifier, &model_name(target), true);
        return Ok(TypeNode::reference(local));
    }

    let ty = match schema.schema_type {
        Some(SchemaType::String) => form_type(builder, "StringModel"),
        Some(SchemaType::Number | SchemaType::Integer) => form_type(builder, "NumberModel"),
        Some(SchemaType::Boolean) => form_type(builder, "BooleanModel"),
        Some(SchemaType::Array) => {
            let items = match schema.items.as_deref() {
                Some(items) => model_type(builder, component, items, context)?,
                None => form_type(builder, OBJECT_MODEL),
            };
            let array = builder.imports().named_import(FORM_PACKAGE, "ArrayModel", true);
            TypeNode::generic(array, vec![items])
        }
        _ => form_type(builder, OBJECT_MODEL),
    };
    Ok(ty)
}

fn form_type(builder: &mut ModuleBuilder<'_>, class: &str) -> TypeNode {
    TypeNode::reference(builder.imports().named_import(FORM_PACKAGE, class, true))
}

/// `new Size_1({ max: 10, min: 1 })`
fn validator_call(builder: &mut ModuleBuilder<'_>, constraint: &Constraint) -> String {
    let class = builder
        .imports()
        .named_import(FORM_PACKAGE, &identifier(&constraint.name), false);
    if constraint.attributes.is_empty() {
        return format!("new {class}()");
    }
    let attributes: Vec<String> = constraint
        .attributes
        .iter()
        .map(|(key, value)| format!("{}: {value}", property_key(key)))
        .collect();
    format!("new {class}({{ {} }})", attributes.join(", "))
}
