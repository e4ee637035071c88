//! Entity modules
//!
//! One module per component schema, default-exporting a single declaration:
//! - string enums become `enum` declarations whose values are the constant names
//! - `oneOf` unions become a type alias over the variant types
//! - `anyOf` compositions become an interface extending the referenced parents
//! - objects become interfaces, generic when the schema declares type parameters
//! - anything else becomes a type alias

use crate::ast::{Declaration, PropertySignature, TypeNode, TypeParameter};
use crate::error::{GeneratorError, GeneratorResult};
use crate::module::{GeneratedFile, ModuleBuilder};
use crate::naming::{identifier, module_path, simple_name};
use tracing::debug;
use tsbridge_core::{OpenApi, Schema, SchemaType};

/// Whether a component is a string enum
pub(crate) fn is_enum(schema: &Schema) -> bool {
    schema.schema_type == Some(SchemaType::String) && schema.enum_values.is_some()
}

/// Generate the module declaring component `name`
pub fn entity_module(document: &OpenApi, name: &str, schema: &Schema) -> GeneratorResult<GeneratedFile> {
    debug!(entity = name, "Generating entity module");
    let mut builder = ModuleBuilder::new(document, module_path(name)).declaring(name);
    let ident = identifier(simple_name(name));
    let type_parameters: Vec<TypeParameter> = schema
        .type_parameters
        .iter()
        .flatten()
        .map(TypeParameter::new)
        .collect();

    let declaration = if is_enum(schema) {
        Declaration::Enum {
            name: ident.clone(),
            members: schema.enum_values.clone().unwrap_or_default(),
        }
    } else if let Some(variants) = &schema.one_of {
        let mut members = Vec::with_capacity(variants.len());
        for variant in variants {
            if variant.ref_name().is_none() {
                return Err(GeneratorError::UnsupportedSchema {
                    context: name.to_string(),
                    reason: "union variants must be component references".to_string(),
                });
            }
            members.push(builder.required_type_of(variant, name)?);
        }
        Declaration::TypeAlias {
            name: ident.clone(),
            type_parameters,
            ty: TypeNode::union(members),
        }
    } else if let Some(parts) = &schema.any_of {
        let (extends, members) = composition(&mut builder, name, parts)?;
        Declaration::Interface {
            name: ident.clone(),
            type_parameters,
            extends,
            members,
        }
    } else if schema.schema_type == Some(SchemaType::Object)
        && schema.additional_properties.is_none()
    {
        let members = match &schema.properties {
            Some(properties) => builder.property_signatures(properties, name)?,
            None => Vec::new(),
        };
        Declaration::Interface {
            name: ident.clone(),
            type_parameters,
            extends: Vec::new(),
            members,
        }
    } else {
        Declaration::TypeAlias {
            name: ident.clone(),
            type_parameters,
            ty: builder.required_type_of(schema, name)?,
        }
    };

    builder.declare(declaration);
    builder.declare(Declaration::ExportDefault(ident));
    Ok(builder.finish())
}

/// Parents and own members of an `anyOf` composition
fn composition(
    builder: &mut ModuleBuilder<'_>,
    name: &str,
    parts: &[Schema],
) -> GeneratorResult<(Vec<TypeNode>, Vec<PropertySignature>)> {
    let mut extends = Vec::new();
    let mut members = Vec::new();
    for part in parts {
        if part.reference.is_some() {
            extends.push(builder.required_type_of(part, name)?);
        } else if let Some(properties) = &part.properties {
            members.extend(builder.property_signatures(properties, name)?);
        } else {
            return Err(GeneratorError::UnsupportedSchema {
                context: name.to_string(),
                reason: "anyOf members must be references or objects".to_string(),
            });
        }
    }
    Ok((extends, members))
}
