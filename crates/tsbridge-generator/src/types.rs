//! Schema to TypeScript type mapping
//!
//! | Schema | Type |
//! |--------|------|
//! | `$ref` | imported type, with type arguments when present |
//! | `string` (with `enum`) | `string` (string literal union) |
//! | `number`, `integer` | `number` |
//! | `boolean` | `boolean` |
//! | `array` | `Array<T>` |
//! | `object` with `additionalProperties` | `Record<string, T>` |
//! | `anyOf`, `oneOf` | union |
//! | anything else | `unknown` |
//!
//! A nullable schema maps to `T | undefined`.

use crate::ast::{PropertySignature, TypeNode};
use crate::error::{GeneratorError, GeneratorResult};
use crate::module::ModuleBuilder;
use crate::naming::{identifier, module_path, relative_specifier, simple_name};
use indexmap::IndexMap;
use tsbridge_core::{Schema, SchemaType};

impl ModuleBuilder<'_> {
    /// Type of a schema, admitting `undefined` when the schema is nullable
    pub fn type_of(&mut self, schema: &Schema, context: &str) -> GeneratorResult<TypeNode> {
        let ty = self.required_type_of(schema, context)?;
        Ok(if schema.is_nullable() {
            ty.or_undefined()
        } else {
            ty
        })
    }

    /// Type of a schema ignoring its nullability
    pub fn required_type_of(&mut self, schema: &Schema, context: &str) -> GeneratorResult<TypeNode> {
        if let Some(reference) = &schema.reference {
            let Some(name) = schema.ref_name() else {
                return Err(GeneratorError::UnsupportedSchema {
                    context: context.to_string(),
                    reason: format!("{reference} is not a component reference"),
                });
            };
            let local = self.component_type(name, context)?;
            let mut arguments = Vec::new();
            for argument in schema.type_arguments.iter().flatten() {
                arguments.push(self.type_of(argument, context)?);
            }
            return Ok(TypeNode::generic(local, arguments));
        }
        if let Some(variable) = &schema.type_variable {
            return Ok(TypeNode::reference(variable.clone()));
        }
        if let Some(members) = schema.one_of.as_ref().or(schema.any_of.as_ref()) {
            let mut nodes = Vec::with_capacity(members.len());
            for member in members {
                nodes.push(self.type_of(member, context)?);
            }
            return Ok(TypeNode::union(nodes));
        }

        let ty = match schema.schema_type {
            Some(SchemaType::String) => match &schema.enum_values {
                Some(values) => TypeNode::union(
                    values
                        .iter()
                        .map(|v| TypeNode::StringLiteral(v.clone()))
                        .collect(),
                ),
                None => TypeNode::String,
            },
            Some(SchemaType::Number | SchemaType::Integer) => TypeNode::Number,
            Some(SchemaType::Boolean) => TypeNode::Boolean,
            Some(SchemaType::Array) => {
                let items = match schema.items.as_deref() {
                    Some(items) => self.type_of(items, context)?,
                    None => TypeNode::Unknown,
                };
                TypeNode::Array(Box::new(items))
            }
            Some(SchemaType::Object) => self.object_type(schema, context)?,
            None => TypeNode::Unknown,
        };
        Ok(ty)
    }

    /// Members of an object schema; nullable properties become optional
    pub fn property_signatures(
        &mut self,
        properties: &IndexMap<String, Schema>,
        context: &str,
    ) -> GeneratorResult<Vec<PropertySignature>> {
        let mut members = Vec::with_capacity(properties.len());
        for (name, schema) in properties {
            let ty = self.required_type_of(schema, &format!("{context}.{name}"))?;
            members.push(PropertySignature {
                name: name.clone(),
                optional: schema.is_nullable(),
                ty,
            });
        }
        Ok(members)
    }

    /// Local name of a component's type, importing it when declared elsewhere
    pub fn component_type(&mut self, name: &str, context: &str) -> GeneratorResult<String> {
        if !self.document.contains_schema(name) {
            return Err(GeneratorError::dangling(name, context));
        }
        let simple = identifier(simple_name(name));
        if self.own_component.as_deref() == Some(name) {
            return Ok(simple);
        }
        let specifier = relative_specifier(&self.module, &module_path(name));
        Ok(self.imports.default_import(&specifier, &simple, true))
    }

    fn object_type(&mut self, schema: &Schema, context: &str) -> GeneratorResult<TypeNode> {
        if let Some(values) = schema.additional_properties.as_deref() {
            return Ok(TypeNode::Record(Box::new(self.type_of(values, context)?)));
        }
        match &schema.properties {
            Some(properties) if !properties.is_empty() => Ok(TypeNode::Literal(
                self.property_signatures(properties, context)?,
            )),
            _ => Ok(TypeNode::Record(Box::new(TypeNode::Unknown))),
        }
    }
}
