//! Signature to schema mapping
//!
//! Every schema the backbone emits comes from here. Class references are
//! classified through the well-known type table first; classes on the class
//! path become component references and everything else is opaque. Reference
//! types are nullable, primitives are not.

use crate::storage::Association;
use tsbridge_core::{Constraint, Schema, SchemaLocation, SchemaStep};
use tsbridge_model::jvm::BaseType;
use tsbridge_model::{AnnotationInfoModel, ClassRefSignatureModel, KnownKind, SignatureModel};

const CONSTRAINT_PACKAGES: &[&str] = &[
    "jakarta.validation.constraints.",
    "javax.validation.constraints.",
];

/// Why a signature has no schema
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Unsupported(pub String);

/// Builds schemas for signatures and records where nested ones came from
#[derive(Debug, Default)]
pub struct SchemaBuilder {
    template_parameters: Vec<String>,
    resolving: Vec<String>,
    origins: Vec<(SchemaLocation, Association)>,
}

impl SchemaBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// A builder for a generic class: its own type variables become
    /// `x-type-variable` placeholders
    pub fn for_template(type_parameters: Vec<String>) -> Self {
        Self {
            template_parameters: type_parameters,
            ..Self::default()
        }
    }

    /// Schema origins recorded for nested signatures
    pub fn into_origins(self) -> Vec<(SchemaLocation, Association)> {
        self.origins
    }

    pub fn build(&mut self, signature: &SignatureModel, location: &SchemaLocation) -> Result<Schema, Unsupported> {
        match signature {
            SignatureModel::Base(base) => Ok(base_schema(base.base_type())),
            SignatureModel::Array(array) => {
                let items = self.nested(array.component(), location.child(SchemaStep::Items))?;
                Ok(Schema::array(items).nullable(true))
            }
            SignatureModel::TypeVariable(variable) => {
                let name = variable.name();
                if self.template_parameters.iter().any(|p| p == name) {
                    return Ok(Schema {
                        type_variable: Some(name.to_string()),
                        ..Schema::default()
                    }
                    .nullable(true));
                }
                if self.resolving.iter().any(|r| r == name) {
                    return Ok(Schema::unknown(None).nullable(true));
                }
                let bound = variable
                    .resolve()
                    .and_then(|p| p.bounds().first().cloned());
                match bound {
                    Some(bound) => {
                        self.resolving.push(name.to_string());
                        let schema = self.build(&bound, location);
                        self.resolving.pop();
                        schema
                    }
                    None => Ok(Schema::unknown(None).nullable(true)),
                }
            }
            SignatureModel::ClassRef(reference) => self.class_ref(reference, location),
        }
    }

    fn nested(&mut self, signature: &SignatureModel, location: SchemaLocation) -> Result<Schema, Unsupported> {
        let schema = self.build(signature, &location)?;
        self.origins
            .push((location, Association::Signature(signature.clone())));
        Ok(schema)
    }

    fn class_ref(
        &mut self,
        reference: &ClassRefSignatureModel,
        location: &SchemaLocation,
    ) -> Result<Schema, Unsupported> {
        let argument = |index: usize| {
            reference
                .type_arguments()
                .get(index)
                .and_then(|a| a.signature())
                .cloned()
        };
        let schema = match reference.kind() {
            Some(KnownKind::Optional) => match argument(0) {
                Some(inner) => self.build(&inner, location)?,
                None => Schema::unknown(None),
            },
            Some(KnownKind::String) => Schema::string(),
            Some(KnownKind::Number(format)) if format.is_integral() => Schema::integer(format.format()),
            Some(KnownKind::Number(format)) => Schema::number(format.format()),
            Some(KnownKind::Boolean) => Schema::boolean(),
            Some(KnownKind::Date) => Schema::string_with_format("date"),
            Some(KnownKind::DateTime) => Schema::string_with_format("date-time"),
            Some(KnownKind::Iterable) => {
                let items = match argument(0) {
                    Some(item) => self.nested(&item, location.child(SchemaStep::Items))?,
                    None => Schema::unknown(None).nullable(true),
                };
                Schema::array(items)
            }
            Some(KnownKind::Map) => {
                if let Some(key) = argument(0)
                    && !key.as_class_ref().is_some_and(|k| k.is_string())
                {
                    return Err(Unsupported(format!(
                        "map key type {key} is not a string"
                    )));
                }
                let values = match argument(1) {
                    Some(value) => self.nested(&value, location.child(SchemaStep::AdditionalProperties))?,
                    None => Schema::unknown(None).nullable(true),
                };
                Schema::map(values)
            }
            Some(KnownKind::Void) => Schema::unknown(Some(reference.name().to_string())),
            Some(KnownKind::Object) => Schema::unknown(None),
            None if reference.class_info().is_some() => {
                let mut schema = Schema::reference(reference.name());
                if !reference.type_arguments().is_empty() {
                    let mut arguments = Vec::new();
                    for (index, argument) in reference.type_arguments().iter().enumerate() {
                        let step = location.child(SchemaStep::TypeArgument(index));
                        arguments.push(match argument.signature() {
                            Some(signature) => self.nested(signature, step)?,
                            None => Schema::unknown(None).nullable(true),
                        });
                    }
                    schema.type_arguments = Some(arguments);
                }
                schema
            }
            None => Schema::unknown(Some(reference.name().to_string())),
        };
        Ok(schema.nullable(true))
    }
}

fn base_schema(base: BaseType) -> Schema {
    match base {
        BaseType::Boolean => Schema::boolean(),
        BaseType::Byte | BaseType::Short | BaseType::Int => Schema::integer(Some("int32")),
        BaseType::Long => Schema::integer(Some("int64")),
        BaseType::Float => Schema::number(Some("float")),
        BaseType::Double => Schema::number(Some("double")),
        BaseType::Char => Schema::string(),
        BaseType::Void => Schema::unknown(None),
    }
}

/// Bean validation constraints among the annotations
pub fn constraints(annotations: &[AnnotationInfoModel]) -> Option<Vec<Constraint>> {
    let found: Vec<Constraint> = annotations
        .iter()
        .filter(|a| CONSTRAINT_PACKAGES.iter().any(|p| a.name().starts_with(p)))
        .map(|a| Constraint {
            name: a.simple_name().to_string(),
            attributes: a.values().clone(),
        })
        .collect();
    (!found.is_empty()).then_some(found)
}
