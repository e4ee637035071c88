//! Baseline document generation
//!
//! One tagged POST operation per endpoint method and one component schema
//! per discovered entity. Enums become string enums of their constant names.
//! A class whose superclass is on the class path becomes
//! `anyOf[$ref superclass, {own properties}]`; generic classes become
//! templates carrying `x-type-parameters`.

use crate::accessor::accessors;
use crate::endpoint::{EndpointMethod, EndpointModel};
use crate::error::{ParserError, ParserResult};
use crate::plugin::{Plugin, Scope};
use crate::schema::{SchemaBuilder, Unsupported, constraints};
use crate::storage::{Association, SharedStorage};
use tracing::{debug, warn};
use tsbridge_core::{Operation, Schema, SchemaLocation, SchemaStep, Tag, UnsupportedPolicy};
use tsbridge_model::ClassInfoModel;

pub const NAME: &str = "backbone";

pub struct BackbonePlugin;

impl Plugin for BackbonePlugin {
    fn name(&self) -> &'static str {
        NAME
    }

    fn order(&self) -> i32 {
        0
    }

    fn execute(&self, scope: &Scope, mut storage: SharedStorage) -> ParserResult<SharedStorage> {
        let policy = storage.config().backbone.unsupported;
        let prefixes = storage.config().backbone.prefixes.clone();
        for endpoint in scope.endpoints() {
            add_endpoint(endpoint, policy, &mut storage)?;
        }
        for entity in scope.entities() {
            add_entity(entity, &prefixes, policy, &mut storage)?;
        }
        debug!(
            operations = storage.openapi().paths.len(),
            schemas = storage.openapi().components.schemas.len(),
            "Backbone complete"
        );
        Ok(storage)
    }
}

fn unsupported(policy: UnsupportedPolicy, element: String, reason: String) -> ParserResult<()> {
    match policy {
        UnsupportedPolicy::Skip => {
            warn!(element = %element, reason = %reason, "Skipping unsupported element");
            Ok(())
        }
        UnsupportedPolicy::Fail => Err(ParserError::Unsupported { element, reason }),
    }
}

fn add_endpoint(endpoint: &EndpointModel, policy: UnsupportedPolicy, storage: &mut SharedStorage) -> ParserResult<()> {
    storage.openapi_mut().add_tag(Tag {
        name: endpoint.name().to_string(),
        class_name: Some(endpoint.class().name().to_string()),
    });
    for method in endpoint.methods() {
        let route = format!("/{}/{}", endpoint.name(), method.name());
        match build_operation(endpoint, method, &route) {
            Ok((operation, origins)) => {
                if !storage.openapi_mut().add_operation(route.clone(), operation) {
                    return Err(ParserError::DuplicateRoute { route });
                }
                for (location, association) in origins {
                    storage.associate(location, association);
                }
                debug!(route = %route, "Added operation");
            }
            Err(Unsupported(reason)) => {
                let element = format!("{}.{}", method.method().owner_name(), method.name());
                unsupported(policy, element, reason)?;
            }
        }
    }
    Ok(())
}

type Origins = Vec<(SchemaLocation, Association)>;

fn build_operation(
    endpoint: &EndpointModel,
    method: &EndpointMethod,
    route: &str,
) -> Result<(Operation, Origins), Unsupported> {
    let mut builder = SchemaBuilder::new();
    let mut origins = Origins::new();
    let operation_id = format!("{}_{}_POST", endpoint.name(), method.name());
    let mut operation = Operation::new(operation_id, endpoint.name());

    let parameters = method.method().parameters();
    if !parameters.is_empty() {
        let body_location = SchemaLocation::request_body(route);
        let mut body = Schema::object();
        for (parameter, signature) in parameters.iter().zip(method.parameter_types()) {
            let name = parameter
                .name()
                .ok_or_else(|| Unsupported(format!("parameter {} has no name", parameter.index())))?;
            let location = body_location.property(name);
            let mut schema = builder.build(&signature, &location)?;
            schema.validation = constraints(parameter.annotations());
            body.add_property(name, schema);
            origins.push((location, Association::Parameter(parameter.clone())));
        }
        operation = operation.with_request_schema(body);
    }

    let result = method.result_type();
    if !result.is_void() {
        let location = SchemaLocation::response(route);
        let schema = builder.build(&result, &location)?;
        origins.push((location, Association::Result(method.method().clone())));
        operation = operation.with_response_schema(schema);
    }

    origins.extend(builder.into_origins());
    Ok((operation, origins))
}

fn add_entity(
    entity: &ClassInfoModel,
    prefixes: &[String],
    policy: UnsupportedPolicy,
    storage: &mut SharedStorage,
) -> ParserResult<()> {
    let name = entity.name();
    if storage.openapi().contains_schema(name) {
        storage.mark_emitted(name);
        return Ok(());
    }
    let schema = if entity.is_enum() {
        Schema::string_enum(entity.enum_constants())
    } else {
        let (schema, origins) = class_schema(entity, prefixes, policy)?;
        for (location, association) in origins {
            storage.associate(location, association);
        }
        schema
    };
    storage.openapi_mut().register_schema(name, schema);
    storage.mark_emitted(name);
    debug!(entity = %name, "Added entity schema");
    Ok(())
}

fn class_schema(
    entity: &ClassInfoModel,
    prefixes: &[String],
    policy: UnsupportedPolicy,
) -> ParserResult<(Schema, Origins)> {
    let name = entity.name();
    let type_parameters: Vec<String> = entity
        .type_parameters()
        .iter()
        .map(|p| p.name().to_string())
        .collect();
    let mut builder = SchemaBuilder::for_template(type_parameters.clone());
    let mut origins = Origins::new();
    let root = SchemaLocation::component(name);

    let superclass = entity
        .superclass()
        .filter(|s| s.as_class_ref().is_some_and(|c| c.class_info().is_some()));
    let object_location = match superclass {
        Some(_) => root.child(SchemaStep::AnyOf(1)),
        None => root.clone(),
    };

    let mut object = Schema::object();
    for accessor in accessors(entity, prefixes) {
        let location = object_location.property(&accessor.property);
        match builder.build(accessor.getter.result_type(), &location) {
            Ok(mut schema) => {
                schema.validation = constraints(&accessor.annotations());
                object.add_property(accessor.property.clone(), schema);
                origins.push((
                    location,
                    Association::Property {
                        getter: accessor.getter.clone(),
                        field: accessor.field.clone(),
                    },
                ));
            }
            Err(Unsupported(reason)) => {
                unsupported(policy, format!("{name}.{}", accessor.property), reason)?;
            }
        }
    }

    let mut schema = match superclass {
        Some(parent) => {
            let mut parent = builder
                .build(parent, &root.child(SchemaStep::AnyOf(0)))
                .map_err(|Unsupported(reason)| ParserError::Unsupported {
                    element: name.to_string(),
                    reason,
                })?;
            parent.nullable = None;
            Schema::any_of(vec![parent, object])
        }
        None => object,
    };
    if !type_parameters.is_empty() {
        schema.type_parameters = Some(type_parameters);
    }
    origins.extend(builder.into_origins());
    Ok((schema, origins))
}
