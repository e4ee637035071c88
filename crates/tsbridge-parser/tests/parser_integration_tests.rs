//! End-to-end parser tests over a small reflected domain
//!
//! The domain exercises every built-in plugin together: an endpoint that
//! inherits generic CRUD operations, a generic page wrapper, a sealed
//! hierarchy, non-null annotations and a paging parameter.

#![allow(non_snake_case)]

use serde_json::json;
use std::sync::Arc;
use tsbridge_core::{OpenApi, ParserConfig, Schema, SchemaLocation, SchemaStep, UnsupportedPolicy};
use tsbridge_model::jvm::BaseType;
use tsbridge_model::reflect::{
    ReflectAnnotation, ReflectField, ReflectMethod, ReflectParameter, ReflectType, ReflectedClass,
};
use tsbridge_model::{ClassPath, Modifiers, ReflectRegistry};
use tsbridge_parser::{Parser, ParserError};

const ENDPOINT: &str = "com.example.annotation.Endpoint";
const ENDPOINT_EXPOSED: &str = "com.example.annotation.EndpointExposed";
const NONNULL: &str = "org.jspecify.annotations.NonNull";

// ============================================================================
// Domain
// ============================================================================

fn class(name: &str) -> ReflectType {
    ReflectType::class(name)
}

fn string() -> ReflectType {
    class("java.lang.String")
}

fn list(item: ReflectType) -> ReflectType {
    ReflectType::generic("java.util.List", vec![item])
}

fn domain() -> Vec<ReflectedClass> {
    vec![
        ReflectedClass::builder("com.example.CrudEndpoint")
            .modifiers(Modifiers::PUBLIC | Modifiers::ABSTRACT)
            .annotated(ReflectAnnotation::new(ENDPOINT_EXPOSED))
            .type_parameter("T", Vec::new())
            .type_parameter("ID", Vec::new())
            .method(ReflectMethod::new("get", ReflectType::variable("T")).parameter("id", ReflectType::variable("ID")))
            .method(
                ReflectMethod::new("save", ReflectType::variable("T"))
                    .with_parameter(
                        ReflectParameter::new("value", ReflectType::variable("T"))
                            .annotated(ReflectAnnotation::new(NONNULL)),
                    ),
            )
            .build(),
        ReflectedClass::builder("com.example.PersonEndpoint")
            .annotated(ReflectAnnotation::new(ENDPOINT))
            .extends(ReflectType::generic(
                "com.example.CrudEndpoint",
                vec![class("com.example.Person"), class("java.lang.Long")],
            ))
            .method(
                ReflectMethod::new(
                    "page",
                    ReflectType::generic("com.example.Page", vec![class("com.example.Person")]),
                )
                .parameter("pageable", class("org.springframework.data.domain.Pageable")),
            )
            .method(ReflectMethod::new("pets", list(class("com.example.Pet"))))
            .build(),
        ReflectedClass::builder("com.example.Person")
            .field(ReflectField::new("name", string()).annotated(ReflectAnnotation::new(NONNULL)))
            .method(ReflectMethod::new("getName", string()))
            .method(ReflectMethod::new("getId", class("java.util.UUID")))
            .method(ReflectMethod::new("getBirthday", class("java.time.LocalDate")))
            .method(ReflectMethod::new("getStatus", class("com.example.Status")))
            .method(ReflectMethod::new("getScore", ReflectType::primitive(BaseType::Double)))
            .build(),
        ReflectedClass::builder("com.example.Status")
            .enum_constant("ACTIVE")
            .enum_constant("RETIRED")
            .build(),
        ReflectedClass::builder("com.example.Page")
            .type_parameter("T", Vec::new())
            .method(ReflectMethod::new("getContent", list(ReflectType::variable("T"))))
            .method(ReflectMethod::new("getTotal", ReflectType::primitive(BaseType::Long)))
            .build(),
        ReflectedClass::builder("com.example.Pet")
            .modifiers(Modifiers::PUBLIC | Modifiers::ABSTRACT)
            .annotated(ReflectAnnotation::new("com.fasterxml.jackson.annotation.JsonTypeInfo").with_value("property", json!("kind")))
            .permits("com.example.Dog")
            .permits("com.example.Cat")
            .method(ReflectMethod::new("getName", string()))
            .build(),
        ReflectedClass::builder("com.example.Dog")
            .extends(class("com.example.Pet"))
            .method(ReflectMethod::new("getGoodBoy", ReflectType::primitive(BaseType::Boolean)))
            .build(),
        ReflectedClass::builder("com.example.Cat")
            .extends(class("com.example.Pet"))
            .method(ReflectMethod::new("getLives", ReflectType::primitive(BaseType::Int)))
            .build(),
    ]
}

fn config() -> ParserConfig {
    ParserConfig::builder()
        .endpoint_annotation(ENDPOINT)
        .endpoint_exposed_annotation(ENDPOINT_EXPOSED)
        .nonnull_annotation(NONNULL)
        .finish()
        .unwrap()
}

fn class_path(classes: Vec<ReflectedClass>) -> Arc<ClassPath> {
    let registry = ReflectRegistry::new();
    for class in classes {
        registry.define(class);
    }
    ClassPath::with_source(Arc::new(registry))
}

fn parse() -> OpenApi {
    Parser::with_class_path(config(), class_path(domain()))
        .execute()
        .unwrap()
}

fn at(openapi: &OpenApi, location: SchemaLocation) -> Schema {
    openapi.schema_at(&location).cloned().unwrap()
}

// ============================================================================
// Operations
// ============================================================================

mod operations {
    use super::*;

    #[test]
    fn Parser___inherited_crud_methods___bound_to_entity() {
        let openapi = parse();

        let get = at(&openapi, SchemaLocation::response("/PersonEndpoint/get"));
        assert_eq!(get.ref_name(), Some("com.example.Person"));
        let id = at(&openapi, SchemaLocation::request_body("/PersonEndpoint/get").property("id"));
        assert_eq!(id, Schema::integer(Some("int64")).nullable(true));
    }

    #[test]
    fn Parser___every_method___one_route() {
        let openapi = parse();

        let routes: Vec<&String> = openapi.paths.keys().collect();
        assert_eq!(
            routes,
            vec![
                "/PersonEndpoint/get",
                "/PersonEndpoint/page",
                "/PersonEndpoint/pets",
                "/PersonEndpoint/save",
            ]
        );
    }

    #[test]
    fn Parser___nonnull_parameter___not_nullable_after_binding() {
        let openapi = parse();

        let value = at(&openapi, SchemaLocation::request_body("/PersonEndpoint/save").property("value"));
        assert_eq!(value.ref_name(), Some("com.example.Person"));
        assert!(!value.is_nullable());
    }

    #[test]
    fn Parser___paging_parameter___mapped_pageable() {
        let openapi = parse();

        let pageable = at(&openapi, SchemaLocation::request_body("/PersonEndpoint/page").property("pageable"));
        assert_eq!(pageable.ref_name(), Some("dev.tsbridge.mappedtypes.Pageable"));
        assert!(openapi.contains_schema("dev.tsbridge.mappedtypes.Sort"));
        assert!(openapi.contains_schema("dev.tsbridge.mappedtypes.Direction"));
    }
}

// ============================================================================
// Entities
// ============================================================================

mod entities {
    use super::*;

    #[test]
    fn Parser___entity_properties___mapped_kinds() {
        let openapi = parse();
        let person = SchemaLocation::component("com.example.Person");

        assert!(!at(&openapi, person.property("name")).is_nullable());
        assert_eq!(at(&openapi, person.property("id")), Schema::string().nullable(true));
        assert_eq!(
            at(&openapi, person.property("birthday")),
            Schema::string_with_format("date").nullable(true)
        );
        assert_eq!(at(&openapi, person.property("score")), Schema::number(Some("double")));
        assert_eq!(
            at(&openapi, person.property("status")).ref_name(),
            Some("com.example.Status")
        );
    }

    #[test]
    fn Parser___enum___constant_names() {
        let openapi = parse();

        assert_eq!(
            openapi.schema("com.example.Status").unwrap().enum_values,
            Some(vec!["ACTIVE".to_string(), "RETIRED".to_string()])
        );
    }

    #[test]
    fn Parser___generic_page___specialised_per_use() {
        let openapi = parse();

        let page = at(&openapi, SchemaLocation::response("/PersonEndpoint/page"));
        assert_eq!(page.ref_name(), Some("com.example.Page_Person"));
        let content = at(&openapi, SchemaLocation::component("com.example.Page_Person").property("content"));
        assert_eq!(content.items.unwrap().ref_name(), Some("com.example.Person"));
        assert!(!openapi.contains_schema("com.example.Page"));
    }

    #[test]
    fn Parser___no_templates_or_placeholders_left() {
        let openapi = parse();

        for (name, schema) in &openapi.components.schemas {
            assert!(schema.type_parameters.is_none(), "{name} is still a template");
            schema.walk(&mut |s| {
                assert!(s.type_variable.is_none(), "{name} still has a placeholder");
                assert!(s.type_arguments.is_none(), "{name} still has type arguments");
            });
        }
    }

    #[test]
    fn Parser___every_reference___resolves() {
        let openapi = parse();

        for name in openapi.referenced_names() {
            assert!(openapi.contains_schema(&name), "dangling reference to {name}");
        }
    }
}

// ============================================================================
// Polymorphism
// ============================================================================

mod polymorphism {
    use super::*;

    #[test]
    fn Parser___sealed_hierarchy___union_with_custom_discriminator() {
        let openapi = parse();

        let union = openapi.schema("com.example.PetUnion").unwrap();
        let discriminator = union.discriminator.as_ref().unwrap();
        assert_eq!(discriminator.property_name, "kind");
        assert_eq!(discriminator.mapping.len(), 2);
        let pets = at(&openapi, SchemaLocation::response("/PersonEndpoint/pets"));
        assert_eq!(pets.items.unwrap().ref_name(), Some("com.example.PetUnion"));
    }

    #[test]
    fn Parser___subclass___extends_base_and_carries_type_name() {
        let openapi = parse();

        let dog = openapi.schema("com.example.Dog").unwrap();
        let any_of = dog.any_of.as_ref().unwrap();
        assert_eq!(any_of[0].ref_name(), Some("com.example.Pet"));
        let kind = at(
            &openapi,
            SchemaLocation::component("com.example.Dog")
                .child(SchemaStep::AnyOf(1))
                .property("kind"),
        );
        assert_eq!(kind, Schema::string_enum(vec!["Dog".to_string()]));
    }
}

// ============================================================================
// Failure modes
// ============================================================================

mod failures {
    use super::*;

    #[test]
    fn Parser___overloaded_endpoint_method___duplicate_route() {
        let mut classes = domain();
        classes.push(
            ReflectedClass::builder("com.example.SearchEndpoint")
                .annotated(ReflectAnnotation::new(ENDPOINT))
                .method(ReflectMethod::new("find", string()).parameter("text", string()))
                .method(ReflectMethod::new("find", string()).parameter("id", class("java.lang.Long")))
                .build(),
        );

        let result = Parser::with_class_path(config(), class_path(classes)).execute();

        assert!(matches!(result, Err(ParserError::DuplicateRoute { .. })));
    }

    #[test]
    fn Parser___overload_inherited_from_exposed_supertype___duplicate_route() {
        let mut classes = domain();
        classes.push(
            ReflectedClass::builder("com.example.SearchSupport")
                .modifiers(Modifiers::PUBLIC | Modifiers::ABSTRACT)
                .annotated(ReflectAnnotation::new(ENDPOINT_EXPOSED))
                .method(ReflectMethod::new("find", string()).parameter("text", string()))
                .method(ReflectMethod::new("find", string()).parameter("id", class("java.lang.Long")))
                .build(),
        );
        classes.push(
            ReflectedClass::builder("com.example.SearchEndpoint")
                .annotated(ReflectAnnotation::new(ENDPOINT))
                .extends(class("com.example.SearchSupport"))
                .build(),
        );

        let result = Parser::with_class_path(config(), class_path(classes)).execute();

        match result {
            Err(ParserError::DuplicateRoute { route }) => assert_eq!(route, "/SearchEndpoint/find"),
            other => panic!("expected duplicate route, got {other:?}"),
        }
    }

    #[test]
    fn Parser___unsupported_map_key_with_fail_policy___error() {
        let mut config = config();
        config.backbone.unsupported = UnsupportedPolicy::Fail;
        let classes = vec![
            ReflectedClass::builder("com.example.LookupEndpoint")
                .annotated(ReflectAnnotation::new(ENDPOINT))
                .method(ReflectMethod::new(
                    "byId",
                    ReflectType::generic("java.util.Map", vec![class("java.lang.Long"), string()]),
                ))
                .build(),
        ];

        let result = Parser::with_class_path(config, class_path(classes)).execute();

        match result {
            Err(error) => assert_eq!(error.error_code(), 4),
            Ok(_) => panic!("expected unsupported error"),
        }
    }
}
