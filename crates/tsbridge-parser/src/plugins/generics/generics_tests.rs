#![allow(non_snake_case)]

use super::*;
use crate::test_fixtures::{backbone, class_path, config, endpoint, list, string};
use test_case::test_case;
use tsbridge_core::SchemaLocation;
use tsbridge_model::reflect::{ReflectMethod, ReflectType, ReflectedClass};

fn boxed() -> ReflectedClass {
    ReflectedClass::builder("com.example.Box")
        .type_parameter("T", Vec::new())
        .method(ReflectMethod::new("getValue", ReflectType::variable("T")))
        .build()
}

fn person() -> ReflectedClass {
    ReflectedClass::builder("com.example.Person")
        .method(ReflectMethod::new("getName", string()))
        .build()
}

fn box_of(argument: ReflectType) -> ReflectType {
    ReflectType::generic("com.example.Box", vec![argument])
}

fn run(classes: Vec<ReflectedClass>) -> SharedStorage {
    let class_path = class_path(classes);
    let (scope, storage) = backbone(&class_path, config());
    GenericsPlugin.execute(&scope, storage).unwrap()
}

fn response(storage: &SharedStorage, route: &str) -> Schema {
    storage
        .openapi()
        .schema_at(&SchemaLocation::response(route))
        .cloned()
        .unwrap()
}

fn value(storage: &SharedStorage, component: &str) -> Schema {
    storage
        .openapi()
        .schema_at(&SchemaLocation::component(component).property("value"))
        .cloned()
        .unwrap()
}

#[test]
fn GenericsPlugin___use_site___specialised_component() {
    let storage = run(vec![
        boxed(),
        endpoint("com.example.BoxEndpoint")
            .method(ReflectMethod::new("get", box_of(string())))
            .build(),
    ]);

    let response = response(&storage, "/BoxEndpoint/get");
    assert_eq!(response.ref_name(), Some("com.example.Box_String"));
    assert!(response.type_arguments.is_none());
    assert_eq!(value(&storage, "com.example.Box_String"), Schema::string().nullable(true));
    assert!(!storage.openapi().contains_schema("com.example.Box"));
}

#[test]
fn GenericsPlugin___specialised_component___has_no_type_parameters() {
    let storage = run(vec![
        boxed(),
        endpoint("com.example.BoxEndpoint")
            .method(ReflectMethod::new("get", box_of(string())))
            .build(),
    ]);

    let specialised = storage.openapi().schema("com.example.Box_String").unwrap();
    assert!(specialised.type_parameters.is_none());
}

#[test]
fn GenericsPlugin___same_arguments___share_one_specialisation() {
    let storage = run(vec![
        boxed(),
        endpoint("com.example.BoxEndpoint")
            .method(ReflectMethod::new("first", box_of(string())))
            .method(ReflectMethod::new("second", box_of(string())))
            .build(),
    ]);

    let names: Vec<&String> = storage
        .openapi()
        .components
        .schemas
        .keys()
        .filter(|n| n.starts_with("com.example.Box"))
        .collect();
    assert_eq!(names, vec!["com.example.Box_String"]);
}

#[test]
fn GenericsPlugin___entity_argument___labelled_by_simple_name() {
    let storage = run(vec![
        boxed(),
        person(),
        endpoint("com.example.BoxEndpoint")
            .method(ReflectMethod::new("get", box_of(ReflectType::class("com.example.Person"))))
            .build(),
    ]);

    let value = value(&storage, "com.example.Box_Person");
    assert_eq!(value.ref_name(), Some("com.example.Person"));
    assert!(value.is_nullable());
}

#[test]
fn GenericsPlugin___raw_use___opaque_arguments_under_template_name() {
    let storage = run(vec![
        boxed(),
        endpoint("com.example.BoxEndpoint")
            .method(ReflectMethod::new("raw", ReflectType::class("com.example.Box")))
            .build(),
    ]);

    assert_eq!(response(&storage, "/BoxEndpoint/raw").ref_name(), Some("com.example.Box"));
    let value = value(&storage, "com.example.Box");
    assert!(value.is_unknown());
    assert!(value.type_variable.is_none());
}

#[test]
fn GenericsPlugin___nested_use___specialised_inside_out() {
    let storage = run(vec![
        boxed(),
        endpoint("com.example.BoxEndpoint")
            .method(ReflectMethod::new("nested", box_of(box_of(string()))))
            .build(),
    ]);

    assert_eq!(
        response(&storage, "/BoxEndpoint/nested").ref_name(),
        Some("com.example.Box_Box_String")
    );
    assert_eq!(
        value(&storage, "com.example.Box_Box_String").ref_name(),
        Some("com.example.Box_String")
    );
}

#[test]
fn GenericsPlugin___template_using_template___specialised_transitively() {
    let page = ReflectedClass::builder("com.example.Page")
        .type_parameter("T", Vec::new())
        .method(ReflectMethod::new("getContent", list(ReflectType::variable("T"))))
        .method(ReflectMethod::new("getFirst", box_of(ReflectType::variable("T"))))
        .build();
    let storage = run(vec![
        boxed(),
        person(),
        page,
        endpoint("com.example.PageEndpoint")
            .method(ReflectMethod::new(
                "page",
                ReflectType::generic("com.example.Page", vec![ReflectType::class("com.example.Person")]),
            ))
            .build(),
    ]);

    let page = storage.openapi().schema("com.example.Page_Person").unwrap();
    let properties = page.properties.as_ref().unwrap();
    assert_eq!(
        properties["content"].items.as_ref().unwrap().ref_name(),
        Some("com.example.Person")
    );
    assert_eq!(properties["first"].ref_name(), Some("com.example.Box_Person"));
    assert!(storage.openapi().contains_schema("com.example.Box_Person"));
}

#[test]
fn GenericsPlugin___name_collision___numeric_suffix() {
    let taken = ReflectedClass::builder("com.example.Box_String").build();
    let storage = run(vec![
        boxed(),
        taken,
        endpoint("com.example.BoxEndpoint")
            .method(ReflectMethod::new("get", box_of(string())))
            .method(ReflectMethod::new("taken", ReflectType::class("com.example.Box_String")))
            .build(),
    ]);

    assert_eq!(
        response(&storage, "/BoxEndpoint/get").ref_name(),
        Some("com.example.Box_String_1")
    );
    assert_eq!(
        response(&storage, "/BoxEndpoint/taken").ref_name(),
        Some("com.example.Box_String")
    );
}

#[test]
fn GenericsPlugin___primitive_placeholder_nullability___argument_decides() {
    let storage = run(vec![
        boxed(),
        endpoint("com.example.BoxEndpoint")
            .method(ReflectMethod::new("get", box_of(ReflectType::class("java.lang.Integer"))))
            .build(),
    ]);

    let value = value(&storage, "com.example.Box_Integer");
    assert_eq!(value, Schema::integer(Some("int32")).nullable(true));
}

#[test]
fn GenericsPlugin___second_run___no_changes() {
    let class_path = class_path(vec![
        boxed(),
        endpoint("com.example.BoxEndpoint")
            .method(ReflectMethod::new("get", box_of(string())))
            .method(ReflectMethod::new("raw", ReflectType::class("com.example.Box")))
            .build(),
    ]);
    let (scope, storage) = backbone(&class_path, config());
    let once = GenericsPlugin.execute(&scope, storage).unwrap();
    let first = once.openapi().clone();

    let twice = GenericsPlugin.execute(&scope, once).unwrap();

    assert_eq!(twice.openapi(), &first);
}

#[test]
fn GenericsPlugin___no_templates___document_unchanged() {
    let class_path = class_path(vec![
        person(),
        endpoint("com.example.PersonEndpoint")
            .method(ReflectMethod::new("get", ReflectType::class("com.example.Person")))
            .build(),
    ]);
    let (scope, storage) = backbone(&class_path, config());
    let before = storage.openapi().clone();

    let storage = GenericsPlugin.execute(&scope, storage).unwrap();

    assert_eq!(storage.openapi(), &before);
}

#[test_case(Schema::string(), "String" ; "string")]
#[test_case(Schema::string_with_format("date"), "Date" ; "date")]
#[test_case(Schema::string_with_format("date-time"), "DateTime" ; "date time")]
#[test_case(Schema::integer(Some("int64")), "Long" ; "long")]
#[test_case(Schema::integer(Some("int32")), "Integer" ; "integer")]
#[test_case(Schema::number(Some("float")), "Float" ; "float")]
#[test_case(Schema::number(Some("double")), "Double" ; "double")]
#[test_case(Schema::number(None), "Number" ; "decimal")]
#[test_case(Schema::boolean(), "Boolean" ; "boolean")]
#[test_case(Schema::reference("com.example.Outer$Inner"), "Inner" ; "nested class reference")]
#[test_case(Schema::array(Schema::string()), "StringArray" ; "array")]
#[test_case(Schema::map(Schema::boolean()), "BooleanMap" ; "map")]
#[test_case(Schema::unknown(None), "Object" ; "opaque")]
fn label___argument_kinds(schema: Schema, expected: &str) {
    assert_eq!(label(&schema), expected);
}
