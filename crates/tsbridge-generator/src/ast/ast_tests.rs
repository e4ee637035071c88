#![allow(non_snake_case)]

use super::*;
use test_case::test_case;

fn property(name: &str, optional: bool, ty: TypeNode) -> PropertySignature {
    PropertySignature {
        name: name.to_string(),
        optional,
        ty,
    }
}

#[test_case(TypeNode::String, "string" ; "string")]
#[test_case(TypeNode::Array(Box::new(TypeNode::Number)), "Array<number>" ; "array")]
#[test_case(TypeNode::Record(Box::new(TypeNode::Boolean)), "Record<string, boolean>" ; "record")]
#[test_case(TypeNode::generic("Page_1", vec![TypeNode::String]), "Page_1<string>" ; "generic reference")]
#[test_case(TypeNode::StringLiteral("Dog".to_string()), "\"Dog\"" ; "string literal")]
#[test_case(TypeNode::TypeOf("Status_1".to_string()), "typeof Status_1" ; "typeof")]
#[test_case(TypeNode::Literal(Vec::new()), "{}" ; "empty literal")]
fn TypeNode___display___renders_typescript(node: TypeNode, expected: &str) {
    assert_eq!(node.to_string(), expected);
}

#[test]
fn TypeNode___or_undefined___appends_undefined_once() {
    let node = TypeNode::String.or_undefined().or_undefined();

    assert_eq!(node.to_string(), "string | undefined");
}

#[test]
fn TypeNode___or_undefined_on_unknown___unchanged() {
    assert_eq!(TypeNode::Unknown.or_undefined(), TypeNode::Unknown);
}

#[test]
fn TypeNode___array_of_nullable___keeps_union_inside() {
    let node = TypeNode::Array(Box::new(TypeNode::reference("Person_1").or_undefined()));

    assert_eq!(node.to_string(), "Array<Person_1 | undefined>");
}

#[test]
fn TypeNode___union_of_one___unwrapped() {
    assert_eq!(TypeNode::union(vec![TypeNode::Number]), TypeNode::Number);
}

#[test]
fn TypeNode___inline_literal___renders_members() {
    let node = TypeNode::Literal(vec![
        property("id", false, TypeNode::Number),
        property("name", true, TypeNode::String),
    ]);

    assert_eq!(node.to_string(), "{ id: number; name?: string }");
}

#[test]
fn Declaration___interface___renders_members_and_extends() {
    let declaration = Declaration::Interface {
        name: "Dog".to_string(),
        type_parameters: Vec::new(),
        extends: vec![TypeNode::reference("Animal_1")],
        members: vec![
            property("breed", true, TypeNode::String),
            property("@type", false, TypeNode::StringLiteral("Dog".to_string())),
        ],
    };

    assert_eq!(
        declaration.to_string(),
        "interface Dog extends Animal_1 {\n    breed?: string;\n    \"@type\": \"Dog\";\n}\n"
    );
}

#[test]
fn Declaration___generic_interface___renders_type_parameters() {
    let declaration = Declaration::Interface {
        name: "Page".to_string(),
        type_parameters: vec![TypeParameter::new("T")],
        extends: Vec::new(),
        members: vec![property(
            "content",
            true,
            TypeNode::Array(Box::new(TypeNode::reference("T"))),
        )],
    };

    assert!(declaration.to_string().starts_with("interface Page<T> {\n"));
}

#[test]
fn Declaration___enum___values_equal_names() {
    let declaration = Declaration::Enum {
        name: "Status".to_string(),
        members: vec!["ACTIVE".to_string(), "INACTIVE".to_string()],
    };

    assert_eq!(
        declaration.to_string(),
        "enum Status {\n    ACTIVE = \"ACTIVE\",\n    INACTIVE = \"INACTIVE\"\n}\n"
    );
}

#[test]
fn Declaration___async_function___renders_signature_and_body() {
    let declaration = Declaration::AsyncFunction {
        name: "get_1".to_string(),
        parameters: vec![
            Parameter {
                name: "id".to_string(),
                optional: false,
                ty: TypeNode::Number.or_undefined(),
            },
            Parameter {
                name: "init".to_string(),
                optional: true,
                ty: TypeNode::reference("EndpointRequestInit_1"),
            },
        ],
        return_type: TypeNode::generic("Promise", vec![TypeNode::Void]),
        body: "return client_1.call(\"Api\", \"get\", { id }, init);".to_string(),
    };

    assert_eq!(
        declaration.to_string(),
        "async function get_1(id: number | undefined, init?: EndpointRequestInit_1): Promise<void> {\n    return client_1.call(\"Api\", \"get\", { id }, init);\n}\n"
    );
}

#[test]
fn Declaration___class___renders_declared_and_static_fields() {
    let mut parameter = TypeParameter::new("T");
    parameter.constraint = Some(TypeNode::reference("Person_1"));
    parameter.default = Some(TypeNode::reference("Person_1"));
    let declaration = Declaration::Class {
        name: "PersonModel".to_string(),
        type_parameters: vec![parameter],
        extends: TypeNode::generic("ObjectModel_1", vec![TypeNode::reference("T")]),
        members: vec![
            ClassMember::DeclaredField {
                name: "name".to_string(),
                ty: TypeNode::reference("StringModel_1"),
            },
            ClassMember::StaticField {
                name: "validators".to_string(),
                value: "{}".to_string(),
            },
        ],
    };

    assert_eq!(
        declaration.to_string(),
        "class PersonModel<T extends Person_1 = Person_1> extends ObjectModel_1<T> {\n    declare readonly name: StringModel_1;\n    static override readonly validators = {};\n}\n"
    );
}

#[test]
fn Declaration___export_named___aliases_only_when_different() {
    let declaration = Declaration::ExportNamed(vec![
        ("get_1".to_string(), "get".to_string()),
        ("same".to_string(), "same".to_string()),
    ]);

    assert_eq!(declaration.to_string(), "export { get_1 as get, same };\n");
}

#[test]
fn Declaration___export_default___renders_statement() {
    assert_eq!(
        Declaration::ExportDefault("Person".to_string()).to_string(),
        "export default Person;\n"
    );
}

#[test]
fn TypeNode___empty_union___unknown() {
    assert_eq!(TypeNode::union(Vec::new()), TypeNode::Unknown);
}
