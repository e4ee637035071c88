#![allow(non_snake_case)]

use super::*;
use crate::reflect::{ReflectMethod, ReflectRegistry, ReflectType, ReflectedClass};
use std::sync::Arc;

fn class_path() -> Arc<ClassPath> {
    let registry = ReflectRegistry::new();
    registry.define(ReflectedClass::builder("com.example.Person").build());
    registry.define(ReflectedClass::builder("com.example.Address").build());
    registry.define(
        ReflectedClass::builder("com.example.Box")
            .type_parameter("T", vec![ReflectType::class("com.example.Address")])
            .method(ReflectMethod::new("getValue", ReflectType::variable("T")))
            .method(
                ReflectMethod::new("map", ReflectType::variable("R"))
                    .type_parameter("R", vec![ReflectType::class("com.example.Person")]),
            )
            .build(),
    );
    registry.define(
        ReflectedClass::builder("com.example.PersonList")
            .extends(ReflectType::generic(
                "java.util.ArrayList",
                vec![ReflectType::class("com.example.Person")],
            ))
            .build(),
    );
    registry.define(
        ReflectedClass::builder("com.example.Color")
            .enum_constant("RED")
            .build(),
    );
    ClassPath::with_source(Arc::new(registry))
}

fn reference(class_path: &Arc<ClassPath>, name: &str) -> SignatureModel {
    SignatureModel::class_ref(name, Arc::downgrade(class_path))
}

fn names(set: &BTreeSet<ClassInfoModel>) -> Vec<&str> {
    set.iter().map(|c| c.name()).collect()
}

#[test]
fn resolve___none___empty() {
    assert!(resolve(None).is_empty());
}

#[test]
fn resolve___primitive___empty() {
    assert!(resolve(Some(&SignatureModel::base(BaseType::Int))).is_empty());
}

#[test]
fn resolve___system_container___only_argument_dependencies() {
    let class_path = class_path();
    let list = SignatureModel::from_reflect(
        &ReflectType::generic("java.util.Map", vec![
            ReflectType::class("java.lang.String"),
            ReflectType::array(ReflectType::class("com.example.Person")),
        ]),
        &Scope::None,
        &Arc::downgrade(&class_path),
    );

    let dependencies = resolve(Some(&list));

    assert_eq!(names(&dependencies), vec!["com.example.Person"]);
}

#[test]
fn resolve___user_class_with_arguments___class_and_arguments() {
    let class_path = class_path();
    let boxed = SignatureModel::from_reflect(
        &ReflectType::generic("com.example.Box", vec![ReflectType::class("com.example.Person")]),
        &Scope::None,
        &Arc::downgrade(&class_path),
    );

    let dependencies = boxed.dependencies();

    assert_eq!(names(&dependencies), vec!["com.example.Box", "com.example.Person"]);
}

#[test]
fn resolve___class_type_variable___bound_dependencies() {
    let class_path = class_path();
    let boxed = class_path.class("com.example.Box").unwrap();
    let value = boxed.methods()[0].result_type();

    let dependencies = resolve(Some(value));

    assert_eq!(names(&dependencies), vec!["com.example.Address"]);
}

#[test]
fn TypeVariableModel___method_variable___resolved_before_class() {
    let class_path = class_path();
    let boxed = class_path.class("com.example.Box").unwrap();
    let variable = boxed.methods()[1].result_type().as_type_variable().unwrap();

    let parameter = variable.resolve().unwrap();

    assert_eq!(parameter.name(), "R");
    assert_eq!(
        parameter.bounds()[0].as_class_ref().unwrap().name(),
        "com.example.Person"
    );
}

#[test]
fn TypeVariableModel___without_scope___unresolved() {
    let variable = SignatureModel::from_reflect(
        &ReflectType::variable("T"),
        &Scope::None,
        &Weak::new(),
    );

    assert!(variable.as_type_variable().unwrap().resolve().is_none());
    assert!(variable.dependencies().is_empty());
}

#[test]
fn ClassRefSignatureModel___known_kinds___classified() {
    let class_path = class_path();

    assert!(reference(&class_path, "java.lang.String").as_class_ref().unwrap().is_string());
    assert!(reference(&class_path, "java.lang.Long").as_class_ref().unwrap().is_number());
    assert!(reference(&class_path, "java.util.Set").as_class_ref().unwrap().is_iterable());
    assert!(reference(&class_path, "java.util.TreeMap").as_class_ref().unwrap().is_map());
    assert!(reference(&class_path, "java.util.Optional").as_class_ref().unwrap().is_optional());
    assert!(reference(&class_path, "java.time.Instant").as_class_ref().unwrap().is_date_time());
}

#[test]
fn ClassRefSignatureModel___user_collection___iterable_through_supertypes() {
    let class_path = class_path();
    let reference = reference(&class_path, "com.example.PersonList");

    assert!(reference.as_class_ref().unwrap().is_iterable());
}

#[test]
fn ClassRefSignatureModel___is_system___when_not_on_class_path() {
    let class_path = class_path();

    assert!(reference(&class_path, "java.util.UUID").as_class_ref().unwrap().is_system());
    assert!(!reference(&class_path, "com.example.Person").as_class_ref().unwrap().is_system());
}

#[test]
fn ClassRefSignatureModel___is_enum___from_class() {
    let class_path = class_path();

    assert!(reference(&class_path, "com.example.Color").as_class_ref().unwrap().is_enum());
    assert!(!reference(&class_path, "com.example.Person").as_class_ref().unwrap().is_enum());
}

#[test]
fn SignatureModel___substitute___replaces_variables_deeply() {
    let class_path = class_path();
    let weak = Arc::downgrade(&class_path);
    let signature = SignatureModel::from_reflect(
        &ReflectType::generic("java.util.List", vec![ReflectType::array(
            ReflectType::variable("T").annotated("com.example.NonNull"),
        )]),
        &Scope::None,
        &weak,
    );
    let mut bindings = BTreeMap::new();
    bindings.insert("T".to_string(), reference(&class_path, "com.example.Person"));

    let substituted = signature.substitute(&bindings);

    assert_eq!(substituted.to_string(), "java.util.List<com.example.Person[]>");
    let component = substituted.as_class_ref().unwrap().type_arguments()[0]
        .signature()
        .unwrap()
        .as_array()
        .unwrap()
        .component();
    assert!(component.has_annotation("com.example.NonNull"));
}

#[test]
fn SignatureModel___equality___ignores_declaration_scope() {
    let class_path = class_path();
    let boxed = class_path.class("com.example.Box").unwrap();
    let from_method = boxed.methods()[0].result_type().clone();
    let detached = SignatureModel::from_reflect(&ReflectType::variable("T"), &Scope::None, &Weak::new());

    assert_eq!(from_method, detached);
}

#[test]
fn SignatureModel___display___wildcards() {
    let signature = SignatureModel::from_jvm(
        &crate::jvm::parse_field_signature("Ljava/util/Map<*+Ljava/lang/Number;>;").unwrap(),
        &Scope::None,
        &Weak::new(),
        &[],
    );

    assert_eq!(signature.to_string(), "java.util.Map<?, ? extends java.lang.Number>");
}

#[test]
fn SignatureModel___from_jvm___attaches_type_annotations_by_path() {
    let annotation = AnnotationInfoModel::new("com.example.NonNull", BTreeMap::new());
    let signature = SignatureModel::from_jvm(
        &crate::jvm::parse_field_signature("Ljava/util/Map<Ljava/lang/String;[Ljava/lang/Long;>;").unwrap(),
        &Scope::None,
        &Weak::new(),
        &[(vec![1, 0], annotation)],
    );

    let arguments = signature.as_class_ref().unwrap().type_arguments();
    let array = arguments[1].signature().unwrap();
    assert!(signature.annotations().is_empty());
    assert!(array.annotations().is_empty());
    assert!(array.as_array().unwrap().component().has_annotation("com.example.NonNull"));
}

#[test]
fn TypeParameterModel___object_bound___dropped() {
    let parameter = TypeParameterModel::new(
        "T",
        vec![SignatureModel::class_ref("java.lang.Object", Weak::new())],
    );

    assert!(parameter.bounds().is_empty());
}

#[test]
fn SignatureModel___is_void___primitive_and_boxed() {
    assert!(SignatureModel::base(BaseType::Void).is_void());
    assert!(SignatureModel::class_ref("java.lang.Void", Weak::new()).is_void());
    assert!(!SignatureModel::base(BaseType::Int).is_void());
}
