#![allow(non_snake_case)]

use super::*;
use crate::reflect::{ReflectAnnotation, ReflectRegistry};
use crate::scan::ScanIndex;

fn registry_with(names: &[&str]) -> Arc<ReflectRegistry> {
    let registry = ReflectRegistry::new();
    for name in names {
        registry.define(ReflectedClass::builder(*name).build());
    }
    Arc::new(registry)
}

#[test]
fn ClassPath___class___returns_shared_model() {
    let class_path = ClassPath::with_source(registry_with(&["com.example.A"]));

    let first = class_path.class("com.example.A").unwrap();
    let second = class_path.class("com.example.A").unwrap();

    assert_eq!(first, second);
    assert!(first.class_path().is_some());
}

#[test]
fn ClassPath___unknown_name___none() {
    let class_path = ClassPath::with_source(registry_with(&["com.example.A"]));

    assert!(class_path.class("java.util.List").is_none());
    assert!(!class_path.contains("java.util.List"));
}

#[test]
fn ClassPath___first_source_wins() {
    let scanned: ScanIndex = [ClassDescriptor {
        name: "com.example.A".to_string(),
        access: Default::default(),
        signature: None,
        superclass: None,
        interfaces: Vec::new(),
        annotations: Vec::new(),
        fields: Vec::new(),
        methods: Vec::new(),
        permitted_subclasses: Vec::new(),
        outer_class: None,
    }]
    .into_iter()
    .collect();
    let class_path = ClassPath::with_source(Arc::new(scanned));
    class_path.add_source(registry_with(&["com.example.A", "com.example.B"]));

    assert!(!class_path.class("com.example.A").unwrap().is_reflected());
    assert!(class_path.class("com.example.B").unwrap().is_reflected());
}

#[test]
fn ClassPath___class_names___merged_and_sorted() {
    let class_path = ClassPath::with_source(registry_with(&["b.B"]));
    class_path.add_source(registry_with(&["a.A", "b.B"]));

    let names: Vec<String> = class_path.class_names().into_iter().collect();

    assert_eq!(names, vec!["a.A", "b.B"]);
}

#[test]
fn ClassPath___classes_annotated_with___filters_and_orders() {
    let registry = ReflectRegistry::new();
    for name in ["com.example.Zeta", "com.example.Alpha", "com.example.Plain"] {
        let mut builder = ReflectedClass::builder(name);
        if name != "com.example.Plain" {
            builder = builder.annotated(ReflectAnnotation::new("com.example.Endpoint"));
        }
        registry.define(builder.build());
    }
    let class_path = ClassPath::with_source(Arc::new(registry));

    let endpoints = class_path.classes_annotated_with(&["com.example.Endpoint".to_string()]);

    let names: Vec<&str> = endpoints.iter().map(|c| c.name()).collect();
    assert_eq!(names, vec!["com.example.Alpha", "com.example.Zeta"]);
}
