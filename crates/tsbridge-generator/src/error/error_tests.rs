#![allow(non_snake_case)]

use super::*;

#[test]
fn GeneratorError___dangling_reference___names_component_and_context() {
    let error = GeneratorError::dangling("com.example.Missing", "com.example.Person.address");

    assert_eq!(
        error.to_string(),
        "dangling reference to com.example.Missing in com.example.Person.address"
    );
    assert!(error.is_fatal_document_error());
}

#[test]
fn GeneratorError___io___keeps_source() {
    let error = GeneratorError::Io {
        path: PathBuf::from("out/Person.ts"),
        source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
    };

    assert!(error.to_string().contains("out/Person.ts"));
    assert!(std::error::Error::source(&error).is_some());
    assert!(!error.is_fatal_document_error());
}

#[test]
fn GeneratorError___unsupported_schema___displays_reason() {
    let error = GeneratorError::UnsupportedSchema {
        context: "com.example.Box".to_string(),
        reason: "map keys must be strings".to_string(),
    };

    assert_eq!(
        error.to_string(),
        "unsupported schema in com.example.Box: map keys must be strings"
    );
}
