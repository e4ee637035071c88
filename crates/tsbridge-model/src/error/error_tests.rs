#![allow(non_snake_case)]

use super::*;

#[test]
fn ModelError___malformed_signature___display_includes_offset() {
    let err = ModelError::MalformedSignature {
        signature: "Ljava/lang/String".to_string(),
        position: 17,
        message: "expected ';'".to_string(),
    };

    assert_eq!(
        err.to_string(),
        "malformed signature 'Ljava/lang/String' at offset 17: expected ';'"
    );
}

#[test]
fn ModelError___descriptor___display_includes_path() {
    let err = ModelError::Descriptor {
        path: PathBuf::from("classes/Person.json"),
        message: "missing field `name`".to_string(),
    };

    assert!(err.to_string().contains("classes/Person.json"));
}

#[test]
fn ModelError___unknown_class___display() {
    let err = ModelError::UnknownClass("com.example.Missing".to_string());

    assert_eq!(err.to_string(), "unknown class: com.example.Missing");
}
