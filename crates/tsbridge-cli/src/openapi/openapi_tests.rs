#![allow(non_snake_case)]

use super::*;
use crate::test_fixtures::project;

#[test]
fn render___document___pretty_json_with_paths() {
    let (_dir, path) = project();
    let config = pipeline::load_config(&path, None).unwrap();
    let openapi = pipeline::parse(&config).unwrap();

    let json = render(&openapi).unwrap();

    assert!(json.contains('\n'));
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert!(value["paths"]["/HelloEndpoint/sayHello"].is_object());
}

#[test]
fn run___output_file___document_written() {
    let (dir, path) = project();
    let config = pipeline::load_config(&path, None).unwrap();
    let output = dir.path().join("openapi.json");

    run(&config, Some(output.clone())).unwrap();

    let written: OpenApi =
        serde_json::from_str(&std::fs::read_to_string(output).unwrap()).unwrap();
    assert!(written.paths.contains_key("/HelloEndpoint/sayHello"));
}
