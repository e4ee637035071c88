#![allow(non_snake_case)]

use super::*;
use crate::error::ParserError;
use crate::test_fixtures::{ENDPOINT, class_path, config, endpoint, string};
use std::fs;
use tempfile::TempDir;
use tsbridge_core::ConfigError;
use tsbridge_model::reflect::{ReflectMethod, ReflectType, ReflectedClass};

const GREETING_ENDPOINT: &str = r#"{
  "name": "com.example.GreetingEndpoint",
  "access": 1,
  "superclass": "java.lang.Object",
  "annotations": [{ "name": "com.example.annotation.Endpoint" }],
  "methods": [{
    "name": "greet",
    "access": 1,
    "descriptor": "(Ljava/lang/String;)Lcom/example/Greeting;",
    "parameterNames": ["name"]
  }]
}"#;

const GREETING: &str = r#"{
  "name": "com.example.Greeting",
  "access": 1,
  "superclass": "java.lang.Object",
  "methods": [{
    "name": "getText",
    "access": 1,
    "descriptor": "()Ljava/lang/String;"
  }]
}"#;

fn scanned_class_path() -> TempDir {
    let dir = TempDir::new().unwrap();
    let package = dir.path().join("com/example");
    fs::create_dir_all(&package).unwrap();
    fs::write(package.join("GreetingEndpoint.json"), GREETING_ENDPOINT).unwrap();
    fs::write(package.join("Greeting.json"), GREETING).unwrap();
    dir
}

fn echo_class_path() -> Arc<ClassPath> {
    class_path(vec![
        endpoint("com.example.EchoEndpoint")
            .method(ReflectMethod::new("echo", string()).parameter("text", string()))
            .build(),
    ])
}

#[test]
fn Parser___new___loads_scanned_descriptors() {
    let dir = scanned_class_path();
    let mut config = config();
    config.class_path.push(dir.path().to_path_buf());

    let openapi = Parser::new(config).unwrap().execute().unwrap();

    assert!(openapi.paths.contains_key("/GreetingEndpoint/greet"));
    assert!(openapi.contains_schema("com.example.Greeting"));
}

#[test]
fn Parser___new___missing_endpoint_annotation_fails() {
    let result = Parser::new(ParserConfig::default());

    assert!(matches!(
        result,
        Err(ParserError::Config(ConfigError::MissingEndpointAnnotation))
    ));
}

#[test]
fn Parser___new___malformed_descriptor_fails() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("Broken.json"), "{ not json").unwrap();
    let mut config = config();
    config.class_path.push(dir.path().to_path_buf());

    let result = Parser::new(config);

    assert!(matches!(result, Err(ParserError::Model(_))));
}

#[test]
fn Parser___execute___document_info_from_config() {
    let mut config = config();
    config.title = "Echo".to_string();
    config.version = "2.1.0".to_string();

    let openapi = Parser::with_class_path(config, echo_class_path()).execute().unwrap();

    assert_eq!(openapi.info.title, "Echo");
    assert_eq!(openapi.info.version, "2.1.0");
}

#[test]
fn Parser___execute___no_endpoints_gives_empty_document() {
    let openapi = Parser::with_class_path(config(), class_path(Vec::new()))
        .execute()
        .unwrap();

    assert!(openapi.paths.is_empty());
    assert!(openapi.components.schemas.is_empty());
}

#[test]
fn Parser___execute___invalid_config_fails_before_discovery() {
    let mut config = config();
    config.endpoint_annotations.clear();

    let result = Parser::with_class_path(config, echo_class_path()).execute();

    assert!(matches!(result, Err(ParserError::Config(_))));
}

#[test]
fn Parser___execute___unknown_plugin_in_config_fails() {
    let mut config = config();
    config.disabled_plugins.push("not-a-plugin".to_string());

    let result = Parser::with_class_path(config, echo_class_path()).execute();

    assert!(matches!(
        result,
        Err(ParserError::Config(ConfigError::UnknownPlugin(_)))
    ));
}

#[test]
fn Parser___without_backbone___dependent_plugins_refuse_to_run() {
    let mut config = config();
    config.disabled_plugins.push("backbone".to_string());

    let result = Parser::with_class_path(config, echo_class_path()).execute();

    assert!(matches!(
        result,
        Err(ParserError::Config(ConfigError::PluginOrder { .. }))
    ));
}

#[test]
fn Parser___allow_list_backbone_only___no_union_or_specialisation() {
    let mut config = config();
    config.plugins.push("backbone".to_string());
    let class_path = class_path(vec![
        ReflectedClass::builder("com.example.Box")
            .type_parameter("T", Vec::new())
            .method(ReflectMethod::new("getValue", ReflectType::variable("T")))
            .build(),
        endpoint("com.example.BoxEndpoint")
            .method(ReflectMethod::new(
                "get",
                ReflectType::generic("com.example.Box", vec![string()]),
            ))
            .build(),
    ]);

    let openapi = Parser::with_class_path(config, class_path).execute().unwrap();

    assert!(openapi.schema("com.example.Box").unwrap().type_parameters.is_some());
}

struct Stamp;

impl Plugin for Stamp {
    fn name(&self) -> &'static str {
        "stamp"
    }

    fn order(&self) -> i32 {
        100
    }

    fn requires(&self) -> &'static [&'static str] {
        &["backbone"]
    }

    fn execute(&self, scope: &Scope, mut storage: SharedStorage) -> ParserResult<SharedStorage> {
        let endpoints = scope.endpoints().len();
        storage.openapi_mut().info.title = format!("{endpoints} endpoints");
        Ok(storage)
    }
}

#[test]
fn Parser___add_plugin___runs_after_builtins() {
    let openapi = Parser::with_class_path(config(), echo_class_path())
        .add_plugin(Box::new(Stamp))
        .execute()
        .unwrap();

    assert_eq!(openapi.info.title, "1 endpoints");
    assert!(openapi.paths.contains_key("/EchoEndpoint/echo"));
}

#[test]
fn Parser___with_plugins___replaces_builtins() {
    let openapi = Parser::with_class_path(config(), echo_class_path())
        .with_plugins(vec![Box::new(crate::plugins::BackbonePlugin)])
        .execute()
        .unwrap();

    assert!(openapi.paths.contains_key("/EchoEndpoint/echo"));
}

#[test]
fn Parser___debug___lists_plugins() {
    let parser = Parser::with_class_path(config(), echo_class_path());

    let debug = format!("{parser:?}");

    assert!(debug.contains("backbone"));
    assert!(debug.contains(ENDPOINT));
}
