#![allow(non_snake_case)]

use super::*;

const MINIMAL: &str = r#"
[parser]
endpoint_annotations = ["com.example.Endpoint"]
"#;

#[test]
fn GeneratorConfig___minimal_toml___fills_defaults() {
    let config = GeneratorConfig::from_toml_str(MINIMAL).unwrap();

    assert_eq!(config.parser.endpoint_annotations, vec!["com.example.Endpoint"]);
    assert_eq!(config.parser.backbone.prefixes, vec!["get"]);
    assert_eq!(config.parser.backbone.unsupported, UnsupportedPolicy::Skip);
    assert!(config.parser.nonnull.annotations.is_empty());
    assert_eq!(config.generator.output_dir, PathBuf::from("frontend/generated"));
    assert_eq!(config.generator.client_import, "./connect-client.default.js");
    assert!(config.generator.emit_models);
    assert!(config.generator.emit_barrel);
    assert_eq!(config.logging.level, "info");
}

#[test]
fn GeneratorConfig___empty_toml___missing_endpoint_annotation() {
    let result = GeneratorConfig::from_toml_str("");

    assert!(matches!(result, Err(ConfigError::MissingEndpointAnnotation)));
}

#[test]
fn GeneratorConfig___blank_endpoint_annotation___missing_endpoint_annotation() {
    let toml = r#"
[parser]
endpoint_annotations = ["  "]
"#;

    let result = GeneratorConfig::from_toml_str(toml);

    assert!(matches!(result, Err(ConfigError::MissingEndpointAnnotation)));
}

#[test]
fn GeneratorConfig___malformed_toml___parse_error() {
    let result = GeneratorConfig::from_toml_str("[parser");

    assert!(matches!(result, Err(ConfigError::Parse(_))));
}

#[test]
fn GeneratorConfig___bad_log_level___invalid_value() {
    let toml = r#"
[parser]
endpoint_annotations = ["E"]

[logging]
level = "loud"
"#;

    let result = GeneratorConfig::from_toml_str(toml);

    assert!(matches!(result, Err(ConfigError::InvalidValue { .. })));
}

#[test]
fn GeneratorConfig___full_toml___parses_every_section() {
    let toml = r#"
[parser]
class_path = ["classes"]
endpoint_annotations = ["com.example.Endpoint"]
endpoint_exposed_annotations = ["com.example.EndpointExposed"]
plugins = ["backbone", "nonnull"]
disabled_plugins = ["nonnull"]
title = "Shop"

[parser.order]
nonnull = 15

[parser.nonnull]
annotations = ["org.jspecify.annotations.NonNull"]

[parser.backbone]
unsupported = "fail"
prefixes = ["get", "is"]

[generator]
output_dir = "out"
client_import = "./client.js"
emit_models = false

[logging]
level = "debug"
"#;

    let config = GeneratorConfig::from_toml_str(toml).unwrap();

    assert_eq!(config.parser.class_path, vec![PathBuf::from("classes")]);
    assert_eq!(config.parser.plugin_order.get("nonnull"), Some(&15));
    assert_eq!(config.parser.backbone.unsupported, UnsupportedPolicy::Fail);
    assert_eq!(config.parser.backbone.prefixes, vec!["get", "is"]);
    assert_eq!(config.parser.title, "Shop");
    assert_eq!(config.parser.version, "1.0.0");
    assert_eq!(config.generator.client_import, "./client.js");
    assert!(!config.generator.emit_models);
    assert!(config.generator.emit_barrel);
    assert_eq!(config.logging.log_level().unwrap(), LogLevel::Debug);
}

#[test]
fn GeneratorConfig___load___resolves_relative_paths_against_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("tsbridge.toml");
    std::fs::write(
        &path,
        r#"
[parser]
class_path = ["classes"]
endpoint_annotations = ["E"]
"#,
    )
    .unwrap();

    let config = GeneratorConfig::load(&path).unwrap();

    assert_eq!(config.parser.class_path, vec![dir.path().join("classes")]);
    assert_eq!(
        config.generator.output_dir,
        dir.path().join("frontend/generated")
    );
}

#[test]
fn GeneratorConfig___load_missing_file___io_error() {
    let dir = tempfile::tempdir().unwrap();

    let result = GeneratorConfig::load(dir.path().join("absent.toml"));

    assert!(matches!(result, Err(ConfigError::Io { .. })));
}

#[test]
fn ParserConfig___is_plugin_enabled___empty_allow_list_enables_all() {
    let config = ParserConfig::default();

    assert!(config.is_plugin_enabled("backbone"));
    assert!(config.is_plugin_enabled("generics"));
}

#[test]
fn ParserConfig___is_plugin_enabled___deny_list_wins() {
    let config = ParserConfig {
        plugins: vec!["backbone".to_string(), "subtypes".to_string()],
        disabled_plugins: vec!["subtypes".to_string()],
        ..ParserConfig::default()
    };

    assert!(config.is_plugin_enabled("backbone"));
    assert!(!config.is_plugin_enabled("subtypes"));
    assert!(!config.is_plugin_enabled("generics"));
}

#[test]
fn ParserConfig___order_of___override_or_default() {
    let config = ParserConfig::builder()
        .endpoint_annotation("E")
        .plugin_order("nonnull", 99)
        .finish()
        .unwrap();

    assert_eq!(config.order_of("nonnull", 10), 99);
    assert_eq!(config.order_of("generics", 20), 20);
}

#[test]
fn ParserConfigBuilder___without_endpoint_annotation___fails() {
    let result = ParserConfig::builder().class_path("classes").finish();

    assert!(matches!(result, Err(ConfigError::MissingEndpointAnnotation)));
}

#[test]
fn ParserConfigBuilder___empty_prefix___invalid_value() {
    let result = ParserConfig::builder()
        .endpoint_annotation("E")
        .accessor_prefixes(vec![String::new()])
        .finish();

    assert!(matches!(result, Err(ConfigError::InvalidValue { .. })));
}

#[test]
fn ParserConfigBuilder___all_setters___recorded() {
    let config = ParserConfig::builder()
        .class_path("a")
        .endpoint_annotation("E")
        .endpoint_exposed_annotation("X")
        .plugin("backbone")
        .disable_plugin("subtypes")
        .nonnull_annotation("N")
        .unsupported(UnsupportedPolicy::Fail)
        .finish()
        .unwrap();

    assert_eq!(config.class_path, vec![PathBuf::from("a")]);
    assert_eq!(config.endpoint_exposed_annotations, vec!["X"]);
    assert_eq!(config.plugins, vec!["backbone"]);
    assert_eq!(config.disabled_plugins, vec!["subtypes"]);
    assert_eq!(config.nonnull.annotations, vec!["N"]);
    assert_eq!(config.backbone.unsupported, UnsupportedPolicy::Fail);
}
