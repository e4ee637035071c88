//! A throwaway project with one scanned endpoint class

use std::path::PathBuf;
use tempfile::TempDir;

pub const CONFIG: &str = r#"
[parser]
class_path = ["classes"]
endpoint_annotations = ["com.example.Endpoint"]

[generator]
output_dir = "generated"

[logging]
level = "warn"
"#;

pub const HELLO_ENDPOINT: &str = r#"{
  "name": "com.example.HelloEndpoint",
  "access": 1,
  "superclass": "java.lang.Object",
  "annotations": [{ "name": "com.example.Endpoint" }],
  "methods": [{
    "name": "sayHello",
    "access": 1,
    "descriptor": "(Ljava/lang/String;)Ljava/lang/String;",
    "parameterNames": ["name"]
  }]
}"#;

/// Project directory and the path of its tsbridge.toml
pub fn project() -> (TempDir, PathBuf) {
    let dir = TempDir::new().unwrap();
    let classes = dir.path().join("classes/com/example");
    std::fs::create_dir_all(&classes).unwrap();
    std::fs::write(classes.join("HelloEndpoint.json"), HELLO_ENDPOINT).unwrap();
    let config = dir.path().join("tsbridge.toml");
    std::fs::write(&config, CONFIG).unwrap();
    (dir, config)
}
