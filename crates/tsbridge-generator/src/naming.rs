//! Naming rules for generated modules and identifiers
//!
//! | Input | Function | Output |
//! |-------|----------|--------|
//! | `com.example.Outer$Inner` | [`simple_name`] | `Inner` |
//! | `com.example.Outer$Inner` | [`module_path`] | `com/example/Outer/Inner` |
//! | `com/example/Person` → `com/other/Address` | [`relative_specifier`] | `../other/Address.js` |
//! | `@type` | [`property_key`] | `"@type"` |

/// Last segment of a component name, nested classes included
pub fn simple_name(component: &str) -> &str {
    component.rsplit(['.', '$']).next().unwrap_or(component)
}

/// Module path of a component without extension, `/`-separated
pub fn module_path(component: &str) -> String {
    component.replace(['.', '$'], "/")
}

/// Module path of the form model generated for a component
pub fn model_module_path(component: &str) -> String {
    format!("{}Model", module_path(component))
}

/// Module specifier for importing `target` from `from`.
///
/// Both arguments are module paths relative to the output root. The result
/// always starts with `./` or `../` and carries the `.js` extension that ES
/// module resolution expects.
pub fn relative_specifier(from: &str, target: &str) -> String {
    let from_dirs: Vec<&str> = from.split('/').collect();
    let from_dirs = &from_dirs[..from_dirs.len().saturating_sub(1)];
    let target_parts: Vec<&str> = target.split('/').collect();

    let common = from_dirs
        .iter()
        .zip(target_parts.iter())
        .take_while(|(a, b)| a == b)
        .count()
        .min(target_parts.len().saturating_sub(1));

    let ups = from_dirs.len() - common;
    let rest = target_parts[common..].join("/");
    if ups == 0 {
        format!("./{rest}.js")
    } else {
        format!("{}{rest}.js", "../".repeat(ups))
    }
}

/// Whether a string can be used as a bare TypeScript identifier
pub fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() || first == '_' || first == '$' => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
        }
        _ => false,
    }
}

/// Turn an arbitrary name into a TypeScript identifier
pub fn identifier(name: &str) -> String {
    let mut result: String = name
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '_' || c == '$' {
                c
            } else {
                '_'
            }
        })
        .collect();
    if result.is_empty() || result.starts_with(|c: char| c.is_ascii_digit()) {
        result.insert(0, '_');
    }
    result
}

const RESERVED_WORDS: &[&str] = &[
    "arguments", "await", "break", "case", "catch", "class", "const", "continue", "debugger",
    "default", "delete", "do", "else", "enum", "eval", "export", "extends", "false", "finally",
    "for", "function", "if", "implements", "import", "in", "instanceof", "interface", "let",
    "new", "null", "package", "private", "protected", "public", "return", "static", "super",
    "switch", "this", "throw", "true", "try", "typeof", "var", "void", "while", "with", "yield",
];

/// Whether a name is reserved as a binding name in strict mode TypeScript
pub fn is_reserved(name: &str) -> bool {
    RESERVED_WORDS.contains(&name)
}

/// Binding name for a function parameter
pub fn parameter_name(name: &str) -> String {
    let name = identifier(name);
    if is_reserved(&name) {
        format!("{name}_")
    } else {
        name
    }
}

/// Key of an object member, quoted when it is not an identifier
pub fn property_key(name: &str) -> String {
    if is_identifier(name) {
        name.to_string()
    } else {
        string_literal(name)
    }
}

/// Double-quoted TypeScript string literal
pub fn string_literal(value: &str) -> String {
    serde_json::Value::String(value.to_string()).to_string()
}
