#![allow(non_snake_case)]

use super::*;

#[test]
fn ModuleBuilder___finish___imports_then_declarations() {
    let document = OpenApi::new("Test", "1.0.0");
    let mut builder = ModuleBuilder::new(&document, "com/example/Person");
    let local = builder
        .imports()
        .default_import("./Address.js", "Address", true);
    builder.declare(Declaration::TypeAlias {
        name: "Person".to_string(),
        type_parameters: Vec::new(),
        ty: crate::ast::TypeNode::reference(local),
    });
    builder.declare(Declaration::ExportDefault("Person".to_string()));

    let file = builder.finish();

    assert_eq!(file.path, "com/example/Person.ts");
    assert_eq!(
        file.content,
        "import type Address_1 from \"./Address.js\";\ntype Person = Address_1;\nexport default Person;\n"
    );
}

#[test]
fn ModuleBuilder___no_imports___starts_with_declaration() {
    let document = OpenApi::new("Test", "1.0.0");
    let mut builder = ModuleBuilder::new(&document, "Status");
    builder.declare(Declaration::ExportDefault("Status".to_string()));

    assert_eq!(builder.module(), "Status");
    assert_eq!(builder.finish().content, "export default Status;\n");
}
