#![allow(non_snake_case)]

use super::*;

#[test]
fn ImportManager___unique___numbers_per_base_name() {
    let mut imports = ImportManager::new();

    assert_eq!(imports.unique("get"), "get_1");
    assert_eq!(imports.unique("get"), "get_2");
    assert_eq!(imports.unique("save"), "save_1");
}

#[test]
fn ImportManager___same_default_twice___same_local_name() {
    let mut imports = ImportManager::new();

    let first = imports.default_import("./Person.js", "Person", true);
    let second = imports.default_import("./Person.js", "Person", true);

    assert_eq!(first, "Person_1");
    assert_eq!(first, second);
}

#[test]
fn ImportManager___same_name_from_two_modules___distinct_locals() {
    let mut imports = ImportManager::new();

    let first = imports.default_import("./a/Person.js", "Person", true);
    let second = imports.default_import("./b/Person.js", "Person", true);

    assert_eq!(first, "Person_1");
    assert_eq!(second, "Person_2");
}

#[test]
fn ImportManager___render___sorted_by_path() {
    let mut imports = ImportManager::new();
    imports.default_import("./com/example/Person.js", "Person", true);
    imports.default_import("./connect-client.default.js", "client", false);
    imports.named_import("@tsbridge/frontend", "EndpointRequestInit", true);
    imports.default_import("./com/example/Address.js", "Address", true);

    assert_eq!(
        imports.render(),
        "import type Address_1 from \"./com/example/Address.js\";\n\
         import type Person_1 from \"./com/example/Person.js\";\n\
         import client_1 from \"./connect-client.default.js\";\n\
         import type { EndpointRequestInit as EndpointRequestInit_1 } from \"@tsbridge/frontend\";\n"
    );
}

#[test]
fn ImportManager___mixed_named_imports___inline_type_modifiers() {
    let mut imports = ImportManager::new();
    imports.named_import("@tsbridge/form", "StringModel", true);
    imports.named_import("@tsbridge/form", "ObjectModel", false);

    assert_eq!(
        imports.render(),
        "import { ObjectModel as ObjectModel_1, type StringModel as StringModel_1 } from \"@tsbridge/form\";\n"
    );
}

#[test]
fn ImportManager___value_request_after_type___upgraded() {
    let mut imports = ImportManager::new();
    imports.default_import("./Status.js", "Status", true);
    imports.default_import("./Status.js", "Status", false);

    assert_eq!(imports.render(), "import Status_1 from \"./Status.js\";\n");
}

#[test]
fn ImportManager___namespace_import___rendered() {
    let mut imports = ImportManager::new();

    let local = imports.namespace_import("./PersonEndpoint.js", "PersonEndpoint");

    assert_eq!(local, "PersonEndpoint_1");
    assert_eq!(
        imports.render(),
        "import * as PersonEndpoint_1 from \"./PersonEndpoint.js\";\n"
    );
}

#[test]
fn ImportManager___new___is_empty() {
    let imports = ImportManager::new();

    assert!(imports.is_empty());
    assert_eq!(imports.render(), "");
}
