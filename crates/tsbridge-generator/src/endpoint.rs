//! Endpoint modules and the endpoint barrel
//!
//! Each endpoint becomes a module of async functions that forward to the
//! client:
//!
//! ```text
//! async function get_1(id: number, init?: EndpointRequestInit_1): Promise<Person_1 | undefined> {
//!     return client_1.call("PersonEndpoint", "get", { id }, init);
//! }
//! export { get_1 as get };
//! ```

use crate::ast::{Declaration, Parameter, TypeNode};
use crate::error::{GeneratorError, GeneratorResult};
use crate::module::{GeneratedFile, ModuleBuilder};
use crate::naming::{identifier, parameter_name, property_key, relative_specifier, string_literal};
use std::collections::BTreeMap;
use tracing::debug;
use tsbridge_core::{OpenApi, Operation};

/// Package providing the client runtime types
pub const FRONTEND_PACKAGE: &str = "@tsbridge/frontend";

/// Module path of the barrel re-exporting every endpoint
pub const BARREL_MODULE: &str = "endpoints";

const REQUEST_INIT: &str = "EndpointRequestInit";

/// Operations of one endpoint, ordered by method name
pub type EndpointMethods<'a> = Vec<(String, &'a Operation)>;

/// Group the document's operations by endpoint
pub fn endpoint_groups(document: &OpenApi) -> GeneratorResult<BTreeMap<String, EndpointMethods<'_>>> {
    let mut groups: BTreeMap<String, EndpointMethods<'_>> = BTreeMap::new();
    for (route, item) in &document.paths {
        let Some(operation) = &item.post else {
            continue;
        };
        let (endpoint, method) = route
            .strip_prefix('/')
            .and_then(|r| r.split_once('/'))
            .filter(|(endpoint, method)| !endpoint.is_empty() && !method.is_empty())
            .ok_or_else(|| GeneratorError::UnsupportedSchema {
                context: route.clone(),
                reason: "route is not of the form /{endpoint}/{method}".to_string(),
            })?;
        groups
            .entry(endpoint.to_string())
            .or_default()
            .push((method.to_string(), operation));
    }
    Ok(groups)
}

/// Generate the module for one endpoint
pub fn endpoint_module(
    document: &OpenApi,
    endpoint: &str,
    methods: &[(String, &Operation)],
    client_import: &str,
) -> GeneratorResult<GeneratedFile> {
    debug!(endpoint, methods = methods.len(), "Generating endpoint module");
    let mut builder = ModuleBuilder::new(document, identifier(endpoint));
    let mut exports = Vec::with_capacity(methods.len());

    for (method, operation) in methods {
        let context = format!("{endpoint}.{method}");
        let client = builder.imports().default_import(client_import, "client", false);
        let request_init = builder
            .imports()
            .named_import(FRONTEND_PACKAGE, REQUEST_INIT, true);

        let mut parameters = Vec::new();
        let mut arguments = Vec::new();
        if let Some(properties) = operation
            .request_schema()
            .and_then(|schema| schema.properties.as_ref())
        {
            for (name, schema) in properties {
                let binding = parameter_name(name);
                parameters.push(Parameter {
                    name: binding.clone(),
                    optional: false,
                    ty: builder.type_of(schema, &format!("{context}.{name}"))?,
                });
                arguments.push(if binding == *name {
                    binding
                } else {
                    format!("{}: {binding}", property_key(name))
                });
            }
        }
        let init = if parameters.iter().any(|p| p.name == "init") {
            "requestInit"
        } else {
            "init"
        };
        parameters.push(Parameter {
            name: init.to_string(),
            optional: true,
            ty: TypeNode::reference(request_init),
        });

        let returns = match operation.response_schema() {
            Some(schema) => builder.type_of(schema, &context)?,
            None => TypeNode::Void,
        };
        let params = if arguments.is_empty() {
            "{}".to_string()
        } else {
            format!("{{ {} }}", arguments.join(", "))
        };
        let local = builder.imports().unique(&identifier(method));
        builder.declare(Declaration::AsyncFunction {
            name: local.clone(),
            parameters,
            return_type: TypeNode::generic("Promise", vec![returns]),
            body: format!(
                "return {client}.call({}, {}, {params}, {init});",
                string_literal(endpoint),
                string_literal(method)
            ),
        });
        exports.push((local, method.clone()));
    }

    builder.declare(Declaration::ExportNamed(exports));
    Ok(builder.finish())
}

/// Generate `endpoints.ts`, re-exporting every endpoint module as a namespace
pub fn barrel_module<'a>(
    document: &OpenApi,
    endpoints: impl IntoIterator<Item = &'a String>,
) -> GeneratedFile {
    let mut builder = ModuleBuilder::new(document, BARREL_MODULE);
    let mut exports = Vec::new();
    for endpoint in endpoints {
        let name = identifier(endpoint);
        let specifier = relative_specifier(BARREL_MODULE, &name);
        let local = builder.imports().namespace_import(&specifier, &name);
        exports.push((local, name));
    }
    builder.declare(Declaration::ExportNamed(exports));
    builder.finish()
}
