//! Endpoint discovery
//!
//! Endpoints are the classes carrying a configured endpoint annotation. Their
//! operations are the public instance methods they declare, plus the methods
//! of supertypes that carry an endpoint-exposed annotation. Type variables of
//! an exposed supertype are bound to the arguments given in the `extends`
//! clause, so `PersonEndpoint extends CrudEndpoint<Person, Long>` exposes
//! `get(Long id): Person`.

use std::collections::{BTreeMap, BTreeSet, VecDeque};
use std::sync::{Arc, Weak};
use tracing::{debug, warn};
use tsbridge_core::ParserConfig;
use tsbridge_model::known::OBJECT_CLASS;
use tsbridge_model::{ClassInfoModel, ClassPath, MethodInfoModel, SignatureModel};

/// Type variable bindings of an inherited method
pub type Bindings = BTreeMap<String, SignatureModel>;

/// An endpoint class with the operations it exposes
#[derive(Debug, Clone)]
pub struct EndpointModel {
    class: ClassInfoModel,
    name: String,
    methods: Vec<EndpointMethod>,
}

/// One exposed method, declared on the endpoint or inherited
#[derive(Debug, Clone)]
pub struct EndpointMethod {
    method: MethodInfoModel,
    bindings: Arc<Bindings>,
}

impl EndpointModel {
    pub fn class(&self) -> &ClassInfoModel {
        &self.class
    }

    /// Name used in routes and generated modules
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn methods(&self) -> &[EndpointMethod] {
        &self.methods
    }
}

impl EndpointMethod {
    pub fn method(&self) -> &MethodInfoModel {
        &self.method
    }

    pub fn name(&self) -> &str {
        self.method.name()
    }

    pub fn bindings(&self) -> &Bindings {
        &self.bindings
    }

    /// Result type with inherited type variables bound
    pub fn result_type(&self) -> SignatureModel {
        self.method.result_type().substitute(&self.bindings)
    }

    /// Parameter types with inherited type variables bound
    pub fn parameter_types(&self) -> Vec<SignatureModel> {
        self.method
            .parameters()
            .iter()
            .map(|p| p.signature().substitute(&self.bindings))
            .collect()
    }
}

fn is_operation(method: &MethodInfoModel) -> bool {
    method.is_public() && !method.is_static() && !method.is_generated()
}

/// Endpoint name: the annotation's `value`, or the simple class name
pub fn endpoint_name(class: &ClassInfoModel, annotations: &[String]) -> String {
    annotations
        .iter()
        .filter_map(|a| class.annotation(a))
        .find_map(|a| a.string_value("value").filter(|v| !v.is_empty()))
        .unwrap_or_else(|| class.simple_name())
        .to_string()
}

/// Find every endpoint on the class path, ordered by class name
pub fn discover_endpoints(class_path: &Arc<ClassPath>, config: &ParserConfig) -> Vec<EndpointModel> {
    class_path
        .classes_annotated_with(&config.endpoint_annotations)
        .into_iter()
        .map(|class| {
            let name = endpoint_name(&class, &config.endpoint_annotations);
            let methods = exposed_methods(&class, class_path, &config.endpoint_exposed_annotations);
            debug!(endpoint = %name, class = %class, methods = methods.len(), "Discovered endpoint");
            EndpointModel {
                class,
                name,
                methods,
            }
        })
        .collect()
}

/// Declared operations followed by operations inherited from exposed
/// supertypes, nearest supertype first
fn exposed_methods(
    class: &ClassInfoModel,
    class_path: &Arc<ClassPath>,
    exposed_annotations: &[String],
) -> Vec<EndpointMethod> {
    let no_bindings = Arc::new(Bindings::new());
    let mut methods: Vec<EndpointMethod> = class
        .methods()
        .iter()
        .filter(|m| is_operation(m))
        .map(|m| EndpointMethod {
            method: m.clone(),
            bindings: no_bindings.clone(),
        })
        .collect();
    // operation name to parameter count, for the nearest declaration
    let mut names: BTreeMap<String, usize> = methods
        .iter()
        .map(|m| (m.name().to_string(), m.method.parameters().len()))
        .collect();

    let weak = Arc::downgrade(class_path);
    let mut visited = BTreeSet::from([class.name().to_string()]);
    let mut pending: VecDeque<(SignatureModel, Arc<Bindings>)> = direct_supertypes(class)
        .map(|s| (s, no_bindings.clone()))
        .collect();

    while let Some((supertype, child_bindings)) = pending.pop_front() {
        let Some(reference) = supertype.as_class_ref() else {
            continue;
        };
        let Some(parent) = reference.class_info() else {
            continue;
        };
        if !visited.insert(parent.name().to_string()) {
            continue;
        }
        let bindings = Arc::new(bind_type_arguments(&parent, &supertype, &child_bindings, &weak));
        if exposed_annotations.iter().any(|a| parent.has_annotation(a)) {
            let mut inherited = BTreeMap::new();
            for method in parent.methods().iter().filter(|m| is_operation(m)) {
                let arity = method.parameters().len();
                match names.get(method.name()) {
                    // overridden by a nearer declaration
                    Some(&shadowing) if shadowing == arity => continue,
                    Some(_) => {
                        warn!(
                            endpoint = %class,
                            method = method.name(),
                            declared_in = %parent,
                            "Inherited overload hidden by a nearer method of the same name"
                        );
                        continue;
                    }
                    None => {}
                }
                // overloads within one supertype are kept and collide on their route
                inherited.insert(method.name().to_string(), arity);
                methods.push(EndpointMethod {
                    method: method.clone(),
                    bindings: bindings.clone(),
                });
            }
            names.extend(inherited);
        }
        pending.extend(direct_supertypes(&parent).map(|s| (s, bindings.clone())));
    }
    methods
}

fn direct_supertypes(class: &ClassInfoModel) -> impl Iterator<Item = SignatureModel> + '_ {
    class
        .superclass()
        .into_iter()
        .chain(class.interfaces().iter())
        .cloned()
}

/// Bind the parent's type parameters to the arguments of the supertype
/// reference. Raw references bind nothing.
fn bind_type_arguments(
    parent: &ClassInfoModel,
    supertype: &SignatureModel,
    child_bindings: &Bindings,
    class_path: &Weak<ClassPath>,
) -> Bindings {
    let parameters = parent.type_parameters();
    let Some(reference) = supertype.as_class_ref() else {
        return Bindings::new();
    };
    let arguments = reference.type_arguments();
    if arguments.len() != parameters.len() {
        return Bindings::new();
    }
    parameters
        .iter()
        .zip(arguments)
        .map(|(parameter, argument)| {
            let bound = argument
                .signature()
                .map(|s| s.substitute(child_bindings))
                .unwrap_or_else(|| SignatureModel::class_ref(OBJECT_CLASS, class_path.clone()));
            (parameter.name().to_string(), bound)
        })
        .collect()
}
