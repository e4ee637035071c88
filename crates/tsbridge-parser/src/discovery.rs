//! Entity discovery
//!
//! Breadth-first walk over the dependency graph, seeded from the parameter
//! and result types of every endpoint operation. Each class moves from unseen
//! to seen exactly once; the returned list is in discovery order, which is
//! deterministic because dependency sets are ordered by name.

use crate::accessor::accessors;
use crate::endpoint::EndpointModel;
use crate::plugins::subtypes::declared_subtypes;
use crate::storage::{Replacement, SharedStorage};
use std::collections::{BTreeSet, VecDeque};
use std::sync::Arc;
use tracing::{debug, trace};
use tsbridge_model::{ClassInfoModel, ClassPath, SignatureModel, resolve};

struct Walk<'a> {
    class_path: &'a ClassPath,
    storage: &'a mut SharedStorage,
    queue: VecDeque<ClassInfoModel>,
}

impl Walk<'_> {
    fn enqueue(&mut self, dependency: ClassInfoModel, dependent: &str) {
        let dependency = match self.storage.replacement(dependency.name()) {
            Some(Replacement::Class(target)) => match self.class_path.class(target) {
                Some(mapped) => mapped,
                None => return,
            },
            Some(Replacement::Schema(_)) => return,
            None => dependency,
        };
        self.storage.add_dependent(dependency.name(), dependent);
        if self.storage.mark_seen(dependency.name()) {
            trace!(entity = %dependency, from = dependent, "Queued entity");
            self.queue.push_back(dependency);
        }
    }

    fn enqueue_signature(&mut self, signature: &SignatureModel, dependent: &str) {
        for dependency in resolve(Some(signature)) {
            self.enqueue(dependency, dependent);
        }
        self.enqueue_replaced(signature, dependent);
    }

    /// Replaced classes need not be on the class path themselves
    fn enqueue_replaced(&mut self, signature: &SignatureModel, dependent: &str) {
        let mut names = Vec::new();
        class_names(signature, &mut names);
        for name in names {
            if let Some(Replacement::Class(target)) = self.storage.replacement(&name)
                && let Some(mapped) = self.class_path.class(target)
            {
                self.enqueue(mapped, dependent);
            }
        }
    }
}

/// Names of every class referenced by a signature, type arguments included
fn class_names(signature: &SignatureModel, out: &mut Vec<String>) {
    match signature {
        SignatureModel::Array(array) => class_names(array.component(), out),
        SignatureModel::ClassRef(reference) => {
            out.push(reference.name().to_string());
            for argument in reference.type_arguments() {
                if let Some(signature) = argument.signature() {
                    class_names(signature, out);
                }
            }
        }
        SignatureModel::Base(_) | SignatureModel::TypeVariable(_) => {}
    }
}

/// Every entity reachable from the endpoints, in discovery order
pub fn discover_entities(
    endpoints: &[EndpointModel],
    class_path: &Arc<ClassPath>,
    storage: &mut SharedStorage,
) -> Vec<ClassInfoModel> {
    let prefixes = storage.config().backbone.prefixes.clone();
    let mut walk = Walk {
        class_path,
        storage,
        queue: VecDeque::new(),
    };

    for endpoint in endpoints {
        let from = endpoint.class().name();
        for method in endpoint.methods() {
            for parameter in method.parameter_types() {
                walk.enqueue_signature(&parameter, from);
            }
            walk.enqueue_signature(&method.result_type(), from);
        }
    }

    let mut entities = Vec::new();
    while let Some(entity) = walk.queue.pop_front() {
        let from = entity.name().to_string();
        for dependency in entity_dependencies(&entity, &prefixes) {
            walk.enqueue(dependency, &from);
        }
        if !entity.is_enum() {
            for accessor in accessors(&entity, &prefixes) {
                walk.enqueue_replaced(accessor.getter.result_type(), &from);
            }
        }
        entities.push(entity);
    }
    debug!(entities = entities.len(), "Entity discovery complete");
    entities
}

/// Classes an entity schema refers to: superclass, property types and
/// declared subtypes
pub fn entity_dependencies(entity: &ClassInfoModel, prefixes: &[String]) -> BTreeSet<ClassInfoModel> {
    let mut found = resolve(entity.superclass());
    if !entity.is_enum() {
        for accessor in accessors(entity, prefixes) {
            found.extend(resolve(Some(accessor.getter.result_type())));
        }
    }
    found.extend(entity.permitted_subclasses());
    if let Some(class_path) = entity.class_path() {
        found.extend(
            declared_subtypes(entity)
                .iter()
                .filter_map(|name| class_path.class(name)),
        );
    }
    found.remove(entity);
    found
}
