//! Class lookup across metadata sources

use crate::class::ClassInfoModel;
use crate::reflect::ReflectedClass;
use crate::scan::ClassDescriptor;
use parking_lot::RwLock;
use std::collections::{BTreeSet, HashMap};
use std::sync::{Arc, Weak};
use tracing::trace;

/// Raw class metadata from one of the backends
#[derive(Debug, Clone)]
pub enum ClassData {
    Scanned(Arc<ClassDescriptor>),
    Reflected(Arc<ReflectedClass>),
}

impl ClassData {
    pub fn name(&self) -> &str {
        match self {
            ClassData::Scanned(d) => &d.name,
            ClassData::Reflected(r) => &r.name,
        }
    }
}

/// A provider of class metadata
pub trait ClassSource: Send + Sync {
    /// Look up a class by binary name
    fn find(&self, name: &str) -> Option<ClassData>;

    /// Names of every class this source provides
    fn class_names(&self) -> Vec<String>;
}

/// The universe of resolvable classes.
///
/// Sources are consulted in registration order; the first one providing a
/// name wins. Models are created once per name and shared. A class that no
/// source provides is a *system* class.
pub struct ClassPath {
    sources: RwLock<Vec<Arc<dyn ClassSource>>>,
    models: RwLock<HashMap<String, ClassInfoModel>>,
    this: Weak<ClassPath>,
}

impl ClassPath {
    pub fn new() -> Arc<Self> {
        Arc::new_cyclic(|this| ClassPath {
            sources: RwLock::new(Vec::new()),
            models: RwLock::new(HashMap::new()),
            this: this.clone(),
        })
    }

    pub fn with_source(source: Arc<dyn ClassSource>) -> Arc<Self> {
        let class_path = Self::new();
        class_path.add_source(source);
        class_path
    }

    /// Register another source after the existing ones
    pub fn add_source(&self, source: Arc<dyn ClassSource>) {
        self.sources.write().push(source);
    }

    /// The model of a class, if any source provides it
    pub fn class(&self, name: &str) -> Option<ClassInfoModel> {
        if let Some(model) = self.models.read().get(name) {
            return Some(model.clone());
        }
        let data = self.sources.read().iter().find_map(|s| s.find(name))?;
        trace!(class = name, "Creating class model");
        let mut models = self.models.write();
        let model = models
            .entry(name.to_string())
            .or_insert_with(|| ClassInfoModel::new(data, self.this.clone()));
        Some(model.clone())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.models.read().contains_key(name)
            || self.sources.read().iter().any(|s| s.find(name).is_some())
    }

    pub fn class_names(&self) -> BTreeSet<String> {
        self.sources
            .read()
            .iter()
            .flat_map(|s| s.class_names())
            .collect()
    }

    /// Every class carrying one of the annotations, ordered by name
    pub fn classes_annotated_with(&self, annotations: &[String]) -> Vec<ClassInfoModel> {
        self.class_names()
            .into_iter()
            .filter_map(|name| self.class(&name))
            .filter(|class| annotations.iter().any(|a| class.has_annotation(a)))
            .collect()
    }
}

impl std::fmt::Debug for ClassPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClassPath")
            .field("sources", &self.sources.read().len())
            .field("models", &self.models.read().len())
            .finish()
    }
}

#[cfg(test)]
#[path = "class_path/class_path_tests.rs"]
mod class_path_tests;
