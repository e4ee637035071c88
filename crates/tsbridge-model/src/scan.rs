//! Static scan backend
//!
//! An external bytecode scanner writes one JSON descriptor per class (or an
//! array of descriptors per file). [`ScanIndex::load`] walks the class path
//! roots and indexes every descriptor by fully-qualified name.
//!
//! ```json
//! {
//!   "name": "com.example.PersonEndpoint",
//!   "access": 1,
//!   "superclass": "java.lang.Object",
//!   "annotations": [{ "name": "com.vaadin.hilla.Endpoint" }],
//!   "methods": [{
//!     "name": "find",
//!     "access": 1,
//!     "descriptor": "(J)Lcom/example/Person;",
//!     "parameterNames": ["id"]
//!   }]
//! }
//! ```

use crate::class_path::{ClassData, ClassSource};
use crate::error::{ModelError, ModelResult};
use crate::modifiers::Modifiers;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;
use tracing::debug;
use walkdir::WalkDir;

/// One scanned class
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassDescriptor {
    /// Binary name in dotted form, e.g. `com.example.Outer$Inner`
    pub name: String,

    #[serde(default)]
    pub access: Modifiers,

    /// Generic class signature, when the class is generic or extends a generic type
    #[serde(default)]
    pub signature: Option<String>,

    #[serde(default)]
    pub superclass: Option<String>,

    #[serde(default)]
    pub interfaces: Vec<String>,

    #[serde(default)]
    pub annotations: Vec<AnnotationDescriptor>,

    #[serde(default)]
    pub fields: Vec<FieldDescriptor>,

    #[serde(default)]
    pub methods: Vec<MethodDescriptor>,

    #[serde(default)]
    pub permitted_subclasses: Vec<String>,

    #[serde(default)]
    pub outer_class: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldDescriptor {
    pub name: String,

    #[serde(default)]
    pub access: Modifiers,

    pub descriptor: String,

    #[serde(default)]
    pub signature: Option<String>,

    #[serde(default)]
    pub annotations: Vec<AnnotationDescriptor>,

    #[serde(default)]
    pub type_annotations: Vec<TypeAnnotationDescriptor>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MethodDescriptor {
    pub name: String,

    #[serde(default)]
    pub access: Modifiers,

    pub descriptor: String,

    #[serde(default)]
    pub signature: Option<String>,

    /// Parameter names; `null` where the class file carries none
    #[serde(default)]
    pub parameter_names: Vec<Option<String>>,

    #[serde(default)]
    pub parameter_annotations: Vec<Vec<AnnotationDescriptor>>,

    #[serde(default)]
    pub annotations: Vec<AnnotationDescriptor>,

    #[serde(default)]
    pub type_annotations: Vec<TypeAnnotationDescriptor>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnnotationDescriptor {
    pub name: String,

    #[serde(default)]
    pub values: BTreeMap<String, serde_json::Value>,
}

/// Which type of a member a type-use annotation is attached to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TypeAnnotationTarget {
    /// The type of a field
    #[default]
    Field,
    /// The result type of a method
    Return,
    /// The type of the method parameter at an index
    Parameter(usize),
}

/// A type-use annotation addressed by type-argument path.
///
/// An empty path is the member type itself; `[1, 0]` is the first argument of
/// the second argument. The component type of an array is index 0.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypeAnnotationDescriptor {
    #[serde(default)]
    pub target: TypeAnnotationTarget,

    #[serde(default)]
    pub path: Vec<usize>,

    pub annotation: AnnotationDescriptor,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum DescriptorFile {
    Many(Vec<ClassDescriptor>),
    One(Box<ClassDescriptor>),
}

/// Scanned classes indexed by name
#[derive(Debug, Clone, Default)]
pub struct ScanIndex {
    classes: BTreeMap<String, Arc<ClassDescriptor>>,
}

impl ScanIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load every `*.json` descriptor below the given roots.
    ///
    /// A root may be a directory (walked recursively in file-name order) or a
    /// single descriptor file.
    pub fn load<P: AsRef<Path>>(roots: impl IntoIterator<Item = P>) -> ModelResult<Self> {
        let mut index = Self::new();
        for root in roots {
            let root = root.as_ref();
            for entry in WalkDir::new(root).sort_by_file_name() {
                let entry = entry.map_err(|err| {
                    let path = err.path().unwrap_or(root).to_path_buf();
                    ModelError::Io {
                        path,
                        source: err
                            .into_io_error()
                            .unwrap_or_else(|| std::io::Error::other("filesystem loop")),
                    }
                })?;
                let path = entry.path();
                if entry.file_type().is_file() && path.extension().is_some_and(|e| e == "json") {
                    index.load_file(path)?;
                }
            }
        }
        debug!(classes = index.len(), "Loaded scanned class descriptors");
        Ok(index)
    }

    /// Load one descriptor file, returning the number of classes it held
    pub fn load_file(&mut self, path: &Path) -> ModelResult<usize> {
        let text = std::fs::read_to_string(path).map_err(|source| ModelError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let file: DescriptorFile =
            serde_json::from_str(&text).map_err(|err| ModelError::Descriptor {
                path: path.to_path_buf(),
                message: err.to_string(),
            })?;
        let descriptors = match file {
            DescriptorFile::Many(descriptors) => descriptors,
            DescriptorFile::One(descriptor) => vec![*descriptor],
        };
        let count = descriptors.len();
        for descriptor in descriptors {
            self.insert(descriptor);
        }
        Ok(count)
    }

    /// Add a descriptor, replacing any earlier one with the same name
    pub fn insert(&mut self, descriptor: ClassDescriptor) {
        self.classes
            .insert(descriptor.name.clone(), Arc::new(descriptor));
    }

    pub fn get(&self, name: &str) -> Option<&Arc<ClassDescriptor>> {
        self.classes.get(name)
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }
}

impl FromIterator<ClassDescriptor> for ScanIndex {
    fn from_iter<I: IntoIterator<Item = ClassDescriptor>>(iter: I) -> Self {
        let mut index = Self::new();
        for descriptor in iter {
            index.insert(descriptor);
        }
        index
    }
}

impl ClassSource for ScanIndex {
    fn find(&self, name: &str) -> Option<ClassData> {
        self.classes.get(name).cloned().map(ClassData::Scanned)
    }

    fn class_names(&self) -> Vec<String> {
        self.classes.keys().cloned().collect()
    }
}
