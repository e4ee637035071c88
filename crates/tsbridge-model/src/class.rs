//! Class model

use crate::annotation::{AnnotationInfoModel, has_annotation, simple_name};
use crate::class_path::{ClassData, ClassPath};
use crate::jvm::{self, JvmClassSignature, JvmType};
use crate::known::OBJECT_CLASS;
use crate::member::{FieldInfoModel, MethodInfoModel};
use crate::modifiers::Modifiers;
use crate::signature::{Scope, SignatureModel, TypeParameterModel, resolve};
use once_cell::sync::OnceCell;
use std::cmp::Ordering;
use std::collections::BTreeSet;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::{Arc, Weak};
use tracing::warn;

pub(crate) struct ClassNode {
    name: String,
    data: ClassData,
    class_path: Weak<ClassPath>,
    this: Weak<ClassNode>,
    jvm_signature: OnceCell<Option<JvmClassSignature>>,
    annotations: OnceCell<Vec<AnnotationInfoModel>>,
    type_parameters: OnceCell<Vec<TypeParameterModel>>,
    superclass: OnceCell<Option<SignatureModel>>,
    interfaces: OnceCell<Vec<SignatureModel>>,
    fields: OnceCell<Vec<FieldInfoModel>>,
    methods: OnceCell<Vec<MethodInfoModel>>,
    dependency_names: OnceCell<BTreeSet<String>>,
}

/// A class from either metadata backend.
///
/// Identity is the fully-qualified name: models of the same class built from
/// different backends are equal, hash equal and order equal. Derived
/// properties are computed on first access and cached.
#[derive(Clone)]
pub struct ClassInfoModel(Arc<ClassNode>);

impl ClassInfoModel {
    pub(crate) fn new(data: ClassData, class_path: Weak<ClassPath>) -> Self {
        let name = data.name().to_string();
        ClassInfoModel(Arc::new_cyclic(|this| ClassNode {
            name,
            data,
            class_path,
            this: this.clone(),
            jvm_signature: OnceCell::new(),
            annotations: OnceCell::new(),
            type_parameters: OnceCell::new(),
            superclass: OnceCell::new(),
            interfaces: OnceCell::new(),
            fields: OnceCell::new(),
            methods: OnceCell::new(),
            dependency_names: OnceCell::new(),
        }))
    }

    pub(crate) fn from_node(node: Arc<ClassNode>) -> Self {
        ClassInfoModel(node)
    }

    pub(crate) fn data(&self) -> &ClassData {
        &self.0.data
    }

    pub(crate) fn weak_class_path(&self) -> &Weak<ClassPath> {
        &self.0.class_path
    }

    pub(crate) fn weak_node(&self) -> Weak<ClassNode> {
        self.0.this.clone()
    }

    fn scope(&self) -> Scope {
        Scope::Class(self.0.this.clone())
    }

    /// Binary name, e.g. `com.example.Outer$Inner`
    pub fn name(&self) -> &str {
        &self.0.name
    }

    pub fn simple_name(&self) -> &str {
        simple_name(&self.0.name)
    }

    pub fn package_name(&self) -> &str {
        self.0.name.rsplit_once('.').map(|(p, _)| p).unwrap_or("")
    }

    pub fn class_path(&self) -> Option<Arc<ClassPath>> {
        self.0.class_path.upgrade()
    }

    /// Whether the model comes from the live reflection backend
    pub fn is_reflected(&self) -> bool {
        matches!(self.0.data, ClassData::Reflected(_))
    }

    pub fn modifiers(&self) -> Modifiers {
        match &self.0.data {
            ClassData::Scanned(d) => d.access,
            ClassData::Reflected(r) => r.modifiers,
        }
    }

    pub fn is_public(&self) -> bool {
        self.modifiers().is_public()
    }

    pub fn is_enum(&self) -> bool {
        self.modifiers().is_enum()
    }

    pub fn is_interface(&self) -> bool {
        self.modifiers().is_interface()
    }

    pub fn is_abstract(&self) -> bool {
        self.modifiers().is_abstract()
    }

    pub fn is_annotation(&self) -> bool {
        self.modifiers().is_annotation()
    }

    /// Sealed classes list their permitted subclasses
    pub fn is_sealed(&self) -> bool {
        !self.permitted_subclass_names().is_empty()
    }

    pub fn annotations(&self) -> &[AnnotationInfoModel] {
        self.0.annotations.get_or_init(|| match &self.0.data {
            ClassData::Scanned(d) => d.annotations.iter().map(AnnotationInfoModel::from).collect(),
            ClassData::Reflected(r) => r.annotations.iter().map(AnnotationInfoModel::from).collect(),
        })
    }

    pub fn annotation(&self, name: &str) -> Option<&AnnotationInfoModel> {
        self.annotations().iter().find(|a| a.name() == name)
    }

    pub fn has_annotation(&self, name: &str) -> bool {
        has_annotation(self.annotations(), name)
    }

    fn jvm_signature(&self) -> Option<&JvmClassSignature> {
        self.0
            .jvm_signature
            .get_or_init(|| {
                let ClassData::Scanned(descriptor) = &self.0.data else {
                    return None;
                };
                let signature = descriptor.signature.as_deref()?;
                match jvm::parse_class_signature(signature) {
                    Ok(parsed) => Some(parsed),
                    Err(err) => {
                        warn!(class = %self.0.name, error = %err, "Ignoring malformed class signature");
                        None
                    }
                }
            })
            .as_ref()
    }

    pub fn type_parameters(&self) -> &[TypeParameterModel] {
        self.0.type_parameters.get_or_init(|| {
            let scope = self.scope();
            let class_path = &self.0.class_path;
            match &self.0.data {
                ClassData::Scanned(_) => self
                    .jvm_signature()
                    .map(|sig| {
                        sig.type_parameters
                            .iter()
                            .map(|p| {
                                let bounds = p
                                    .bounds()
                                    .map(|b| SignatureModel::from_jvm(b, &scope, class_path, &[]))
                                    .collect();
                                TypeParameterModel::new(p.name.clone(), bounds)
                            })
                            .collect()
                    })
                    .unwrap_or_default(),
                ClassData::Reflected(r) => r
                    .type_parameters
                    .iter()
                    .map(|p| {
                        let bounds = p
                            .bounds
                            .iter()
                            .map(|b| SignatureModel::from_reflect(b, &scope, class_path))
                            .collect();
                        TypeParameterModel::new(p.name.clone(), bounds)
                    })
                    .collect(),
            }
        })
    }

    /// Superclass signature; `None` for interfaces and direct subclasses of
    /// `java.lang.Object`
    pub fn superclass(&self) -> Option<&SignatureModel> {
        self.0
            .superclass
            .get_or_init(|| {
                let scope = self.scope();
                let class_path = &self.0.class_path;
                let signature = match &self.0.data {
                    ClassData::Scanned(d) => match self.jvm_signature() {
                        Some(sig) => Some(SignatureModel::from_jvm(&sig.superclass, &scope, class_path, &[])),
                        None => d.superclass.as_ref().map(|name| {
                            SignatureModel::from_jvm(&JvmType::class(name.clone()), &scope, class_path, &[])
                        }),
                    },
                    ClassData::Reflected(r) => r
                        .superclass
                        .as_ref()
                        .map(|s| SignatureModel::from_reflect(s, &scope, class_path)),
                };
                signature.filter(|s| s.as_class_ref().is_none_or(|c| c.name() != OBJECT_CLASS))
            })
            .as_ref()
    }

    /// The superclass when it is on the class path
    pub fn superclass_info(&self) -> Option<ClassInfoModel> {
        self.superclass()?.as_class_ref()?.class_info()
    }

    pub fn interfaces(&self) -> &[SignatureModel] {
        self.0.interfaces.get_or_init(|| {
            let scope = self.scope();
            let class_path = &self.0.class_path;
            match &self.0.data {
                ClassData::Scanned(d) => match self.jvm_signature() {
                    Some(sig) => sig
                        .interfaces
                        .iter()
                        .map(|i| SignatureModel::from_jvm(i, &scope, class_path, &[]))
                        .collect(),
                    None => d
                        .interfaces
                        .iter()
                        .map(|name| {
                            SignatureModel::from_jvm(&JvmType::class(name.clone()), &scope, class_path, &[])
                        })
                        .collect(),
                },
                ClassData::Reflected(r) => r
                    .interfaces
                    .iter()
                    .map(|i| SignatureModel::from_reflect(i, &scope, class_path))
                    .collect(),
            }
        })
    }

    pub fn fields(&self) -> &[FieldInfoModel] {
        self.0.fields.get_or_init(|| {
            let count = match &self.0.data {
                ClassData::Scanned(d) => d.fields.len(),
                ClassData::Reflected(r) => r.fields.len(),
            };
            (0..count).map(|index| FieldInfoModel::new(self, index)).collect()
        })
    }

    pub fn field(&self, name: &str) -> Option<&FieldInfoModel> {
        self.fields().iter().find(|f| f.name() == name)
    }

    /// Declared methods, constructors and initializers excluded
    pub fn methods(&self) -> &[MethodInfoModel] {
        self.0.methods.get_or_init(|| {
            let names: Vec<&str> = match &self.0.data {
                ClassData::Scanned(d) => d.methods.iter().map(|m| m.name.as_str()).collect(),
                ClassData::Reflected(r) => r.methods.iter().map(|m| m.name.as_str()).collect(),
            };
            names
                .iter()
                .enumerate()
                .filter(|(_, name)| !name.starts_with('<'))
                .map(|(index, _)| MethodInfoModel::new(self, index))
                .collect()
        })
    }

    /// Names of the enum constants in declaration order
    pub fn enum_constants(&self) -> Vec<String> {
        if !self.is_enum() {
            return Vec::new();
        }
        self.fields()
            .iter()
            .filter(|f| f.is_enum_constant())
            .map(|f| f.name().to_string())
            .collect()
    }

    pub fn permitted_subclass_names(&self) -> &[String] {
        match &self.0.data {
            ClassData::Scanned(d) => &d.permitted_subclasses,
            ClassData::Reflected(r) => &r.permitted_subclasses,
        }
    }

    /// Permitted subclasses that are on the class path
    pub fn permitted_subclasses(&self) -> Vec<ClassInfoModel> {
        let Some(class_path) = self.class_path() else {
            return Vec::new();
        };
        self.permitted_subclass_names()
            .iter()
            .filter_map(|name| class_path.class(name))
            .collect()
    }

    pub fn outer_class(&self) -> Option<ClassInfoModel> {
        let name = match &self.0.data {
            ClassData::Scanned(d) => d.outer_class.as_deref(),
            ClassData::Reflected(r) => r.outer_class.as_deref(),
        }?;
        self.class_path()?.class(name)
    }

    /// This class followed by its resolvable superclasses, nearest first.
    ///
    /// Stops at `java.lang.Object` or at the first superclass that is not on
    /// the class path.
    pub fn inheritance_chain(&self) -> Vec<ClassInfoModel> {
        let mut chain = vec![self.clone()];
        let mut current = self.clone();
        while let Some(parent) = current.superclass_info() {
            if chain.contains(&parent) {
                break;
            }
            chain.push(parent.clone());
            current = parent;
        }
        chain
    }

    /// Names of every supertype, resolvable or not, excluding this class
    pub fn supertype_names(&self) -> BTreeSet<String> {
        let mut names = BTreeSet::new();
        let mut pending = vec![self.clone()];
        while let Some(class) = pending.pop() {
            let direct = class.superclass().into_iter().chain(class.interfaces().iter());
            for signature in direct {
                let Some(reference) = signature.as_class_ref() else {
                    continue;
                };
                if names.insert(reference.name().to_string())
                    && let Some(resolved) = reference.class_info()
                {
                    pending.push(resolved);
                }
            }
        }
        names
    }

    /// Whether a value of this class is a `name`
    pub fn is_assignable_to(&self, name: &str) -> bool {
        self.name() == name || name == OBJECT_CLASS || self.supertype_names().contains(name)
    }

    /// Classes referenced by the superclass, field types and method
    /// signatures
    pub fn dependencies(&self) -> BTreeSet<ClassInfoModel> {
        let names = self.0.dependency_names.get_or_init(|| {
            let mut found = resolve(self.superclass());
            for field in self.fields() {
                found.extend(field.dependencies());
            }
            for method in self.methods() {
                found.extend(method.dependencies());
            }
            found
                .into_iter()
                .filter(|c| c != self)
                .map(|c| c.name().to_string())
                .collect()
        });
        let Some(class_path) = self.class_path() else {
            return BTreeSet::new();
        };
        names.iter().filter_map(|n| class_path.class(n)).collect()
    }
}

impl PartialEq for ClassInfoModel {
    fn eq(&self, other: &Self) -> bool {
        self.0.name == other.0.name
    }
}

impl Eq for ClassInfoModel {}

impl Hash for ClassInfoModel {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.name.hash(state);
    }
}

impl PartialOrd for ClassInfoModel {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for ClassInfoModel {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.name.cmp(&other.0.name)
    }
}

impl fmt::Debug for ClassInfoModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ClassInfoModel").field(&self.0.name).finish()
    }
}

impl fmt::Display for ClassInfoModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.name)
    }
}
