//! Method, parameter and field models

use crate::annotation::{AnnotationInfoModel, has_annotation};
use crate::class::{ClassInfoModel, ClassNode};
use crate::class_path::{ClassData, ClassPath};
use crate::jvm::{self, JvmMethodSignature, JvmType};
use crate::modifiers::Modifiers;
use crate::scan::{TypeAnnotationDescriptor, TypeAnnotationTarget};
use crate::signature::{Scope, SignatureModel, TypeParameterModel, resolve};
use once_cell::sync::OnceCell;
use std::cmp::Ordering;
use std::collections::BTreeSet;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::{Arc, Weak};
use tracing::warn;

fn type_annotations_for(
    annotations: &[TypeAnnotationDescriptor],
    target: TypeAnnotationTarget,
) -> Vec<(Vec<usize>, AnnotationInfoModel)> {
    annotations
        .iter()
        .filter(|t| t.target == target)
        .map(|t| (t.path.clone(), AnnotationInfoModel::from(&t.annotation)))
        .collect()
}

pub(crate) struct MethodNode {
    owner: Weak<ClassNode>,
    owner_name: String,
    index: usize,
    data: ClassData,
    class_path: Weak<ClassPath>,
    this: Weak<MethodNode>,
    jvm_signature: OnceCell<Option<JvmMethodSignature>>,
    annotations: OnceCell<Vec<AnnotationInfoModel>>,
    type_parameters: OnceCell<Vec<TypeParameterModel>>,
    parameters: OnceCell<Vec<MethodParameterInfoModel>>,
    result: OnceCell<SignatureModel>,
}

/// A declared method.
///
/// Two methods are equal when they have the same owner, name and parameter
/// signatures.
#[derive(Clone)]
pub struct MethodInfoModel(Arc<MethodNode>);

impl MethodInfoModel {
    pub(crate) fn new(owner: &ClassInfoModel, index: usize) -> Self {
        MethodInfoModel(Arc::new_cyclic(|this| MethodNode {
            owner: owner.weak_node(),
            owner_name: owner.name().to_string(),
            index,
            data: owner.data().clone(),
            class_path: owner.weak_class_path().clone(),
            this: this.clone(),
            jvm_signature: OnceCell::new(),
            annotations: OnceCell::new(),
            type_parameters: OnceCell::new(),
            parameters: OnceCell::new(),
            result: OnceCell::new(),
        }))
    }

    pub(crate) fn from_node(node: Arc<MethodNode>) -> Self {
        MethodInfoModel(node)
    }

    fn scope(&self) -> Scope {
        Scope::Method(self.0.this.clone())
    }

    pub fn name(&self) -> &str {
        match &self.0.data {
            ClassData::Scanned(d) => &d.methods[self.0.index].name,
            ClassData::Reflected(r) => &r.methods[self.0.index].name,
        }
    }

    pub fn owner(&self) -> Option<ClassInfoModel> {
        self.0.owner.upgrade().map(ClassInfoModel::from_node)
    }

    pub fn owner_name(&self) -> &str {
        &self.0.owner_name
    }

    pub fn modifiers(&self) -> Modifiers {
        match &self.0.data {
            ClassData::Scanned(d) => d.methods[self.0.index].access,
            ClassData::Reflected(r) => r.methods[self.0.index].modifiers,
        }
    }

    pub fn is_public(&self) -> bool {
        self.modifiers().is_public()
    }

    pub fn is_static(&self) -> bool {
        self.modifiers().is_static()
    }

    /// Synthetic or bridge method
    pub fn is_generated(&self) -> bool {
        self.modifiers().is_generated()
    }

    pub fn annotations(&self) -> &[AnnotationInfoModel] {
        self.0.annotations.get_or_init(|| match &self.0.data {
            ClassData::Scanned(d) => d.methods[self.0.index]
                .annotations
                .iter()
                .map(AnnotationInfoModel::from)
                .collect(),
            ClassData::Reflected(r) => r.methods[self.0.index]
                .annotations
                .iter()
                .map(AnnotationInfoModel::from)
                .collect(),
        })
    }

    pub fn has_annotation(&self, name: &str) -> bool {
        has_annotation(self.annotations(), name)
    }

    fn jvm_signature(&self) -> Option<&JvmMethodSignature> {
        self.0
            .jvm_signature
            .get_or_init(|| {
                let ClassData::Scanned(d) = &self.0.data else {
                    return None;
                };
                let method = &d.methods[self.0.index];
                if let Some(signature) = method.signature.as_deref() {
                    match jvm::parse_method_signature(signature) {
                        Ok(parsed) => return Some(parsed),
                        Err(err) => warn!(
                            method = %format!("{}.{}", d.name, method.name),
                            error = %err,
                            "Malformed generic signature, falling back to descriptor"
                        ),
                    }
                }
                match jvm::parse_method_signature(&method.descriptor) {
                    Ok(parsed) => Some(parsed),
                    Err(err) => {
                        warn!(
                            method = %format!("{}.{}", d.name, method.name),
                            error = %err,
                            "Malformed method descriptor, treating types as unknown"
                        );
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
                ClassData::Reflected(r) => r.methods[self.0.index]
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

    pub fn parameters(&self) -> &[MethodParameterInfoModel] {
        self.0.parameters.get_or_init(|| {
            let scope = self.scope();
            let class_path = &self.0.class_path;
            match &self.0.data {
                ClassData::Scanned(d) => {
                    let method = &d.methods[self.0.index];
                    let types: Vec<JvmType> = self
                        .jvm_signature()
                        .map(|sig| sig.parameters.clone())
                        .unwrap_or_default();
                    types
                        .iter()
                        .enumerate()
                        .map(|(index, ty)| {
                            let type_annotations = type_annotations_for(
                                &method.type_annotations,
                                TypeAnnotationTarget::Parameter(index),
                            );
                            MethodParameterInfoModel {
                                owner_name: self.0.owner_name.clone(),
                                method_name: method.name.clone(),
                                index,
                                name: method.parameter_names.get(index).cloned().flatten(),
                                signature: SignatureModel::from_jvm(ty, &scope, class_path, &type_annotations),
                                annotations: method
                                    .parameter_annotations
                                    .get(index)
                                    .map(|list| list.iter().map(AnnotationInfoModel::from).collect())
                                    .unwrap_or_default(),
                            }
                        })
                        .collect()
                }
                ClassData::Reflected(r) => {
                    let method = &r.methods[self.0.index];
                    method
                        .parameters
                        .iter()
                        .enumerate()
                        .map(|(index, p)| MethodParameterInfoModel {
                            owner_name: self.0.owner_name.clone(),
                            method_name: method.name.clone(),
                            index,
                            name: p.name.clone(),
                            signature: SignatureModel::from_reflect(&p.ty, &scope, class_path),
                            annotations: p.annotations.iter().map(AnnotationInfoModel::from).collect(),
                        })
                        .collect()
                }
            }
        })
    }

    /// Result type; `void` methods have a `void` base signature
    pub fn result_type(&self) -> &SignatureModel {
        self.0.result.get_or_init(|| {
            let scope = self.scope();
            let class_path = &self.0.class_path;
            match &self.0.data {
                ClassData::Scanned(d) => {
                    let method = &d.methods[self.0.index];
                    match self.jvm_signature() {
                        Some(sig) => {
                            let type_annotations =
                                type_annotations_for(&method.type_annotations, TypeAnnotationTarget::Return);
                            SignatureModel::from_jvm(&sig.result, &scope, class_path, &type_annotations)
                        }
                        None => SignatureModel::unknown(class_path.clone()),
                    }
                }
                ClassData::Reflected(r) => {
                    SignatureModel::from_reflect(&r.methods[self.0.index].result, &scope, class_path)
                }
            }
        })
    }

    /// Classes referenced by the parameters and the result
    pub fn dependencies(&self) -> BTreeSet<ClassInfoModel> {
        let mut found = resolve(Some(self.result_type()));
        for parameter in self.parameters() {
            found.extend(resolve(Some(parameter.signature())));
        }
        found
    }

    fn key(&self) -> (&str, &str) {
        (&self.0.owner_name, self.name())
    }
}

impl PartialEq for MethodInfoModel {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
            && self
                .parameters()
                .iter()
                .map(|p| p.signature())
                .eq(other.parameters().iter().map(|p| p.signature()))
    }
}

impl Eq for MethodInfoModel {}

impl Hash for MethodInfoModel {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key().hash(state);
    }
}

impl PartialOrd for MethodInfoModel {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for MethodInfoModel {
    fn cmp(&self, other: &Self) -> Ordering {
        self.key().cmp(&other.key()).then_with(|| {
            let ours = self.parameters().iter().map(|p| p.signature().to_string());
            let theirs = other.parameters().iter().map(|p| p.signature().to_string());
            ours.cmp(theirs)
        })
    }
}

impl fmt::Debug for MethodInfoModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "MethodInfoModel({}.{})", self.0.owner_name, self.name())
    }
}

/// A method parameter
#[derive(Debug, Clone, PartialEq)]
pub struct MethodParameterInfoModel {
    owner_name: String,
    method_name: String,
    index: usize,
    name: Option<String>,
    signature: SignatureModel,
    annotations: Vec<AnnotationInfoModel>,
}

impl MethodParameterInfoModel {
    /// Declared name; `None` when compiled without parameter names
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn method_name(&self) -> &str {
        &self.method_name
    }

    pub fn owner_name(&self) -> &str {
        &self.owner_name
    }

    pub fn signature(&self) -> &SignatureModel {
        &self.signature
    }

    pub fn annotations(&self) -> &[AnnotationInfoModel] {
        &self.annotations
    }

    pub fn has_annotation(&self, name: &str) -> bool {
        has_annotation(&self.annotations, name)
    }
}

pub(crate) struct FieldNode {
    owner: Weak<ClassNode>,
    owner_name: String,
    index: usize,
    data: ClassData,
    class_path: Weak<ClassPath>,
    annotations: OnceCell<Vec<AnnotationInfoModel>>,
    signature: OnceCell<SignatureModel>,
}

/// A declared field; identity is owner plus name
#[derive(Clone)]
pub struct FieldInfoModel(Arc<FieldNode>);

impl FieldInfoModel {
    pub(crate) fn new(owner: &ClassInfoModel, index: usize) -> Self {
        FieldInfoModel(Arc::new(FieldNode {
            owner: owner.weak_node(),
            owner_name: owner.name().to_string(),
            index,
            data: owner.data().clone(),
            class_path: owner.weak_class_path().clone(),
            annotations: OnceCell::new(),
            signature: OnceCell::new(),
        }))
    }

    pub fn name(&self) -> &str {
        match &self.0.data {
            ClassData::Scanned(d) => &d.fields[self.0.index].name,
            ClassData::Reflected(r) => &r.fields[self.0.index].name,
        }
    }

    pub fn owner(&self) -> Option<ClassInfoModel> {
        self.0.owner.upgrade().map(ClassInfoModel::from_node)
    }

    pub fn owner_name(&self) -> &str {
        &self.0.owner_name
    }

    pub fn modifiers(&self) -> Modifiers {
        match &self.0.data {
            ClassData::Scanned(d) => d.fields[self.0.index].access,
            ClassData::Reflected(r) => r.fields[self.0.index].modifiers,
        }
    }

    pub fn is_public(&self) -> bool {
        self.modifiers().is_public()
    }

    pub fn is_static(&self) -> bool {
        self.modifiers().is_static()
    }

    pub fn is_enum_constant(&self) -> bool {
        self.modifiers().is_enum()
    }

    pub fn annotations(&self) -> &[AnnotationInfoModel] {
        self.0.annotations.get_or_init(|| match &self.0.data {
            ClassData::Scanned(d) => d.fields[self.0.index]
                .annotations
                .iter()
                .map(AnnotationInfoModel::from)
                .collect(),
            ClassData::Reflected(r) => r.fields[self.0.index]
                .annotations
                .iter()
                .map(AnnotationInfoModel::from)
                .collect(),
        })
    }

    pub fn has_annotation(&self, name: &str) -> bool {
        has_annotation(self.annotations(), name)
    }

    pub fn signature(&self) -> &SignatureModel {
        self.0.signature.get_or_init(|| {
            let scope = Scope::Class(self.0.owner.clone());
            let class_path = &self.0.class_path;
            match &self.0.data {
                ClassData::Scanned(d) => {
                    let field = &d.fields[self.0.index];
                    let text = field.signature.as_deref().unwrap_or(&field.descriptor);
                    match jvm::parse_field_signature(text) {
                        Ok(ty) => {
                            let type_annotations =
                                type_annotations_for(&field.type_annotations, TypeAnnotationTarget::Field);
                            SignatureModel::from_jvm(&ty, &scope, class_path, &type_annotations)
                        }
                        Err(err) => {
                            warn!(
                                field = %format!("{}.{}", d.name, field.name),
                                error = %err,
                                "Malformed field signature, treating type as unknown"
                            );
                            SignatureModel::unknown(class_path.clone())
                        }
                    }
                }
                ClassData::Reflected(r) => {
                    SignatureModel::from_reflect(&r.fields[self.0.index].ty, &scope, class_path)
                }
            }
        })
    }

    pub fn dependencies(&self) -> BTreeSet<ClassInfoModel> {
        resolve(Some(self.signature()))
    }
}

impl PartialEq for FieldInfoModel {
    fn eq(&self, other: &Self) -> bool {
        self.0.owner_name == other.0.owner_name && self.name() == other.name()
    }
}

impl Eq for FieldInfoModel {}

impl Hash for FieldInfoModel {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.owner_name.hash(state);
        self.name().hash(state);
    }
}

impl fmt::Debug for FieldInfoModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FieldInfoModel({}.{})", self.0.owner_name, self.name())
    }
}
