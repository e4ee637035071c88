//! Type signature models
//!
//! A [`SignatureModel`] is one of four variants: a primitive (or `void`), an
//! array, a type variable or a class reference with type arguments. Both
//! backends produce the same trees, so equality is structural: two signatures
//! are equal when their shapes and annotations are equal, wherever they were
//! declared.
//!
//! Type variables keep a weak link to the method or class that declares them
//! so they can be resolved to their [`TypeParameterModel`] later.

use crate::annotation::{AnnotationInfoModel, has_annotation};
use crate::class::{ClassInfoModel, ClassNode};
use crate::class_path::ClassPath;
use crate::jvm::{BaseType, JvmType, JvmTypeArgument};
use crate::known::{self, KnownKind, OBJECT_CLASS};
use crate::member::{MethodInfoModel, MethodNode};
use crate::reflect::{ReflectType, ReflectTypeArgument, ReflectTypeKind};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::sync::Weak;

/// Declaration context used to resolve type variables
#[derive(Debug, Clone, Default)]
pub(crate) enum Scope {
    #[default]
    None,
    Class(Weak<ClassNode>),
    Method(Weak<MethodNode>),
}

#[derive(Debug, Clone, PartialEq)]
pub enum SignatureModel {
    Base(BaseSignatureModel),
    Array(ArraySignatureModel),
    TypeVariable(TypeVariableModel),
    ClassRef(ClassRefSignatureModel),
}

#[derive(Debug, Clone, PartialEq)]
pub struct BaseSignatureModel {
    base: BaseType,
    annotations: Vec<AnnotationInfoModel>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ArraySignatureModel {
    component: Box<SignatureModel>,
    annotations: Vec<AnnotationInfoModel>,
}

#[derive(Debug, Clone)]
pub struct TypeVariableModel {
    name: String,
    annotations: Vec<AnnotationInfoModel>,
    scope: Scope,
}

#[derive(Debug, Clone)]
pub struct ClassRefSignatureModel {
    name: String,
    type_arguments: Vec<TypeArgument>,
    annotations: Vec<AnnotationInfoModel>,
    class_path: Weak<ClassPath>,
}

/// Wildcard form of a type argument
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WildcardKind {
    Exact,
    Extends,
    Super,
    /// `?` with no bound
    Any,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TypeArgument {
    wildcard: WildcardKind,
    signature: Option<SignatureModel>,
}

/// A declared type parameter with its bounds.
///
/// `java.lang.Object` bounds are dropped, so `<T>` and `<T extends Object>`
/// are the same parameter.
#[derive(Debug, Clone, PartialEq)]
pub struct TypeParameterModel {
    name: String,
    bounds: Vec<SignatureModel>,
}

impl PartialEq for TypeVariableModel {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name && self.annotations == other.annotations
    }
}

impl PartialEq for ClassRefSignatureModel {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
            && self.type_arguments == other.type_arguments
            && self.annotations == other.annotations
    }
}

impl SignatureModel {
    pub fn base(base: BaseType) -> Self {
        SignatureModel::Base(BaseSignatureModel {
            base,
            annotations: Vec::new(),
        })
    }

    /// A class reference without type arguments
    pub fn class_ref(name: impl Into<String>, class_path: Weak<ClassPath>) -> Self {
        SignatureModel::ClassRef(ClassRefSignatureModel {
            name: name.into(),
            type_arguments: Vec::new(),
            annotations: Vec::new(),
            class_path,
        })
    }

    /// Stand-in for a signature that could not be parsed
    pub(crate) fn unknown(class_path: Weak<ClassPath>) -> Self {
        Self::class_ref(OBJECT_CLASS, class_path)
    }

    pub fn annotations(&self) -> &[AnnotationInfoModel] {
        match self {
            SignatureModel::Base(s) => &s.annotations,
            SignatureModel::Array(s) => &s.annotations,
            SignatureModel::TypeVariable(s) => &s.annotations,
            SignatureModel::ClassRef(s) => &s.annotations,
        }
    }

    fn annotations_mut(&mut self) -> &mut Vec<AnnotationInfoModel> {
        match self {
            SignatureModel::Base(s) => &mut s.annotations,
            SignatureModel::Array(s) => &mut s.annotations,
            SignatureModel::TypeVariable(s) => &mut s.annotations,
            SignatureModel::ClassRef(s) => &mut s.annotations,
        }
    }

    pub fn has_annotation(&self, name: &str) -> bool {
        has_annotation(self.annotations(), name)
    }

    pub fn is_base(&self) -> bool {
        matches!(self, SignatureModel::Base(_))
    }

    pub fn is_void(&self) -> bool {
        match self {
            SignatureModel::Base(s) => s.base == BaseType::Void,
            SignatureModel::ClassRef(s) => s.name == "java.lang.Void",
            _ => false,
        }
    }

    pub fn as_base(&self) -> Option<&BaseSignatureModel> {
        match self {
            SignatureModel::Base(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&ArraySignatureModel> {
        match self {
            SignatureModel::Array(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_type_variable(&self) -> Option<&TypeVariableModel> {
        match self {
            SignatureModel::TypeVariable(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_class_ref(&self) -> Option<&ClassRefSignatureModel> {
        match self {
            SignatureModel::ClassRef(s) => Some(s),
            _ => None,
        }
    }

    /// Classes this signature depends on
    pub fn dependencies(&self) -> BTreeSet<ClassInfoModel> {
        resolve(Some(self))
    }

    /// Replace bound type variables.
    ///
    /// Annotations on a replaced variable are carried over to its replacement.
    pub fn substitute(&self, bindings: &BTreeMap<String, SignatureModel>) -> SignatureModel {
        match self {
            SignatureModel::Base(_) => self.clone(),
            SignatureModel::Array(s) => SignatureModel::Array(ArraySignatureModel {
                component: Box::new(s.component.substitute(bindings)),
                annotations: s.annotations.clone(),
            }),
            SignatureModel::TypeVariable(s) => match bindings.get(&s.name) {
                Some(bound) => {
                    let mut replaced = bound.clone();
                    replaced.annotations_mut().extend(s.annotations.iter().cloned());
                    replaced
                }
                None => self.clone(),
            },
            SignatureModel::ClassRef(s) => SignatureModel::ClassRef(ClassRefSignatureModel {
                name: s.name.clone(),
                type_arguments: s
                    .type_arguments
                    .iter()
                    .map(|a| TypeArgument {
                        wildcard: a.wildcard,
                        signature: a.signature.as_ref().map(|sig| sig.substitute(bindings)),
                    })
                    .collect(),
                annotations: s.annotations.clone(),
                class_path: s.class_path.clone(),
            }),
        }
    }

    pub(crate) fn from_jvm(
        ty: &JvmType,
        scope: &Scope,
        class_path: &Weak<ClassPath>,
        type_annotations: &[(Vec<usize>, AnnotationInfoModel)],
    ) -> Self {
        let mut path = Vec::new();
        Self::from_jvm_at(ty, scope, class_path, type_annotations, &mut path)
    }

    fn from_jvm_at(
        ty: &JvmType,
        scope: &Scope,
        class_path: &Weak<ClassPath>,
        type_annotations: &[(Vec<usize>, AnnotationInfoModel)],
        path: &mut Vec<usize>,
    ) -> Self {
        let annotations: Vec<AnnotationInfoModel> = type_annotations
            .iter()
            .filter(|(p, _)| p == path)
            .map(|(_, a)| a.clone())
            .collect();
        match ty {
            JvmType::Base(base) => SignatureModel::Base(BaseSignatureModel {
                base: *base,
                annotations,
            }),
            JvmType::Array(component) => {
                path.push(0);
                let component =
                    Self::from_jvm_at(component, scope, class_path, type_annotations, path);
                path.pop();
                SignatureModel::Array(ArraySignatureModel {
                    component: Box::new(component),
                    annotations,
                })
            }
            JvmType::TypeVariable(name) => SignatureModel::TypeVariable(TypeVariableModel {
                name: name.clone(),
                annotations,
                scope: scope.clone(),
            }),
            JvmType::Class(class) => {
                let type_arguments = class
                    .type_arguments
                    .iter()
                    .enumerate()
                    .map(|(index, argument)| {
                        path.push(index);
                        let mut convert = |t: &JvmType| {
                            Some(Self::from_jvm_at(t, scope, class_path, type_annotations, path))
                        };
                        let converted = match argument {
                            JvmTypeArgument::Any => TypeArgument::any(),
                            JvmTypeArgument::Exact(t) => TypeArgument::new(WildcardKind::Exact, convert(t)),
                            JvmTypeArgument::Extends(t) => {
                                TypeArgument::new(WildcardKind::Extends, convert(t))
                            }
                            JvmTypeArgument::Super(t) => TypeArgument::new(WildcardKind::Super, convert(t)),
                        };
                        path.pop();
                        converted
                    })
                    .collect();
                SignatureModel::ClassRef(ClassRefSignatureModel {
                    name: class.name.clone(),
                    type_arguments,
                    annotations,
                    class_path: class_path.clone(),
                })
            }
        }
    }

    pub(crate) fn from_reflect(ty: &ReflectType, scope: &Scope, class_path: &Weak<ClassPath>) -> Self {
        let annotations = ty.annotations.iter().map(AnnotationInfoModel::from).collect();
        match &ty.kind {
            ReflectTypeKind::Primitive(base) => SignatureModel::Base(BaseSignatureModel {
                base: *base,
                annotations,
            }),
            ReflectTypeKind::Array(component) => SignatureModel::Array(ArraySignatureModel {
                component: Box::new(Self::from_reflect(component, scope, class_path)),
                annotations,
            }),
            ReflectTypeKind::Variable(name) => SignatureModel::TypeVariable(TypeVariableModel {
                name: name.clone(),
                annotations,
                scope: scope.clone(),
            }),
            ReflectTypeKind::Class { name, arguments } => {
                let convert = |t: &ReflectType| Some(Self::from_reflect(t, scope, class_path));
                let type_arguments = arguments
                    .iter()
                    .map(|argument| match argument {
                        ReflectTypeArgument::Any => TypeArgument::any(),
                        ReflectTypeArgument::Exact(t) => TypeArgument::new(WildcardKind::Exact, convert(t)),
                        ReflectTypeArgument::Extends(t) => {
                            TypeArgument::new(WildcardKind::Extends, convert(t))
                        }
                        ReflectTypeArgument::Super(t) => TypeArgument::new(WildcardKind::Super, convert(t)),
                    })
                    .collect();
                SignatureModel::ClassRef(ClassRefSignatureModel {
                    name: name.clone(),
                    type_arguments,
                    annotations,
                    class_path: class_path.clone(),
                })
            }
        }
    }
}

impl BaseSignatureModel {
    pub fn base_type(&self) -> BaseType {
        self.base
    }
}

impl ArraySignatureModel {
    pub fn component(&self) -> &SignatureModel {
        &self.component
    }
}

impl TypeVariableModel {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The type parameter this variable refers to.
    ///
    /// Looks at the declaring method first, then the owning class, then the
    /// lexically enclosing classes.
    pub fn resolve(&self) -> Option<TypeParameterModel> {
        match &self.scope {
            Scope::None => None,
            Scope::Method(method) => {
                let method = MethodInfoModel::from_node(method.upgrade()?);
                if let Some(parameter) = method
                    .type_parameters()
                    .iter()
                    .find(|p| p.name == self.name)
                {
                    return Some(parameter.clone());
                }
                find_in_class(method.owner()?, &self.name)
            }
            Scope::Class(class) => find_in_class(ClassInfoModel::from_node(class.upgrade()?), &self.name),
        }
    }
}

fn find_in_class(mut class: ClassInfoModel, name: &str) -> Option<TypeParameterModel> {
    // Nesting depth guard against cyclic outer-class metadata
    for _ in 0..32 {
        if let Some(parameter) = class.type_parameters().iter().find(|p| p.name == name) {
            return Some(parameter.clone());
        }
        class = class.outer_class()?;
    }
    None
}

impl ClassRefSignatureModel {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn simple_name(&self) -> &str {
        crate::annotation::simple_name(&self.name)
    }

    pub fn type_arguments(&self) -> &[TypeArgument] {
        &self.type_arguments
    }

    /// The same reference pointing at another class
    pub fn renamed(&self, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..self.clone()
        }
    }

    /// The referenced class when it is on the class path
    pub fn class_info(&self) -> Option<ClassInfoModel> {
        self.class_path.upgrade()?.class(&self.name)
    }

    /// Not backed by any class on the class path
    pub fn is_system(&self) -> bool {
        self.class_info().is_none()
    }

    /// Schema kind from the well-known type table.
    ///
    /// Classes on the class path are classified through their supertypes, so
    /// a user class implementing `java.util.List` is iterable.
    pub fn kind(&self) -> Option<KnownKind> {
        if let Some(kind) = known::classify(&self.name) {
            return Some(kind);
        }
        let class = self.class_info()?;
        let supertypes = class.supertype_names();
        known::classify_by_supertypes(supertypes.iter().map(String::as_str))
    }

    pub fn is_string(&self) -> bool {
        self.kind() == Some(KnownKind::String)
    }

    pub fn is_number(&self) -> bool {
        matches!(self.kind(), Some(KnownKind::Number(_)))
    }

    pub fn is_boolean(&self) -> bool {
        self.kind() == Some(KnownKind::Boolean)
    }

    pub fn is_date(&self) -> bool {
        self.kind() == Some(KnownKind::Date)
    }

    pub fn is_date_time(&self) -> bool {
        self.kind() == Some(KnownKind::DateTime)
    }

    pub fn is_iterable(&self) -> bool {
        self.kind() == Some(KnownKind::Iterable)
    }

    pub fn is_map(&self) -> bool {
        self.kind() == Some(KnownKind::Map)
    }

    pub fn is_optional(&self) -> bool {
        self.kind() == Some(KnownKind::Optional)
    }

    pub fn is_enum(&self) -> bool {
        self.class_info().is_some_and(|c| c.is_enum())
    }
}

impl TypeArgument {
    pub fn new(wildcard: WildcardKind, signature: Option<SignatureModel>) -> Self {
        Self {
            wildcard,
            signature,
        }
    }

    pub fn any() -> Self {
        Self::new(WildcardKind::Any, None)
    }

    pub fn wildcard(&self) -> WildcardKind {
        self.wildcard
    }

    /// The argument's type; `None` for an unbounded wildcard
    pub fn signature(&self) -> Option<&SignatureModel> {
        self.signature.as_ref()
    }
}

impl TypeParameterModel {
    pub(crate) fn new(name: impl Into<String>, bounds: Vec<SignatureModel>) -> Self {
        let bounds = bounds
            .into_iter()
            .filter(|b| b.as_class_ref().is_none_or(|c| c.name != OBJECT_CLASS))
            .collect();
        Self {
            name: name.into(),
            bounds,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn bounds(&self) -> &[SignatureModel] {
        &self.bounds
    }
}

/// Every class a signature's shape depends on.
///
/// Arrays, type arguments and type variable bounds are unwrapped
/// recursively; primitives and `void` contribute nothing. A class reference
/// not on the class path contributes only its type arguments' dependencies.
pub fn resolve(signature: Option<&SignatureModel>) -> BTreeSet<ClassInfoModel> {
    let mut dependencies = BTreeSet::new();
    if let Some(signature) = signature {
        collect(signature, &mut dependencies, &mut Vec::new());
    }
    dependencies
}

fn collect(signature: &SignatureModel, out: &mut BTreeSet<ClassInfoModel>, visiting: &mut Vec<String>) {
    match signature {
        SignatureModel::Base(_) => {}
        SignatureModel::Array(s) => collect(&s.component, out, visiting),
        SignatureModel::TypeVariable(s) => {
            if visiting.contains(&s.name) {
                return;
            }
            visiting.push(s.name.clone());
            if let Some(parameter) = s.resolve() {
                for bound in &parameter.bounds {
                    collect(bound, out, visiting);
                }
            }
            visiting.pop();
        }
        SignatureModel::ClassRef(s) => {
            if s.name != OBJECT_CLASS
                && let Some(class) = s.class_info()
            {
                out.insert(class);
            }
            for argument in &s.type_arguments {
                if let Some(signature) = &argument.signature {
                    collect(signature, out, visiting);
                }
            }
        }
    }
}

impl fmt::Display for SignatureModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SignatureModel::Base(s) => f.write_str(s.base.keyword()),
            SignatureModel::Array(s) => write!(f, "{}[]", s.component),
            SignatureModel::TypeVariable(s) => f.write_str(&s.name),
            SignatureModel::ClassRef(s) => {
                f.write_str(&s.name)?;
                if !s.type_arguments.is_empty() {
                    f.write_str("<")?;
                    for (i, argument) in s.type_arguments.iter().enumerate() {
                        if i > 0 {
                            f.write_str(", ")?;
                        }
                        match (&argument.wildcard, &argument.signature) {
                            (WildcardKind::Extends, Some(sig)) => write!(f, "? extends {sig}")?,
                            (WildcardKind::Super, Some(sig)) => write!(f, "? super {sig}")?,
                            (_, Some(sig)) => write!(f, "{sig}")?,
                            (_, None) => f.write_str("?")?,
                        }
                    }
                    f.write_str(">")?;
                }
                Ok(())
            }
        }
    }
}

#[cfg(test)]
#[path = "signature/signature_tests.rs"]
mod signature_tests;
