//! Live reflection backend
//!
//! Classes are defined programmatically and kept in a [`ReflectRegistry`].
//! Unlike scanned descriptors, types are structured [`ReflectType`] trees
//! with type-use annotations attached to the node they annotate.

use crate::class_path::{ClassData, ClassSource};
use crate::jvm::BaseType;
use crate::modifiers::Modifiers;
use parking_lot::RwLock;
use std::collections::BTreeMap;
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq)]
pub struct ReflectAnnotation {
    pub name: String,
    pub values: BTreeMap<String, serde_json::Value>,
}

impl ReflectAnnotation {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            values: BTreeMap::new(),
        }
    }

    pub fn with_value(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
        self.values.insert(key.into(), value);
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ReflectTypeKind {
    Primitive(BaseType),
    Array(Box<ReflectType>),
    Variable(String),
    Class {
        name: String,
        arguments: Vec<ReflectTypeArgument>,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub enum ReflectTypeArgument {
    Any,
    Exact(ReflectType),
    Extends(ReflectType),
    Super(ReflectType),
}

/// A runtime type with its type-use annotations
#[derive(Debug, Clone, PartialEq)]
pub struct ReflectType {
    pub kind: ReflectTypeKind,
    pub annotations: Vec<ReflectAnnotation>,
}

impl ReflectType {
    fn of(kind: ReflectTypeKind) -> Self {
        Self {
            kind,
            annotations: Vec::new(),
        }
    }

    pub fn primitive(base: BaseType) -> Self {
        Self::of(ReflectTypeKind::Primitive(base))
    }

    pub fn void() -> Self {
        Self::primitive(BaseType::Void)
    }

    pub fn class(name: impl Into<String>) -> Self {
        Self::of(ReflectTypeKind::Class {
            name: name.into(),
            arguments: Vec::new(),
        })
    }

    /// Parameterized class with exact type arguments
    pub fn generic(name: impl Into<String>, arguments: Vec<ReflectType>) -> Self {
        Self::of(ReflectTypeKind::Class {
            name: name.into(),
            arguments: arguments.into_iter().map(ReflectTypeArgument::Exact).collect(),
        })
    }

    pub fn array(component: ReflectType) -> Self {
        Self::of(ReflectTypeKind::Array(Box::new(component)))
    }

    pub fn variable(name: impl Into<String>) -> Self {
        Self::of(ReflectTypeKind::Variable(name.into()))
    }

    /// Append a type argument of any wildcard kind
    pub fn with_argument(mut self, argument: ReflectTypeArgument) -> Self {
        if let ReflectTypeKind::Class { arguments, .. } = &mut self.kind {
            arguments.push(argument);
        }
        self
    }

    pub fn annotated(mut self, annotation: impl Into<String>) -> Self {
        self.annotations.push(ReflectAnnotation::new(annotation));
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReflectTypeParameter {
    pub name: String,
    pub bounds: Vec<ReflectType>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReflectField {
    pub name: String,
    pub modifiers: Modifiers,
    pub ty: ReflectType,
    pub annotations: Vec<ReflectAnnotation>,
}

impl ReflectField {
    /// A private instance field
    pub fn new(name: impl Into<String>, ty: ReflectType) -> Self {
        Self {
            name: name.into(),
            modifiers: Modifiers::new(Modifiers::PRIVATE),
            ty,
            annotations: Vec::new(),
        }
    }

    pub fn modifiers(mut self, bits: u16) -> Self {
        self.modifiers = Modifiers::new(bits);
        self
    }

    pub fn annotated(mut self, annotation: ReflectAnnotation) -> Self {
        self.annotations.push(annotation);
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReflectParameter {
    pub name: Option<String>,
    pub ty: ReflectType,
    pub annotations: Vec<ReflectAnnotation>,
}

impl ReflectParameter {
    pub fn new(name: impl Into<String>, ty: ReflectType) -> Self {
        Self {
            name: Some(name.into()),
            ty,
            annotations: Vec::new(),
        }
    }

    /// A parameter compiled without name information
    pub fn unnamed(ty: ReflectType) -> Self {
        Self {
            name: None,
            ty,
            annotations: Vec::new(),
        }
    }

    pub fn annotated(mut self, annotation: ReflectAnnotation) -> Self {
        self.annotations.push(annotation);
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReflectMethod {
    pub name: String,
    pub modifiers: Modifiers,
    pub type_parameters: Vec<ReflectTypeParameter>,
    pub parameters: Vec<ReflectParameter>,
    pub result: ReflectType,
    pub annotations: Vec<ReflectAnnotation>,
}

impl ReflectMethod {
    /// A public instance method
    pub fn new(name: impl Into<String>, result: ReflectType) -> Self {
        Self {
            name: name.into(),
            modifiers: Modifiers::new(Modifiers::PUBLIC),
            type_parameters: Vec::new(),
            parameters: Vec::new(),
            result,
            annotations: Vec::new(),
        }
    }

    pub fn modifiers(mut self, bits: u16) -> Self {
        self.modifiers = Modifiers::new(bits);
        self
    }

    pub fn type_parameter(mut self, name: impl Into<String>, bounds: Vec<ReflectType>) -> Self {
        self.type_parameters.push(ReflectTypeParameter {
            name: name.into(),
            bounds,
        });
        self
    }

    pub fn parameter(self, name: impl Into<String>, ty: ReflectType) -> Self {
        self.with_parameter(ReflectParameter::new(name, ty))
    }

    pub fn with_parameter(mut self, parameter: ReflectParameter) -> Self {
        self.parameters.push(parameter);
        self
    }

    pub fn annotated(mut self, annotation: ReflectAnnotation) -> Self {
        self.annotations.push(annotation);
        self
    }
}

/// A class definition held by the registry
#[derive(Debug, Clone, PartialEq)]
pub struct ReflectedClass {
    pub name: String,
    pub modifiers: Modifiers,
    pub type_parameters: Vec<ReflectTypeParameter>,
    pub superclass: Option<ReflectType>,
    pub interfaces: Vec<ReflectType>,
    pub annotations: Vec<ReflectAnnotation>,
    pub fields: Vec<ReflectField>,
    pub methods: Vec<ReflectMethod>,
    pub permitted_subclasses: Vec<String>,
    pub outer_class: Option<String>,
}

impl ReflectedClass {
    /// Start a public class extending `java.lang.Object`
    pub fn builder(name: impl Into<String>) -> ClassBuilder {
        ClassBuilder {
            class: ReflectedClass {
                name: name.into(),
                modifiers: Modifiers::new(Modifiers::PUBLIC),
                type_parameters: Vec::new(),
                superclass: Some(ReflectType::class(crate::known::OBJECT_CLASS)),
                interfaces: Vec::new(),
                annotations: Vec::new(),
                fields: Vec::new(),
                methods: Vec::new(),
                permitted_subclasses: Vec::new(),
                outer_class: None,
            },
        }
    }
}

pub struct ClassBuilder {
    class: ReflectedClass,
}

impl ClassBuilder {
    pub fn modifiers(mut self, bits: u16) -> Self {
        self.class.modifiers = Modifiers::new(bits);
        self
    }

    /// Mark as an interface; interfaces have no superclass
    pub fn interface(mut self) -> Self {
        self.class.modifiers = self
            .class
            .modifiers
            .with(Modifiers::INTERFACE)
            .with(Modifiers::ABSTRACT);
        self.class.superclass = None;
        self
    }

    pub fn type_parameter(mut self, name: impl Into<String>, bounds: Vec<ReflectType>) -> Self {
        self.class.type_parameters.push(ReflectTypeParameter {
            name: name.into(),
            bounds,
        });
        self
    }

    pub fn extends(mut self, superclass: ReflectType) -> Self {
        self.class.superclass = Some(superclass);
        self
    }

    pub fn implements(mut self, interface: ReflectType) -> Self {
        self.class.interfaces.push(interface);
        self
    }

    pub fn annotated(mut self, annotation: ReflectAnnotation) -> Self {
        self.class.annotations.push(annotation);
        self
    }

    pub fn field(mut self, field: ReflectField) -> Self {
        self.class.fields.push(field);
        self
    }

    pub fn method(mut self, method: ReflectMethod) -> Self {
        self.class.methods.push(method);
        self
    }

    /// Add an enum constant, marking the class as an enum
    pub fn enum_constant(mut self, name: impl Into<String>) -> Self {
        self.class.modifiers = self.class.modifiers.with(Modifiers::ENUM);
        let ty = ReflectType::class(self.class.name.clone());
        self.class.fields.push(ReflectField::new(name, ty).modifiers(
            Modifiers::PUBLIC | Modifiers::STATIC | Modifiers::FINAL | Modifiers::ENUM,
        ));
        self
    }

    pub fn permits(mut self, subclass: impl Into<String>) -> Self {
        self.class.permitted_subclasses.push(subclass.into());
        self
    }

    pub fn outer(mut self, outer: impl Into<String>) -> Self {
        self.class.outer_class = Some(outer.into());
        self
    }

    pub fn build(self) -> ReflectedClass {
        self.class
    }
}

/// Mutable set of runtime class definitions
#[derive(Debug, Default)]
pub struct ReflectRegistry {
    classes: RwLock<BTreeMap<String, Arc<ReflectedClass>>>,
}

impl ReflectRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Define or redefine a class
    pub fn define(&self, class: ReflectedClass) {
        self.classes.write().insert(class.name.clone(), Arc::new(class));
    }

    pub fn get(&self, name: &str) -> Option<Arc<ReflectedClass>> {
        self.classes.read().get(name).cloned()
    }

    pub fn len(&self) -> usize {
        self.classes.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.read().is_empty()
    }
}

impl ClassSource for ReflectRegistry {
    fn find(&self, name: &str) -> Option<ClassData> {
        self.get(name).map(ClassData::Reflected)
    }

    fn class_names(&self) -> Vec<String> {
        self.classes.read().keys().cloned().collect()
    }
}
