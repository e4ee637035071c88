//! tsbridge-model - Reflective type model
//!
//! A uniform view of classes, methods, fields, annotations and generic
//! signatures over two metadata backends:
//! - [`scan`]: JSON class descriptors produced by a static bytecode scanner
//! - [`reflect`]: classes defined at runtime in a [`ReflectRegistry`]
//!
//! Both backends feed one [`ClassPath`], which hands out shared model nodes.
//! Nodes from either backend behave identically for equality, hashing and
//! dependency extraction.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use tsbridge_model::reflect::{ReflectRegistry, ReflectedClass, ReflectMethod, ReflectType};
//! use tsbridge_model::ClassPath;
//!
//! let registry = ReflectRegistry::new();
//! registry.define(
//!     ReflectedClass::builder("com.example.Person")
//!         .method(ReflectMethod::new("getName", ReflectType::class("java.lang.String")))
//!         .build(),
//! );
//! let class_path = ClassPath::with_source(Arc::new(registry));
//!
//! let person = class_path.class("com.example.Person").unwrap();
//! assert_eq!(person.simple_name(), "Person");
//! assert_eq!(person.methods()[0].name(), "getName");
//! ```

mod annotation;
mod class;
mod class_path;
mod error;
mod member;
mod modifiers;
mod signature;

pub mod jvm;
pub mod known;
pub mod reflect;
pub mod scan;

pub use annotation::AnnotationInfoModel;
pub use class::ClassInfoModel;
pub use class_path::{ClassData, ClassPath, ClassSource};
pub use error::{ModelError, ModelResult};
pub use known::{KnownKind, NumberFormat};
pub use member::{FieldInfoModel, MethodInfoModel, MethodParameterInfoModel};
pub use modifiers::Modifiers;
pub use reflect::ReflectRegistry;
pub use scan::ScanIndex;
pub use signature::{
    ArraySignatureModel, BaseSignatureModel, ClassRefSignatureModel, SignatureModel, TypeArgument,
    TypeParameterModel, TypeVariableModel, WildcardKind, resolve,
};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        ClassInfoModel, ClassPath, KnownKind, MethodInfoModel, ModelError, SignatureModel,
    };
}
