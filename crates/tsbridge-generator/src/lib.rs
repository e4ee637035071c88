//! tsbridge-generator - TypeScript client generation
//!
//! Turns a finished [`OpenApi`] document into TypeScript modules:
//! - one module per component schema at `{package path}/{Name}.ts`
//! - optionally one form model per entity at `{package path}/{Name}Model.ts`
//! - one module per endpoint at `{Endpoint}.ts` whose functions call the client
//! - an `endpoints.ts` barrel re-exporting every endpoint
//!
//! Generation is a pure function of the document; [`write_files`] is the only
//! function touching the filesystem.
//!
//! ```
//! use tsbridge_core::{OpenApi, Schema};
//! use tsbridge_generator::Generator;
//!
//! let mut document = OpenApi::new("App", "1.0.0");
//! document.register_schema("com.example.Status", Schema::string_enum(vec!["ON".into()]));
//!
//! let files = Generator::default().generate(&document).unwrap();
//! assert_eq!(files[0].path, "com/example/Status.ts");
//! ```
//!
//! [`OpenApi`]: tsbridge_core::OpenApi

mod ast;
mod endpoint;
mod entity;
mod error;
mod generator;
mod imports;
mod model;
mod module;
mod naming;
mod types;

pub use ast::{ClassMember, Declaration, Parameter, PropertySignature, TypeNode, TypeParameter};
pub use endpoint::{
    BARREL_MODULE, EndpointMethods, FRONTEND_PACKAGE, barrel_module, endpoint_groups,
    endpoint_module,
};
pub use entity::entity_module;
pub use error::{GeneratorError, GeneratorResult};
pub use generator::{Generator, write_files};
pub use imports::ImportManager;
pub use model::{FORM_PACKAGE, has_model, model_module};
pub use module::{GeneratedFile, ModuleBuilder};
pub use naming::{module_path, relative_specifier, simple_name};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{GeneratedFile, Generator, GeneratorError, GeneratorResult, write_files};
}
