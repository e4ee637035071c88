//! Module assembly

use crate::ast::Declaration;
use crate::imports::ImportManager;
use tsbridge_core::OpenApi;

/// One generated file, path relative to the output directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedFile {
    pub path: String,
    pub content: String,
}

/// Collects the imports and declarations of one TypeScript module
pub struct ModuleBuilder<'a> {
    pub(crate) document: &'a OpenApi,
    pub(crate) module: String,
    /// Component declared by this module, referenced without an import
    pub(crate) own_component: Option<String>,
    pub(crate) imports: ImportManager,
    declarations: Vec<Declaration>,
}

impl<'a> ModuleBuilder<'a> {
    /// Builder for the module at `module` (relative path, no extension)
    pub fn new(document: &'a OpenApi, module: impl Into<String>) -> Self {
        Self {
            document,
            module: module.into(),
            own_component: None,
            imports: ImportManager::new(),
            declarations: Vec::new(),
        }
    }

    /// Mark the component this module declares
    pub fn declaring(mut self, component: impl Into<String>) -> Self {
        self.own_component = Some(component.into());
        self
    }

    pub fn module(&self) -> &str {
        &self.module
    }

    pub fn imports(&mut self) -> &mut ImportManager {
        &mut self.imports
    }

    pub fn declare(&mut self, declaration: Declaration) {
        self.declarations.push(declaration);
    }

    pub fn finish(self) -> GeneratedFile {
        let mut content = self.imports.render();
        for declaration in &self.declarations {
            content.push_str(&declaration.to_string());
        }
        GeneratedFile {
            path: format!("{}.ts", self.module),
            content,
        }
    }
}

#[cfg(test)]
#[path = "module/module_tests.rs"]
mod module_tests;
