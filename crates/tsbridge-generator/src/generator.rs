//! Whole-document generation

use crate::endpoint::{barrel_module, endpoint_groups, endpoint_module};
use crate::entity::entity_module;
use crate::error::{GeneratorError, GeneratorResult};
use crate::model::{has_model, model_module};
use crate::module::GeneratedFile;
use std::fs;
use std::path::Path;
use tracing::{debug, info};
use tsbridge_core::{OpenApi, OutputConfig};

/// TypeScript generator for a finished document
#[derive(Debug, Clone, Default)]
pub struct Generator {
    config: OutputConfig,
}

impl Generator {
    pub fn new(config: OutputConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &OutputConfig {
        &self.config
    }

    /// Generate every file for the document.
    ///
    /// The result depends only on the document and the configuration and is
    /// sorted by path, so identical input yields identical output.
    pub fn generate(&self, document: &OpenApi) -> GeneratorResult<Vec<GeneratedFile>> {
        info!(
            schemas = document.components.schemas.len(),
            paths = document.paths.len(),
            "Generating TypeScript"
        );
        let mut files = Vec::new();

        for (name, schema) in &document.components.schemas {
            files.push(entity_module(document, name, schema)?);
            if self.config.emit_models && has_model(schema) {
                files.push(model_module(document, name, schema)?);
            }
        }

        let groups = endpoint_groups(document)?;
        for (endpoint, methods) in &groups {
            files.push(endpoint_module(
                document,
                endpoint,
                methods,
                &self.config.client_import,
            )?);
        }
        if self.config.emit_barrel && !groups.is_empty() {
            files.push(barrel_module(document, groups.keys()));
        }

        files.sort_by(|a, b| a.path.cmp(&b.path));
        if let Some(pair) = files.windows(2).find(|pair| pair[0].path == pair[1].path) {
            return Err(GeneratorError::UnsupportedSchema {
                context: pair[0].path.clone(),
                reason: "two modules map to the same file".to_string(),
            });
        }

        info!(files = files.len(), "TypeScript generation finished");
        Ok(files)
    }
}

/// Write generated files below `dir`, creating directories as needed.
///
/// Files whose content is already up to date are left untouched so that
/// downstream watchers only see real changes. Returns the number of files
/// written.
pub fn write_files(dir: &Path, files: &[GeneratedFile]) -> GeneratorResult<usize> {
    let mut written = 0;
    for file in files {
        let path = dir.join(&file.path);
        if fs::read_to_string(&path).is_ok_and(|existing| existing == file.content) {
            debug!(path = %path.display(), "Unchanged, skipping");
            continue;
        }
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|source| GeneratorError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        fs::write(&path, &file.content).map_err(|source| GeneratorError::Io {
            path: path.clone(),
            source,
        })?;
        debug!(path = %path.display(), "Wrote file");
        written += 1;
    }
    info!(written, total = files.len(), dir = %dir.display(), "Generated files written");
    Ok(written)
}
