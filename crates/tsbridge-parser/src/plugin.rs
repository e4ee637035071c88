//! Plugin trait and pipeline
//!
//! A plugin is a transform over the shared storage. Plugins run in ascending
//! order of their effective order value (configured override or the plugin's
//! default); equal orders keep registration order. A plugin that reads
//! another plugin's output declares it in [`Plugin::requires`], and the
//! pipeline refuses to start when a requirement is missing or ordered after
//! the plugin that needs it.

use crate::endpoint::EndpointModel;
use crate::error::ParserResult;
use crate::storage::SharedStorage;
use std::sync::Arc;
use tracing::{debug, info};
use tsbridge_core::{ConfigError, ParserConfig};
use tsbridge_model::{ClassInfoModel, ClassPath};

/// Everything discovered before plugins run
#[derive(Debug, Clone)]
pub struct Scope {
    endpoints: Vec<EndpointModel>,
    entities: Vec<ClassInfoModel>,
    class_path: Arc<ClassPath>,
}

impl Scope {
    pub fn new(endpoints: Vec<EndpointModel>, entities: Vec<ClassInfoModel>, class_path: Arc<ClassPath>) -> Self {
        Self {
            endpoints,
            entities,
            class_path,
        }
    }

    pub fn endpoints(&self) -> &[EndpointModel] {
        &self.endpoints
    }

    /// Entities in discovery order
    pub fn entities(&self) -> &[ClassInfoModel] {
        &self.entities
    }

    pub fn class_path(&self) -> &Arc<ClassPath> {
        &self.class_path
    }
}

/// A transform pass over the intermediate document
///
/// # Example
///
/// ```
/// use tsbridge_parser::{ParserResult, Plugin, Scope, SharedStorage};
///
/// struct TitlePlugin;
///
/// impl Plugin for TitlePlugin {
///     fn name(&self) -> &'static str {
///         "title"
///     }
///
///     fn order(&self) -> i32 {
///         100
///     }
///
///     fn execute(&self, _scope: &Scope, mut storage: SharedStorage) -> ParserResult<SharedStorage> {
///         storage.openapi_mut().info.title = "Renamed".to_string();
///         Ok(storage)
///     }
/// }
/// ```
pub trait Plugin: Send + Sync {
    /// Name used in configuration allow/deny lists and order overrides
    fn name(&self) -> &'static str;

    /// Default position in the pipeline
    fn order(&self) -> i32;

    /// Plugins that must run before this one
    fn requires(&self) -> &'static [&'static str] {
        &[]
    }

    /// Hook run before discovery, in pipeline order
    fn prepare(&self, _class_path: &ClassPath, _storage: &mut SharedStorage) -> ParserResult<()> {
        Ok(())
    }

    fn execute(&self, scope: &Scope, storage: SharedStorage) -> ParserResult<SharedStorage>;
}

struct Entry {
    order: i32,
    plugin: Box<dyn Plugin>,
}

/// Ordered, validated plugin list
pub struct PluginPipeline {
    entries: Vec<Entry>,
}

impl PluginPipeline {
    /// Filter by the configured allow/deny lists, apply order overrides and
    /// validate requirements.
    pub fn new(plugins: Vec<Box<dyn Plugin>>, config: &ParserConfig) -> ParserResult<Self> {
        let known: Vec<&'static str> = plugins.iter().map(|p| p.name()).collect();
        let configured = config
            .plugins
            .iter()
            .chain(&config.disabled_plugins)
            .chain(config.plugin_order.keys());
        for name in configured {
            if !known.contains(&name.as_str()) {
                return Err(ConfigError::UnknownPlugin(name.clone()).into());
            }
        }

        let mut entries: Vec<Entry> = plugins
            .into_iter()
            .filter(|p| config.is_plugin_enabled(p.name()))
            .map(|plugin| Entry {
                order: config.order_of(plugin.name(), plugin.order()),
                plugin,
            })
            .collect();
        // Stable: equal orders keep registration order
        entries.sort_by_key(|e| e.order);

        for (position, entry) in entries.iter().enumerate() {
            for required in entry.plugin.requires() {
                let satisfied = entries[..position]
                    .iter()
                    .any(|e| e.plugin.name() == *required);
                if !satisfied {
                    return Err(ConfigError::PluginOrder {
                        plugin: entry.plugin.name().to_string(),
                        requires: required.to_string(),
                    }
                    .into());
                }
            }
        }
        Ok(Self { entries })
    }

    /// Plugin names in execution order
    pub fn names(&self) -> Vec<&'static str> {
        self.entries.iter().map(|e| e.plugin.name()).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn prepare(&self, class_path: &ClassPath, storage: &mut SharedStorage) -> ParserResult<()> {
        for entry in &self.entries {
            debug!(plugin = entry.plugin.name(), "Preparing plugin");
            entry.plugin.prepare(class_path, storage)?;
        }
        Ok(())
    }

    /// Run every plugin in order, threading the storage through
    pub fn execute(&self, scope: &Scope, storage: SharedStorage) -> ParserResult<SharedStorage> {
        let mut storage = storage;
        for entry in &self.entries {
            info!(plugin = entry.plugin.name(), order = entry.order, "Running plugin");
            storage = entry.plugin.execute(scope, storage)?;
        }
        Ok(storage)
    }
}

impl std::fmt::Debug for PluginPipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list()
            .entries(self.entries.iter().map(|e| (e.plugin.name(), e.order)))
            .finish()
    }
}
