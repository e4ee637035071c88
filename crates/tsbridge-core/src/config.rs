//! Run configuration
//!
//! A run is configured from a TOML file:
//!
//! ```toml
//! [parser]
//! class_path = ["build/classes"]
//! endpoint_annotations = ["com.vaadin.hilla.Endpoint"]
//! endpoint_exposed_annotations = ["com.vaadin.hilla.EndpointExposed"]
//! disabled_plugins = ["subtypes"]
//!
//! [parser.order]
//! nonnull = 15
//!
//! [parser.nonnull]
//! annotations = ["org.jspecify.annotations.NonNull"]
//!
//! [generator]
//! output_dir = "frontend/generated"
//!
//! [logging]
//! level = "debug"
//! ```

use crate::LogLevel;
use crate::error::{ConfigError, ConfigResult};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Complete configuration for a generation run
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GeneratorConfig {
    #[serde(default)]
    pub parser: ParserConfig,

    #[serde(default)]
    pub generator: OutputConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

impl GeneratorConfig {
    /// Parse and validate configuration from TOML text
    pub fn from_toml_str(text: &str) -> ConfigResult<Self> {
        let config: GeneratorConfig = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a file.
    ///
    /// Relative `class_path` entries and the output directory are resolved
    /// against the directory holding the file.
    pub fn load(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let mut config = Self::from_toml_str(&text)?;
        if let Some(base) = path.parent() {
            config.rebase(base);
        }
        Ok(config)
    }

    /// Check every section
    pub fn validate(&self) -> ConfigResult<()> {
        self.parser.validate()?;
        self.logging.log_level()?;
        Ok(())
    }

    fn rebase(&mut self, base: &Path) {
        for entry in &mut self.parser.class_path {
            if entry.is_relative() {
                *entry = base.join(&*entry);
            }
        }
        if self.generator.output_dir.is_relative() {
            self.generator.output_dir = base.join(&self.generator.output_dir);
        }
    }
}

/// What the backbone does with a method it cannot model
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnsupportedPolicy {
    /// Log a warning and omit the method
    #[default]
    Skip,
    /// Abort the run
    Fail,
}

/// Settings for the nonnull plugin
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NonnullConfig {
    /// Fully-qualified names of annotations that mark a member non-null
    #[serde(default)]
    pub annotations: Vec<String>,
}

/// Settings for the backbone plugin
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BackboneConfig {
    #[serde(default)]
    pub unsupported: UnsupportedPolicy,

    /// Accessor prefixes used for property discovery
    #[serde(default = "default_accessor_prefixes")]
    pub prefixes: Vec<String>,
}

fn default_accessor_prefixes() -> Vec<String> {
    vec!["get".to_string()]
}

impl Default for BackboneConfig {
    fn default() -> Self {
        Self {
            unsupported: UnsupportedPolicy::default(),
            prefixes: default_accessor_prefixes(),
        }
    }
}

/// Parser configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParserConfig {
    /// Directories or files holding scanned class descriptors
    #[serde(default)]
    pub class_path: Vec<PathBuf>,

    /// Annotations marking endpoint classes
    #[serde(default)]
    pub endpoint_annotations: Vec<String>,

    /// Annotations that expose inherited endpoint methods
    #[serde(default)]
    pub endpoint_exposed_annotations: Vec<String>,

    /// Allow list of plugins; empty means every built-in plugin
    #[serde(default)]
    pub plugins: Vec<String>,

    /// Deny list applied after the allow list
    #[serde(default)]
    pub disabled_plugins: Vec<String>,

    /// Per-plugin order overrides
    #[serde(default, rename = "order")]
    pub plugin_order: BTreeMap<String, i32>,

    #[serde(default)]
    pub nonnull: NonnullConfig,

    #[serde(default)]
    pub backbone: BackboneConfig,

    /// `info.title` of the produced document
    #[serde(default = "default_title")]
    pub title: String,

    /// `info.version` of the produced document
    #[serde(default = "default_version")]
    pub version: String,
}

fn default_title() -> String {
    "Tsbridge Application".to_string()
}

fn default_version() -> String {
    "1.0.0".to_string()
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            class_path: Vec::new(),
            endpoint_annotations: Vec::new(),
            endpoint_exposed_annotations: Vec::new(),
            plugins: Vec::new(),
            disabled_plugins: Vec::new(),
            plugin_order: BTreeMap::new(),
            nonnull: NonnullConfig::default(),
            backbone: BackboneConfig::default(),
            title: default_title(),
            version: default_version(),
        }
    }
}

impl ParserConfig {
    pub fn builder() -> ParserConfigBuilder {
        ParserConfigBuilder::default()
    }

    /// Fail fast on missing required settings
    pub fn validate(&self) -> ConfigResult<()> {
        if self.endpoint_annotations.iter().all(|a| a.trim().is_empty()) {
            return Err(ConfigError::MissingEndpointAnnotation);
        }
        if self.backbone.prefixes.iter().any(|p| p.is_empty()) {
            return Err(ConfigError::InvalidValue {
                field: "parser.backbone.prefixes".to_string(),
                message: "accessor prefix must not be empty".to_string(),
            });
        }
        Ok(())
    }

    /// Whether a plugin passes the allow and deny lists
    pub fn is_plugin_enabled(&self, name: &str) -> bool {
        let allowed = self.plugins.is_empty() || self.plugins.iter().any(|p| p == name);
        allowed && !self.disabled_plugins.iter().any(|p| p == name)
    }

    /// Configured order for a plugin, falling back to its own default
    pub fn order_of(&self, name: &str, default: i32) -> i32 {
        self.plugin_order.get(name).copied().unwrap_or(default)
    }
}

/// Builder for [`ParserConfig`]
#[derive(Debug, Clone, Default)]
pub struct ParserConfigBuilder {
    config: ParserConfig,
}

impl ParserConfigBuilder {
    pub fn class_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.class_path.push(path.into());
        self
    }

    pub fn endpoint_annotation(mut self, name: impl Into<String>) -> Self {
        self.config.endpoint_annotations.push(name.into());
        self
    }

    pub fn endpoint_exposed_annotation(mut self, name: impl Into<String>) -> Self {
        self.config.endpoint_exposed_annotations.push(name.into());
        self
    }

    pub fn plugin(mut self, name: impl Into<String>) -> Self {
        self.config.plugins.push(name.into());
        self
    }

    pub fn disable_plugin(mut self, name: impl Into<String>) -> Self {
        self.config.disabled_plugins.push(name.into());
        self
    }

    pub fn plugin_order(mut self, name: impl Into<String>, order: i32) -> Self {
        self.config.plugin_order.insert(name.into(), order);
        self
    }

    pub fn nonnull_annotation(mut self, name: impl Into<String>) -> Self {
        self.config.nonnull.annotations.push(name.into());
        self
    }

    pub fn unsupported(mut self, policy: UnsupportedPolicy) -> Self {
        self.config.backbone.unsupported = policy;
        self
    }

    pub fn accessor_prefixes(mut self, prefixes: Vec<String>) -> Self {
        self.config.backbone.prefixes = prefixes;
        self
    }

    /// Validate and return the configuration
    pub fn finish(self) -> ConfigResult<ParserConfig> {
        self.config.validate()?;
        Ok(self.config)
    }
}

/// Generator output settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputConfig {
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,

    /// Module specifier of the default client instance
    #[serde(default = "default_client_import")]
    pub client_import: String,

    /// Emit form/validation models next to entities
    #[serde(default = "default_true")]
    pub emit_models: bool,

    /// Emit the `endpoints.ts` barrel
    #[serde(default = "default_true")]
    pub emit_barrel: bool,
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("frontend/generated")
}

fn default_client_import() -> String {
    "./connect-client.default.js".to_string()
}

fn default_true() -> bool {
    true
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            output_dir: default_output_dir(),
            client_import: default_client_import(),
            emit_models: true,
            emit_barrel: true,
        }
    }
}

/// Logging settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl LoggingConfig {
    pub fn log_level(&self) -> ConfigResult<LogLevel> {
        self.level.parse()
    }
}

#[cfg(test)]
#[path = "config/config_tests.rs"]
mod config_tests;
