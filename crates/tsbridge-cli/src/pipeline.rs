//! Shared steps of the commands

use anyhow::{Context, Result};
use std::path::Path;
use tsbridge_core::{GeneratorConfig, LogLevel, OpenApi};
use tsbridge_parser::Parser;

/// Load the configuration and start logging at its level, or at `log_level`
pub fn load_config(path: &Path, log_level: Option<&str>) -> Result<GeneratorConfig> {
    let config = GeneratorConfig::load(path)
        .with_context(|| format!("Failed to load configuration: {}", path.display()))?;

    let level: LogLevel = match log_level {
        Some(level) => level.parse().context("Invalid --log-level")?,
        None => config.logging.log_level()?,
    };
    tsbridge_logging::init_logging(level);

    Ok(config)
}

/// Run the parser over the configured class path
pub fn parse(config: &GeneratorConfig) -> Result<OpenApi> {
    let parser = Parser::new(config.parser.clone()).context("Failed to load class path")?;
    parser.execute().context("Failed to build the OpenAPI document")
}
