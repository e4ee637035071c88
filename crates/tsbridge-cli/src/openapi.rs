//! OpenAPI command implementation

use crate::pipeline;
use anyhow::{Context, Result};
use std::path::PathBuf;
use tsbridge_core::{GeneratorConfig, OpenApi};

/// Run the openapi command
pub fn run(config: &GeneratorConfig, output: Option<PathBuf>) -> Result<()> {
    let openapi = pipeline::parse(config)?;
    let json = render(&openapi)?;

    match output {
        Some(path) => {
            std::fs::write(&path, json)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            println!("✓ OpenAPI document written to: {}", path.display());
        }
        None => println!("{json}"),
    }

    Ok(())
}

/// The document as pretty-printed JSON
pub fn render(openapi: &OpenApi) -> Result<String> {
    serde_json::to_string_pretty(openapi).context("Failed to serialize the OpenAPI document")
}

#[cfg(test)]
#[path = "openapi/openapi_tests.rs"]
mod openapi_tests;
