//! Generate command implementation

use crate::pipeline;
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tracing::info;
use tsbridge_core::GeneratorConfig;
use tsbridge_generator::{Generator, write_files};

/// Outcome of a generation run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Summary {
    pub output_dir: PathBuf,
    pub files: usize,
    pub written: usize,
}

/// Run the generate command
pub fn run(config: &GeneratorConfig, output: Option<PathBuf>) -> Result<()> {
    let output_dir = output.unwrap_or_else(|| config.generator.output_dir.clone());

    println!("Generating TypeScript into: {}", output_dir.display());

    let summary = generate(config, &output_dir)?;

    println!("✓ Files: {}", summary.files);
    println!("✓ Written: {}", summary.written);
    println!("\nGeneration complete!");

    Ok(())
}

/// Parse, generate and write the modules below `output_dir`
pub fn generate(config: &GeneratorConfig, output_dir: &Path) -> Result<Summary> {
    let openapi = pipeline::parse(config)?;

    let files = Generator::new(config.generator.clone())
        .generate(&openapi)
        .context("Failed to generate TypeScript")?;
    let written = write_files(output_dir, &files)
        .with_context(|| format!("Failed to write {}", output_dir.display()))?;
    info!(files = files.len(), written, "Generation finished");

    Ok(Summary {
        output_dir: output_dir.to_path_buf(),
        files: files.len(),
        written,
    })
}
