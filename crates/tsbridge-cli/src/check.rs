//! Configuration validation

use anyhow::{Context, Result};
use std::path::Path;
use tsbridge_core::GeneratorConfig;

/// Run the check command
pub fn run(path: &Path) -> Result<()> {
    println!("Checking configuration: {}", path.display());

    let config = check(path)?;

    println!(
        "✓ Endpoint annotations: {}",
        config.parser.endpoint_annotations.join(", ")
    );
    println!("✓ Class path entries: {}", config.parser.class_path.len());
    println!("✓ Output: {}", config.generator.output_dir.display());
    println!("\nConfiguration is valid!");

    Ok(())
}

/// Load and validate a configuration file, including its class path entries
pub fn check(path: &Path) -> Result<GeneratorConfig> {
    let config = GeneratorConfig::load(path)
        .with_context(|| format!("Failed to load configuration: {}", path.display()))?;

    for entry in &config.parser.class_path {
        if !entry.exists() {
            anyhow::bail!("Class path entry does not exist: {}", entry.display());
        }
    }

    Ok(config)
}
