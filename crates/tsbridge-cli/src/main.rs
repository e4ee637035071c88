//! tsbridge CLI - TypeScript client generator
//!
//! Commands:
//! - `tsbridge generate` - Generate TypeScript modules into the output directory
//! - `tsbridge openapi` - Write the intermediate document as JSON
//! - `tsbridge check` - Validate a tsbridge.toml configuration

use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod check;
mod generate;
mod openapi;
mod pipeline;

#[cfg(test)]
mod test_fixtures;

#[derive(Parser)]
#[command(name = "tsbridge")]
#[command(author, version, about = "TypeScript client generator for annotated JVM endpoints", long_about = None)]
struct Cli {
    /// Override the configured log level (trace, debug, info, warn, error, off)
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate TypeScript modules
    Generate {
        /// Path to tsbridge.toml
        #[arg(short, long, default_value = "tsbridge.toml")]
        config: PathBuf,

        /// Output directory (default: generator.output_dir)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Write the intermediate OpenAPI document as pretty JSON
    Openapi {
        /// Path to tsbridge.toml
        #[arg(short, long, default_value = "tsbridge.toml")]
        config: PathBuf,

        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Validate a tsbridge.toml configuration
    Check {
        /// Path to tsbridge.toml
        #[arg(short, long, default_value = "tsbridge.toml")]
        config: PathBuf,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Generate { config, output } => {
            let config = pipeline::load_config(&config, cli.log_level.as_deref())?;
            generate::run(&config, output)?;
        }
        Commands::Openapi { config, output } => {
            let config = pipeline::load_config(&config, cli.log_level.as_deref())?;
            openapi::run(&config, output)?;
        }
        Commands::Check { config } => {
            check::run(&config)?;
        }
    }

    Ok(())
}
