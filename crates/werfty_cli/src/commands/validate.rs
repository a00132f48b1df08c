//! Validate command - Check a document against its schema.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use tracing::info;

use super::{resolve_input, GeneratorOptions};

#[derive(Args)]
pub struct ValidateArgs {
    /// Path to a YAML/JSON document
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// Name of an example document in the examples directory
    #[arg(short = 'e', long)]
    pub from_example: Option<String>,

    /// Directory holding the example documents
    #[arg(long, default_value = "examples")]
    pub examples_dir: PathBuf,

    #[command(flatten)]
    pub options: GeneratorOptions,
}

pub fn execute(args: ValidateArgs) -> Result<()> {
    let input = resolve_input(args.input, args.from_example, &args.examples_dir)?;
    let orchestrator = args.options.orchestrator()?;

    info!("Validating {}", input.display());
    println!("📋 Validating {}...", input.display());

    if let Err(e) = orchestrator.validate(&input, &args.options.provider) {
        if let Some(missing) = e.missing_fields() {
            println!("   ❌ Missing required fields:");
            for field in missing {
                println!("      - {}", field);
            }
        }
        return Err(e.into());
    }

    println!("   ✅ Validation passed");
    Ok(())
}
