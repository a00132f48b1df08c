//! Generate command - Produce Terraform from documents.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use tracing::info;

use super::{resolve_input, GeneratorOptions};

#[derive(Args)]
pub struct GenerateArgs {
    /// Path to a YAML/JSON document, or a directory of documents
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// Name of an example document in the examples directory
    #[arg(short = 'e', long)]
    pub from_example: Option<String>,

    /// Directory holding the example documents
    #[arg(long, default_value = "examples")]
    pub examples_dir: PathBuf,

    /// Output Terraform file, or output directory for a directory input
    #[arg(short, long)]
    pub output: PathBuf,

    #[command(flatten)]
    pub options: GeneratorOptions,
}

pub fn execute(args: GenerateArgs) -> Result<()> {
    let input = resolve_input(args.input, args.from_example, &args.examples_dir)?;
    let orchestrator = args.options.orchestrator()?;
    let provider = args.options.provider.as_str();

    if input.is_dir() {
        info!("Generating {} Terraform for every document in {}", provider, input.display());
        let outcomes = orchestrator.generate_dir(&input, &args.output, provider)?;

        let mut failed = 0;
        for outcome in &outcomes {
            match &outcome.result {
                Ok(()) => println!(
                    "   ✅ {} → {}",
                    outcome.input.display(),
                    outcome.output.display()
                ),
                Err(e) => {
                    failed += 1;
                    println!("   ❌ {}: {}", outcome.input.display(), e);
                }
            }
        }

        println!();
        if failed > 0 {
            anyhow::bail!("{} of {} documents failed", failed, outcomes.len());
        }
        println!("✅ Generated {} Terraform files in {}", outcomes.len(), args.output.display());
        return Ok(());
    }

    info!("Generating {} Terraform from {}", provider, input.display());
    orchestrator
        .generate(&input, &args.output, provider)
        .with_context(|| format!("Generation failed for {}", input.display()))?;

    println!("✅ Terraform written to {}", args.output.display());
    Ok(())
}
