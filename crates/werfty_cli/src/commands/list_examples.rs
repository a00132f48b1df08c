//! List examples command.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

#[derive(Args)]
pub struct ListExamplesArgs {
    /// Directory holding the example documents
    #[arg(default_value = "examples")]
    pub dir: PathBuf,
}

pub fn execute(args: ListExamplesArgs) -> Result<()> {
    let documents = werfty_gen::discover_documents(&args.dir)
        .with_context(|| format!("Failed to read {}", args.dir.display()))?;

    println!("Available examples:");
    for path in documents {
        if let Some(name) = path.file_name() {
            println!("- {}", name.to_string_lossy());
        }
    }

    Ok(())
}
