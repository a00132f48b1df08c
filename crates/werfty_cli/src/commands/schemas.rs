//! Schemas command - Show required fields.

use anyhow::Result;
use clap::Args;

use super::GeneratorOptions;

#[derive(Args)]
pub struct SchemasArgs {
    /// Show every provider instead of only `--provider`
    #[arg(long)]
    pub all: bool,

    #[command(flatten)]
    pub options: GeneratorOptions,
}

pub fn execute(args: SchemasArgs) -> Result<()> {
    let schemas = args.options.schema_registry()?;

    let providers = if args.all {
        schemas.providers()
    } else {
        vec![args.options.provider.as_str()]
    };

    for provider in providers {
        let kinds = schemas.kinds(provider);
        if kinds.is_empty() {
            anyhow::bail!(werfty_gen::GenError::UnknownProvider(provider.to_string()));
        }

        println!("📦 {}", provider);
        for kind in kinds {
            let fields = schemas.required_fields(provider, kind)?;
            println!("   {:<20} {}", kind, fields.join(", "));
        }
    }

    Ok(())
}
