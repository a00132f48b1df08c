//! Plugins command - List registered plugins.

use anyhow::Result;
use clap::Args;

use super::GeneratorOptions;

#[derive(Args)]
pub struct PluginsArgs {
    #[command(flatten)]
    pub options: GeneratorOptions,
}

pub fn execute(args: PluginsArgs) -> Result<()> {
    let plugins = args.options.plugin_registry()?;

    if plugins.is_empty() {
        println!("No plugins registered. Pass --plugins <manifest> or set WERFTY_PLUGINS.");
        return Ok(());
    }

    println!("🔌 {} plugins:", plugins.len());
    for name in plugins.names() {
        println!("   - {}", name);
    }

    Ok(())
}
