//! CLI command definitions.
//!
//! Every subcommand that touches the generator shares [`GeneratorOptions`],
//! which builds the orchestrator once from the provider, schema overlay and
//! plugin manifest flags.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use tracing::debug;
use werfty_gen::{Orchestrator, PluginRegistry, SchemaRegistry};

pub mod generate;
pub mod list_examples;
pub mod plugins;
pub mod schemas;
pub mod validate;

/// werfty - Terraform generation from declarative resource descriptions
#[derive(Parser)]
#[command(name = "werfty")]
#[command(version, about = "werfty - Terraform generation from declarative resource descriptions")]
#[command(long_about = r#"
werfty turns YAML or JSON resource descriptions into Terraform for Azure,
AWS and GCP. Each document holds a `properties` map; the resource type is
detected from its fields, the file name or an explicit `resourceType`.

COMMANDS:
  generate       → Generate Terraform from a document or a directory
  validate       → Check a document against its resource schema
  schemas        → Show required fields per provider and resource type
  list-examples  → List example documents
  plugins        → List plugins loaded from the manifest

EXIT CODES:
  0 - Success
  1 - General error
  2 - Invalid arguments or unsupported provider
  3 - Validation or detection failure
  4 - Plugin error
  5 - I/O error
"#)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress non-essential output
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Generate Terraform from a YAML/JSON document
    Generate(generate::GenerateArgs),

    /// Validate a document without writing anything
    Validate(validate::ValidateArgs),

    /// Show the required-field schemas
    Schemas(schemas::SchemasArgs),

    /// List example YAML/JSON documents
    #[command(name = "list-examples")]
    ListExamples(list_examples::ListExamplesArgs),

    /// List plugins declared in the plugin manifest
    Plugins(plugins::PluginsArgs),
}

/// Options shared by the generator commands.
#[derive(Args, Debug, Clone)]
pub struct GeneratorOptions {
    /// Cloud provider (azure, aws, gcp)
    #[arg(short, long, env = "WERFTY_PROVIDER", default_value = "azure")]
    pub provider: String,

    /// Schema overlay merged into the builtin schemas
    #[arg(long, env = "WERFTY_SCHEMAS")]
    pub schemas: Option<PathBuf>,

    /// Plugin manifest with template plugins
    #[arg(long, env = "WERFTY_PLUGINS")]
    pub plugins: Option<PathBuf>,
}

impl GeneratorOptions {
    pub fn schema_registry(&self) -> Result<SchemaRegistry> {
        let mut schemas = SchemaRegistry::builtin();
        if let Some(path) = &self.schemas {
            schemas
                .load_overlay(path)
                .with_context(|| format!("Failed to load schema overlay {}", path.display()))?;
        }
        Ok(schemas)
    }

    pub fn plugin_registry(&self) -> Result<PluginRegistry> {
        let mut plugins = PluginRegistry::new();
        if let Some(path) = &self.plugins {
            let count = plugins
                .load_manifest(path)
                .with_context(|| format!("Failed to load plugin manifest {}", path.display()))?;
            debug!("{} plugins loaded", count);
        }
        Ok(plugins)
    }

    pub fn orchestrator(&self) -> Result<Orchestrator> {
        Ok(Orchestrator::new()
            .with_schemas(self.schema_registry()?)
            .with_plugins(self.plugin_registry()?))
    }
}

/// Resolve `--input` or `--from-example` to a document path.
pub fn resolve_input(input: Option<PathBuf>, example: Option<String>, examples_dir: &Path) -> Result<PathBuf> {
    match (input, example) {
        (Some(input), None) => Ok(input),
        (None, Some(example)) => {
            let path = examples_dir.join(&example);
            if !path.exists() {
                anyhow::bail!("Example not found: {}", path.display());
            }
            Ok(path)
        }
        _ => anyhow::bail!("Exactly one of --input or --from-example is required"),
    }
}
