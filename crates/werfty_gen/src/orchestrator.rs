//! Top-level generation entry points.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::detect::DetectionHint;
use crate::dispatch::{dispatcher_for, GeneratedOutput};
use crate::error::{GenError, GenResult};
use crate::loader::{discover_documents, Document};
use crate::plugin::PluginRegistry;
use crate::property::PropertyTree;
use crate::provider::CloudProvider;
use crate::schema::SchemaRegistry;

/// Loads documents, picks a dispatcher or plugin and writes the result.
///
/// The schema and plugin registries are fixed when the orchestrator is
/// built; generation only reads them.
#[derive(Debug, Clone)]
pub struct Orchestrator {
    schemas: Arc<SchemaRegistry>,
    plugins: Arc<PluginRegistry>,
}

impl Default for Orchestrator {
    fn default() -> Self {
        Self::new()
    }
}

impl Orchestrator {
    /// Orchestrator with the builtin schemas and no plugins.
    pub fn new() -> Self {
        Self {
            schemas: Arc::new(SchemaRegistry::builtin()),
            plugins: Arc::new(PluginRegistry::new()),
        }
    }

    pub fn with_schemas(mut self, schemas: impl Into<Arc<SchemaRegistry>>) -> Self {
        self.schemas = schemas.into();
        self
    }

    pub fn with_plugins(mut self, plugins: impl Into<Arc<PluginRegistry>>) -> Self {
        self.plugins = plugins.into();
        self
    }

    pub fn schemas(&self) -> &SchemaRegistry {
        &self.schemas
    }

    pub fn plugins(&self) -> &PluginRegistry {
        &self.plugins
    }

    /// Generate the artifact for `input` without writing it.
    pub fn render(&self, input: impl AsRef<Path>, provider: &str) -> GenResult<GeneratedOutput> {
        let provider = parse_provider(provider)?;
        let document = Document::load(input)?;
        self.render_document(&document, provider)
    }

    /// Generate the artifact for an already loaded document.
    pub fn render_document(&self, document: &Document, provider: CloudProvider) -> GenResult<GeneratedOutput> {
        let properties = document.properties()?;
        let dispatcher = dispatcher_for(provider);

        if let Some(plugin) = self.plugin_for(document) {
            self.validate_plugin_input(provider, plugin, &properties)?;
            let body = self.plugins.generate_with_plugin(plugin, &properties)?;
            return Ok(GeneratedOutput::new(dispatcher.header(), body));
        }

        let source = document.source_hint();
        let hint = DetectionHint::new(&source).with_resource_type(document.resource_type());
        dispatcher.generate(&self.schemas, &properties, &hint)
    }

    /// Generate `input` and write the result to `output`, replacing any
    /// existing file. Nothing is written when generation fails.
    pub fn generate(&self, input: impl AsRef<Path>, output: impl AsRef<Path>, provider: &str) -> GenResult<()> {
        let input = input.as_ref();
        let output = output.as_ref();

        let generated = self.render(input, provider)?;
        write_output(output, &generated.render())?;

        info!("Terraform code written to {:?}", output);
        Ok(())
    }

    /// Check `input` against the schema of its detected kind. Never writes.
    pub fn validate(&self, input: impl AsRef<Path>, provider: &str) -> GenResult<()> {
        let provider = parse_provider(provider)?;
        let document = Document::load(input)?;
        let properties = document.properties()?;

        if let Some(plugin) = self.plugin_for(&document) {
            return self.validate_plugin_input(provider, plugin, &properties);
        }

        let dispatcher = dispatcher_for(provider);
        let source = document.source_hint();
        let hint = DetectionHint::new(&source).with_resource_type(document.resource_type());
        let kind = dispatcher.detect_resource_type(&properties, &hint)?;
        dispatcher.validate_resource(&self.schemas, kind, &properties)?;

        info!("{} validated as {}/{}", source, provider, kind);
        Ok(())
    }

    /// Generate one `.tf` file per document found directly in `input_dir`.
    ///
    /// Every document is attempted; per-file outcomes are returned in path
    /// order. Documents sharing a file stem (`gke.json`, `gke.yaml`) would
    /// write the same output, so none of them is generated and each reports
    /// `OutputCollision`.
    pub fn generate_dir(
        &self,
        input_dir: impl AsRef<Path>,
        output_dir: impl AsRef<Path>,
        provider: &str,
    ) -> GenResult<Vec<BatchOutcome>> {
        let output_dir = output_dir.as_ref();
        parse_provider(provider)?;

        fs::create_dir_all(output_dir).map_err(|source| GenError::Write {
            path: output_dir.to_path_buf(),
            source,
        })?;

        let inputs = discover_documents(input_dir)?;
        let mut claims: HashMap<PathBuf, Vec<PathBuf>> = HashMap::new();
        for input in &inputs {
            claims
                .entry(output_path_for(input, output_dir))
                .or_default()
                .push(input.clone());
        }

        let outcomes = inputs
            .into_iter()
            .map(|input| {
                let output = output_path_for(&input, output_dir);
                let result = match claims.get(&output) {
                    Some(claimants) if claimants.len() > 1 => {
                        warn!("Skipping {:?}: {:?} is claimed by {} inputs", input, output, claimants.len());
                        Err(GenError::OutputCollision {
                            path: output.clone(),
                            inputs: claimants.clone(),
                        })
                    }
                    _ => self.generate(&input, &output, provider),
                };
                BatchOutcome { input, output, result }
            })
            .collect();

        Ok(outcomes)
    }

    /// Name of the registered plugin this document asks for, if any.
    fn plugin_for<'a>(&self, document: &'a Document) -> Option<&'a str> {
        document
            .resource_type()
            .filter(|name| self.plugins.contains(name))
    }

    /// Plugins own their inputs; a schema is enforced only when one was
    /// registered under the plugin name.
    fn validate_plugin_input(&self, provider: CloudProvider, plugin: &str, properties: &PropertyTree) -> GenResult<()> {
        if self.schemas.contains(provider.as_str(), plugin) {
            self.schemas.validate(provider.as_str(), plugin, properties)
        } else {
            debug!("No schema registered for plugin {}/{}", provider, plugin);
            Ok(())
        }
    }
}

/// Result of one document in a directory run.
#[derive(Debug)]
pub struct BatchOutcome {
    pub input: PathBuf,
    pub output: PathBuf,
    pub result: GenResult<()>,
}

/// Generate with the builtin schemas and no plugins.
pub fn generate(input: impl AsRef<Path>, output: impl AsRef<Path>, provider: &str) -> GenResult<()> {
    Orchestrator::new().generate(input, output, provider)
}

/// Validate with the builtin schemas and no plugins.
pub fn validate(input: impl AsRef<Path>, provider: &str) -> GenResult<()> {
    Orchestrator::new().validate(input, provider)
}

fn parse_provider(name: &str) -> GenResult<CloudProvider> {
    CloudProvider::from_str(name).ok_or_else(|| GenError::UnsupportedProvider(name.to_string()))
}

fn write_output(path: &Path, content: &str) -> GenResult<()> {
    fs::write(path, content).map_err(|source| GenError::Write {
        path: path.to_path_buf(),
        source,
    })
}

fn output_path_for(input: &Path, output_dir: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "main".to_string());
    output_dir.join(format!("{}.tf", stem))
}
