//! Plugin registry for resource kinds outside the builtin dispatchers.
//!
//! The registry is an ordinary value: build it at startup, register plugins
//! with `&mut` access, then share it behind an `Arc` for lookups. Once shared
//! it is never mutated, so concurrent lookups need no locking.

use std::collections::{BTreeMap, HashMap};
use std::path::Path;
use std::sync::Arc;

use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, warn};

use crate::error::{GenError, GenResult};
use crate::loader;
use crate::property::{scalar_text, PropertyTree};

/// A generator for one externally defined resource kind.
///
/// Plugins only produce the resource body; the caller supplies the provider
/// header.
pub trait ResourcePlugin: Send + Sync {
    fn generate(&self, properties: &PropertyTree) -> String;
}

impl<F> ResourcePlugin for F
where
    F: Fn(&PropertyTree) -> String + Send + Sync,
{
    fn generate(&self, properties: &PropertyTree) -> String {
        self(properties)
    }
}

/// Name-keyed table of plugins.
#[derive(Default)]
pub struct PluginRegistry {
    plugins: HashMap<String, Arc<dyn ResourcePlugin>>,
}

impl PluginRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self {
            plugins: HashMap::new(),
        }
    }

    /// Register a plugin under `name`.
    ///
    /// A later registration under the same name replaces the earlier one; the
    /// replaced plugin is returned.
    pub fn register(
        &mut self,
        name: impl Into<String>,
        plugin: Arc<dyn ResourcePlugin>,
    ) -> Option<Arc<dyn ResourcePlugin>> {
        let name = name.into();
        debug!("Registering plugin: {}", name);
        let previous = self.plugins.insert(name.clone(), plugin);
        if previous.is_some() {
            warn!("Plugin {} replaced an earlier registration", name);
        }
        previous
    }

    /// Register a plugin, rejecting names that are already taken.
    pub fn try_register(&mut self, name: impl Into<String>, plugin: Arc<dyn ResourcePlugin>) -> GenResult<()> {
        let name = name.into();
        if self.plugins.contains_key(&name) {
            return Err(GenError::DuplicatePlugin(name));
        }
        self.register(name, plugin);
        Ok(())
    }

    /// Get a plugin by name.
    pub fn lookup(&self, name: &str) -> Option<Arc<dyn ResourcePlugin>> {
        self.plugins.get(name).cloned()
    }

    /// Check if a plugin is registered.
    pub fn contains(&self, name: &str) -> bool {
        self.plugins.contains_key(name)
    }

    /// Generate a body with the plugin registered under `name`.
    pub fn generate_with_plugin(&self, name: &str, properties: &PropertyTree) -> GenResult<String> {
        let plugin = self
            .lookup(name)
            .ok_or_else(|| GenError::NoPlugin(name.to_string()))?;
        debug!("Generating with plugin: {}", name);
        Ok(plugin.generate(properties))
    }

    /// Registered plugin names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.plugins.keys().map(|s| s.as_str()).collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.plugins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.plugins.is_empty()
    }

    /// Register every template plugin declared in a manifest file.
    ///
    /// Manifest entries must have unique names, both among themselves and
    /// against plugins registered before.
    pub fn load_manifest(&mut self, path: impl AsRef<Path>) -> GenResult<usize> {
        let path = path.as_ref();
        let manifest: PluginManifest = loader::load_file(path)?;

        let mut count = 0;
        for definition in manifest.plugins {
            let name = definition.name.clone();
            let plugin = TemplatePlugin::from_definition(definition).map_err(|message| {
                GenError::PluginManifest {
                    path: path.to_path_buf(),
                    message,
                }
            })?;
            self.try_register(name, Arc::new(plugin))?;
            count += 1;
        }

        debug!("Loaded {} plugins from {:?}", count, path);
        Ok(count)
    }
}

impl std::fmt::Debug for PluginRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PluginRegistry")
            .field("plugins", &self.names())
            .finish()
    }
}

/// Plugin manifest file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PluginManifest {
    #[serde(default)]
    pub plugins: Vec<PluginDefinition>,
}

/// Declarative definition of a template plugin.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PluginDefinition {
    pub name: String,
    /// Body text with `{{field}}` placeholders.
    pub template: String,
    /// Values used when a placeholder has no matching property.
    #[serde(default)]
    pub defaults: BTreeMap<String, String>,
}

/// Plugin rendering a text template from the property tree.
///
/// `{{field}}` is replaced by the property's scalar text, then by the
/// plugin default; unresolved placeholders are left in place so that a
/// missing value is visible in the output.
pub struct TemplatePlugin {
    template: String,
    defaults: BTreeMap<String, String>,
    variable_pattern: Regex,
}

impl TemplatePlugin {
    pub fn new(template: impl Into<String>) -> Self {
        Self {
            template: template.into(),
            defaults: BTreeMap::new(),
            variable_pattern: placeholder_pattern(),
        }
    }

    pub fn with_default(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.defaults.insert(key.into(), value.into());
        self
    }

    fn from_definition(definition: PluginDefinition) -> Result<Self, String> {
        if definition.name.trim().is_empty() {
            return Err("plugin name cannot be empty".to_string());
        }
        if definition.template.trim().is_empty() {
            return Err(format!("plugin '{}' has an empty template", definition.name));
        }
        Ok(Self {
            template: definition.template,
            defaults: definition.defaults,
            variable_pattern: placeholder_pattern(),
        })
    }

    /// Render the template against `properties`.
    pub fn render(&self, properties: &PropertyTree) -> String {
        self.variable_pattern
            .replace_all(&self.template, |caps: &Captures| {
                let var_name = &caps[1];
                properties
                    .get(var_name)
                    .and_then(render_value)
                    .or_else(|| self.defaults.get(var_name).cloned())
                    .unwrap_or_else(|| format!("{{{{{}}}}}", var_name))
            })
            .to_string()
    }
}

impl ResourcePlugin for TemplatePlugin {
    fn generate(&self, properties: &PropertyTree) -> String {
        self.render(properties)
    }
}

fn placeholder_pattern() -> Regex {
    Regex::new(r"\{\{\s*([a-zA-Z_][a-zA-Z0-9_]*)\s*\}\}").expect("placeholder pattern is a valid regex")
}

fn render_value(value: &Value) -> Option<String> {
    match value {
        Value::Object(_) | Value::Array(_) => Some(value.to_string()),
        other => scalar_text(other),
    }
}
