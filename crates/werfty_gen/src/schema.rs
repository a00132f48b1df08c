//! Declarative schema registry of required properties.
//!
//! The registry is a plain table keyed by provider and resource kind. It is
//! seeded from [`SchemaRegistry::builtin`] and may be extended at startup,
//! either programmatically through [`SchemaRegistry::register_schema`] or from
//! an overlay file shaped like:
//!
//! ```yaml
//! azure:
//!   aks: [name, location, resourceGroup, nodeCount]
//! hetzner:
//!   objectstorage: [name, region]
//! ```

use std::collections::BTreeMap;
use std::path::Path;

use tracing::debug;

use crate::error::{GenError, GenResult};
use crate::loader;
use crate::property::PropertyTree;
use crate::provider::{CloudProvider, ResourceKind};

/// provider → kind → required fields
pub type SchemaTable = BTreeMap<String, BTreeMap<String, Vec<String>>>;

/// Registry of required fields per (provider, resource kind).
#[derive(Debug, Clone, Default)]
pub struct SchemaRegistry {
    schemas: SchemaTable,
}

impl SchemaRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            schemas: BTreeMap::new(),
        }
    }

    /// Registry seeded with every builtin resource kind.
    pub fn builtin() -> Self {
        let mut registry = Self::new();
        for kind in ResourceKind::all() {
            registry.register_schema(
                kind.provider().as_str(),
                kind.as_str(),
                builtin_required_fields(kind).iter().copied(),
            );
        }
        registry
    }

    /// Register (or replace) the required fields of a resource kind.
    pub fn register_schema<I, S>(&mut self, provider: &str, kind: &str, required: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let required: Vec<String> = required.into_iter().map(Into::into).collect();
        debug!("Registering schema {}/{}: {:?}", provider, kind, required);
        self.schemas
            .entry(provider.to_string())
            .or_default()
            .insert(kind.to_string(), required);
    }

    /// Merge every entry of `table` into the registry.
    pub fn extend(&mut self, table: SchemaTable) {
        for (provider, kinds) in table {
            for (kind, required) in kinds {
                self.register_schema(&provider, &kind, required);
            }
        }
    }

    /// Merge an overlay file into the registry.
    pub fn load_overlay(&mut self, path: impl AsRef<Path>) -> GenResult<()> {
        let path = path.as_ref();
        let table: SchemaTable = loader::load_file(path)?;
        debug!("Loaded schema overlay from {:?}", path);
        self.extend(table);
        Ok(())
    }

    /// Required fields for a resource kind.
    pub fn required_fields(&self, provider: &str, kind: &str) -> GenResult<&[String]> {
        let kinds = self
            .schemas
            .get(provider)
            .ok_or_else(|| GenError::UnknownProvider(provider.to_string()))?;
        kinds
            .get(kind)
            .map(|fields| fields.as_slice())
            .ok_or_else(|| GenError::UnknownResourceKind {
                provider: provider.to_string(),
                kind: kind.to_string(),
            })
    }

    /// Check that every required field of `kind` is present in `properties`.
    ///
    /// All missing fields are reported together, in schema order.
    pub fn validate(&self, provider: &str, kind: &str, properties: &PropertyTree) -> GenResult<()> {
        let missing: Vec<String> = self
            .required_fields(provider, kind)?
            .iter()
            .filter(|field| !properties.contains(field))
            .cloned()
            .collect();

        if missing.is_empty() {
            Ok(())
        } else {
            Err(GenError::Validation {
                provider: provider.to_string(),
                kind: kind.to_string(),
                missing,
            })
        }
    }

    pub fn contains(&self, provider: &str, kind: &str) -> bool {
        self.schemas
            .get(provider)
            .map_or(false, |kinds| kinds.contains_key(kind))
    }

    /// Registered provider names, sorted.
    pub fn providers(&self) -> Vec<&str> {
        self.schemas.keys().map(|s| s.as_str()).collect()
    }

    /// Registered kinds of a provider, sorted.
    pub fn kinds(&self, provider: &str) -> Vec<&str> {
        self.schemas
            .get(provider)
            .map(|kinds| kinds.keys().map(|s| s.as_str()).collect())
            .unwrap_or_default()
    }

    pub fn table(&self) -> &SchemaTable {
        &self.schemas
    }
}

/// Required fields of the builtin resource kinds.
pub fn builtin_required_fields(kind: ResourceKind) -> &'static [&'static str] {
    match kind {
        ResourceKind::Aks => &["name", "location", "resourceGroup", "nodeCount"],
        ResourceKind::Monitor => &["name", "resourceGroup", "severity", "criteria"],
        ResourceKind::LogAnalytics => &["name", "location", "resourceGroup", "sku", "retentionInDays"],
        ResourceKind::AppInsights => &["name", "location", "resourceGroup", "applicationType"],
        ResourceKind::StorageAccount => &["name", "location", "resourceGroup"],
        ResourceKind::Eks => &["name", "region", "nodeCount"],
        ResourceKind::S3 => &["name"],
        ResourceKind::CloudWatch => &[
            "name",
            "namespace",
            "metricName",
            "comparisonOperator",
            "threshold",
            "period",
            "evaluationPeriods",
            "statistic",
        ],
        ResourceKind::CloudWatchLogGroup => &["name"],
        ResourceKind::Budget => &["name", "amount", "period"],
        ResourceKind::Gke => &["name", "location", "nodeCount"],
    }
}

/// Convenience for dispatchers: validate a builtin kind under its provider.
pub(crate) fn validate_kind(
    registry: &SchemaRegistry,
    provider: CloudProvider,
    kind: ResourceKind,
    properties: &PropertyTree,
) -> GenResult<()> {
    registry.validate(provider.as_str(), kind.as_str(), properties)
}
