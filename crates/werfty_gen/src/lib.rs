//! # werfty_gen
//!
//! Provider-agnostic Terraform generation from declarative resource
//! descriptions.
//!
//! A YAML or JSON document is loaded into a property tree, classified into a
//! resource kind by the provider's detection rules, validated against the
//! schema registry and rendered by the matching emitter. Resource kinds the
//! builtin providers do not know can be generated by registered plugins.
//!
//! ## Features
//!
//! - Azure (AKS, monitor alerts, Log Analytics, Application Insights,
//!   storage accounts), AWS (EKS, S3, CloudWatch alarms and log groups,
//!   budgets) and GCP (GKE)
//! - Ordered, data-driven detection rules per provider
//! - Declarative required-field schemas, extensible at startup
//! - Plugin registry with template plugins loaded from a manifest
//!
//! ## Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use werfty_gen::{Orchestrator, PluginRegistry, SchemaRegistry, TemplatePlugin};
//!
//! let mut plugins = PluginRegistry::new();
//! plugins.register(
//!     "custom-widget",
//!     Arc::new(TemplatePlugin::new("resource \"widget\" \"{{name}}\" {}\n")),
//! );
//!
//! let orchestrator = Orchestrator::new()
//!     .with_schemas(SchemaRegistry::builtin())
//!     .with_plugins(plugins);
//!
//! orchestrator.generate("inputs/aks.yaml", "main.tf", "azure").unwrap();
//! ```

pub mod detect;
pub mod dispatch;
pub mod emit;
pub mod error;
pub mod hcl;
pub mod loader;
pub mod orchestrator;
pub mod plugin;
pub mod property;
pub mod provider;
pub mod schema;

pub use detect::{Condition, DetectionHint, DetectionRule, Detector};
pub use dispatch::{dispatcher_for, GeneratedOutput, ProviderDispatcher, RuleDispatcher};
pub use error::{ErrorCategory, GenError, GenResult, ParseFailure};
pub use loader::{discover_documents, Document, DocumentFormat};
pub use orchestrator::{generate, validate, BatchOutcome, Orchestrator};
pub use plugin::{PluginDefinition, PluginManifest, PluginRegistry, ResourcePlugin, TemplatePlugin};
pub use property::PropertyTree;
pub use provider::{CloudProvider, ResourceKind};
pub use schema::{SchemaRegistry, SchemaTable};
