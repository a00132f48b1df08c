//! Provider dispatchers: detect → validate → emit, plus the provider header.

use tracing::debug;

use crate::detect::{DetectionHint, Detector};
use crate::emit;
use crate::error::GenResult;
use crate::property::PropertyTree;
use crate::provider::{CloudProvider, ResourceKind};
use crate::schema::{self, SchemaRegistry};

/// Header and body produced for one input document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedOutput {
    /// Required-plugin declaration and default provider block.
    pub header: String,
    /// Resource definition.
    pub body: String,
}

impl GeneratedOutput {
    pub fn new(header: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            header: header.into(),
            body: body.into(),
        }
    }

    /// The complete artifact, ending with exactly one newline.
    pub fn render(&self) -> String {
        let mut out = String::with_capacity(self.header.len() + self.body.len() + 1);
        out.push_str(&self.header);
        out.push_str(self.body.trim_end_matches('\n'));
        out.push('\n');
        out
    }
}

/// Capability set every provider implements.
pub trait ProviderDispatcher: Send + Sync {
    fn provider(&self) -> CloudProvider;

    /// Classify the input into one of this provider's resource kinds.
    fn detect_resource_type(&self, properties: &PropertyTree, hint: &DetectionHint<'_>) -> GenResult<ResourceKind>;

    /// Check the required fields of `kind`.
    fn validate_resource(&self, schemas: &SchemaRegistry, kind: ResourceKind, properties: &PropertyTree) -> GenResult<()> {
        schema::validate_kind(schemas, self.provider(), kind, properties)
    }

    fn header(&self) -> String {
        self.provider().header()
    }

    /// Detect, validate and emit. No output is produced unless every step
    /// succeeds.
    fn generate(
        &self,
        schemas: &SchemaRegistry,
        properties: &PropertyTree,
        hint: &DetectionHint<'_>,
    ) -> GenResult<GeneratedOutput> {
        let kind = self.detect_resource_type(properties, hint)?;
        self.validate_resource(schemas, kind, properties)?;
        debug!("Emitting {}/{} for {}", self.provider(), kind, hint.source);
        Ok(GeneratedOutput::new(self.header(), emit::emit(kind, properties)))
    }
}

/// Dispatcher driven by the builtin rule table of one provider.
#[derive(Debug, Clone)]
pub struct RuleDispatcher {
    detector: Detector,
    provider: CloudProvider,
}

impl RuleDispatcher {
    pub fn new(provider: CloudProvider) -> Self {
        Self {
            detector: Detector::for_provider(provider),
            provider,
        }
    }

    /// Use a custom rule list, e.g. with extra rules appended.
    pub fn with_detector(provider: CloudProvider, detector: Detector) -> Self {
        Self { detector, provider }
    }

    pub fn detector(&self) -> &Detector {
        &self.detector
    }
}

impl ProviderDispatcher for RuleDispatcher {
    fn provider(&self) -> CloudProvider {
        self.provider
    }

    fn detect_resource_type(&self, properties: &PropertyTree, hint: &DetectionHint<'_>) -> GenResult<ResourceKind> {
        self.detector.detect(properties, hint)
    }
}

/// Builtin dispatcher of `provider`.
pub fn dispatcher_for(provider: CloudProvider) -> Box<dyn ProviderDispatcher> {
    Box::new(RuleDispatcher::new(provider))
}
