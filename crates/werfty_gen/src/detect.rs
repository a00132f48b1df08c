//! Resource type detection.
//!
//! Each provider owns an ordered list of [`DetectionRule`]s. Rules are
//! evaluated top to bottom and the first rule whose [`Condition`] holds
//! decides the resource kind. Rule order is part of the contract: reordering
//! can reclassify existing inputs.

use std::path::Path;

use tracing::debug;

use crate::error::{GenError, GenResult};
use crate::property::{PropertyTree, RESOURCE_TYPE_KEY};
use crate::provider::{CloudProvider, ResourceKind};

/// What a detector knows about the input besides its properties.
#[derive(Debug, Clone, Copy, Default)]
pub struct DetectionHint<'a> {
    /// Source path of the document.
    pub source: &'a str,
    /// Top-level `resourceType` of the document, if any.
    pub resource_type: Option<&'a str>,
}

impl<'a> DetectionHint<'a> {
    pub fn new(source: &'a str) -> Self {
        Self {
            source,
            resource_type: None,
        }
    }

    pub fn with_resource_type(mut self, resource_type: Option<&'a str>) -> Self {
        self.resource_type = resource_type;
        self
    }

    /// Last component of the source path.
    pub fn file_name(&self) -> &'a str {
        Path::new(self.source)
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or(self.source)
    }
}

/// A predicate over the detector input.
#[derive(Debug, Clone, PartialEq)]
pub enum Condition {
    /// The property is present, whatever its value.
    HasField(&'static str),
    /// The string property contains `needle`, ignoring case.
    FieldContains {
        field: &'static str,
        needle: &'static str,
    },
    /// The explicit override equals the value, ignoring case. The document
    /// level `resourceType` wins over one inside `properties`.
    ResourceTypeIs(&'static str),
    /// The source path contains the substring, ignoring case. Directory
    /// names count, so `monitor/alert.json` names the monitor kind.
    HintContains(&'static str),
    /// Like `HintContains`, restricted to the last path component.
    FileNameContains(&'static str),
    All(Vec<Condition>),
    Any(Vec<Condition>),
    Not(Box<Condition>),
}

impl Condition {
    /// The hint or override names `kind`.
    pub fn names(kind: ResourceKind) -> Self {
        Condition::Any(vec![
            Condition::HintContains(kind.hint_token()),
            Condition::ResourceTypeIs(kind.as_str()),
        ])
    }

    pub fn not(condition: Condition) -> Self {
        Condition::Not(Box::new(condition))
    }

    pub fn matches(&self, properties: &PropertyTree, hint: &DetectionHint<'_>) -> bool {
        match self {
            Condition::HasField(field) => properties.contains(field),
            Condition::FieldContains { field, needle } => properties
                .str(field)
                .map_or(false, |value| contains_ignore_case(value, needle)),
            Condition::ResourceTypeIs(expected) => resource_type_override(properties, hint)
                .map_or(false, |value| value.eq_ignore_ascii_case(expected)),
            Condition::HintContains(needle) => contains_ignore_case(hint.source, needle),
            Condition::FileNameContains(needle) => contains_ignore_case(hint.file_name(), needle),
            Condition::All(conditions) => conditions.iter().all(|c| c.matches(properties, hint)),
            Condition::Any(conditions) => conditions.iter().any(|c| c.matches(properties, hint)),
            Condition::Not(condition) => !condition.matches(properties, hint),
        }
    }
}

/// One `condition → kind` rule.
#[derive(Debug, Clone, PartialEq)]
pub struct DetectionRule {
    pub kind: ResourceKind,
    pub condition: Condition,
}

impl DetectionRule {
    pub fn new(kind: ResourceKind, condition: Condition) -> Self {
        Self { kind, condition }
    }
}

/// Ordered rule list of a provider.
#[derive(Debug, Clone)]
pub struct Detector {
    provider: CloudProvider,
    rules: Vec<DetectionRule>,
}

impl Detector {
    pub fn new(provider: CloudProvider, rules: Vec<DetectionRule>) -> Self {
        Self { provider, rules }
    }

    /// Builtin rules of `provider`.
    pub fn for_provider(provider: CloudProvider) -> Self {
        let rules = match provider {
            CloudProvider::Azure => azure_rules(),
            CloudProvider::Aws => aws_rules(),
            CloudProvider::Gcp => gcp_rules(),
        };
        Self::new(provider, rules)
    }

    pub fn rules(&self) -> &[DetectionRule] {
        &self.rules
    }

    /// Append a rule after the existing ones.
    pub fn push_rule(&mut self, rule: DetectionRule) {
        self.rules.push(rule);
    }

    /// Classify `properties`; the first matching rule wins.
    pub fn detect(&self, properties: &PropertyTree, hint: &DetectionHint<'_>) -> GenResult<ResourceKind> {
        for (index, rule) in self.rules.iter().enumerate() {
            if rule.condition.matches(properties, hint) {
                debug!(
                    "{} rule #{} matched {} for {}",
                    self.provider, index, rule.kind, hint.source
                );
                return Ok(rule.kind);
            }
        }

        Err(GenError::Detection {
            provider: self.provider.to_string(),
            path: hint.source.to_string(),
        })
    }
}

fn azure_rules() -> Vec<DetectionRule> {
    let others = [
        ResourceKind::Monitor,
        ResourceKind::LogAnalytics,
        ResourceKind::AppInsights,
        ResourceKind::StorageAccount,
    ];

    vec![
        // Other Azure kinds carry node counts too, so the name must say "aks"
        // and the hint must not point elsewhere.
        DetectionRule::new(
            ResourceKind::Aks,
            Condition::All(vec![
                Condition::HasField("nodeCount"),
                Condition::FieldContains {
                    field: "name",
                    needle: "aks",
                },
                Condition::not(Condition::Any(others.iter().map(|k| Condition::names(*k)).collect())),
            ]),
        ),
        DetectionRule::new(ResourceKind::Monitor, Condition::names(ResourceKind::Monitor)),
        DetectionRule::new(ResourceKind::LogAnalytics, Condition::names(ResourceKind::LogAnalytics)),
        DetectionRule::new(ResourceKind::AppInsights, Condition::names(ResourceKind::AppInsights)),
        DetectionRule::new(
            ResourceKind::StorageAccount,
            Condition::names(ResourceKind::StorageAccount),
        ),
        DetectionRule::new(ResourceKind::Aks, Condition::names(ResourceKind::Aks)),
    ]
}

fn aws_rules() -> Vec<DetectionRule> {
    vec![
        DetectionRule::new(ResourceKind::Eks, Condition::HasField("nodeCount")),
        DetectionRule::new(
            ResourceKind::S3,
            Condition::Any(vec![
                Condition::HasField("bucket"),
                Condition::ResourceTypeIs("s3"),
                Condition::FieldContains {
                    field: "name",
                    needle: "s3",
                },
            ]),
        ),
        // Log groups before alarms: "cloudwatch" is a prefix of both.
        DetectionRule::new(
            ResourceKind::CloudWatchLogGroup,
            Condition::names(ResourceKind::CloudWatchLogGroup),
        ),
        DetectionRule::new(ResourceKind::CloudWatch, Condition::names(ResourceKind::CloudWatch)),
        DetectionRule::new(ResourceKind::Budget, Condition::names(ResourceKind::Budget)),
        DetectionRule::new(ResourceKind::Eks, Condition::names(ResourceKind::Eks)),
    ]
}

fn gcp_rules() -> Vec<DetectionRule> {
    vec![
        DetectionRule::new(ResourceKind::Gke, Condition::HasField("nodeCount")),
        DetectionRule::new(ResourceKind::Gke, Condition::names(ResourceKind::Gke)),
    ]
}

/// Explicit kind override: document level first, then `properties`.
fn resource_type_override<'a>(properties: &'a PropertyTree, hint: &DetectionHint<'a>) -> Option<&'a str> {
    hint.resource_type.or_else(|| properties.str(RESOURCE_TYPE_KEY))
}

fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn detect(provider: CloudProvider, props: &PropertyTree, source: &str) -> GenResult<ResourceKind> {
        Detector::for_provider(provider).detect(props, &DetectionHint::new(source))
    }

    fn aks_props() -> PropertyTree {
        PropertyTree::new()
            .with("name", "demo-aks")
            .with("location", "eastus")
            .with("resourceGroup", "demo-rg")
            .with("nodeCount", 3)
    }

    #[test]
    fn test_azure_aks_requires_name_substring() {
        assert_eq!(
            detect(CloudProvider::Azure, &aks_props(), "inputs/aks.json").unwrap(),
            ResourceKind::Aks
        );

        let props = aks_props().with("name", "demo-cluster");
        assert!(matches!(
            detect(CloudProvider::Azure, &props, "inputs/cluster.json"),
            Err(GenError::Detection { .. })
        ));
    }

    #[test]
    fn test_azure_storage_hint_beats_aks_name() {
        assert_eq!(
            detect(CloudProvider::Azure, &aks_props(), "inputs/storage.json").unwrap(),
            ResourceKind::StorageAccount
        );
    }

    #[test]
    fn test_azure_path_hints() {
        let props = PropertyTree::new().with("name", "x");
        assert_eq!(
            detect(CloudProvider::Azure, &props, "a/monitor.yaml").unwrap(),
            ResourceKind::Monitor
        );
        assert_eq!(
            detect(CloudProvider::Azure, &props, "a/LogAnalytics.yaml").unwrap(),
            ResourceKind::LogAnalytics
        );
        assert_eq!(
            detect(CloudProvider::Azure, &props, "a/appinsights.json").unwrap(),
            ResourceKind::AppInsights
        );
    }

    #[test]
    fn test_azure_storage_override_in_properties() {
        let props = PropertyTree::new()
            .with("name", "acct")
            .with("resourceType", "storageaccount");
        assert_eq!(
            detect(CloudProvider::Azure, &props, "input.json").unwrap(),
            ResourceKind::StorageAccount
        );
    }

    #[test]
    fn test_hint_in_directory_name() {
        let props = PropertyTree::new().with("name", "cpu").with("resourceGroup", "rg");
        assert_eq!(
            detect(CloudProvider::Azure, &props, "examples/monitor/alert.json").unwrap(),
            ResourceKind::Monitor
        );
        assert_eq!(
            detect(CloudProvider::Aws, &props, "/srv/budgets/q3.json").unwrap(),
            ResourceKind::Budget
        );
    }

    #[test]
    fn test_file_name_condition_skips_directories() {
        let condition = Condition::FileNameContains("monitor");
        let props = PropertyTree::new();
        assert!(!condition.matches(&props, &DetectionHint::new("examples/monitor/alert.json")));
        assert!(condition.matches(&props, &DetectionHint::new("examples/Monitor-cpu.json")));
        assert_eq!(DetectionHint::new("a/b/monitor.json").file_name(), "monitor.json");
    }

    #[test]
    fn test_pushed_rule_extends_provider() {
        let props = PropertyTree::new().with("name", "q3").with("amount", 100);
        let mut detector = Detector::for_provider(CloudProvider::Aws);
        assert!(detector.detect(&props, &DetectionHint::new("costs.json")).is_err());

        detector.push_rule(DetectionRule::new(ResourceKind::Budget, Condition::HasField("amount")));
        assert_eq!(
            detector.detect(&props, &DetectionHint::new("costs.json")).unwrap(),
            ResourceKind::Budget
        );
        assert_eq!(detector.rules().last().map(|r| r.kind), Some(ResourceKind::Budget));
    }

    #[test]
    fn test_document_override_wins_over_properties() {
        let props = PropertyTree::new().with("resourceType", "monitor");
        let hint = DetectionHint::new("input.json").with_resource_type(Some("appinsights"));
        let kind = Detector::for_provider(CloudProvider::Azure)
            .detect(&props, &hint)
            .unwrap();
        assert_eq!(kind, ResourceKind::AppInsights);
    }

    #[test]
    fn test_aws_node_count_beats_bucket() {
        let props = PropertyTree::new()
            .with("name", "x")
            .with("bucket", "b")
            .with("nodeCount", 2);
        assert_eq!(detect(CloudProvider::Aws, &props, "x.json").unwrap(), ResourceKind::Eks);
    }

    #[test]
    fn test_aws_s3_variants() {
        let by_bucket = PropertyTree::new().with("name", "my-bucket").with("bucket", "my-bucket");
        let by_override = PropertyTree::new().with("name", "data").with("resourceType", "S3");
        let by_name = PropertyTree::new().with("name", "logs-s3");

        for props in [by_bucket, by_override, by_name] {
            assert_eq!(detect(CloudProvider::Aws, &props, "x.json").unwrap(), ResourceKind::S3);
        }
    }

    #[test]
    fn test_aws_cloudwatch_and_budget_hints() {
        let props = PropertyTree::new().with("name", "x");
        assert_eq!(
            detect(CloudProvider::Aws, &props, "cloudwatch-alarm.json").unwrap(),
            ResourceKind::CloudWatch
        );
        assert_eq!(
            detect(CloudProvider::Aws, &props, "cloudwatch-loggroup.json").unwrap(),
            ResourceKind::CloudWatchLogGroup
        );
        assert_eq!(
            detect(CloudProvider::Aws, &props, "monthly-budget.yaml").unwrap(),
            ResourceKind::Budget
        );
    }

    #[test]
    fn test_gcp_detection() {
        let props = PropertyTree::new().with("nodeCount", 1);
        assert_eq!(detect(CloudProvider::Gcp, &props, "x.json").unwrap(), ResourceKind::Gke);

        let err = detect(CloudProvider::Gcp, &PropertyTree::new(), "inputs/bucket.json").unwrap_err();
        assert!(err.to_string().contains("inputs/bucket.json"));
    }

    #[test]
    fn test_detection_is_deterministic() {
        let props = aks_props();
        let first = detect(CloudProvider::Azure, &props, "aks.json").unwrap();
        let second = detect(CloudProvider::Azure, &props, "aks.json").unwrap();
        assert_eq!(first, second);

        let a = detect(CloudProvider::Gcp, &PropertyTree::new(), "none.json").unwrap_err();
        let b = detect(CloudProvider::Gcp, &PropertyTree::new(), "none.json").unwrap_err();
        assert_eq!(a.to_string(), b.to_string());
    }

    #[test]
    fn test_rules_only_yield_provider_kinds() {
        for provider in CloudProvider::all() {
            let detector = Detector::for_provider(provider);
            assert!(detector.rules().iter().all(|r| r.kind.provider() == provider));
        }
    }
}
