//! Cloud provider and resource kind definitions.

use serde::{Deserialize, Serialize};

/// Supported cloud providers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CloudProvider {
    Aws,
    Azure,
    Gcp,
}

impl CloudProvider {
    pub fn as_str(&self) -> &'static str {
        match self {
            CloudProvider::Aws => "aws",
            CloudProvider::Azure => "azure",
            CloudProvider::Gcp => "gcp",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "aws" => Some(CloudProvider::Aws),
            "azure" => Some(CloudProvider::Azure),
            "gcp" => Some(CloudProvider::Gcp),
            _ => None,
        }
    }

    pub fn all() -> Vec<Self> {
        vec![CloudProvider::Aws, CloudProvider::Azure, CloudProvider::Gcp]
    }

    /// Get the Terraform provider name.
    pub fn provider_name(&self) -> &'static str {
        match self {
            CloudProvider::Aws => "aws",
            CloudProvider::Azure => "azurerm",
            CloudProvider::Gcp => "google",
        }
    }

    /// Minimum version of the Terraform provider plugin.
    pub fn min_version(&self) -> &'static str {
        match self {
            CloudProvider::Aws => ">= 4.0.0",
            CloudProvider::Azure => ">= 3.0.0",
            CloudProvider::Gcp => ">= 4.0.0",
        }
    }

    /// Get default region for the provider.
    pub fn default_region(&self) -> &'static str {
        match self {
            CloudProvider::Aws => "us-west-2",
            CloudProvider::Azure => "eastus",
            CloudProvider::Gcp => "us-central1",
        }
    }

    /// Resource kinds with a builtin emitter for this provider.
    pub fn resource_kinds(&self) -> Vec<ResourceKind> {
        ResourceKind::all()
            .into_iter()
            .filter(|kind| kind.provider() == *self)
            .collect()
    }

    /// Required-plugin declaration and default provider block.
    pub fn header(&self) -> String {
        let name = self.provider_name();
        let provider_block = match self {
            CloudProvider::Aws => format!(
                "provider \"{}\" {{\n  region = \"{}\"\n}}\n",
                name,
                self.default_region()
            ),
            CloudProvider::Azure => format!("provider \"{}\" {{\n  features {{}}\n}}\n", name),
            CloudProvider::Gcp => format!("provider \"{}\" {{}}\n", name),
        };

        format!(
            r#"terraform {{
  required_version = ">= 1.0.0"
  required_providers {{
    {name} = {{
      source  = "hashicorp/{name}"
      version = "{version}"
    }}
  }}
}}

{provider_block}
"#,
            name = name,
            version = self.min_version(),
            provider_block = provider_block
        )
    }
}

impl std::fmt::Display for CloudProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Builtin resource kinds, each owned by exactly one provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceKind {
    // Azure
    Aks,
    Monitor,
    LogAnalytics,
    AppInsights,
    StorageAccount,
    // AWS
    Eks,
    S3,
    CloudWatch,
    CloudWatchLogGroup,
    Budget,
    // GCP
    Gke,
}

impl ResourceKind {
    pub fn all() -> Vec<Self> {
        vec![
            ResourceKind::Aks,
            ResourceKind::Monitor,
            ResourceKind::LogAnalytics,
            ResourceKind::AppInsights,
            ResourceKind::StorageAccount,
            ResourceKind::Eks,
            ResourceKind::S3,
            ResourceKind::CloudWatch,
            ResourceKind::CloudWatchLogGroup,
            ResourceKind::Budget,
            ResourceKind::Gke,
        ]
    }

    /// Registry key of this kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            ResourceKind::Aks => "aks",
            ResourceKind::Monitor => "monitor",
            ResourceKind::LogAnalytics => "loganalytics",
            ResourceKind::AppInsights => "appinsights",
            ResourceKind::StorageAccount => "storageaccount",
            ResourceKind::Eks => "eks",
            ResourceKind::S3 => "s3",
            ResourceKind::CloudWatch => "cloudwatch",
            ResourceKind::CloudWatchLogGroup => "cloudwatchloggroup",
            ResourceKind::Budget => "budget",
            ResourceKind::Gke => "gke",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        let s = s.to_lowercase();
        Self::all().into_iter().find(|kind| kind.as_str() == s)
    }

    pub fn provider(&self) -> CloudProvider {
        match self {
            ResourceKind::Aks
            | ResourceKind::Monitor
            | ResourceKind::LogAnalytics
            | ResourceKind::AppInsights
            | ResourceKind::StorageAccount => CloudProvider::Azure,
            ResourceKind::Eks
            | ResourceKind::S3
            | ResourceKind::CloudWatch
            | ResourceKind::CloudWatchLogGroup
            | ResourceKind::Budget => CloudProvider::Aws,
            ResourceKind::Gke => CloudProvider::Gcp,
        }
    }

    /// Substring that marks a source path as describing this kind.
    pub fn hint_token(&self) -> &'static str {
        match self {
            ResourceKind::StorageAccount => "storage",
            ResourceKind::CloudWatchLogGroup => "loggroup",
            other => other.as_str(),
        }
    }

    /// Terraform resource type emitted for this kind.
    pub fn terraform_type(&self) -> &'static str {
        match self {
            ResourceKind::Aks => "azurerm_kubernetes_cluster",
            ResourceKind::Monitor => "azurerm_monitor_metric_alert",
            ResourceKind::LogAnalytics => "azurerm_log_analytics_workspace",
            ResourceKind::AppInsights => "azurerm_application_insights",
            ResourceKind::StorageAccount => "azurerm_storage_account",
            ResourceKind::Eks => "aws_eks_cluster",
            ResourceKind::S3 => "aws_s3_bucket",
            ResourceKind::CloudWatch => "aws_cloudwatch_metric_alarm",
            ResourceKind::CloudWatchLogGroup => "aws_cloudwatch_log_group",
            ResourceKind::Budget => "aws_budgets_budget",
            ResourceKind::Gke => "google_container_cluster",
        }
    }
}

impl std::fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
