//! Code emitters, one per builtin resource kind.
//!
//! Emitters are pure: they read required fields (guaranteed present by
//! validation) and optional fields with defaults, and return HCL text. A
//! present value is never replaced by a default.

use serde_json::Value;

use crate::hcl::{render_blocks, HclBlock, HclValue};
use crate::property::{scalar_text, PropertyTree};
use crate::provider::ResourceKind;

/// Signature shared by every emitter.
pub type Emitter = fn(&PropertyTree) -> String;

/// Emitter of a builtin resource kind.
pub fn emitter_for(kind: ResourceKind) -> Emitter {
    match kind {
        ResourceKind::Aks => emit_aks,
        ResourceKind::Monitor => emit_monitor,
        ResourceKind::LogAnalytics => emit_log_analytics,
        ResourceKind::AppInsights => emit_app_insights,
        ResourceKind::StorageAccount => emit_storage_account,
        ResourceKind::Eks => emit_eks,
        ResourceKind::S3 => emit_s3,
        ResourceKind::CloudWatch => emit_cloudwatch_alarm,
        ResourceKind::CloudWatchLogGroup => emit_cloudwatch_log_group,
        ResourceKind::Budget => emit_budget,
        ResourceKind::Gke => emit_gke,
    }
}

/// Emit the body for `kind`.
pub fn emit(kind: ResourceKind, properties: &PropertyTree) -> String {
    emitter_for(kind)(properties)
}

pub fn emit_aks(props: &PropertyTree) -> String {
    let node_pool = HclBlock::new("default_node_pool")
        .string("name", "default")
        .attr("node_count", number(props, "nodeCount", 3))
        .attr("vm_size", text(props, "vmSize", "Standard_D2_v2"))
        .attr_opt("node_labels", props.map("nodePoolLabels").map(HclValue::object));

    HclBlock::resource(ResourceKind::Aks.terraform_type(), &label(props, "example-aks"))
        .attr("name", text(props, "name", "example-aks"))
        .attr("location", text(props, "location", "eastus"))
        .attr("resource_group_name", text(props, "resourceGroup", "example-rg"))
        .attr("dns_prefix", text(props, "dnsPrefix", props.str_or("name", "example-aks")))
        .block(node_pool)
        .block(HclBlock::new("identity").attr("type", text(props, "identity", "SystemAssigned")))
        .block(
            HclBlock::new("network_profile")
                .attr("network_plugin", text(props, "networkPlugin", "azure"))
                .attr("network_policy", text(props, "networkPolicy", "azure")),
        )
        .attr_opt("availability_zones", string_list(props, "availabilityZones"))
        .block_if(
            props.bool_or("enableRBAC", true),
            HclBlock::new("role_based_access_control").raw("enabled", "true"),
        )
        .attr_opt(
            "api_server_authorized_ip_ranges",
            string_list(props, "apiServerAuthorizedIPRanges"),
        )
        .attr_opt("tags", tags(props))
        .render()
}

pub fn emit_monitor(props: &PropertyTree) -> String {
    let enabled = props.bool_or("enabled", true) && !props.bool_or("disabled", false);

    HclBlock::resource(ResourceKind::Monitor.terraform_type(), &label(props, "example-monitor"))
        .attr("name", text(props, "name", "example-monitor"))
        .attr("resource_group_name", text(props, "resourceGroup", "example-rg"))
        .attr_opt("scopes", string_list(props, "scopes"))
        .attr_opt("description", optional_text(props, "description"))
        .attr("severity", number(props, "severity", 3))
        .attr("criteria", text(props, "criteria", ""))
        .attr_opt("evaluation_frequency", optional_text(props, "evaluationFrequency"))
        .attr_opt("window_size", optional_text(props, "windowSize"))
        .attr_opt("enabled", (!enabled).then(|| HclValue::bool(false)))
        .attr_opt(
            "auto_mitigate",
            (!props.bool_or("autoMitigate", true)).then(|| HclValue::bool(false)),
        )
        .blocks(
            strings(props, "actions")
                .into_iter()
                .map(|id| HclBlock::new("action").string("action_group_id", id)),
        )
        .render()
}

pub fn emit_log_analytics(props: &PropertyTree) -> String {
    HclBlock::resource(
        ResourceKind::LogAnalytics.terraform_type(),
        &label(props, "example-log-analytics"),
    )
    .attr("name", text(props, "name", "example-log-analytics"))
    .attr("location", text(props, "location", "West Europe"))
    .attr("resource_group_name", text(props, "resourceGroup", "example-resource-group"))
    .attr("sku", text(props, "sku", "PerGB2018"))
    .attr("retention_in_days", number(props, "retentionInDays", 30))
    .attr_opt("daily_quota_gb", positive(props, "dailyQuotaGb"))
    .block_opt(
        positive(props, "workspaceCapping")
            .map(|quota| HclBlock::new("workspace_capping").attr("daily_quota_gb", quota)),
    )
    .attr_opt("internet_ingestion_enabled", switched_on(props, "internetIngestionEnabled"))
    .attr_opt("internet_query_enabled", switched_on(props, "internetQueryEnabled"))
    .attr_opt(
        "reservation_capacity_in_gb_per_day",
        positive(props, "reservationCapacityInGbPerDay"),
    )
    .attr_opt("tags", tags(props))
    .render()
}

pub fn emit_app_insights(props: &PropertyTree) -> String {
    HclBlock::resource(
        ResourceKind::AppInsights.terraform_type(),
        &label(props, "example-appinsights"),
    )
    .attr("name", text(props, "name", "example-appinsights"))
    .attr("location", text(props, "location", "West Europe"))
    .attr("resource_group_name", text(props, "resourceGroup", "example-resource-group"))
    .attr("application_type", text(props, "applicationType", "web"))
    .attr("retention_in_days", number(props, "retentionInDays", 90))
    .attr_opt("workspace_id", optional_text(props, "workspaceId"))
    .attr_opt("daily_data_cap_in_gb", positive(props, "dailyDataCapInGb"))
    .attr_opt("disable_ip_masking", switched_on(props, "disableIpMasking"))
    .attr_opt("tags", tags(props))
    .render()
}

pub fn emit_storage_account(props: &PropertyTree) -> String {
    // "Standard_LRS" carries both the tier and the replication type.
    let sku = props
        .scalar_text("sku")
        .unwrap_or_else(|| "Standard_LRS".to_string());
    let (tier, replication) = match sku.split_once('_') {
        Some((tier, replication)) => (tier, replication),
        None => ("Standard", sku.as_str()),
    };

    HclBlock::resource(
        ResourceKind::StorageAccount.terraform_type(),
        &label(props, "example-storage"),
    )
    .attr("name", text(props, "name", "example-storage"))
    .attr("resource_group_name", text(props, "resourceGroup", "example-rg"))
    .attr("location", text(props, "location", "eastus"))
    .string("account_tier", tier)
    .string("account_replication_type", replication)
    .attr("account_kind", text(props, "kind", "StorageV2"))
    .attr("access_tier", text(props, "accessTier", "Hot"))
    .attr_opt("tags", tags(props))
    .render()
}

pub fn emit_eks(props: &PropertyTree) -> String {
    let cluster_label = label(props, "example-eks");
    let node_count = number(props, "nodeCount", 3);

    let cluster = HclBlock::resource(ResourceKind::Eks.terraform_type(), &cluster_label)
        .attr("name", text(props, "name", "example-eks"))
        .attr("region", text(props, "region", "us-west-2"))
        .attr_opt("role_arn", props.get("roleArn").map(HclValue::from_json))
        .attr_opt("version", props.get("version").map(HclValue::from_json))
        .attr_opt("tags", tags(props));

    let node_group = HclBlock::resource("aws_eks_node_group", &cluster_label)
        .raw("cluster_name", format!("aws_eks_cluster.{}.name", cluster_label))
        .attr("node_group_name", text(props, "nodeGroupName", "default"))
        .attr_opt("node_role_arn", props.get("nodeRoleArn").map(HclValue::from_json))
        .block(
            HclBlock::new("scaling_config")
                .attr("desired_size", node_count.clone())
                .attr("min_size", optional_number(props, "minNodes").unwrap_or_else(|| node_count.clone()))
                .attr("max_size", optional_number(props, "maxNodes").unwrap_or(node_count)),
        );

    render_blocks(&[cluster, node_group])
}

pub fn emit_s3(props: &PropertyTree) -> String {
    let name = text(props, "name", "example-s3-bucket");
    let bucket = match props.get("bucket") {
        Some(value) => text_value(value),
        None => name.clone(),
    };
    let versioning = props.bool_or("versioning", false);

    let mut tag_entries = tag_entries(props);
    if !tag_entries.iter().any(|(k, _)| k == "Name") {
        tag_entries.push(("Name".to_string(), name));
    }

    HclBlock::resource(ResourceKind::S3.terraform_type(), &label(props, "example-s3-bucket"))
        .attr("bucket", bucket)
        .attr("acl", text(props, "acl", "private"))
        .block_if(versioning, HclBlock::new("versioning").raw("enabled", "true"))
        .attr("tags", HclValue::Object(tag_entries))
        .render()
}

pub fn emit_cloudwatch_alarm(props: &PropertyTree) -> String {
    HclBlock::resource(ResourceKind::CloudWatch.terraform_type(), &label(props, "example-alarm"))
        .attr("alarm_name", text(props, "name", "example-alarm"))
        .attr("namespace", text(props, "namespace", "AWS/EC2"))
        .attr("metric_name", text(props, "metricName", "CPUUtilization"))
        .attr("comparison_operator", text(props, "comparisonOperator", "GreaterThanThreshold"))
        .attr("threshold", number(props, "threshold", 80))
        .attr("period", number(props, "period", 300))
        .attr("evaluation_periods", number(props, "evaluationPeriods", 1))
        .attr("statistic", text(props, "statistic", "Average"))
        .attr_opt("alarm_description", props.get("description").map(HclValue::from_json))
        .render()
}

pub fn emit_cloudwatch_log_group(props: &PropertyTree) -> String {
    HclBlock::resource(
        ResourceKind::CloudWatchLogGroup.terraform_type(),
        &label(props, "example-log-group"),
    )
    .attr("name", text(props, "name", "example-log-group"))
    .attr("retention_in_days", number(props, "retentionInDays", 14))
    .render()
}

pub fn emit_budget(props: &PropertyTree) -> String {
    HclBlock::resource(ResourceKind::Budget.terraform_type(), &label(props, "example-budget"))
        .attr("name", text(props, "name", "example-budget"))
        .string("budget_type", "COST")
        .attr("limit_amount", text(props, "amount", "1000"))
        .attr("limit_unit", text(props, "currency", "USD"))
        .attr("time_period_start", text(props, "start", "2023-01-01_00:00"))
        .attr("time_unit", text(props, "period", "MONTHLY"))
        .render()
}

pub fn emit_gke(props: &PropertyTree) -> String {
    HclBlock::resource(ResourceKind::Gke.terraform_type(), &label(props, "example-gke"))
        .attr("name", text(props, "name", "example-gke"))
        .attr("location", text(props, "location", "us-central1"))
        .attr("initial_node_count", number(props, "nodeCount", 2))
        .render()
}

/// String-valued attribute. A present value is always rendered: scalars of
/// other types keep their text form, maps and lists render as HCL and
/// `null` stays `null`. The default applies only to absent keys.
fn text(props: &PropertyTree, key: &str, default: &str) -> HclValue {
    props.get(key).map(text_value).unwrap_or_else(|| HclValue::str(default))
}

fn text_value(value: &Value) -> HclValue {
    scalar_text(value)
        .map(HclValue::Str)
        .unwrap_or_else(|| HclValue::from_json(value))
}

/// Optional string attribute; `null` and `""` count as absent.
fn optional_text(props: &PropertyTree, key: &str) -> Option<HclValue> {
    props
        .get(key)
        .filter(|value| !value.is_null() && value.as_str() != Some(""))
        .map(text_value)
}

/// Numeric attribute. The default applies only to absent keys.
fn number(props: &PropertyTree, key: &str, default: i64) -> HclValue {
    optional_number(props, key).unwrap_or_else(|| HclValue::int(default))
}

fn optional_number(props: &PropertyTree, key: &str) -> Option<HclValue> {
    props.get(key).map(numeric)
}

/// Whole numbers and numeric strings render as integers, other numbers keep
/// their decimal form. Non-numeric strings are quoted as given.
fn numeric(value: &Value) -> HclValue {
    match value {
        Value::String(s) => s
            .trim()
            .parse::<i64>()
            .map(HclValue::int)
            .unwrap_or_else(|_| HclValue::str(s.as_str())),
        other => HclValue::from_json(other),
    }
}

/// Integer attribute emitted only when greater than zero.
fn positive(props: &PropertyTree, key: &str) -> Option<HclValue> {
    props.int(key).filter(|n| *n > 0).map(HclValue::int)
}

/// `true` when the flag is set, otherwise omitted.
fn switched_on(props: &PropertyTree, key: &str) -> Option<HclValue> {
    props.bool_or(key, false).then(|| HclValue::bool(true))
}

/// Scalar entries of a list; a string is read as a comma-separated list.
fn strings(props: &PropertyTree, key: &str) -> Vec<String> {
    match props.get(key) {
        Some(Value::Array(items)) => items.iter().filter_map(scalar_text).collect(),
        Some(Value::String(s)) => s
            .split(',')
            .map(|part| part.trim().trim_matches('"').to_string())
            .filter(|part| !part.is_empty())
            .collect(),
        _ => Vec::new(),
    }
}

fn string_list(props: &PropertyTree, key: &str) -> Option<HclValue> {
    let items = strings(props, key);
    if items.is_empty() {
        None
    } else {
        Some(HclValue::List(items.into_iter().map(HclValue::Str).collect()))
    }
}

fn tag_entries(props: &PropertyTree) -> Vec<(String, HclValue)> {
    props
        .map("tags")
        .map(|map| {
            map.iter()
                .map(|(k, v)| (k.clone(), HclValue::from_json(v)))
                .collect()
        })
        .unwrap_or_default()
}

fn tags(props: &PropertyTree) -> Option<HclValue> {
    props.map("tags").map(HclValue::object)
}

fn label(props: &PropertyTree, default: &str) -> String {
    sanitize_label(props.str("name").unwrap_or(default))
}

/// Terraform resource names allow letters, digits, `_` and `-` and may not
/// start with a digit.
fn sanitize_label(name: &str) -> String {
    let mut label: String = name
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c.to_ascii_lowercase() } else { '_' })
        .collect();
    if label.is_empty() {
        return "example".to_string();
    }
    if label.starts_with(|c: char| c.is_ascii_digit()) {
        label.insert(0, '_');
    }
    label
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_aks_body() {
        let props = PropertyTree::new()
            .with("name", "demo-aks")
            .with("location", "eastus")
            .with("resourceGroup", "demo-rg")
            .with("nodeCount", 3);

        let body = emit_aks(&props);
        assert!(body.starts_with("resource \"azurerm_kubernetes_cluster\" \"demo_aks\" {\n"));
        assert!(body.contains("  name = \"demo-aks\"\n"));
        assert!(body.contains("  location = \"eastus\"\n"));
        assert!(body.contains("  resource_group_name = \"demo-rg\"\n"));
        assert!(body.contains("    node_count = 3\n"));
        assert!(!body.contains("tags"));
    }

    #[test]
    fn test_aks_default_node_count() {
        let body = emit_aks(&PropertyTree::new().with("name", "x-aks"));
        assert!(body.contains("node_count = 3"));
    }

    #[test]
    fn test_float_encoded_integers_normalized() {
        let props = PropertyTree::new()
            .with("name", "gke-1")
            .with("location", "europe-west1")
            .with("nodeCount", json!(5.0));
        let body = emit_gke(&props);
        assert!(body.contains("initial_node_count = 5\n"));
        assert!(!body.contains("5.0"));
    }

    #[test]
    fn test_s3_bucket_and_versioning() {
        let props = PropertyTree::new()
            .with("name", "my-bucket")
            .with("bucket", "my-bucket")
            .with("versioning", true);
        let body = emit_s3(&props);
        assert!(body.contains("bucket = \"my-bucket\""));
        assert!(body.contains("acl = \"private\""));
        assert!(body.contains("versioning {\n    enabled = true\n  }"));
        assert!(body.contains("Name = \"my-bucket\""));
    }

    #[test]
    fn test_s3_bucket_falls_back_to_name() {
        let body = emit_s3(&PropertyTree::new().with("name", "logs-s3"));
        assert!(body.contains("bucket = \"logs-s3\""));
        assert!(!body.contains("versioning"));
    }

    #[test]
    fn test_storage_account_sku_split() {
        let props = PropertyTree::new()
            .with("name", "acct01")
            .with("location", "westeurope")
            .with("resourceGroup", "rg")
            .with("sku", "Premium_ZRS");
        let body = emit_storage_account(&props);
        assert!(body.contains("account_tier = \"Premium\""));
        assert!(body.contains("account_replication_type = \"ZRS\""));
        assert!(body.contains("access_tier = \"Hot\""));
        assert!(body.contains("account_kind = \"StorageV2\""));
    }

    #[test]
    fn test_monitor_numeric_severity() {
        let props = PropertyTree::new()
            .with("name", "cpu-alert")
            .with("resourceGroup", "rg")
            .with("severity", "2")
            .with("criteria", "Percentage CPU > 80");
        let body = emit_monitor(&props);
        assert!(body.contains("severity = 2\n"));
        assert!(body.contains("criteria = \"Percentage CPU > 80\""));
    }

    #[test]
    fn test_eks_emits_cluster_and_node_group() {
        let props = PropertyTree::new()
            .with("name", "prod-eks")
            .with("region", "eu-west-1")
            .with("nodeCount", 4)
            .with("maxNodes", 6);
        let body = emit_eks(&props);
        assert!(body.contains("resource \"aws_eks_cluster\" \"prod_eks\""));
        assert!(body.contains("region = \"eu-west-1\""));
        assert!(body.contains("cluster_name = aws_eks_cluster.prod_eks.name"));
        assert!(body.contains("desired_size = 4"));
        assert!(body.contains("min_size = 4"));
        assert!(body.contains("max_size = 6"));
    }

    #[test]
    fn test_budget_and_cloudwatch_defaults() {
        let budget = emit_budget(&PropertyTree::new().with("name", "b").with("amount", 250).with("period", "QUARTERLY"));
        assert!(budget.contains("limit_amount = \"250\""));
        assert!(budget.contains("time_unit = \"QUARTERLY\""));
        assert!(budget.contains("limit_unit = \"USD\""));

        let log_group = emit_cloudwatch_log_group(&PropertyTree::new().with("name", "/app/api"));
        assert!(log_group.contains("name = \"/app/api\""));
        assert!(log_group.contains("retention_in_days = 14"));
        assert!(log_group.contains("\"_app_api\""));
    }

    #[test]
    fn test_tags_rendered_sorted() {
        let props = PropertyTree::new()
            .with("name", "demo-aks")
            .with("tags", json!({"team": "infra", "env": "dev"}));
        let body = emit_aks(&props);
        let env = body.find("env = \"dev\"").unwrap();
        let team = body.find("team = \"infra\"").unwrap();
        assert!(env < team);
    }

    #[test]
    fn test_emitters_do_not_mutate_input() {
        let props = PropertyTree::new().with("name", "x").with("nodeCount", json!(2.0));
        let before = props.clone();
        for kind in ResourceKind::all() {
            let _ = emit(kind, &props);
        }
        assert_eq!(props, before);
    }

    #[test]
    fn test_present_numbers_are_never_defaulted() {
        let monitor = emit_monitor(&PropertyTree::new().with("severity", "Sev1"));
        assert!(monitor.contains("severity = \"Sev1\"\n"));

        let aks = emit_aks(&PropertyTree::new().with("name", "a-aks").with("nodeCount", "five"));
        assert!(aks.contains("node_count = \"five\"\n"));

        let eks = emit_eks(&PropertyTree::new().with("nodeCount", "many"));
        assert!(eks.contains("desired_size = \"many\"\n"));
        assert!(eks.contains("min_size = \"many\"\n"));

        let gke = emit_gke(&PropertyTree::new().with("nodeCount", Value::Null));
        assert!(gke.contains("initial_node_count = null\n"));

        let alarm = emit_cloudwatch_alarm(
            &PropertyTree::new()
                .with("threshold", "high")
                .with("period", "5m")
                .with("evaluationPeriods", json!(1.5)),
        );
        assert!(alarm.contains("threshold = \"high\"\n"));
        assert!(alarm.contains("period = \"5m\"\n"));
        assert!(alarm.contains("evaluation_periods = 1.5\n"));
    }

    #[test]
    fn test_present_text_is_never_defaulted() {
        let gke = emit_gke(&PropertyTree::new().with("name", Value::Null).with("location", 7));
        assert!(gke.contains("  name = null\n"));
        assert!(gke.contains("location = \"7\""));
        assert!(!gke.contains("example-gke\""));

        let s3 = emit_s3(&PropertyTree::new().with("name", Value::Null));
        assert!(s3.contains("bucket = null"));
        assert!(s3.contains("Name = null"));
    }

    #[test]
    fn test_aks_optional_fields() {
        let defaults = emit_aks(&PropertyTree::new().with("name", "a-aks"));
        assert!(defaults.contains("network_profile {\n    network_plugin = \"azure\"\n    network_policy = \"azure\"\n  }"));
        assert!(defaults.contains("role_based_access_control {\n    enabled = true\n  }"));
        assert!(defaults.contains("type = \"SystemAssigned\""));
        assert!(!defaults.contains("availability_zones"));
        assert!(!defaults.contains("api_server_authorized_ip_ranges"));

        let props = PropertyTree::new()
            .with("name", "a-aks")
            .with("networkPlugin", "kubenet")
            .with("networkPolicy", "calico")
            .with("identity", "UserAssigned")
            .with("availabilityZones", json!([1, "2"]))
            .with("enableRBAC", false)
            .with("apiServerAuthorizedIPRanges", "\"10.0.0.0/8\", 192.168.0.0/16")
            .with("nodePoolLabels", json!({"pool": "system"}));
        let body = emit_aks(&props);
        assert!(body.contains("network_plugin = \"kubenet\""));
        assert!(body.contains("network_policy = \"calico\""));
        assert!(body.contains("type = \"UserAssigned\""));
        assert!(body.contains("availability_zones = [\"1\", \"2\"]"));
        assert!(body.contains("api_server_authorized_ip_ranges = [\"10.0.0.0/8\", \"192.168.0.0/16\"]"));
        assert!(body.contains("pool = \"system\""));
        assert!(!body.contains("role_based_access_control"));
    }

    #[test]
    fn test_monitor_optional_fields() {
        let defaults = emit_monitor(&PropertyTree::new().with("name", "cpu"));
        assert!(!defaults.contains("enabled"));
        assert!(!defaults.contains("auto_mitigate"));
        assert!(!defaults.contains("action {"));

        let props = PropertyTree::new()
            .with("name", "cpu")
            .with("enabled", false)
            .with("evaluationFrequency", "PT1M")
            .with("windowSize", "PT5M")
            .with("autoMitigate", "false")
            .with("actions", json!(["ag-1", "ag-2"]));
        let body = emit_monitor(&props);
        assert!(body.contains("enabled = false\n"));
        assert!(body.contains("evaluation_frequency = \"PT1M\""));
        assert!(body.contains("window_size = \"PT5M\""));
        assert!(body.contains("auto_mitigate = false\n"));
        assert!(body.contains("action {\n    action_group_id = \"ag-1\"\n  }\n  action {\n    action_group_id = \"ag-2\"\n  }"));

        let disabled = emit_monitor(&PropertyTree::new().with("disabled", true));
        assert!(disabled.contains("enabled = false\n"));
    }

    #[test]
    fn test_log_analytics_optional_fields() {
        let defaults = emit_log_analytics(&PropertyTree::new().with("dailyQuotaGb", 0));
        assert!(defaults.contains("sku = \"PerGB2018\""));
        assert!(defaults.contains("retention_in_days = 30"));
        assert!(!defaults.contains("daily_quota_gb"));
        assert!(!defaults.contains("internet_"));

        let props = PropertyTree::new()
            .with("dailyQuotaGb", 5)
            .with("workspaceCapping", 10)
            .with("internetIngestionEnabled", true)
            .with("internetQueryEnabled", "1")
            .with("reservationCapacityInGbPerDay", 100)
            .with("tags", json!({"env": "prod"}));
        let body = emit_log_analytics(&props);
        assert!(body.contains("  daily_quota_gb = 5\n"));
        assert!(body.contains("workspace_capping {\n    daily_quota_gb = 10\n  }"));
        assert!(body.contains("internet_ingestion_enabled = true"));
        assert!(body.contains("internet_query_enabled = true"));
        assert!(body.contains("reservation_capacity_in_gb_per_day = 100"));
        assert!(body.contains("env = \"prod\""));
    }

    #[test]
    fn test_app_insights_optional_fields() {
        let defaults = emit_app_insights(&PropertyTree::new());
        assert!(defaults.contains("application_type = \"web\""));
        assert!(defaults.contains("retention_in_days = 90"));
        assert!(!defaults.contains("workspace_id"));
        assert!(!defaults.contains("disable_ip_masking"));

        let props = PropertyTree::new()
            .with("workspaceId", "/subscriptions/x/workspaces/logs")
            .with("dailyDataCapInGb", 2)
            .with("disableIpMasking", true)
            .with("tags", json!({"team": "web"}));
        let body = emit_app_insights(&props);
        assert!(body.contains("workspace_id = \"/subscriptions/x/workspaces/logs\""));
        assert!(body.contains("daily_data_cap_in_gb = 2"));
        assert!(body.contains("disable_ip_masking = true"));
        assert!(body.contains("team = \"web\""));
    }

    #[test]
    fn test_sanitize_label() {
        assert_eq!(sanitize_label("Demo-AKS"), "demo_aks");
        assert_eq!(sanitize_label("1bucket"), "_1bucket");
        assert_eq!(sanitize_label(""), "example");
    }
}
