use crate::ids;
use infraguard_block::{Block, Value};
use infraguard_rules::{CheckCapability, CheckResult, Rule, RuleDocs, ScanContext};
use infraguard_types::{Finding, Severity};

pub fn rule() -> Rule {
    Rule::new(
        ids::GOOGLE_COMPUTE_PROJECT_LEVEL_OSLOGIN,
        Severity::Medium,
        CheckCapability::per_block(check),
    )
    .with_provider("google", "compute")
    .with_summary("OS Login should be enabled at project level")
    .with_required_types(&["resource"])
    .with_required_labels(&["google_compute_project_metadata"])
    .with_docs(RuleDocs {
        impact: "Access via SSH key cannot be revoked automatically when an IAM user is removed"
            .to_string(),
        resolution: "Enable OS Login at project level".to_string(),
        links: vec![
            "https://registry.terraform.io/providers/hashicorp/google/latest/docs/resources/compute_project_metadata".to_string(),
        ],
        bad_examples: vec![r#"
resource "google_compute_project_metadata" "default" {
  metadata = {
    enable-oslogin = false
  }
}
"#
        .to_string()],
        good_examples: vec![r#"
resource "google_compute_project_metadata" "default" {
  metadata = {
    enable-oslogin = true
  }
}
"#
        .to_string()],
    })
}

fn check(block: &Block, _: &ScanContext<'_>) -> CheckResult {
    let metadata = block.attribute("metadata");
    let enable_oslogin = metadata.and_then(|m| m.map_value("enable-oslogin"));

    match (metadata, enable_oslogin) {
        (_, None) | (_, Some(Value::Null)) => Ok(vec![Finding::failed(
            format!("Resource '{}' has OS Login disabled by default", block.full_name()),
            block.range.clone(),
        )]),
        (Some(metadata), Some(value)) if value.as_bool() == Some(false) => Ok(vec![
            Finding::failed(
                format!("Resource '{}' has OS Login explicitly disabled", block.full_name()),
                block.range.clone(),
            )
            .with_annotation(metadata.range.clone()),
        ]),
        _ => Ok(vec![Finding::passed(
            format!("Resource '{}' has OS Login enabled", block.full_name()),
            block.range.clone(),
        )]),
    }
}
