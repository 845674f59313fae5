use crate::ids;
use infraguard_block::{Block, CaseMode};
use infraguard_rules::{CheckCapability, CheckResult, Rule, RuleDocs, ScanContext};
use infraguard_types::{Finding, Severity};

pub fn rule() -> Rule {
    Rule::new(
        ids::AWS_KINESIS_ENABLE_IN_TRANSIT_ENCRYPTION,
        Severity::High,
        CheckCapability::per_block(check),
    )
    .with_legacy_id(ids::LEGACY_AWS_KINESIS_ENABLE_IN_TRANSIT_ENCRYPTION)
    .with_provider("aws", "kinesis")
    .with_summary("Kinesis stream is unencrypted.")
    .with_required_types(&["resource"])
    .with_required_labels(&["aws_kinesis_stream"])
    .with_docs(RuleDocs {
        impact: "Intercepted data can be read in transit".to_string(),
        resolution: "Enable in transit encryption".to_string(),
        links: vec![
            "https://registry.terraform.io/providers/hashicorp/aws/latest/docs/resources/kinesis_stream#encryption_type".to_string(),
        ],
        bad_examples: vec![r#"
resource "aws_kinesis_stream" "bad_example" {
  encryption_type = "NONE"
}
"#
        .to_string()],
        good_examples: vec![r#"
resource "aws_kinesis_stream" "good_example" {
  encryption_type = "KMS"
  kms_key_id      = "my/special/key"
}
"#
        .to_string()],
    })
}

fn check(block: &Block, _: &ScanContext<'_>) -> CheckResult {
    let message = format!(
        "Resource '{}' defines an unencrypted Kinesis Stream.",
        block.full_name()
    );

    let Some(encryption_type) = block.attribute("encryption_type") else {
        return Ok(vec![Finding::failed(message, block.range.clone())]);
    };

    if encryption_type.is_empty_string() || encryption_type.equals("NONE", CaseMode::Insensitive) {
        return Ok(vec![
            Finding::failed(message, block.range.clone())
                .with_annotation(encryption_type.range.clone()),
        ]);
    }

    Ok(vec![Finding::passed(
        format!("Resource '{}' encrypts its Kinesis Stream.", block.full_name()),
        block.range.clone(),
    )])
}
