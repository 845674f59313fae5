use crate::ids;
use infraguard_block::Block;
use infraguard_rules::{CheckCapability, CheckResult, Rule, RuleDocs, ScanContext};
use infraguard_types::{Finding, Severity};

pub fn rule() -> Rule {
    Rule::new(
        ids::AWS_API_GATEWAY_ENABLE_TRACING,
        Severity::Low,
        CheckCapability::per_block(check),
    )
    .with_provider("aws", "api-gateway")
    .with_summary("API Gateway stage does not have X-Ray tracing enabled.")
    .with_required_types(&["resource"])
    .with_required_labels(&["aws_api_gateway_stage"])
    .with_docs(RuleDocs {
        impact: "Without full tracing enabled it is difficult to trace the flow of logs".to_string(),
        resolution: "Enable tracing".to_string(),
        links: vec![
            "https://registry.terraform.io/providers/hashicorp/aws/latest/docs/resources/api_gateway_stage#xray_tracing_enabled".to_string(),
        ],
        bad_examples: vec![r#"
resource "aws_api_gateway_stage" "bad_example" {
  stage_name           = "prod"
  rest_api_id          = aws_api_gateway_rest_api.test.id
  xray_tracing_enabled = false
}
"#
        .to_string()],
        good_examples: vec![r#"
resource "aws_api_gateway_stage" "good_example" {
  stage_name           = "prod"
  rest_api_id          = aws_api_gateway_rest_api.test.id
  xray_tracing_enabled = true
}
"#
        .to_string()],
    })
}

fn check(block: &Block, _: &ScanContext<'_>) -> CheckResult {
    match block.attribute("xray_tracing_enabled") {
        None => Ok(vec![Finding::failed(
            format!("Resource '{}' does not enable X-Ray tracing.", block.full_name()),
            block.range.clone(),
        )]),
        Some(attr) if !attr.is_true() => Ok(vec![
            Finding::failed(
                format!("Resource '{}' explicitly disables X-Ray tracing.", block.full_name()),
                block.range.clone(),
            )
            .with_annotation(attr.range.clone()),
        ]),
        Some(_) => Ok(vec![Finding::passed(
            format!("Resource '{}' has X-Ray tracing enabled.", block.full_name()),
            block.range.clone(),
        )]),
    }
}
