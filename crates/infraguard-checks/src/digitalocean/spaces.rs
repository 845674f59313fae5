use crate::ids;
use infraguard_block::{Block, CaseMode};
use infraguard_rules::{CheckCapability, CheckResult, Rule, RuleDocs, ScanContext};
use infraguard_types::{Finding, Severity};

pub fn rule() -> Rule {
    Rule::new(
        ids::DIGITALOCEAN_SPACES_ACL_NO_PUBLIC_READ,
        Severity::Critical,
        CheckCapability::per_block(check),
    )
    .with_legacy_id(ids::LEGACY_DIGITALOCEAN_SPACES_ACL_NO_PUBLIC_READ)
    .with_provider("digitalocean", "spaces")
    .with_summary("Spaces bucket or bucket object has public read acl set")
    .with_required_types(&["resource"])
    .with_required_labels(&[
        "digitalocean_spaces_bucket",
        "digitalocean_spaces_bucket_object",
    ])
    .with_docs(RuleDocs {
        impact: "The contents of the space can be accessed publicly".to_string(),
        resolution: "Apply a more restrictive ACL".to_string(),
        links: vec![
            "https://registry.terraform.io/providers/digitalocean/digitalocean/latest/docs/resources/spaces_bucket#acl".to_string(),
            "https://registry.terraform.io/providers/digitalocean/digitalocean/latest/docs/resources/spaces_bucket_object#acl".to_string(),
        ],
        bad_examples: vec![r#"
resource "digitalocean_spaces_bucket" "bad_example" {
  name   = "public_space"
  region = "nyc3"
  acl    = "public-read"
}
"#
        .to_string()],
        good_examples: vec![r#"
resource "digitalocean_spaces_bucket" "good_example" {
  name   = "private_space"
  region = "nyc3"
  acl    = "private"
}
"#
        .to_string()],
    })
}

fn check(block: &Block, _: &ScanContext<'_>) -> CheckResult {
    if let Some(acl) = block.attribute("acl")
        && acl.equals("public-read", CaseMode::Insensitive)
    {
        return Ok(vec![
            Finding::failed("Resource has a publicly readable acl.", block.range.clone())
                .with_annotation(acl.range.clone()),
        ]);
    }

    Ok(vec![Finding::passed(
        "Resource does not have a publicly readable acl.",
        block.range.clone(),
    )])
}
