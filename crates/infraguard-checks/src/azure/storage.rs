use crate::ids;
use infraguard_block::{Block, CaseMode};
use infraguard_rules::{CheckCapability, CheckResult, Rule, RuleDocs, ScanContext};
use infraguard_types::{Finding, Severity};

pub fn rule() -> Rule {
    Rule::new(
        ids::AZURE_STORAGE_DEFAULT_ACTION_DENY,
        Severity::Critical,
        CheckCapability::per_block(check),
    )
    .with_legacy_id(ids::LEGACY_AZURE_STORAGE_DEFAULT_ACTION_DENY)
    .with_provider("azure", "storage")
    .with_summary("The default action on Storage account network rules should be set to deny")
    .with_required_types(&["resource"])
    .with_required_labels(&[
        "azurerm_storage_account",
        "azurerm_storage_account_network_rules",
    ])
    .with_docs(RuleDocs {
        impact: "Network rules that allow could cause data to be exposed publicly".to_string(),
        resolution: "Set network rules to deny".to_string(),
        links: vec![
            "https://registry.terraform.io/providers/hashicorp/azurerm/latest/docs/resources/storage_account_network_rules#default_action".to_string(),
        ],
        bad_examples: vec![r#"
resource "azurerm_storage_account_network_rules" "bad_example" {
  default_action = "Allow"
  ip_rules       = ["127.0.0.1"]
  bypass         = ["Metrics"]
}
"#
        .to_string()],
        good_examples: vec![r#"
resource "azurerm_storage_account_network_rules" "good_example" {
  default_action = "Deny"
  ip_rules       = ["127.0.0.1"]
  bypass         = ["Metrics"]
}
"#
        .to_string()],
    })
}

fn check(block: &Block, _: &ScanContext<'_>) -> CheckResult {
    // Storage accounts carry their rules in a nested block; the standalone
    // network rules resource carries them at the top level.
    let rules = if block.is_resource_type("azurerm_storage_account") {
        match block.block("network_rules") {
            Some(nested) => nested,
            None => return Ok(Vec::new()),
        }
    } else {
        block
    };

    if let Some(default_action) = rules.attribute("default_action")
        && default_action.equals("Allow", CaseMode::Insensitive)
    {
        return Ok(vec![
            Finding::failed(
                "Resource defines a default_action of Allow. It should be Deny.",
                block.range.clone(),
            )
            .with_annotation(default_action.range.clone()),
        ]);
    }

    Ok(vec![Finding::passed(
        "Resource does not allow network access by default.",
        block.range.clone(),
    )])
}
