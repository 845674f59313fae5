use crate::ids;
use infraguard_block::{Block, CaseMode};
use infraguard_rules::{CheckCapability, CheckResult, Rule, RuleDocs, ScanContext};
use infraguard_types::{Finding, Severity};

pub fn rule() -> Rule {
    Rule::new(
        ids::AZURE_KEYVAULT_SPECIFY_NETWORK_ACL,
        Severity::Critical,
        CheckCapability::per_block(check),
    )
    .with_legacy_id(ids::LEGACY_AZURE_KEYVAULT_SPECIFY_NETWORK_ACL)
    .with_provider("azure", "keyvault")
    .with_summary("Key vault should have the network acl block specified")
    .with_required_types(&["resource"])
    .with_required_labels(&["azurerm_key_vault"])
    .with_docs(RuleDocs {
        impact: "Without a network ACL the key vault is freely accessible".to_string(),
        resolution: "Set a network ACL for the key vault".to_string(),
        links: vec![
            "https://registry.terraform.io/providers/hashicorp/azurerm/latest/docs/resources/key_vault#network_acls".to_string(),
        ],
        bad_examples: vec![r#"
resource "azurerm_key_vault" "bad_example" {
  name                        = "examplekeyvault"
  enabled_for_disk_encryption = true
  purge_protection_enabled    = false
}
"#
        .to_string()],
        good_examples: vec![r#"
resource "azurerm_key_vault" "good_example" {
  name                        = "examplekeyvault"
  enabled_for_disk_encryption = true
  purge_protection_enabled    = false

  network_acls {
    bypass         = "AzureServices"
    default_action = "Deny"
  }
}
"#
        .to_string()],
    })
}

fn check(block: &Block, _: &ScanContext<'_>) -> CheckResult {
    let Some(default_action) = block.attribute("network_acls.default_action") else {
        return Ok(vec![Finding::failed(
            "Resource does not specify a network acl block with a default action.",
            block.range.clone(),
        )]);
    };

    if !default_action.equals("Deny", CaseMode::Sensitive) {
        return Ok(vec![
            Finding::failed(
                "Resource specifies a network acl that does not deny by default.",
                block.range.clone(),
            )
            .with_annotation(default_action.range.clone()),
        ]);
    }

    Ok(vec![Finding::passed(
        "Resource specifies a network acl that denies by default.",
        block.range.clone(),
    )])
}
