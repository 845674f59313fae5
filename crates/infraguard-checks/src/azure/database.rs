use crate::ids;
use infraguard_block::{Block, CaseMode, Module};
use infraguard_rules::{CheckCapability, CheckResult, Rule, RuleDocs};
use infraguard_types::{Finding, Severity};

const CONFIGURATION_TYPE: &str = "azurerm_postgresql_configuration";

pub fn rule() -> Rule {
    Rule::new(
        ids::AZURE_DATABASE_POSTGRES_CONFIGURATION_LOG_CONNECTIONS,
        Severity::Medium,
        CheckCapability::per_module(check),
    )
    .with_provider("azure", "database")
    .with_summary("Ensure server parameter 'log_connections' is set to 'ON' for PostgreSQL Database Server")
    .with_required_types(&["resource"])
    .with_required_labels(&["azurerm_postgresql_server"])
    .with_docs(RuleDocs {
        impact: "No visibility of successful connections".to_string(),
        resolution: "Enable connection logging".to_string(),
        links: vec![
            "https://registry.terraform.io/providers/hashicorp/azurerm/latest/docs/resources/postgresql_configuration".to_string(),
            "https://docs.microsoft.com/en-us/azure/postgresql/concepts-server-logs#configure-logging".to_string(),
        ],
        bad_examples: vec![r#"
resource "azurerm_postgresql_server" "example" {
  name     = "example-psqlserver"
  sku_name = "GP_Gen5_4"
  version  = "9.6"
}
"#
        .to_string()],
        good_examples: vec![r#"
resource "azurerm_postgresql_server" "example" {
  name     = "example-psqlserver"
  sku_name = "GP_Gen5_4"
  version  = "9.6"
}

resource "azurerm_postgresql_configuration" "example" {
  name                = "log_connections"
  resource_group_name = azurerm_resource_group.example.name
  server_name         = azurerm_postgresql_server.example.name
  value               = "on"
}
"#
        .to_string()],
    })
}

fn check(block: &Block, module: &Module) -> CheckResult {
    let enabled = module
        .referencing_blocks(block, CONFIGURATION_TYPE, "server_name")
        .into_iter()
        .any(|config| {
            let named = config
                .attribute("name")
                .is_some_and(|a| a.equals("log_connections", CaseMode::Sensitive));
            let on = config
                .attribute("value")
                .is_some_and(|a| a.equals("on", CaseMode::Insensitive));
            named && on
        });

    if enabled {
        return Ok(vec![Finding::passed(
            "Resource has a log configuration enabling 'log_connections'",
            block.range.clone(),
        )]);
    }

    Ok(vec![Finding::failed(
        "Resource does not have a corresponding log configuration enabling 'log_connections'",
        block.range.clone(),
    )])
}
