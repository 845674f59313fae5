use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub const CONFIG_SCHEMA_ID: &str = "infraguard.config.v1";

/// `infraguard.toml` schema v1.
///
/// Unset keys fall back to the scanner defaults.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct InfraguardConfigV1 {
    /// Optional schema string for tooling (`infraguard.config.v1`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<String>,

    /// Report passing results as well as failures.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub include_passed: Option<bool>,

    /// Report results covered by ignore directives; also disables `exclude`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub include_ignored: Option<bool>,

    /// Rule ids or legacy ids to drop.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub exclude: Vec<String>,

    /// Rule ids or legacy ids to keep; empty keeps all.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub include: Vec<String>,

    /// Skip faulting checks instead of failing the scan (default true).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ignore_check_errors: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub workspace: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub single_thread: Option<bool>,

    /// Map of rule id (or legacy id) -> `low|medium|high|critical`.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub severity_overrides: BTreeMap<String, String>,
}
