use crate::model::{CONFIG_SCHEMA_ID, InfraguardConfigV1};
use anyhow::Context;
use infraguard_engine::ScannerOptions;
use infraguard_types::Severity;
use std::collections::BTreeSet;

/// Caller-supplied values that win over the config file.
#[derive(Clone, Debug, Default)]
pub struct Overrides {
    pub include_passed: Option<bool>,
    pub include_ignored: Option<bool>,
    pub ignore_check_errors: Option<bool>,
    pub workspace: Option<String>,
    pub single_thread: Option<bool>,
    /// Added to the config file's `exclude` list.
    pub exclude: Vec<String>,
    /// Replaces the config file's `include` list when non-empty.
    pub include: Vec<String>,
}

#[derive(Clone, Debug)]
pub struct ResolvedConfig {
    pub options: ScannerOptions,
}

pub fn resolve_config(
    cfg: InfraguardConfigV1,
    overrides: Overrides,
) -> anyhow::Result<ResolvedConfig> {
    if let Some(schema) = cfg.schema.as_deref()
        && schema != CONFIG_SCHEMA_ID
    {
        anyhow::bail!("unsupported config schema: {schema} (expected {CONFIG_SCHEMA_ID})");
    }

    let mut options = ScannerOptions::default();

    if let Some(v) = overrides.include_passed.or(cfg.include_passed) {
        options.include_passed = v;
    }
    if let Some(v) = overrides.include_ignored.or(cfg.include_ignored) {
        options.include_ignored = v;
    }
    if let Some(v) = overrides.ignore_check_errors.or(cfg.ignore_check_errors) {
        options.ignore_check_errors = v;
    }
    if let Some(v) = overrides.single_thread.or(cfg.single_thread) {
        options.single_thread = v;
    }
    if let Some(ws) = overrides.workspace.or(cfg.workspace) {
        if ws.trim().is_empty() {
            anyhow::bail!("workspace must not be empty");
        }
        options.workspace_name = ws;
    }

    options.excluded_rule_ids = rule_ids("exclude", cfg.exclude.into_iter().chain(overrides.exclude))?;
    let include = if overrides.include.is_empty() {
        cfg.include
    } else {
        overrides.include
    };
    options.included_rule_ids = rule_ids("include", include)?;

    for (rule_id, sev) in &cfg.severity_overrides {
        let severity =
            parse_severity(sev).with_context(|| format!("invalid severity for {rule_id}"))?;
        options.severity_overrides.insert(rule_id.clone(), severity);
    }

    Ok(ResolvedConfig { options })
}

fn rule_ids(key: &str, ids: impl IntoIterator<Item = String>) -> anyhow::Result<BTreeSet<String>> {
    let mut out = BTreeSet::new();
    for id in ids {
        let id = id.trim();
        if id.is_empty() {
            anyhow::bail!("empty rule id in `{key}`");
        }
        out.insert(id.to_string());
    }
    Ok(out)
}

fn parse_severity(v: &str) -> anyhow::Result<Severity> {
    match v.to_ascii_lowercase().as_str() {
        "low" => Ok(Severity::Low),
        "medium" => Ok(Severity::Medium),
        "high" => Ok(Severity::High),
        "critical" => Ok(Severity::Critical),
        other => anyhow::bail!("unknown severity: {other} (expected low|medium|high|critical)"),
    }
}
