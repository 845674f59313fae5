//! Result governance: severity overrides, ignore suppression, rule filters, passed visibility.

use crate::ScannerOptions;
use infraguard_inline_suppressions::IgnoreSet;
use infraguard_rules::RuleRegistry;
use infraguard_types::{ScanResult, Status};

#[derive(Debug, Default)]
pub struct Governed {
    pub results: Vec<ScanResult>,
    /// Dropped because an ignore directive covered them.
    pub ignored: usize,
    /// Dropped because their rule was excluded.
    pub excluded: usize,
}

pub struct Governor<'a> {
    options: &'a ScannerOptions,
    registry: &'a RuleRegistry,
    ignores: &'a IgnoreSet,
}

impl<'a> Governor<'a> {
    pub fn new(options: &'a ScannerOptions, registry: &'a RuleRegistry, ignores: &'a IgnoreSet) -> Self {
        Self {
            options,
            registry,
            ignores,
        }
    }

    /// Policies run in a fixed order per result: ignores, then inclusion, then
    /// exclusion, then passed visibility. `include_ignored` bypasses both ignores
    /// and exclusion; the bypassed results are flagged instead of dropped.
    pub fn govern(&self, raw: Vec<ScanResult>) -> Governed {
        let opts = self.options;
        let mut out = Governed::default();

        for mut result in raw {
            let legacy_id = self
                .registry
                .resolve_legacy_id(&result.rule_id)
                .or(result.legacy_id.as_deref())
                .map(str::to_string);
            let legacy_id = legacy_id.as_deref();

            if let Some(severity) = opts
                .severity_overrides
                .get(&result.rule_id)
                .or_else(|| legacy_id.and_then(|id| opts.severity_overrides.get(id)))
            {
                result.severity = *severity;
            }

            let covered = self
                .ignores
                .covering(
                    result.narrowest_range(),
                    &opts.workspace_name,
                    &result.rule_id,
                    legacy_id,
                )
                .is_some();
            if covered {
                if !opts.include_ignored {
                    tracing::debug!(rule_id = %result.rule_id, range = %result.narrowest_range(), "ignoring result");
                    out.ignored += 1;
                    continue;
                }
                result.ignored = true;
            }

            if !opts.included_rule_ids.is_empty()
                && !in_list(&result.rule_id, legacy_id, &opts.included_rule_ids)
            {
                continue;
            }

            if in_list(&result.rule_id, legacy_id, &opts.excluded_rule_ids) {
                if !opts.include_ignored {
                    tracing::debug!(rule_id = %result.rule_id, "excluding result");
                    out.excluded += 1;
                    continue;
                }
                result.excluded = true;
            }

            if opts.include_passed || result.status != Status::Passed {
                out.results.push(result);
            }
        }

        out
    }
}

fn in_list<'s>(
    rule_id: &str,
    legacy_id: Option<&str>,
    list: impl IntoIterator<Item = &'s String>,
) -> bool {
    list.into_iter()
        .any(|id| id == rule_id || legacy_id.is_some_and(|legacy| legacy == id))
}
