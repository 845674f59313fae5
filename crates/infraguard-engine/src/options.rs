use infraguard_types::Severity;
use infraguard_types::ids::DEFAULT_WORKSPACE;
use std::collections::{BTreeMap, BTreeSet};
use time::Date;

/// Everything a scan can be configured with.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScannerOptions {
    /// Surface passing results too.
    pub include_passed: bool,
    /// Surface results covered by ignore directives. Also bypasses `excluded_rule_ids`.
    pub include_ignored: bool,
    /// Rule ids or legacy ids to drop.
    pub excluded_rule_ids: BTreeSet<String>,
    /// Rule ids or legacy ids to keep. Empty keeps everything.
    pub included_rule_ids: BTreeSet<String>,
    /// Fail-soft when true: faulting checks contribute nothing and the scan continues.
    pub ignore_check_errors: bool,
    /// Active workspace, matched against `:ws:` scopes on ignore directives.
    pub workspace_name: String,
    /// Run checks on a single worker.
    pub single_thread: bool,
    /// Severity replacements keyed by rule id or legacy id.
    pub severity_overrides: BTreeMap<String, Severity>,
    /// Date against which directive expiry is evaluated. `None` means today (UTC).
    pub today: Option<Date>,
}

impl Default for ScannerOptions {
    fn default() -> Self {
        Self {
            include_passed: false,
            include_ignored: false,
            excluded_rule_ids: BTreeSet::new(),
            included_rule_ids: BTreeSet::new(),
            ignore_check_errors: true,
            workspace_name: DEFAULT_WORKSPACE.to_string(),
            single_thread: false,
            severity_overrides: BTreeMap::new(),
            today: None,
        }
    }
}

impl ScannerOptions {
    /// Worker count for the execution pool: available parallelism minus one, at least one.
    pub fn worker_count(&self) -> usize {
        if self.single_thread {
            return 1;
        }
        std::thread::available_parallelism()
            .map(|n| n.get().saturating_sub(1))
            .unwrap_or(1)
            .max(1)
    }
}
