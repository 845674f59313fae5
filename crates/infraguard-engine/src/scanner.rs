use crate::error::ScanError;
use crate::governor::Governor;
use crate::metrics::{Metrics, NoopMetrics, counter, timer};
use crate::options::ScannerOptions;
use crate::pool::{ExecutionPool, plan};
use crate::sequencer::sequence;
use infraguard_block::Module;
use infraguard_inline_suppressions::IgnoreSet;
use infraguard_rules::{RuleRegistry, ScanContext};
use infraguard_types::ids::{
    CATEGORY_RESULTS, CATEGORY_TIMINGS, COUNTER_EXCLUDED, COUNTER_IGNORED, TIMER_ADAPTATION,
    TIMER_RUNNING_CHECKS,
};
use infraguard_types::{ScanData, ScanResult, Severity};
use std::collections::BTreeMap;
use std::sync::Arc;
use time::{Date, OffsetDateTime};

/// Governed, ordered results plus a summary of how they were produced.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScanReport {
    pub results: Vec<ScanResult>,
    pub data: ScanData,
}

/// Runs every registered rule over a set of modules and governs the output.
///
/// A scanner is cheap to clone and holds no per-scan state, so one instance can
/// serve any number of scans.
#[derive(Clone, Debug)]
pub struct Scanner {
    registry: Arc<RuleRegistry>,
    options: ScannerOptions,
    metrics: Arc<dyn Metrics>,
}

impl Scanner {
    pub fn new(registry: Arc<RuleRegistry>) -> Self {
        Self::with_options(registry, ScannerOptions::default())
    }

    pub fn with_options(registry: Arc<RuleRegistry>, options: ScannerOptions) -> Self {
        Self {
            registry,
            options,
            metrics: Arc::new(NoopMetrics),
        }
    }

    pub fn with_include_passed(mut self, include: bool) -> Self {
        self.options.include_passed = include;
        self
    }

    pub fn with_include_ignored(mut self, include: bool) -> Self {
        self.options.include_ignored = include;
        self
    }

    pub fn with_excluded_rule_ids<I, S>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.options.excluded_rule_ids = ids.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_included_rule_ids<I, S>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.options.included_rule_ids = ids.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_ignore_check_errors(mut self, ignore: bool) -> Self {
        self.options.ignore_check_errors = ignore;
        self
    }

    pub fn with_workspace_name(mut self, workspace: impl Into<String>) -> Self {
        self.options.workspace_name = workspace.into();
        self
    }

    pub fn with_single_thread(mut self, single: bool) -> Self {
        self.options.single_thread = single;
        self
    }

    pub fn with_metrics(mut self, metrics: Arc<dyn Metrics>) -> Self {
        self.metrics = metrics;
        self
    }

    pub fn with_severity_overrides(mut self, overrides: BTreeMap<String, Severity>) -> Self {
        self.options.severity_overrides = overrides;
        self
    }

    pub fn with_today(mut self, today: Date) -> Self {
        self.options.today = Some(today);
        self
    }

    pub fn options(&self) -> &ScannerOptions {
        &self.options
    }

    pub fn registry(&self) -> &RuleRegistry {
        &self.registry
    }

    pub fn scan(&self, modules: &[Module]) -> Result<Vec<ScanResult>, ScanError> {
        self.scan_report(modules).map(|report| report.results)
    }

    /// Adapt, run checks, govern, sequence.
    ///
    /// Either every applicable check ran and the results are fully governed, or
    /// an error is returned and nothing else.
    pub fn scan_report(&self, modules: &[Module]) -> Result<ScanReport, ScanError> {
        let metrics = self.metrics.as_ref();
        let opts = &self.options;

        let adaptation = timer(metrics, CATEGORY_TIMINGS, TIMER_ADAPTATION);
        let context = ScanContext::adapt(modules, &opts.workspace_name);
        let work = plan(&self.registry, modules);
        adaptation.stop();

        let running = timer(metrics, CATEGORY_TIMINGS, TIMER_RUNNING_CHECKS);
        let pool = ExecutionPool::new(opts.worker_count(), opts.ignore_check_errors);
        let output = pool.run(&work, &context, metrics)?;
        running.stop();

        let today = opts
            .today
            .unwrap_or_else(|| OffsetDateTime::now_utc().date());
        let ignores = IgnoreSet::new(
            modules
                .iter()
                .flat_map(|m| m.ignores().iter().cloned())
                .collect(),
            today,
        );

        let findings_total = output.results.len();
        let governed = Governor::new(opts, &self.registry, &ignores).govern(output.results);
        counter(metrics, CATEGORY_RESULTS, COUNTER_IGNORED).increment(governed.ignored as u64);
        counter(metrics, CATEGORY_RESULTS, COUNTER_EXCLUDED).increment(governed.excluded as u64);

        let mut results = governed.results;
        sequence(&mut results);

        let data = ScanData {
            workspace: opts.workspace_name.clone(),
            modules_scanned: count(modules.len()),
            blocks_scanned: count(context.block_count()),
            rules_registered: count(self.registry.len()),
            evaluations: count(output.evaluations),
            findings_total: count(findings_total),
            ignored: count(governed.ignored),
            excluded: count(governed.excluded),
            suppressed_errors: count(output.suppressed_errors),
            results_emitted: count(results.len()),
        };

        tracing::debug!(
            evaluations = data.evaluations,
            findings = data.findings_total,
            ignored = data.ignored,
            excluded = data.excluded,
            emitted = data.results_emitted,
            "scan complete"
        );

        Ok(ScanReport { results, data })
    }
}

/// Report counts saturate at `u32::MAX`.
fn count(n: usize) -> u32 {
    u32::try_from(n).unwrap_or(u32::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::InMemoryMetrics;
    use crate::test_support::{always_fail, kinesis_module, panicking, registry_of, rule_on};
    use infraguard_rules::CheckFault;
    use time::macros::date;

    fn scanner() -> Scanner {
        let registry = registry_of(vec![
            rule_on("kinesis", "aws_kinesis_stream", always_fail()).with_legacy_id("K001"),
            rule_on("flaky", "aws_kinesis_stream", |_, _| Err(CheckFault::failed("flaky"))),
        ]);
        Scanner::new(Arc::new(registry)).with_today(date!(2026 - 10 - 19))
    }

    #[test]
    fn emits_timers_and_counters() {
        let metrics = Arc::new(InMemoryMetrics::new());
        let scanner = scanner()
            .with_excluded_rule_ids(["K001"])
            .with_metrics(metrics.clone());
        let report = scanner.scan_report(&[kinesis_module(3)]).expect("scan");

        assert!(report.results.is_empty());
        assert_eq!(report.data.evaluations, 6);
        assert_eq!(report.data.suppressed_errors, 3);
        assert_eq!(report.data.excluded, 3);
        assert_eq!(metrics.counter("results", "excluded"), 3);
        assert_eq!(metrics.counter("results", "ignored"), 0);
        assert_eq!(metrics.counter("rules", "suppressed errors"), 3);
        assert_eq!(metrics.timings("timings", "adaptation").len(), 1);
        assert_eq!(metrics.timings("timings", "running checks").len(), 1);
    }

    #[test]
    fn fail_hard_returns_error_and_no_results() {
        let err = scanner()
            .with_ignore_check_errors(false)
            .scan(&[kinesis_module(2)])
            .expect_err("fault propagates");
        assert!(matches!(err, ScanError::CheckFailed { ref rule_id, .. } if rule_id == "flaky"));
        assert!(err.to_string().contains("flaky"));
    }

    #[test]
    fn fail_hard_surfaces_panics_as_faults() {
        let registry = registry_of(vec![rule_on("boom", "aws_kinesis_stream", panicking())]);
        let outcome = Scanner::new(Arc::new(registry))
            .with_ignore_check_errors(false)
            .scan(&[kinesis_module(2)]);

        match outcome {
            Err(ScanError::CheckFailed {
                rule_id,
                fault: CheckFault::Panicked(msg),
                ..
            }) => {
                assert_eq!(rule_id, "boom");
                assert_eq!(msg, "rule exploded");
            }
            other => panic!("expected a panicked check fault, got {other:?}"),
        }
    }

    #[test]
    fn counts_saturate_instead_of_wrapping() {
        assert_eq!(count(7), 7);
        assert_eq!(count(u32::MAX as usize), u32::MAX);
        if let Ok(over) = usize::try_from(u64::from(u32::MAX) + 5) {
            assert_eq!(count(over), u32::MAX);
        }
    }

    #[test]
    fn report_data_summarises_scan() {
        let report = scanner()
            .with_workspace_name("prod")
            .scan_report(&[kinesis_module(2), kinesis_module(1)])
            .expect("scan");
        assert_eq!(report.data.workspace, "prod");
        assert_eq!(report.data.modules_scanned, 2);
        assert_eq!(report.data.blocks_scanned, 3);
        assert_eq!(report.data.rules_registered, 2);
        assert_eq!(report.data.findings_total, 3);
        assert_eq!(report.data.results_emitted, 3);
    }
}
