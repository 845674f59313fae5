//! Execution pool: every applicable (rule, block) pair, evaluated once, on a bounded worker pool.

use crate::error::ScanError;
use crate::metrics::{Metrics, counter};
use infraguard_block::{Block, Module};
use infraguard_rules::{CheckFault, RegisteredRule, RuleRegistry, ScanContext};
use infraguard_types::ScanResult;
use infraguard_types::ids::{CATEGORY_RULES, COUNTER_SUPPRESSED_ERRORS};
use rayon::prelude::*;
use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicUsize, Ordering};

/// One unit of work. Independent of every other unit.
#[derive(Clone, Copy, Debug)]
pub struct WorkItem<'a> {
    pub entry: &'a RegisteredRule,
    pub module: &'a Module,
    pub block: &'a Block,
}

/// Flatten the scan into its applicable (rule, block) pairs, module order then block order.
pub fn plan<'a>(registry: &'a RuleRegistry, modules: &'a [Module]) -> Vec<WorkItem<'a>> {
    let mut work = Vec::new();
    for module in modules {
        for block in &module.blocks {
            for entry in registry.entries() {
                if entry.matches(block) {
                    work.push(WorkItem {
                        entry,
                        module,
                        block,
                    });
                }
            }
        }
    }
    work
}

#[derive(Debug, Default)]
pub struct PoolOutput {
    /// Unordered.
    pub results: Vec<ScanResult>,
    pub evaluations: usize,
    pub suppressed_errors: usize,
}

#[derive(Clone, Copy, Debug)]
pub struct ExecutionPool {
    workers: usize,
    ignore_check_errors: bool,
}

impl ExecutionPool {
    pub fn new(workers: usize, ignore_check_errors: bool) -> Self {
        Self {
            workers: workers.max(1),
            ignore_check_errors,
        }
    }

    pub fn workers(&self) -> usize {
        self.workers
    }

    /// Evaluate every pair in `work`.
    ///
    /// With `ignore_check_errors` a faulting pair contributes nothing and bumps
    /// `rules/suppressed errors`; otherwise the first fault aborts the run and no
    /// partial results are returned.
    pub fn run(
        &self,
        work: &[WorkItem<'_>],
        context: &ScanContext<'_>,
        metrics: &dyn Metrics,
    ) -> Result<PoolOutput, ScanError> {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(self.workers)
            .thread_name(|i| format!("infraguard-check-{i}"))
            .build()?;

        tracing::debug!(workers = self.workers, work_items = work.len(), "running checks");

        if self.ignore_check_errors {
            Ok(pool.install(|| run_fail_soft(work, context, metrics)))
        } else {
            pool.install(|| run_fail_hard(work, context))
        }
    }
}

fn run_fail_soft(work: &[WorkItem<'_>], context: &ScanContext<'_>, metrics: &dyn Metrics) -> PoolOutput {
    let suppressed = AtomicUsize::new(0);
    let errors = counter(metrics, CATEGORY_RULES, COUNTER_SUPPRESSED_ERRORS);

    let partitions: Vec<Vec<ScanResult>> = work
        .par_iter()
        .map(|item| match evaluate(item, context) {
            Ok(results) => results,
            Err(fault) => {
                suppressed.fetch_add(1, Ordering::Relaxed);
                errors.increment(1);
                tracing::debug!(
                    rule_id = %item.entry.rule().id,
                    block = %item.block.full_name(),
                    error = %fault,
                    "suppressed check fault"
                );
                Vec::new()
            }
        })
        .collect();

    PoolOutput {
        results: partitions.into_iter().flatten().collect(),
        evaluations: work.len(),
        suppressed_errors: suppressed.into_inner(),
    }
}

fn run_fail_hard(work: &[WorkItem<'_>], context: &ScanContext<'_>) -> Result<PoolOutput, ScanError> {
    let partitions: Vec<Vec<ScanResult>> = work
        .par_iter()
        .map(|item| {
            evaluate(item, context).map_err(|fault| ScanError::CheckFailed {
                rule_id: item.entry.rule().id.clone(),
                block: item.block.full_name(),
                fault,
            })
        })
        .collect::<Result<_, _>>()?;

    Ok(PoolOutput {
        results: partitions.into_iter().flatten().collect(),
        evaluations: work.len(),
        suppressed_errors: 0,
    })
}

/// Run one check, treating it as untrusted: panics become [`CheckFault::Panicked`].
fn evaluate(item: &WorkItem<'_>, context: &ScanContext<'_>) -> Result<Vec<ScanResult>, CheckFault> {
    let rule = item.entry.rule();
    let findings = panic::catch_unwind(AssertUnwindSafe(|| {
        rule.check.evaluate(item.block, item.module, context)
    }))
    .map_err(|payload| CheckFault::Panicked(panic_message(payload.as_ref())))??;

    Ok(findings
        .into_iter()
        .map(|mut finding| {
            if finding.range.is_empty() {
                finding.range = item.block.range.clone();
            }
            ScanResult::from_finding(&rule.id, rule.legacy_id(), rule.severity, finding)
        })
        .collect())
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "non-string panic payload".to_string()
    }
}
