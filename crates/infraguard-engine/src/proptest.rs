//! Property-based tests for the scan pipeline.
//!
//! These cover:
//! - ordered output independent of worker count
//! - every matching (rule, block) pair evaluated exactly once
//! - fault isolation under fail-soft
//! - ignore directives by legacy id behaving like those by current id
//! - inclusion narrowing before exclusion

use crate::Scanner;
use crate::test_support::registry_of;
use infraguard_block::{Block, Module};
use infraguard_inline_suppressions::{IgnoreDirective, RuleTarget};
use infraguard_rules::{CheckCapability, CheckFault, Rule, RuleRegistry};
use infraguard_types::{Finding, ScanResult, Severity, SourceRange};
use proptest::prelude::*;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use time::macros::date;

const TYPES: [&str; 4] = [
    "aws_kinesis_stream",
    "aws_s3_bucket",
    "aws_api_gateway_stage",
    "google_compute_instance",
];

// ============================================================================
// Strategies
// ============================================================================

/// Block type indices for one module; each block is four lines long.
fn arb_module() -> impl Strategy<Value = Vec<usize>> {
    prop::collection::vec(0..TYPES.len(), 0..40)
}

fn module_from(path: &str, types: &[usize]) -> Module {
    Module::new(path).with_blocks(types.iter().enumerate().map(|(i, &t)| {
        let start = i as u32 * 5 + 1;
        Block::resource(
            TYPES[t],
            &format!("b{i}"),
            SourceRange::new(path, start, start + 3),
        )
    }))
}

/// Fails even-numbered blocks, passes the rest.
fn parity_rule(id: &str, type_label: &str, calls: Arc<AtomicUsize>) -> Rule {
    Rule::new(
        id,
        Severity::Medium,
        CheckCapability::per_block(move |block, _| {
            calls.fetch_add(1, Ordering::Relaxed);
            let even = block
                .name_label()
                .and_then(|n| n.trim_start_matches('b').parse::<u32>().ok())
                .is_some_and(|n| n % 2 == 0);
            let finding = if even {
                Finding::failed(format!("{} is even", block.full_name()), block.range.clone())
            } else {
                Finding::passed(format!("{} is odd", block.full_name()), block.range.clone())
            };
            Ok(vec![finding])
        }),
    )
    .with_required_types(&["resource"])
    .with_required_labels(&[type_label])
}

fn counted_registry() -> (RuleRegistry, Vec<Arc<AtomicUsize>>) {
    let counters: Vec<Arc<AtomicUsize>> = TYPES.iter().map(|_| Arc::default()).collect();
    let mut rules: Vec<Rule> = TYPES
        .iter()
        .zip(&counters)
        .enumerate()
        .map(|(i, (t, c))| parity_rule(&format!("rule-{i}"), t, c.clone()))
        .collect();
    rules[0] = rules[0].clone().with_legacy_id("LEG000");
    (registry_of(rules), counters)
}

fn scan(scanner: &Scanner, modules: &[Module]) -> Vec<ScanResult> {
    scanner.scan(modules).expect("fail-soft scan never errors")
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn ordered_output_is_identical_for_any_worker_count(a in arb_module(), b in arb_module()) {
        let (registry, _) = counted_registry();
        let modules = vec![module_from("a.tf", &a), module_from("b.tf", &b)];
        let scanner = Scanner::new(Arc::new(registry)).with_include_passed(true);

        let serial = scan(&scanner.clone().with_single_thread(true), &modules);
        let parallel = scan(&scanner, &modules);
        let again = scan(&scanner, &modules);

        prop_assert_eq!(&serial, &parallel);
        prop_assert_eq!(&parallel, &again);
        prop_assert_eq!(serial.len(), a.len() + b.len());
    }

    #[test]
    fn every_matching_pair_is_evaluated_exactly_once(types in arb_module()) {
        let (registry, counters) = counted_registry();
        let modules = vec![module_from("main.tf", &types)];
        let report = Scanner::new(Arc::new(registry))
            .with_include_passed(true)
            .scan_report(&modules)
            .expect("scan");

        for (idx, counter) in counters.iter().enumerate() {
            let expected = types.iter().filter(|&&t| t == idx).count();
            prop_assert_eq!(counter.load(Ordering::Relaxed), expected);
        }
        prop_assert_eq!(report.data.evaluations as usize, types.len());

        let mut seen = std::collections::BTreeSet::new();
        for result in &report.results {
            prop_assert!(seen.insert((result.rule_id.clone(), result.range.clone())));
        }
    }

    #[test]
    fn faulting_rule_does_not_affect_other_results(types in arb_module()) {
        let modules = vec![module_from("main.tf", &types)];
        let (healthy, _) = counted_registry();
        let baseline = scan(&Scanner::new(Arc::new(healthy)), &modules);

        let (mut faulty, _) = counted_registry();
        faulty
            .register(
                Rule::new("zz-faulty", Severity::High, CheckCapability::per_block(|block, _| {
                    if block.name_label() == Some("b1") {
                        panic!("bad block");
                    }
                    Err(CheckFault::failed("always broken"))
                }))
                .with_required_types(&["resource"]),
            )
            .expect("register faulty");
        let report = Scanner::new(Arc::new(faulty)).scan_report(&modules).expect("fail-soft");

        prop_assert_eq!(&report.results, &baseline);
        prop_assert_eq!(report.data.suppressed_errors as usize, types.len());
    }

    #[test]
    fn legacy_id_ignores_match_current_id_ignores(types in arb_module(), line in 1u32..200) {
        let run = |target: &str| {
            let (registry, _) = counted_registry();
            let module = module_from("main.tf", &types);
            let directive = IgnoreDirective::new(
                RuleTarget::Rule(target.to_string()),
                SourceRange::line("main.tf", line),
            );
            let module = Module { ignores: vec![directive], ..module };
            Scanner::new(Arc::new(registry))
                .with_today(date!(2026 - 10 - 19))
                .scan_report(&[module])
                .expect("scan")
        };

        let by_id = run("rule-0");
        let by_legacy = run("LEG000");
        prop_assert_eq!(&by_id.results, &by_legacy.results);
        prop_assert_eq!(by_id.data.ignored, by_legacy.data.ignored);
    }

    #[test]
    fn same_id_included_and_excluded_yields_nothing(types in arb_module(), pick in 0..TYPES.len(), legacy in any::<bool>()) {
        let (registry, _) = counted_registry();
        let id = if legacy && pick == 0 { "LEG000".to_string() } else { format!("rule-{pick}") };
        let results = scan(
            &Scanner::new(Arc::new(registry))
                .with_include_passed(true)
                .with_included_rule_ids([id.clone()])
                .with_excluded_rule_ids([id]),
            &[module_from("main.tf", &types)],
        );
        prop_assert!(results.is_empty());
    }
}

#[test]
fn hundred_blocks_five_rules_two_workers() {
    let counters: Vec<Arc<AtomicUsize>> = (0..5).map(|_| Arc::default()).collect();
    let labels = ["t0", "t1", "t2", "t3", "t4"];
    let rules = labels
        .iter()
        .zip(&counters)
        .enumerate()
        .rev()
        .map(|(i, (label, calls))| parity_rule(&format!("rule-{i}"), label, calls.clone()))
        .collect();
    let registry = registry_of(rules);

    let module = Module::new("root").with_blocks((0..100u32).map(|i| {
        let start = i * 5 + 1;
        Block::resource(
            labels[(i % 5) as usize],
            &format!("b{i}"),
            SourceRange::new("main.tf", start, start + 3),
        )
    }));

    let modules = vec![module];
    let work = crate::pool::plan(&registry, &modules);
    assert_eq!(work.len(), 100);

    let context = infraguard_rules::ScanContext::adapt(&modules, "default");
    let output = crate::pool::ExecutionPool::new(2, true)
        .run(&work, &context, &crate::NoopMetrics)
        .expect("run");
    assert_eq!(output.evaluations, 100);
    assert!(counters.iter().all(|c| c.load(Ordering::Relaxed) == 20));

    let mut results = output.results;
    crate::sequencer::sequence(&mut results);
    assert_eq!(results.len(), 100);
    let ids: Vec<&str> = results.iter().map(|r| r.rule_id.as_str()).collect();
    let mut grouped = ids.clone();
    grouped.sort();
    assert_eq!(ids, grouped);

    let mut unique: Vec<(String, SourceRange)> = results
        .iter()
        .map(|r| (r.rule_id.clone(), r.range.clone()))
        .collect();
    unique.dedup();
    assert_eq!(unique.len(), 100);
}
