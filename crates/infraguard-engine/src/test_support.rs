use infraguard_block::{Block, Module};
use infraguard_rules::{CheckCapability, CheckResult, Rule, RuleRegistry, ScanContext};
use infraguard_types::{Finding, ScanResult, Severity, SourceRange, Status};

pub fn registry_of(rules: Vec<Rule>) -> RuleRegistry {
    let mut registry = RuleRegistry::new();
    for rule in rules {
        registry.register(rule).expect("register test rule");
    }
    registry
}

/// Resource rule restricted to one resource type.
pub fn rule_on<F>(id: &str, type_label: &str, check: F) -> Rule
where
    F: Fn(&Block, &ScanContext<'_>) -> CheckResult + Send + Sync + 'static,
{
    Rule::new(id, Severity::High, CheckCapability::per_block(check))
        .with_required_types(&["resource"])
        .with_required_labels(&[type_label])
}

pub fn always_fail() -> impl Fn(&Block, &ScanContext<'_>) -> CheckResult + Send + Sync + 'static {
    |block, _| {
        Ok(vec![Finding::failed(
            format!("{} failed", block.full_name()),
            block.range.clone(),
        )])
    }
}

pub fn panicking() -> impl Fn(&Block, &ScanContext<'_>) -> CheckResult + Send + Sync + 'static {
    |_, _| panic!("rule exploded")
}

/// `n` Kinesis streams in `main.tf`, five lines apart.
pub fn kinesis_module(n: u32) -> Module {
    Module::new("root").with_blocks((0..n).map(|i| {
        let start = i * 5 + 1;
        Block::resource(
            "aws_kinesis_stream",
            &format!("s{i}"),
            SourceRange::new("main.tf", start, start + 3),
        )
    }))
}

pub fn result(rule_id: &str, status: Status, line: u32) -> ScanResult {
    let finding = match status {
        Status::Failed => Finding::failed("finding", SourceRange::line("main.tf", line)),
        Status::Passed => Finding::passed("finding", SourceRange::line("main.tf", line)),
    };
    ScanResult::from_finding(rule_id, None, Severity::High, finding)
}
