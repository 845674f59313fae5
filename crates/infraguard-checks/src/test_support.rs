use infraguard_block::{Attribute, Block, Module, Value};
use infraguard_rules::{Rule, RuleRegistry, ScanContext};
use infraguard_types::{Finding, SourceRange, Status};

pub const FILE: &str = "main.tf";

pub fn range(start: u32, end: u32) -> SourceRange {
    SourceRange::new(FILE, start, end)
}

pub fn attr(name: &str, value: impl Into<Value>, line: u32) -> Attribute {
    Attribute::new(name, value, range(line, line))
}

pub fn resource(type_label: &str, name: &str, start: u32, end: u32) -> Block {
    Block::resource(type_label, name, range(start, end))
}

pub fn nested(kind: &str, start: u32, end: u32) -> Block {
    Block::new(kind, Vec::<String>::new(), range(start, end))
}

/// Run `rule` over every matching block of `module`, the way the engine would (serially).
pub fn evaluate(rule: Rule, module: Module) -> Vec<Finding> {
    let mut registry = RuleRegistry::new();
    registry.register(rule).expect("register rule under test");
    let entry = &registry.entries()[0];

    let modules = vec![module];
    let context = ScanContext::adapt(&modules, "default");
    let mut out = Vec::new();
    for block in &modules[0].blocks {
        if entry.matches(block) {
            out.extend(
                entry
                    .rule()
                    .check
                    .evaluate(block, &modules[0], &context)
                    .expect("check succeeds"),
            );
        }
    }
    out
}

pub fn failed(findings: &[Finding]) -> Vec<&Finding> {
    findings
        .iter()
        .filter(|f| f.status == Status::Failed)
        .collect()
}
