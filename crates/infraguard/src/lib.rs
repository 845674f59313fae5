//! Public facade over infraguard.
//!
//! ```no_run
//! use infraguard::{Block, Module, SourceRange, default_scanner};
//!
//! let module = Module::new("root").with_block(Block::resource(
//!     "aws_kinesis_stream",
//!     "logs",
//!     SourceRange::new("main.tf", 1, 4),
//! ));
//! let results = default_scanner()?.scan(&[module])?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

#![forbid(unsafe_code)]

use std::sync::Arc;

pub use infraguard_block::{Attribute, Block, CaseMode, Module, Value, ValueKind};
pub use infraguard_checks::{builtin_rules, ids as rule_ids, register_all};
pub use infraguard_engine::{
    InMemoryMetrics, Metrics, NoopMetrics, ScanError, ScanReport, Scanner, ScannerOptions,
};
pub use infraguard_inline_suppressions::{IgnoreDirective, IgnoreSet, RuleTarget, parse_ignores};
pub use infraguard_rules::{
    CheckCapability, CheckFault, CheckResult, RegistryError, Rule, RuleDocs, RuleRegistry,
    ScanContext,
};
pub use infraguard_settings::{
    InfraguardConfigV1, Overrides, ResolvedConfig, parse_config_toml, resolve_config,
};
pub use infraguard_types::{Finding, ScanData, ScanResult, Severity, SourceRange, Status};

/// Registry holding every built-in rule enabled in this build.
pub fn default_registry() -> Result<RuleRegistry, RegistryError> {
    let mut registry = RuleRegistry::new();
    register_all(&mut registry)?;
    Ok(registry)
}

/// Scanner over [`default_registry`] with default options.
pub fn default_scanner() -> Result<Scanner, RegistryError> {
    Ok(Scanner::new(Arc::new(default_registry()?)))
}

/// Scanner over [`default_registry`] configured from `infraguard.toml` text.
pub fn scanner_from_config(toml: &str, overrides: Overrides) -> anyhow::Result<Scanner> {
    let cfg = parse_config_toml(toml)?;
    let resolved = resolve_config(cfg, overrides)?;
    let registry = default_registry()?;
    Ok(Scanner::with_options(Arc::new(registry), resolved.options))
}
