//! Rule catalogue.
//!
//! A [`Rule`] pairs stable identity and documentation with a [`CheckCapability`].
//! Rules are registered once, before any scan, into an explicit [`RuleRegistry`];
//! the registry is read-only while scanning.

#![forbid(unsafe_code)]

mod check;
mod context;
mod registry;
mod rule;

pub use check::{BlockCheckFn, CheckCapability, CheckFault, CheckResult, ModuleCheckFn};
pub use context::ScanContext;
pub use registry::{RegisteredRule, RegistryError, RuleRegistry};
pub use rule::{Rule, RuleDocs};
