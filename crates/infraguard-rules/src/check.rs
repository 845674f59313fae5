use crate::context::ScanContext;
use infraguard_block::{Block, Module};
use infraguard_types::Finding;
use std::fmt;
use std::sync::Arc;

/// Why a single rule evaluation produced no usable output.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum CheckFault {
    #[error("{0}")]
    Failed(String),

    #[error("check panicked: {0}")]
    Panicked(String),
}

impl CheckFault {
    pub fn failed(message: impl Into<String>) -> Self {
        CheckFault::Failed(message.into())
    }
}

pub type CheckResult = Result<Vec<Finding>, CheckFault>;

/// Check over one block, with the shared read-only scan context.
pub type BlockCheckFn = dyn Fn(&Block, &ScanContext<'_>) -> CheckResult + Send + Sync;

/// Check over one block, with the module it belongs to (for cross-resource references).
pub type ModuleCheckFn = dyn Fn(&Block, &Module) -> CheckResult + Send + Sync;

/// The two supported check signatures, normalized to one dispatchable value.
#[derive(Clone)]
pub enum CheckCapability {
    PerBlock(Arc<BlockCheckFn>),
    PerModule(Arc<ModuleCheckFn>),
}

impl CheckCapability {
    pub fn per_block<F>(f: F) -> Self
    where
        F: Fn(&Block, &ScanContext<'_>) -> CheckResult + Send + Sync + 'static,
    {
        CheckCapability::PerBlock(Arc::new(f))
    }

    pub fn per_module<F>(f: F) -> Self
    where
        F: Fn(&Block, &Module) -> CheckResult + Send + Sync + 'static,
    {
        CheckCapability::PerModule(Arc::new(f))
    }

    pub fn evaluate(&self, block: &Block, module: &Module, context: &ScanContext<'_>) -> CheckResult {
        match self {
            CheckCapability::PerBlock(check) => check(block, context),
            CheckCapability::PerModule(check) => check(block, module),
        }
    }
}

impl fmt::Debug for CheckCapability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CheckCapability::PerBlock(_) => f.write_str("PerBlock(..)"),
            CheckCapability::PerModule(_) => f.write_str("PerModule(..)"),
        }
    }
}
