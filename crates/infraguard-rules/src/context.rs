use infraguard_block::{Block, Module};
use std::collections::BTreeMap;

/// Read-only view over everything being scanned, shared by all workers.
///
/// Built once per scan (the "adaptation" phase) and never mutated afterwards.
#[derive(Debug)]
pub struct ScanContext<'a> {
    modules: &'a [Module],
    workspace: &'a str,
    resources: BTreeMap<&'a str, Vec<&'a Block>>,
}

impl<'a> ScanContext<'a> {
    pub fn adapt(modules: &'a [Module], workspace: &'a str) -> Self {
        let mut resources: BTreeMap<&'a str, Vec<&'a Block>> = BTreeMap::new();
        for module in modules {
            for block in &module.blocks {
                if block.kind != "resource" {
                    continue;
                }
                if let Some(type_label) = block.type_label() {
                    resources.entry(type_label).or_default().push(block);
                }
            }
        }
        Self {
            modules,
            workspace,
            resources,
        }
    }

    pub fn modules(&self) -> &'a [Module] {
        self.modules
    }

    pub fn workspace(&self) -> &'a str {
        self.workspace
    }

    /// Every resource of `type_label` across all modules, in module order.
    pub fn resources_of_type(&self, type_label: &str) -> &[&'a Block] {
        self.resources
            .get(type_label)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn block_count(&self) -> usize {
        self.modules.iter().map(|m| m.blocks.len()).sum()
    }
}
