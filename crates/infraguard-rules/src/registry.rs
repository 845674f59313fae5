use crate::rule::{Rule, RuleDocs};
use globset::{Glob, GlobSet, GlobSetBuilder};
use infraguard_block::Block;
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
    #[error("rule id must not be empty")]
    EmptyId,

    #[error("rule id '{id}' is already registered by rule '{existing}'")]
    DuplicateId { id: String, existing: String },

    #[error("legacy id '{legacy_id}' of rule '{id}' collides with rule '{existing}'")]
    LegacyIdCollision {
        id: String,
        legacy_id: String,
        existing: String,
    },

    #[error("invalid required label '{pattern}' for rule '{id}': {reason}")]
    InvalidRequiredLabel {
        id: String,
        pattern: String,
        reason: String,
    },
}

/// A rule plus its compiled block predicate.
#[derive(Debug)]
pub struct RegisteredRule {
    rule: Rule,
    labels: Option<GlobSet>,
}

impl RegisteredRule {
    pub fn rule(&self) -> &Rule {
        &self.rule
    }

    /// Block type in `required_types` (if any) and first label matching
    /// `required_labels` (if any).
    pub fn matches(&self, block: &Block) -> bool {
        let rule = &self.rule;
        if !rule.required_types.is_empty() && !rule.required_types.iter().any(|t| *t == block.kind)
        {
            return false;
        }
        match (&self.labels, block.type_label()) {
            (None, _) => true,
            (Some(set), Some(label)) => set.is_match(label),
            (Some(_), None) => false,
        }
    }
}

/// Process-wide rule catalogue: append-only during startup, read-only while scanning.
#[derive(Debug, Default)]
pub struct RuleRegistry {
    rules: Vec<RegisteredRule>,
    /// Every live id and legacy id, mapped to the owning rule's index.
    ids: BTreeMap<String, usize>,
}

impl RuleRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a rule. Fails if its id or legacy id collides with any registered id or legacy id.
    pub fn register(&mut self, rule: Rule) -> Result<(), RegistryError> {
        if rule.id.trim().is_empty() {
            return Err(RegistryError::EmptyId);
        }
        if let Some(&idx) = self.ids.get(&rule.id) {
            return Err(RegistryError::DuplicateId {
                id: rule.id.clone(),
                existing: self.rules[idx].rule.id.clone(),
            });
        }
        if let Some(legacy_id) = rule.legacy_id() {
            let existing = if legacy_id == rule.id {
                Some(rule.id.clone())
            } else {
                self.ids
                    .get(legacy_id)
                    .map(|&idx| self.rules[idx].rule.id.clone())
            };
            if let Some(existing) = existing {
                return Err(RegistryError::LegacyIdCollision {
                    id: rule.id.clone(),
                    legacy_id: legacy_id.to_string(),
                    existing,
                });
            }
        }

        let labels = compile_labels(&rule)?;

        let idx = self.rules.len();
        self.ids.insert(rule.id.clone(), idx);
        if let Some(legacy_id) = rule.legacy_id() {
            self.ids.insert(legacy_id.to_string(), idx);
        }
        tracing::trace!(rule_id = %rule.id, legacy_id = ?rule.legacy_id(), "registered rule");
        self.rules.push(RegisteredRule { rule, labels });
        Ok(())
    }

    /// Every rule, in registration order.
    pub fn all(&self) -> impl Iterator<Item = &Rule> {
        self.rules.iter().map(RegisteredRule::rule)
    }

    pub fn entries(&self) -> &[RegisteredRule] {
        &self.rules
    }

    /// Look a rule up by its id or legacy id.
    pub fn get(&self, id: &str) -> Option<&Rule> {
        self.ids.get(id).map(|&idx| &self.rules[idx].rule)
    }

    /// Legacy alias of the rule whose current id is `id`.
    pub fn resolve_legacy_id(&self, id: &str) -> Option<&str> {
        self.ids
            .get(id)
            .map(|&idx| &self.rules[idx].rule)
            .filter(|rule| rule.id == id)
            .and_then(Rule::legacy_id)
    }

    pub fn explain(&self, id: &str) -> Option<&RuleDocs> {
        self.get(id).map(|rule| &rule.docs)
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

fn compile_labels(rule: &Rule) -> Result<Option<GlobSet>, RegistryError> {
    if rule.required_labels.is_empty() {
        return Ok(None);
    }

    let invalid = |pattern: &str, reason: String| RegistryError::InvalidRequiredLabel {
        id: rule.id.clone(),
        pattern: pattern.to_string(),
        reason,
    };

    let mut builder = GlobSetBuilder::new();
    for pattern in &rule.required_labels {
        let glob = Glob::new(pattern).map_err(|e| invalid(pattern, e.to_string()))?;
        builder.add(glob);
    }
    builder
        .build()
        .map(Some)
        .map_err(|e| invalid(&rule.required_labels.join(","), e.to_string()))
}
