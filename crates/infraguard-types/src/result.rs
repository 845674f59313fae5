use crate::SourceRange;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Low,
    Medium,
    High,
    Critical,
}

impl Severity {
    pub fn as_str(self) -> &'static str {
        match self {
            Severity::Low => "low",
            Severity::Medium => "medium",
            Severity::High => "high",
            Severity::Critical => "critical",
        }
    }
}

#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Failed,
    Passed,
}

/// Raw output of one rule check against one block.
///
/// A finding does not know which rule produced it; the execution pool stamps
/// the rule identity onto it when it becomes a [`ScanResult`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Finding {
    pub status: Status,
    pub message: String,
    pub range: SourceRange,

    /// Narrower span inside `range`, typically the offending attribute.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub annotation: Option<SourceRange>,
}

impl Finding {
    pub fn failed(message: impl Into<String>, range: SourceRange) -> Self {
        Self {
            status: Status::Failed,
            message: message.into(),
            range,
            annotation: None,
        }
    }

    pub fn passed(message: impl Into<String>, range: SourceRange) -> Self {
        Self {
            status: Status::Passed,
            message: message.into(),
            range,
            annotation: None,
        }
    }

    pub fn with_annotation(mut self, annotation: SourceRange) -> Self {
        self.annotation = Some(annotation);
        self
    }

    pub fn narrowest_range(&self) -> &SourceRange {
        self.annotation.as_ref().unwrap_or(&self.range)
    }
}

/// A finding bound to the rule that produced it, plus governance flags.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ScanResult {
    pub rule_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub legacy_id: Option<String>,
    pub severity: Severity,
    pub status: Status,
    pub message: String,
    pub range: SourceRange,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub annotation: Option<SourceRange>,

    /// Set when an ignore directive covers this result but the caller asked to see ignored results.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub ignored: bool,

    /// Set when the rule is in the exclusion set but exclusion was bypassed.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub excluded: bool,
}

impl ScanResult {
    pub fn from_finding(
        rule_id: &str,
        legacy_id: Option<&str>,
        severity: Severity,
        finding: Finding,
    ) -> Self {
        Self {
            rule_id: rule_id.to_string(),
            legacy_id: legacy_id.map(str::to_string),
            severity,
            status: finding.status,
            message: finding.message,
            range: finding.range,
            annotation: finding.annotation,
            ignored: false,
            excluded: false,
        }
    }

    pub fn narrowest_range(&self) -> &SourceRange {
        self.annotation.as_ref().unwrap_or(&self.range)
    }
}

/// Scan summary payload returned next to the governed results.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ScanData {
    pub workspace: String,

    pub modules_scanned: u32,
    pub blocks_scanned: u32,
    pub rules_registered: u32,

    /// Number of (rule, block) pairs evaluated.
    pub evaluations: u32,
    pub findings_total: u32,

    pub ignored: u32,
    pub excluded: u32,
    pub suppressed_errors: u32,

    pub results_emitted: u32,
}
