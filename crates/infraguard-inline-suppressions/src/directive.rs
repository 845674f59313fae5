use infraguard_types::SourceRange;
use infraguard_types::ids::WILDCARD_RULE_ID;
use time::Date;

/// Which rules a directive suppresses.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RuleTarget {
    All,
    Rule(String),
}

impl RuleTarget {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim() {
            "" => None,
            WILDCARD_RULE_ID => Some(RuleTarget::All),
            id => Some(RuleTarget::Rule(id.to_string())),
        }
    }

    pub fn matches(&self, rule_id: &str, legacy_id: Option<&str>) -> bool {
        match self {
            RuleTarget::All => true,
            RuleTarget::Rule(target) => {
                target == rule_id || legacy_id.is_some_and(|legacy| !legacy.is_empty() && target == legacy)
            }
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IgnoreDirective {
    pub target: RuleTarget,
    pub workspace: Option<String>,
    pub expiry: Option<Date>,

    /// Line holding the directive comment.
    pub range: SourceRange,

    /// For a comment on a line of its own: the first following line that holds code.
    pub next_code_line: Option<u32>,

    /// Block the directive sits directly above, once attached.
    pub annotated: Option<SourceRange>,
}

impl IgnoreDirective {
    pub fn new(target: RuleTarget, range: SourceRange) -> Self {
        Self {
            target,
            workspace: None,
            expiry: None,
            range,
            next_code_line: None,
            annotated: None,
        }
    }

    pub fn matches_rule(&self, rule_id: &str, legacy_id: Option<&str>) -> bool {
        self.target.matches(rule_id, legacy_id)
    }

    /// An unscoped directive applies in every workspace.
    pub fn matches_workspace(&self, workspace: &str) -> bool {
        self.workspace.as_deref().is_none_or(|ws| ws == workspace)
    }

    /// Expired on the day after the expiry date.
    pub fn is_expired(&self, today: Date) -> bool {
        self.expiry.is_some_and(|expiry| expiry < today)
    }

    pub fn covers_range(&self, range: &SourceRange) -> bool {
        if !self.range.same_file(range) || range.is_empty() {
            return false;
        }

        let line = self.range.start_line;
        if line == range.start_line || line + 1 == range.start_line {
            return true;
        }
        if self.next_code_line == Some(range.start_line) {
            return true;
        }

        self.annotated
            .as_ref()
            .is_some_and(|block| block.contains(range))
    }
}
