use crate::check::CheckCapability;
use infraguard_types::Severity;

/// Inert documentation carried for reporting.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RuleDocs {
    pub impact: String,
    pub resolution: String,
    pub links: Vec<String>,
    pub bad_examples: Vec<String>,
    pub good_examples: Vec<String>,
}

#[derive(Clone, Debug)]
pub struct Rule {
    /// Stable identifier, e.g. `aws-kinesis-enable-in-transit-encryption`.
    pub id: String,
    /// Superseded identifier still honoured by filters and ignore directives.
    pub legacy_id: Option<String>,

    pub provider: String,
    pub service: String,
    pub summary: String,
    pub severity: Severity,

    /// Block types this rule runs against (`resource`, `data`, ...). Empty matches all.
    pub required_types: Vec<String>,
    /// Glob patterns over the block's first label. Empty matches all.
    pub required_labels: Vec<String>,

    pub docs: RuleDocs,
    pub check: CheckCapability,
}

impl Rule {
    pub fn new(id: impl Into<String>, severity: Severity, check: CheckCapability) -> Self {
        Self {
            id: id.into(),
            legacy_id: None,
            provider: String::new(),
            service: String::new(),
            summary: String::new(),
            severity,
            required_types: Vec::new(),
            required_labels: Vec::new(),
            docs: RuleDocs::default(),
            check,
        }
    }

    pub fn with_legacy_id(mut self, legacy_id: impl Into<String>) -> Self {
        self.legacy_id = Some(legacy_id.into());
        self
    }

    pub fn with_provider(mut self, provider: &str, service: &str) -> Self {
        self.provider = provider.to_string();
        self.service = service.to_string();
        self
    }

    pub fn with_summary(mut self, summary: impl Into<String>) -> Self {
        self.summary = summary.into();
        self
    }

    pub fn with_required_types(mut self, types: &[&str]) -> Self {
        self.required_types = types.iter().map(|t| t.to_string()).collect();
        self
    }

    pub fn with_required_labels(mut self, labels: &[&str]) -> Self {
        self.required_labels = labels.iter().map(|l| l.to_string()).collect();
        self
    }

    pub fn with_docs(mut self, docs: RuleDocs) -> Self {
        self.docs = docs;
        self
    }

    pub fn legacy_id(&self) -> Option<&str> {
        self.legacy_id.as_deref().filter(|id| !id.is_empty())
    }
}
