use crate::directive::IgnoreDirective;
use infraguard_types::{RepoPath, SourceRange};
use std::collections::BTreeMap;
use time::Date;

/// All directives harvested for one scan, indexed by file.
#[derive(Clone, Debug)]
pub struct IgnoreSet {
    directives: Vec<IgnoreDirective>,
    by_file: BTreeMap<RepoPath, Vec<usize>>,
    today: Date,
}

impl IgnoreSet {
    /// `today` decides which directives have expired.
    pub fn new(directives: Vec<IgnoreDirective>, today: Date) -> Self {
        let mut by_file: BTreeMap<RepoPath, Vec<usize>> = BTreeMap::new();
        for (idx, directive) in directives.iter().enumerate() {
            by_file
                .entry(directive.range.path.clone())
                .or_default()
                .push(idx);
        }
        Self {
            directives,
            by_file,
            today,
        }
    }

    pub fn len(&self) -> usize {
        self.directives.len()
    }

    pub fn is_empty(&self) -> bool {
        self.directives.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &IgnoreDirective> {
        self.directives.iter()
    }

    /// First live directive that suppresses a finding of `rule_id`/`legacy_id` at `range`
    /// in `workspace`, if any.
    pub fn covering(
        &self,
        range: &SourceRange,
        workspace: &str,
        rule_id: &str,
        legacy_id: Option<&str>,
    ) -> Option<&IgnoreDirective> {
        let candidates = self.by_file.get(&range.path)?;
        candidates
            .iter()
            .map(|&idx| &self.directives[idx])
            .find(|directive| {
                directive.matches_rule(rule_id, legacy_id)
                    && directive.matches_workspace(workspace)
                    && !directive.is_expired(self.today)
                    && directive.covers_range(range)
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::directive::RuleTarget;
    use crate::parser::{attach_to_blocks, parse_ignores};
    use time::macros::date;

    const TODAY: Date = date!(2026 - 10 - 19);

    fn set_from(src: &str, blocks: &[SourceRange]) -> IgnoreSet {
        let mut directives = parse_ignores("main.tf", src);
        attach_to_blocks(&mut directives, blocks);
        IgnoreSet::new(directives, TODAY)
    }

    #[test]
    fn directive_above_block_covers_attribute_inside_it() {
        let src = r#"# tfsec:ignore:AWS024
resource "aws_kinesis_stream" "logs" {
  name            = "logs"
  encryption_type = "NONE"
}
"#;
        let block = SourceRange::new("main.tf", 2, 5);
        let set = set_from(src, std::slice::from_ref(&block));

        let attr = SourceRange::line("main.tf", 4);
        assert!(set.covering(&block, "default", "AWS024", None).is_some());
        assert!(set.covering(&attr, "default", "AWS024", None).is_some());
        assert!(
            set.covering(&attr, "default", "aws-kinesis", Some("AWS024"))
                .is_some()
        );
        assert!(set.covering(&attr, "default", "AWS025", None).is_none());
    }

    #[test]
    fn workspace_scoped_directive_only_applies_in_that_workspace() {
        let src = "# tfsec:ignore:AWS024:ws:prod\nresource \"a\" \"b\" {}\n";
        let set = set_from(src, &[]);
        let range = SourceRange::line("main.tf", 2);
        assert!(set.covering(&range, "prod", "AWS024", None).is_some());
        assert!(set.covering(&range, "default", "AWS024", None).is_none());
    }

    #[test]
    fn expired_directive_does_not_cover() {
        let src = "# tfsec:ignore:AWS024:exp:2026-10-18\nresource \"a\" \"b\" {}\n";
        let set = set_from(src, &[]);
        let range = SourceRange::line("main.tf", 2);
        assert!(set.covering(&range, "default", "AWS024", None).is_none());

        let src = "# tfsec:ignore:AWS024:exp:2026-10-19\nresource \"a\" \"b\" {}\n";
        let set = set_from(src, &[]);
        assert!(set.covering(&range, "default", "AWS024", None).is_some());
    }

    #[test]
    fn returns_none_for_files_without_directives() {
        let set = IgnoreSet::new(
            vec![IgnoreDirective::new(
                RuleTarget::All,
                SourceRange::line("main.tf", 1),
            )],
            TODAY,
        );
        assert_eq!(set.len(), 1);
        assert!(
            set.covering(&SourceRange::line("other.tf", 2), "default", "X", None)
                .is_none()
        );
        assert!(
            set.covering(&SourceRange::line("main.tf", 2), "default", "X", None)
                .is_some()
        );
    }
}
