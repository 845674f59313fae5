use crate::RepoPath;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A span of whole lines inside one source file.
///
/// Lines are 1-based and inclusive. The string form (`path:start` or
/// `path:start-end`) is part of the result ordering contract, so keep
/// `Display` stable.
#[derive(
    Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, JsonSchema,
)]
pub struct SourceRange {
    pub path: RepoPath,
    pub start_line: u32,
    pub end_line: u32,
}

impl SourceRange {
    /// Build a range; an `end_line` before `start_line` is clamped to `start_line`.
    pub fn new(path: impl AsRef<str>, start_line: u32, end_line: u32) -> Self {
        Self {
            path: RepoPath::new(path),
            start_line,
            end_line: end_line.max(start_line),
        }
    }

    pub fn line(path: impl AsRef<str>, line: u32) -> Self {
        Self::new(path, line, line)
    }

    /// A range with no usable line information.
    pub fn is_empty(&self) -> bool {
        self.start_line == 0
    }

    pub fn same_file(&self, other: &SourceRange) -> bool {
        self.path == other.path
    }

    /// True if `other` lies entirely within `self`.
    pub fn contains(&self, other: &SourceRange) -> bool {
        self.same_file(other)
            && self.start_line <= other.start_line
            && other.end_line <= self.end_line
    }
}

impl fmt::Display for SourceRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.start_line == self.end_line {
            write!(f, "{}:{}", self.path, self.start_line)
        } else {
            write!(f, "{}:{}-{}", self.path, self.start_line, self.end_line)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_collapses_single_line_ranges() {
        assert_eq!(SourceRange::line("main.tf", 4).to_string(), "main.tf:4");
        assert_eq!(SourceRange::new("main.tf", 4, 9).to_string(), "main.tf:4-9");
    }

    #[test]
    fn end_before_start_is_clamped() {
        let r = SourceRange::new("main.tf", 10, 3);
        assert_eq!(r.end_line, 10);
        assert_eq!(r.start_line, 10);
    }

    #[test]
    fn containment_requires_same_file() {
        let block = SourceRange::new("main.tf", 3, 12);
        assert!(block.contains(&SourceRange::line("main.tf", 5)));
        assert!(block.contains(&block));
        assert!(!block.contains(&SourceRange::line("other.tf", 5)));
        assert!(!block.contains(&SourceRange::new("main.tf", 10, 13)));
    }
}
