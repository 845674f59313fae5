use crate::directive::{IgnoreDirective, RuleTarget};
use infraguard_types::SourceRange;
use time::Date;
use time::macros::format_description;

pub const DIRECTIVE_PREFIX: &str = "tfsec:ignore:";

const WORKSPACE_KEY: &str = "ws";
const EXPIRY_KEY: &str = "exp";

/// Extract every ignore directive from `source`.
///
/// Malformed directives (empty rule id, unknown segment, unparseable date)
/// are dropped: they can never cover a finding.
pub fn parse_ignores(path: &str, source: &str) -> Vec<IgnoreDirective> {
    let lines: Vec<&str> = source.lines().collect();
    let mut out = Vec::new();

    for (idx, line) in lines.iter().enumerate() {
        let Some((comment, standalone)) = comment_text(line) else {
            continue;
        };
        if !comment.contains(DIRECTIVE_PREFIX) {
            continue;
        }

        let line_no = (idx + 1) as u32;
        let next_code_line = if standalone {
            next_code_line(&lines, idx + 1)
        } else {
            None
        };

        for token in directive_tokens(comment) {
            let Some(mut directive) = parse_directive(token, SourceRange::line(path, line_no))
            else {
                continue;
            };
            directive.next_code_line = next_code_line;
            out.push(directive);
        }
    }

    out
}

/// Bind directives written on their own line to the block that starts right below them.
pub fn attach_to_blocks(directives: &mut [IgnoreDirective], block_ranges: &[SourceRange]) {
    for directive in directives.iter_mut() {
        let Some(code_line) = directive.next_code_line else {
            continue;
        };
        directive.annotated = block_ranges
            .iter()
            .find(|block| block.same_file(&directive.range) && block.start_line == code_line)
            .cloned();
    }
}

fn parse_directive(token: &str, range: SourceRange) -> Option<IgnoreDirective> {
    let mut segments = token.split(':');
    let target = RuleTarget::parse(segments.next()?)?;
    let mut directive = IgnoreDirective::new(target, range);

    while let Some(key) = segments.next() {
        let value = segments.next().filter(|v| !v.is_empty())?;
        match key {
            WORKSPACE_KEY => directive.workspace = Some(value.to_string()),
            EXPIRY_KEY => directive.expiry = Some(parse_expiry(value)?),
            _ => return None,
        }
    }

    Some(directive)
}

fn parse_expiry(value: &str) -> Option<Date> {
    Date::parse(value, format_description!("[year]-[month]-[day]")).ok()
}

/// Everything after each directive prefix, up to whitespace or a closing `*/`.
fn directive_tokens(comment: &str) -> impl Iterator<Item = &str> {
    comment
        .match_indices(DIRECTIVE_PREFIX)
        .map(move |(pos, _)| {
            let rest = &comment[pos + DIRECTIVE_PREFIX.len()..];
            let end = rest
                .find(|c: char| c.is_whitespace())
                .unwrap_or(rest.len());
            let token = &rest[..end];
            match token.find("*/") {
                // `tfsec:ignore:*/` is the wildcard touching the comment close.
                Some(0) => &token[..1],
                Some(close) => &token[..close],
                None => token,
            }
        })
        .filter(|token| !token.is_empty())
}

/// Returns the comment body of a line and whether the comment is the only thing on it.
fn comment_text(line: &str) -> Option<(&str, bool)> {
    let start = comment_start(line)?;
    let standalone = line[..start].trim().is_empty();
    Some((&line[start..], standalone))
}

/// Byte offset of the first `#`, `//` or `/*` outside a double-quoted string.
fn comment_start(line: &str) -> Option<usize> {
    let bytes = line.as_bytes();
    let mut in_string = false;
    let mut escaped = false;

    for (i, &b) in bytes.iter().enumerate() {
        if in_string {
            match b {
                _ if escaped => escaped = false,
                b'\\' => escaped = true,
                b'"' => in_string = false,
                _ => {}
            }
            continue;
        }
        match b {
            b'"' => in_string = true,
            b'#' => return Some(i),
            b'/' if matches!(bytes.get(i + 1), Some(b'/') | Some(b'*')) => return Some(i),
            _ => {}
        }
    }
    None
}

fn next_code_line(lines: &[&str], from: usize) -> Option<u32> {
    lines
        .iter()
        .enumerate()
        .skip(from)
        .find(|(_, line)| {
            let trimmed = line.trim();
            !trimmed.is_empty() && comment_start(trimmed) != Some(0)
        })
        .map(|(idx, _)| (idx + 1) as u32)
}
