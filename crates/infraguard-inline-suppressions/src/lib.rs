//! Inline ignore directives.
//!
//! Authors suppress findings with comments in the scanned source:
//!
//! ```text
//! # tfsec:ignore:AWS024
//! resource "aws_kinesis_stream" "logs" { ... }
//!
//! acl = "public-read" // tfsec:ignore:DIG005:ws:staging:exp:2026-12-31
//! ```
//!
//! A directive names a rule id, legacy id, or `*`, and may be scoped to a
//! workspace (`ws:<name>`) and given an expiry date (`exp:<YYYY-MM-DD>`).
//!
//! This crate is IO-free: parsing works on source text, resolution on ranges.

#![forbid(unsafe_code)]

mod directive;
mod parser;
mod resolver;

pub use directive::{IgnoreDirective, RuleTarget};
pub use parser::{DIRECTIVE_PREFIX, attach_to_blocks, parse_ignores};
pub use resolver::IgnoreSet;
pub use time::Date;
