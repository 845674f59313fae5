//! Stable DTOs and IDs used across the infraguard workspace.
//!
//! This crate is intentionally boring:
//! - source ranges and their canonical string form
//! - raw findings produced by rule checks
//! - governed results handed back to scanner callers
//! - stable metric categories and names

#![forbid(unsafe_code)]

pub mod ids;
pub mod path;
pub mod range;
pub mod result;

pub use path::RepoPath;
pub use range::SourceRange;
pub use result::{Finding, ScanData, ScanResult, Severity, Status};
