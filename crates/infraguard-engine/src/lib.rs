//! Rule execution and result governance.
//!
//! The pipeline is `adapt -> run checks -> govern -> sequence`:
//!
//! - [`pool`] evaluates every applicable (rule, block) pair on a bounded worker pool
//! - [`governor`] applies ignore directives, include/exclude filters and passed visibility
//! - [`sequencer`] imposes the final total order
//!
//! [`Scanner`] wires them together behind a single `scan` call.

#![forbid(unsafe_code)]

mod error;
pub mod governor;
pub mod metrics;
mod options;
pub mod pool;
mod scanner;
pub mod sequencer;

#[cfg(test)]
mod proptest;
#[cfg(test)]
mod test_support;

pub use error::ScanError;
pub use metrics::{Counter, InMemoryMetrics, Metrics, NoopMetrics, Timer};
pub use options::ScannerOptions;
pub use scanner::{ScanReport, Scanner};
