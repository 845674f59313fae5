//! The typed block tree rules are evaluated against.
//!
//! Parsing configuration text into this model happens elsewhere; this crate
//! only defines the shape and the lookups rules rely on.

#![forbid(unsafe_code)]

mod attribute;
mod block;
mod module;

pub use attribute::{Attribute, CaseMode, Value, ValueKind};
pub use block::Block;
pub use module::Module;
