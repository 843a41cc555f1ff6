//! Declaration extraction from infrastructure-as-code files.
//!
//! Extraction is regex based and never fails: content that does not match
//! simply yields no declarations.

mod runtime;
mod source;

pub use runtime::{extract_runtimes, RuntimeDeclaration};
pub use source::{extract_sources, SourceDeclaration};
