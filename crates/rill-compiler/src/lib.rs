//! Rill Compiler - dependency-graph resolution and code lifting
//!
//! This crate turns immutable IR nodes into a deterministic execution order
//! and lifts runtime values and type descriptors into target-language
//! source fragments.

pub mod error;
pub mod graph;
pub mod codegen;

// Re-export main types
pub use error::{CompileError, Result};
pub use graph::DependencyGraph;

// Re-export codegen types
pub use codegen::{
    normalize_qualified_name, DefaultNaming, EnvelopedNaming, Fragment, Lifter, NamingPolicy,
    ENVELOPE_TYPE,
};
