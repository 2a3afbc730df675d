//! Compiler error types
//!
//! All errors are terminal for the current compile request: the core never
//! produces partial output, and every computation is deterministic, so
//! re-invocation with the same input reproduces the same failure.

use rill_core::{CoreError, NodeId};
use thiserror::Error;

/// Compiler error
#[derive(Error, Debug)]
pub enum CompileError {
    /// A value shape outside the closed liftable set
    #[error("Unsupported value shape: {0}")]
    UnsupportedValue(String),

    /// A dependency cycle found during topological sort
    #[error("Dependency cycle involving node '{0}'")]
    GraphCycle(String),

    /// A declared dependency id with no node behind it
    #[error("Node '{node}' declares dependency {dependency} which is not in the node set")]
    MissingDependency {
        /// Name of the declaring node
        node: String,
        /// The unresolved dependency id
        dependency: NodeId,
    },

    /// A requested output id with no node behind it
    #[error("Requested output {0} is not in the node set")]
    UnknownOutput(NodeId),

    /// Strict mode requested and schema derivation would degrade to a
    /// type-erased representation
    #[error("Schema derivation for '{0}' degrades to a type-erased representation")]
    SchemaDerivation(String),

    /// Model-level failure from the core types
    #[error(transparent)]
    Core(#[from] CoreError),
}

/// Result type for compiler operations
pub type Result<T> = std::result::Result<T, CompileError>;
