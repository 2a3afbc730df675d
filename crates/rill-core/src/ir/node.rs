//! IR nodes
//!
//! One `IrNode` is one operator in a program's data-flow graph: a stable id,
//! a human-readable name, an operator kind, the output type, and the ordered
//! ids of its upstream dependencies. Nodes never own their upstreams; a
//! shared sub-stream is referenced by id from every consumer. Nodes are
//! immutable once built, shared via `Arc` across graphs and threads.
//!
//! The per-kind constructors stand in for the language's fluent front end,
//! which is outside this core: whatever surface syntax exists ultimately
//! hands the compiler nodes of this shape.

use crate::types::descriptor::TypeDescriptor;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// Stable node identifier, unique within one compilation
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct NodeId(pub u32);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Operator kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeKind {
    /// Stream fed from outside the program
    ExternalStream,
    /// One-to-one transformation
    Map,
    /// One-to-many transformation
    FlatMap,
    /// Predicate filter
    Filter,
    /// Pairwise join of two streams
    Join,
    /// Projection
    Select,
    /// Key-based grouping
    GroupBy,
    /// Per-group reduction
    Reduce,
    /// Truncated stand-in at a sub-graph boundary; its value is supplied
    /// externally at run time
    Boundary,
}

/// One operator in the data-flow graph
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IrNode {
    /// Stable id, unique within one compilation
    pub id: NodeId,

    /// Human-readable name
    pub name: String,

    /// Operator kind
    pub kind: NodeKind,

    /// Output type of this operator
    pub output: TypeDescriptor,

    /// Ordered upstream dependencies, by id
    pub dependencies: Vec<NodeId>,
}

impl IrNode {
    /// Create a node with explicit dependencies
    pub fn new(
        id: NodeId,
        name: String,
        kind: NodeKind,
        output: TypeDescriptor,
        dependencies: Vec<NodeId>,
    ) -> Self {
        Self {
            id,
            name,
            kind,
            output,
            dependencies,
        }
    }

    /// Create an external stream node
    pub fn external_stream(id: NodeId, name: String, output: TypeDescriptor) -> Arc<Self> {
        Arc::new(Self::new(id, name, NodeKind::ExternalStream, output, vec![]))
    }

    /// Create a map node over one input
    pub fn map(id: NodeId, name: String, output: TypeDescriptor, input: &IrNode) -> Arc<Self> {
        Arc::new(Self::new(id, name, NodeKind::Map, output, vec![input.id]))
    }

    /// Create a flat-map node over one input
    pub fn flat_map(
        id: NodeId,
        name: String,
        output: TypeDescriptor,
        input: &IrNode,
    ) -> Arc<Self> {
        Arc::new(Self::new(id, name, NodeKind::FlatMap, output, vec![input.id]))
    }

    /// Create a filter node over one input
    pub fn filter(id: NodeId, name: String, output: TypeDescriptor, input: &IrNode) -> Arc<Self> {
        Arc::new(Self::new(id, name, NodeKind::Filter, output, vec![input.id]))
    }

    /// Create a join node over two inputs, left then right
    pub fn join(
        id: NodeId,
        name: String,
        output: TypeDescriptor,
        left: &IrNode,
        right: &IrNode,
    ) -> Arc<Self> {
        Arc::new(Self::new(
            id,
            name,
            NodeKind::Join,
            output,
            vec![left.id, right.id],
        ))
    }

    /// Create a select (projection) node over one input
    pub fn select(id: NodeId, name: String, output: TypeDescriptor, input: &IrNode) -> Arc<Self> {
        Arc::new(Self::new(id, name, NodeKind::Select, output, vec![input.id]))
    }

    /// Create a group-by node over one input
    pub fn group_by(
        id: NodeId,
        name: String,
        output: TypeDescriptor,
        input: &IrNode,
    ) -> Arc<Self> {
        Arc::new(Self::new(id, name, NodeKind::GroupBy, output, vec![input.id]))
    }

    /// Create a reduce node over one input
    pub fn reduce(id: NodeId, name: String, output: TypeDescriptor, input: &IrNode) -> Arc<Self> {
        Arc::new(Self::new(id, name, NodeKind::Reduce, output, vec![input.id]))
    }

    /// Create the truncated stand-in for a node at a sub-graph boundary:
    /// same id, name, and output type, no dependencies
    pub fn boundary(of: &IrNode) -> Self {
        Self::new(
            of.id,
            of.name.clone(),
            NodeKind::Boundary,
            of.output.clone(),
            vec![],
        )
    }
}
