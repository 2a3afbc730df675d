//! Intermediate Representation (IR) for Rill
//!
//! The IR models a program as a DAG of typed operator nodes. The compiler
//! only reads nodes; they are produced by the front end and never mutated.

pub mod node;

pub use node::{IrNode, NodeId, NodeKind};
