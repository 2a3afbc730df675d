//! Rill Core - Core types and definitions for the Rill compiler
//!
//! This crate provides the fundamental types used across the Rill compiler:
//! - Type and field descriptors
//! - The closed set of liftable runtime values
//! - IR (Intermediate Representation) node definitions
//! - Error types
//!
//! Everything here is pure data: immutable once constructed, structurally
//! comparable, and safe to share across threads without locking.

pub mod error;
pub mod ir;
pub mod types;

// Re-export commonly used types
pub use error::CoreError;
pub use ir::{IrNode, NodeId, NodeKind};
pub use types::{
    ConfigValue, DurationValue, EnumRegistry, EnumValue, FieldDescriptor, TypeDescriptor, Value,
    VersionValue,
};
