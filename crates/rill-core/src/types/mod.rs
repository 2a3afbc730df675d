//! Type system for Rill
//!
//! This module contains the compiler's static type model:
//! - Type and field descriptors
//! - The closed set of liftable runtime values
//! - The enumeration registry
//! - Format/source/sink configuration objects

pub mod config;
pub mod descriptor;
pub mod enums;
pub mod value;

pub use config::ConfigValue;
pub use descriptor::{FieldDescriptor, TypeDescriptor, MAX_TYPE_DEPTH};
pub use enums::{EnumDef, EnumRegistry, EnumValue};
pub use value::{DurationValue, Value, VersionValue};
