//! Liftable runtime values
//!
//! `Value` is the closed set of runtime shapes the code lifter accepts.
//! Every shape the compiler may need to reconstruct in generated source has
//! a variant here; host values with no source form are carried as
//! [`Value::Opaque`] and rejected by the lifter with an unsupported-value
//! error naming the concrete shape.

use crate::types::config::ConfigValue;
use crate::types::descriptor::{FieldDescriptor, TypeDescriptor};
use crate::types::enums::EnumValue;
use serde::{Deserialize, Serialize};

/// A runtime value the lifter can turn into a source fragment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Value {
    /// Absent value
    Null,
    /// Boolean
    Bool(bool),
    /// 32-bit integer
    Int(i32),
    /// 64-bit integer
    Long(i64),
    /// Single character
    Char(char),
    /// String
    Str(String),
    /// Ordered sequence
    Seq(Vec<Value>),
    /// Set; element order is not significant
    Set(Vec<Value>),
    /// Key/value mapping
    Map(Vec<(Value, Value)>),
    /// Optional value
    Optional(Option<Box<Value>>),
    /// Enumeration value minted through the enum registry
    Enum(EnumValue),
    /// Type descriptor
    Type(TypeDescriptor),
    /// Field descriptor
    Field(FieldDescriptor),
    /// Format/source/sink configuration object
    Config(ConfigValue),
    /// Duration
    Duration(DurationValue),
    /// Semantic version
    Version(VersionValue),
    /// Host value with no source form; lifting it is a contract violation
    Opaque {
        /// Concrete runtime type name, used in the error message
        type_name: String,
    },
}

/// A duration split into whole seconds and a sub-second remainder
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DurationValue {
    /// Whole seconds
    pub seconds: i64,

    /// Sub-second remainder in nanoseconds, always below one second
    pub nanos: u32,
}

/// A semantic version with ordered components
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VersionValue {
    /// Major component
    pub major: u32,
    /// Minor component
    pub minor: u32,
    /// Patch component
    pub patch: u32,
}

impl Value {
    /// Wrap a present optional value
    pub fn some(inner: Value) -> Self {
        Value::Optional(Some(Box::new(inner)))
    }

    /// Absent optional value
    pub fn none() -> Self {
        Value::Optional(None)
    }

    /// Stand-in for a host value the lifter cannot reconstruct
    pub fn opaque(type_name: String) -> Self {
        Value::Opaque { type_name }
    }

    /// Human-readable name of this value's shape, used in error reporting
    pub fn shape_name(&self) -> &str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "boolean",
            Value::Int(_) => "integer",
            Value::Long(_) => "long",
            Value::Char(_) => "character",
            Value::Str(_) => "string",
            Value::Seq(_) => "sequence",
            Value::Set(_) => "set",
            Value::Map(_) => "mapping",
            Value::Optional(_) => "optional",
            Value::Enum(_) => "enumeration",
            Value::Type(_) => "type descriptor",
            Value::Field(_) => "field descriptor",
            Value::Config(_) => "configuration",
            Value::Duration(_) => "duration",
            Value::Version(_) => "version",
            Value::Opaque { type_name } => type_name,
        }
    }
}

impl DurationValue {
    /// Create a duration, carrying nanosecond overflow into seconds
    pub fn new(seconds: i64, nanos: u32) -> Self {
        let carry = i64::from(nanos / 1_000_000_000);
        Self {
            seconds: seconds + carry,
            nanos: nanos % 1_000_000_000,
        }
    }

    /// Duration of whole seconds
    pub fn from_secs(seconds: i64) -> Self {
        Self { seconds, nanos: 0 }
    }

    /// Duration from milliseconds. The remainder is kept non-negative so
    /// negative inputs split into floored seconds plus a positive
    /// sub-second part.
    pub fn from_millis(millis: i64) -> Self {
        Self {
            seconds: millis.div_euclid(1_000),
            nanos: millis.rem_euclid(1_000) as u32 * 1_000_000,
        }
    }
}

impl VersionValue {
    /// Create a new version
    pub fn new(major: u32, minor: u32, patch: u32) -> Self {
        Self {
            major,
            minor,
            patch,
        }
    }
}

impl std::fmt::Display for VersionValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_optional_helpers() {
        assert_eq!(Value::none(), Value::Optional(None));
        assert_eq!(
            Value::some(Value::Int(5)),
            Value::Optional(Some(Box::new(Value::Int(5))))
        );
    }

    #[test]
    fn test_shape_names() {
        assert_eq!(Value::Null.shape_name(), "null");
        assert_eq!(Value::Seq(vec![]).shape_name(), "sequence");
        assert_eq!(
            Value::opaque("java.io.FileInputStream".to_string()).shape_name(),
            "java.io.FileInputStream"
        );
    }

    #[test]
    fn test_duration_normalization() {
        let d = DurationValue::new(1, 2_500_000_000);
        assert_eq!(d.seconds, 3);
        assert_eq!(d.nanos, 500_000_000);

        let d = DurationValue::from_millis(1_500);
        assert_eq!(d.seconds, 1);
        assert_eq!(d.nanos, 500_000_000);
    }

    #[test]
    fn test_negative_duration_from_millis() {
        // -500ms is one second back plus half a second forward.
        let d = DurationValue::from_millis(-500);
        assert_eq!(d.seconds, -1);
        assert_eq!(d.nanos, 500_000_000);

        let d = DurationValue::from_millis(-2_000);
        assert_eq!(d.seconds, -2);
        assert_eq!(d.nanos, 0);

        let d = DurationValue::from_millis(-1_250);
        assert_eq!(d.seconds, -2);
        assert_eq!(d.nanos, 750_000_000);
    }

    #[test]
    fn test_version_display() {
        assert_eq!(VersionValue::new(1, 2, 3).to_string(), "1.2.3");
    }

    #[test]
    fn test_value_serde() {
        let value = Value::Seq(vec![
            Value::Int(1),
            Value::some(Value::Str("two".to_string())),
            Value::none(),
        ]);

        let json = serde_json::to_string(&value).unwrap();
        let deserialized: Value = serde_json::from_str(&json).unwrap();
        assert_eq!(deserialized, value);
    }
}
