//! Value lifter
//!
//! Turns supported runtime values into target-language source expressions
//! that reconstruct equivalent values. `lift` is a pure, total function
//! over the closed [`Value`] set; any host shape outside that set reaches
//! it as [`Value::Opaque`] and is reported as an unsupported-value error
//! naming the concrete shape.

use crate::codegen::fragment::Fragment;
use crate::codegen::naming::{normalize_qualified_name, DefaultNaming, NamingPolicy};
use crate::error::{CompileError, Result};
use rill_core::types::descriptor::MAX_TYPE_DEPTH;
use rill_core::{CoreError, DurationValue, FieldDescriptor, TypeDescriptor, Value, VersionValue};

/// Maximum value/descriptor nesting the lifter will recurse into
pub(crate) const MAX_NESTING: usize = 128;

/// Constructor prefix for the compiler's descriptor classes in the target
/// runtime support library
const TYPES_PACKAGE: &str = "rill.types";

/// Type-directed code lifter
///
/// Parameterized by a replaceable [`NamingPolicy`] and a strictness flag for
/// schema derivation. Pure: lifting has no side effects, so independent
/// lifter instances may run concurrently on separate threads.
pub struct Lifter {
    pub(crate) naming: Box<dyn NamingPolicy>,
    pub(crate) strict_schemas: bool,
}

impl Lifter {
    /// Create a lifter with the default naming policy and strict schema
    /// checking disabled
    pub fn new() -> Self {
        Self {
            naming: Box::new(DefaultNaming),
            strict_schemas: false,
        }
    }

    /// Replace the naming policy
    pub fn with_naming(mut self, naming: Box<dyn NamingPolicy>) -> Self {
        self.naming = naming;
        self
    }

    /// Enable or disable strict schema derivation
    pub fn with_strict_schemas(mut self, strict: bool) -> Self {
        self.strict_schemas = strict;
        self
    }

    /// The fully-qualified target-runtime name of a type, as an identifier
    /// token, resolved through the active naming policy. Fails with a
    /// bounded-depth error on pathological nesting.
    pub fn type_name(&self, descriptor: &TypeDescriptor) -> Result<Fragment> {
        descriptor.validate_depth(MAX_TYPE_DEPTH)?;
        Ok(Fragment::ident(self.naming.type_name(descriptor)))
    }

    /// Lift a runtime value into a source fragment reconstructing it
    pub fn lift(&self, value: &Value) -> Result<Fragment> {
        self.lift_value(value, 0)
    }

    fn lift_value(&self, value: &Value, depth: usize) -> Result<Fragment> {
        if depth > MAX_NESTING {
            return Err(CoreError::DepthLimitExceeded {
                max_depth: MAX_NESTING,
            }
            .into());
        }

        match value {
            Value::Null => Ok(Fragment::ident(String::new())),
            Value::Bool(b) => Ok(Fragment::expr(b.to_string())),
            Value::Int(i) => Ok(Fragment::expr(i.to_string())),
            Value::Long(l) => Ok(Fragment::expr(format!("{}L", l))),
            // A hex code-point literal sidesteps character escaping rules.
            // The target's character type is a single UTF-16 code unit, so
            // code points past the basic multilingual plane have no exact
            // character form there.
            Value::Char(c) if (*c as u32) > 0xFFFF => {
                Err(CompileError::UnsupportedValue(format!(
                    "character U+{:X} beyond the basic multilingual plane",
                    *c as u32
                )))
            }
            Value::Char(c) => Ok(Fragment::expr(format!("0x{:x}.toChar", *c as u32))),
            Value::Str(s) => Ok(Fragment::expr(escape_str(s))),
            Value::Seq(items) => Ok(Fragment::expr(format!(
                "Seq({})",
                self.lift_elements(items, depth)?
            ))),
            Value::Set(items) => Ok(Fragment::expr(format!(
                "Set({})",
                self.lift_elements(items, depth)?
            ))),
            Value::Map(entries) => {
                let mut parts = Vec::with_capacity(entries.len());
                for (key, val) in entries {
                    parts.push(format!(
                        "{} -> {}",
                        self.lift_value(key, depth + 1)?.code(),
                        self.lift_value(val, depth + 1)?.code()
                    ));
                }
                Ok(Fragment::expr(format!("Map({})", parts.join(", "))))
            }
            Value::Optional(None) => Ok(Fragment::ident("None".to_string())),
            Value::Optional(Some(inner)) => Ok(Fragment::expr(format!(
                "Some({})",
                self.lift_value(inner, depth + 1)?.code()
            ))),
            Value::Enum(e) => Ok(Fragment::ident(format!(
                "{}.{}",
                normalize_qualified_name(&e.qualified_name),
                e.tag
            ))),
            Value::Type(descriptor) => {
                descriptor.validate_depth(MAX_TYPE_DEPTH)?;
                self.lift_descriptor(descriptor, depth + 1)
            }
            Value::Field(field) => self.lift_field(field, depth + 1),
            Value::Config(config) => {
                let mut args = Vec::new();
                for attribute in config.attributes() {
                    args.push(self.lift_value(&attribute, depth + 1)?.into_code());
                }
                Ok(Fragment::expr(format!(
                    "new {}({})",
                    normalize_qualified_name(config.constructor_name()),
                    args.join(", ")
                )))
            }
            Value::Duration(d) => Ok(Fragment::expr(lift_duration(d))),
            Value::Version(v) => Ok(Fragment::expr(lift_version(v))),
            Value::Opaque { .. } => Err(CompileError::UnsupportedValue(
                value.shape_name().to_string(),
            )),
        }
    }

    fn lift_elements(&self, items: &[Value], depth: usize) -> Result<String> {
        let mut parts = Vec::with_capacity(items.len());
        for item in items {
            parts.push(self.lift_value(item, depth + 1)?.into_code());
        }
        Ok(parts.join(", "))
    }

    /// Lift a type descriptor into a constructor call reconstructing it.
    ///
    /// The name argument of a record descriptor resolves through the
    /// default naming policy regardless of the active one: an enveloped
    /// record value still names its raw payload type.
    fn lift_descriptor(&self, descriptor: &TypeDescriptor, depth: usize) -> Result<Fragment> {
        if depth > MAX_NESTING {
            return Err(CoreError::DepthLimitExceeded {
                max_depth: MAX_NESTING,
            }
            .into());
        }

        let code = match descriptor {
            TypeDescriptor::Basic { name } => format!(
                "{}.BasicType({})",
                TYPES_PACKAGE,
                escape_str(&normalize_qualified_name(name))
            ),
            TypeDescriptor::Numeric { name } => format!(
                "{}.NumericType({})",
                TYPES_PACKAGE,
                escape_str(&normalize_qualified_name(name))
            ),
            TypeDescriptor::Tuple {
                name,
                type_args,
                fields,
            } => format!(
                "{}.TupleType({}, Seq({}), Seq({}))",
                TYPES_PACKAGE,
                escape_str(&normalize_qualified_name(name)),
                self.lift_descriptor_list(type_args, depth)?,
                self.lift_field_list(fields, depth)?
            ),
            TypeDescriptor::Object {
                name,
                type_args,
                fields,
            } => format!(
                "{}.ObjectType({}, Seq({}), Seq({}))",
                TYPES_PACKAGE,
                escape_str(&normalize_qualified_name(name)),
                self.lift_descriptor_list(type_args, depth)?,
                self.lift_field_list(fields, depth)?
            ),
            TypeDescriptor::Collection { name, element } => format!(
                "{}.CollectionType({}, {})",
                TYPES_PACKAGE,
                escape_str(&normalize_qualified_name(name)),
                self.lift_descriptor(element, depth + 1)?.code()
            ),
            TypeDescriptor::Generated { full_name, opaque } => format!(
                "{}.GeneratedType({}, {})",
                TYPES_PACKAGE,
                escape_str(&normalize_qualified_name(full_name)),
                opaque
            ),
            TypeDescriptor::DataStream { record } => format!(
                "{}.DataStreamType({})",
                TYPES_PACKAGE,
                self.lift_descriptor(record, depth + 1)?.code()
            ),
            TypeDescriptor::JoinedStreams { left, right } => format!(
                "{}.JoinedStreamsType({}, {})",
                TYPES_PACKAGE,
                self.lift_descriptor(left, depth + 1)?.code(),
                self.lift_descriptor(right, depth + 1)?.code()
            ),
            TypeDescriptor::GroupedStream { record } => format!(
                "{}.GroupedStreamType({})",
                TYPES_PACKAGE,
                self.lift_descriptor(record, depth + 1)?.code()
            ),
        };

        Ok(Fragment::expr(code))
    }

    fn lift_descriptor_list(
        &self,
        descriptors: &[TypeDescriptor],
        depth: usize,
    ) -> Result<String> {
        let mut parts = Vec::with_capacity(descriptors.len());
        for descriptor in descriptors {
            parts.push(self.lift_descriptor(descriptor, depth + 1)?.into_code());
        }
        Ok(parts.join(", "))
    }

    fn lift_field(&self, field: &FieldDescriptor, depth: usize) -> Result<Fragment> {
        Ok(Fragment::expr(format!(
            "{}.Field({}, {})",
            TYPES_PACKAGE,
            escape_str(&field.name),
            self.lift_descriptor(&field.field_type, depth + 1)?.code()
        )))
    }

    fn lift_field_list(&self, fields: &[FieldDescriptor], depth: usize) -> Result<String> {
        let mut parts = Vec::with_capacity(fields.len());
        for field in fields {
            parts.push(self.lift_field(field, depth + 1)?.into_code());
        }
        Ok(parts.join(", "))
    }
}

impl Default for Lifter {
    fn default() -> Self {
        Self::new()
    }
}

fn lift_duration(duration: &DurationValue) -> String {
    if duration.nanos == 0 {
        format!("java.time.Duration.ofSeconds({})", duration.seconds)
    } else {
        format!(
            "java.time.Duration.ofSeconds({}, {})",
            duration.seconds, duration.nanos
        )
    }
}

fn lift_version(version: &VersionValue) -> String {
    format!(
        "new rill.runtime.Version({}, {}, {})",
        version.major, version.minor, version.patch
    )
}

/// Render a fully-escaped double-quoted string literal
fn escape_str(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if (c as u32) < 0x20 => out.push_str(&format!("\\u{:04x}", c as u32)),
            c => out.push(c),
        }
    }
    out.push('"');
    out
}
