//! Schema lifter
//!
//! Emits the target-runtime schema expression for a type descriptor. The
//! runtime needs explicit schema objects to serialize records across
//! operator boundaries; erasure in the host means the generated program
//! must carry them as source text. Branch order matters and is fixed:
//! tuple records, envelopes, plain tuples, then general derivation.

use crate::codegen::fragment::Fragment;
use crate::codegen::naming::{normalize_qualified_name, DefaultNaming, NamingPolicy};
use crate::codegen::value_codegen::Lifter;
use crate::error::{CompileError, Result};
use rill_core::types::descriptor::MAX_TYPE_DEPTH;
use rill_core::TypeDescriptor;

/// Fully-qualified name of the runtime envelope record wrapper
pub const ENVELOPE_TYPE: &str = "rill.runtime.Envelope";

/// Constructor prefix for the compiler's schema classes in the target
/// runtime support library
const TYPEINFO_PACKAGE: &str = "rill.typeinfo";

const TYPE_INFORMATION: &str = "org.apache.flink.api.common.typeinfo.TypeInformation";
const TYPE_HINT: &str = "org.apache.flink.api.common.typeinfo.TypeHint";

impl Lifter {
    /// Lift a type descriptor into a schema expression the generated
    /// program evaluates at startup.
    ///
    /// Stream shapes delegate to the record type they carry; a joined pair
    /// yields the schema of its (left, right) tuple. In strict mode an
    /// opaque generated class fails here, and every other derived schema is
    /// wrapped in a runtime guard that rejects type-erased results.
    pub fn lift_schema(&self, descriptor: &TypeDescriptor) -> Result<Fragment> {
        descriptor.validate_depth(MAX_TYPE_DEPTH)?;
        self.schema_of(descriptor)
    }

    fn schema_of(&self, descriptor: &TypeDescriptor) -> Result<Fragment> {
        match descriptor {
            TypeDescriptor::DataStream { record } | TypeDescriptor::GroupedStream { record } => {
                self.schema_of(record)
            }
            TypeDescriptor::JoinedStreams { left, right } => Ok(Fragment::expr(format!(
                "{}.TupleTypeInfo[scala.Tuple2[{}, {}]]({}, {})",
                TYPEINFO_PACKAGE,
                self.naming.type_name(left),
                self.naming.type_name(right),
                self.schema_of(left)?.code(),
                self.schema_of(right)?.code()
            ))),
            _ if descriptor.is_tuple_record() => self.tuple_record_schema(descriptor),
            _ if is_envelope(descriptor) => self.envelope_schema(descriptor),
            TypeDescriptor::Tuple { type_args, .. } if type_args.is_empty() => {
                Ok(Fragment::ident(format!("{}.UnitTypeInfo", TYPEINFO_PACKAGE)))
            }
            TypeDescriptor::Tuple { type_args, .. } => self.tuple_schema(type_args),
            _ => self.derived_schema(descriptor),
        }
    }

    /// A tuple record keeps its positional schema but is addressed by field
    /// name downstream, so the emitted schema pairs each name with its
    /// element schema in declaration order.
    fn tuple_record_schema(&self, descriptor: &TypeDescriptor) -> Result<Fragment> {
        let mut parts = Vec::new();
        for field in descriptor.fields() {
            parts.push(format!(
                "({}, {})",
                escape_name(&field.name),
                self.schema_of(&field.field_type)?.code()
            ));
        }

        Ok(Fragment::expr(format!(
            "{}.RecordTypeInfo(Seq({}))",
            TYPEINFO_PACKAGE,
            parts.join(", ")
        )))
    }

    /// The envelope wrapper carries a payload value and a routing key; its
    /// schema composes the two component schemas.
    fn envelope_schema(&self, descriptor: &TypeDescriptor) -> Result<Fragment> {
        let args = descriptor.type_args();
        Ok(Fragment::expr(format!(
            "{}.EnvelopeTypeInfo({}, {})",
            TYPEINFO_PACKAGE,
            self.schema_of(args[0])?.code(),
            self.schema_of(args[1])?.code()
        )))
    }

    fn tuple_schema(&self, type_args: &[TypeDescriptor]) -> Result<Fragment> {
        let names = type_args
            .iter()
            .map(|arg| self.naming.type_name(arg))
            .collect::<Vec<_>>()
            .join(", ");

        let mut schemas = Vec::with_capacity(type_args.len());
        for arg in type_args {
            schemas.push(self.schema_of(arg)?.into_code());
        }

        Ok(Fragment::expr(format!(
            "{}.TupleTypeInfo[scala.Tuple{}[{}]]({})",
            TYPEINFO_PACKAGE,
            type_args.len(),
            names,
            schemas.join(", ")
        )))
    }

    /// General derivation through the runtime's reflective factory. The
    /// fast `classOf` path takes the raw class and loses generic arguments,
    /// so non-empty arguments are re-supplied through a parameterized
    /// decorator; nested generics additionally force the type-hint path
    /// because the raw class alone cannot recover them.
    fn derived_schema(&self, descriptor: &TypeDescriptor) -> Result<Fragment> {
        if let TypeDescriptor::Generated {
            full_name,
            opaque: true,
        } = descriptor
        {
            if self.strict_schemas {
                return Err(CompileError::SchemaDerivation(normalize_qualified_name(
                    full_name,
                )));
            }
        }

        let base = if descriptor.is_nested_generic() {
            format!(
                "{}.of(new {}[{}]() {{}})",
                TYPE_INFORMATION,
                TYPE_HINT,
                self.resolved_name(descriptor)
            )
        } else {
            format!(
                "{}.of(classOf[{}])",
                TYPE_INFORMATION,
                normalize_qualified_name(descriptor.name())
            )
        };

        let type_args = descriptor.type_args();
        let mut schema = if type_args.is_empty() {
            base
        } else {
            let mut args = Vec::with_capacity(type_args.len());
            for arg in type_args {
                args.push(self.schema_of(arg)?.into_code());
            }
            format!(
                "{}.Parameterized({}, Seq({}))",
                TYPEINFO_PACKAGE,
                base,
                args.join(", ")
            )
        };

        if self.strict_schemas {
            schema = format!("{}.Strict.requireConcrete({})", TYPEINFO_PACKAGE, schema);
        }

        Ok(Fragment::expr(schema))
    }

    /// Full generic name for the type-hint path. A record names its raw
    /// declared type here regardless of the active naming policy; envelope
    /// wrapping is a schema concern handled by the envelope branch.
    fn resolved_name(&self, descriptor: &TypeDescriptor) -> String {
        match descriptor {
            TypeDescriptor::Object { .. } => DefaultNaming.type_name(descriptor),
            _ => self.naming.type_name(descriptor),
        }
    }
}

fn is_envelope(descriptor: &TypeDescriptor) -> bool {
    matches!(
        descriptor,
        TypeDescriptor::Object { name, type_args, .. }
            if name == ENVELOPE_TYPE && type_args.len() == 2
    )
}

fn escape_name(name: &str) -> String {
    let escaped = name.replace('\\', "\\\\").replace('"', "\\\"");
    format!("\"{}\"", escaped)
}
