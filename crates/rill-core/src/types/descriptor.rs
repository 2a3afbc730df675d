//! Static type descriptors
//!
//! A `TypeDescriptor` is the compiler's own immutable description of a
//! value's static type: primitives, tuples, records, collections, generated
//! (opaque) classes, and the stream shapes the runtime exposes. Descriptors
//! are built once by the front end per distinct static type and shared by
//! reference across IR nodes; equality and hashing are structural so they
//! can serve as cache keys.

use crate::error::{CoreError, Result};
use serde::{Deserialize, Serialize};

/// Maximum descriptor nesting accepted by [`TypeDescriptor::validate_depth`].
pub const MAX_TYPE_DEPTH: usize = 64;

/// A named slot of a tuple or record type
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FieldDescriptor {
    /// Field name
    pub name: String,

    /// Static type of the field
    pub field_type: TypeDescriptor,
}

/// Immutable tagged-union tree describing a value's static type
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TypeDescriptor {
    /// Non-numeric primitive (String, Boolean, ...)
    Basic {
        /// Type name
        name: String,
    },

    /// Numeric primitive (Int, Long, Double, ...)
    Numeric {
        /// Type name
        name: String,
    },

    /// Positional tuple; non-empty `fields` makes it a tuple record, a
    /// positional value that additionally exposes named fields
    Tuple {
        /// Tuple class name
        name: String,
        /// One generic argument per slot
        type_args: Vec<TypeDescriptor>,
        /// Optional names for the slots, parallel to `type_args`
        fields: Vec<FieldDescriptor>,
    },

    /// Record/object type with named fields
    Object {
        /// Declared type name
        name: String,
        /// Generic arguments
        type_args: Vec<TypeDescriptor>,
        /// Named fields, one per generic-argument slot when present
        fields: Vec<FieldDescriptor>,
    },

    /// Homogeneous collection; exactly one generic argument, enforced by
    /// construction
    Collection {
        /// Collection class name
        name: String,
        /// Element type
        element: Box<TypeDescriptor>,
    },

    /// Generated class the compiler cannot look inside
    Generated {
        /// Fully-qualified class name
        full_name: String,
        /// True when the class carries no usable type information
        opaque: bool,
    },

    /// Stream of records
    DataStream {
        /// Record type carried by the stream
        record: Box<TypeDescriptor>,
    },

    /// Two streams joined pairwise
    JoinedStreams {
        /// Left stream's record type
        left: Box<TypeDescriptor>,
        /// Right stream's record type
        right: Box<TypeDescriptor>,
    },

    /// Stream grouped by key
    GroupedStream {
        /// Record type carried by the stream
        record: Box<TypeDescriptor>,
    },
}

impl TypeDescriptor {
    /// Create a basic (non-numeric primitive) type
    pub fn basic(name: String) -> Self {
        TypeDescriptor::Basic { name }
    }

    /// Create a numeric primitive type
    pub fn numeric(name: String) -> Self {
        TypeDescriptor::Numeric { name }
    }

    /// Create a tuple type
    pub fn tuple(
        name: String,
        type_args: Vec<TypeDescriptor>,
        fields: Vec<FieldDescriptor>,
    ) -> Self {
        TypeDescriptor::Tuple {
            name,
            type_args,
            fields,
        }
    }

    /// Create a record/object type
    pub fn object(
        name: String,
        type_args: Vec<TypeDescriptor>,
        fields: Vec<FieldDescriptor>,
    ) -> Self {
        TypeDescriptor::Object {
            name,
            type_args,
            fields,
        }
    }

    /// Create a collection type with its single element type
    pub fn collection(name: String, element: TypeDescriptor) -> Self {
        TypeDescriptor::Collection {
            name,
            element: Box::new(element),
        }
    }

    /// Create a generated-class type
    pub fn generated(full_name: String, opaque: bool) -> Self {
        TypeDescriptor::Generated { full_name, opaque }
    }

    /// Create a data-stream type
    pub fn data_stream(record: TypeDescriptor) -> Self {
        TypeDescriptor::DataStream {
            record: Box::new(record),
        }
    }

    /// Create a joined-streams type
    pub fn joined_streams(left: TypeDescriptor, right: TypeDescriptor) -> Self {
        TypeDescriptor::JoinedStreams {
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    /// Create a grouped-stream type
    pub fn grouped_stream(record: TypeDescriptor) -> Self {
        TypeDescriptor::GroupedStream {
            record: Box::new(record),
        }
    }

    /// Declared name of this type. Stream shapes report their record type's
    /// name; joined streams report the left side's.
    pub fn name(&self) -> &str {
        match self {
            TypeDescriptor::Basic { name }
            | TypeDescriptor::Numeric { name }
            | TypeDescriptor::Tuple { name, .. }
            | TypeDescriptor::Object { name, .. }
            | TypeDescriptor::Collection { name, .. } => name,
            TypeDescriptor::Generated { full_name, .. } => full_name,
            TypeDescriptor::DataStream { record }
            | TypeDescriptor::GroupedStream { record } => record.name(),
            TypeDescriptor::JoinedStreams { left, .. } => left.name(),
        }
    }

    /// Generic arguments of this type. A collection reports its single
    /// element; stream shapes report their record types.
    pub fn type_args(&self) -> Vec<&TypeDescriptor> {
        match self {
            TypeDescriptor::Basic { .. }
            | TypeDescriptor::Numeric { .. }
            | TypeDescriptor::Generated { .. } => Vec::new(),
            TypeDescriptor::Tuple { type_args, .. }
            | TypeDescriptor::Object { type_args, .. } => type_args.iter().collect(),
            TypeDescriptor::Collection { element, .. } => vec![element],
            TypeDescriptor::DataStream { record }
            | TypeDescriptor::GroupedStream { record } => vec![record],
            TypeDescriptor::JoinedStreams { left, right } => vec![left, right],
        }
    }

    /// Named fields of a tuple or record type; empty for everything else
    pub fn fields(&self) -> &[FieldDescriptor] {
        match self {
            TypeDescriptor::Tuple { fields, .. } | TypeDescriptor::Object { fields, .. } => fields,
            _ => &[],
        }
    }

    /// Whether this descriptor is a tuple
    pub fn is_tuple(&self) -> bool {
        matches!(self, TypeDescriptor::Tuple { .. })
    }

    /// Whether this descriptor is a tuple record: a positional value that
    /// additionally exposes named fields
    pub fn is_tuple_record(&self) -> bool {
        matches!(self, TypeDescriptor::Tuple { fields, .. } if !fields.is_empty())
    }

    /// Whether any generic argument itself carries generic arguments. Gates
    /// the schema-construction strategy: the runtime's fast derivation path
    /// loses nested generic arguments.
    pub fn is_nested_generic(&self) -> bool {
        self.type_args()
            .iter()
            .any(|arg| !arg.type_args().is_empty())
    }

    /// Walk the descriptor tree with an explicit work stack, failing with a
    /// bounded-depth error instead of overflowing on pathological schemas.
    pub fn validate_depth(&self, max_depth: usize) -> Result<()> {
        let mut stack: Vec<(&TypeDescriptor, usize)> = vec![(self, 1)];

        while let Some((descriptor, depth)) = stack.pop() {
            if depth > max_depth {
                return Err(CoreError::DepthLimitExceeded { max_depth });
            }

            for arg in descriptor.type_args() {
                stack.push((arg, depth + 1));
            }
            for field in descriptor.fields() {
                stack.push((&field.field_type, depth + 1));
            }
        }

        Ok(())
    }
}

impl FieldDescriptor {
    /// Create a new field descriptor
    pub fn new(name: String, field_type: TypeDescriptor) -> Self {
        Self { name, field_type }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn int_type() -> TypeDescriptor {
        TypeDescriptor::numeric("Int".to_string())
    }

    fn string_type() -> TypeDescriptor {
        TypeDescriptor::basic("String".to_string())
    }

    #[test]
    fn test_structural_equality() {
        let a = TypeDescriptor::collection("Seq".to_string(), int_type());
        let b = TypeDescriptor::collection("Seq".to_string(), int_type());
        let c = TypeDescriptor::collection("Seq".to_string(), string_type());

        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_is_tuple_record() {
        let plain = TypeDescriptor::tuple(
            "scala.Tuple2".to_string(),
            vec![int_type(), string_type()],
            vec![],
        );
        let record = TypeDescriptor::tuple(
            "scala.Tuple2".to_string(),
            vec![int_type(), string_type()],
            vec![
                FieldDescriptor::new("count".to_string(), int_type()),
                FieldDescriptor::new("word".to_string(), string_type()),
            ],
        );

        assert!(plain.is_tuple());
        assert!(!plain.is_tuple_record());
        assert!(record.is_tuple());
        assert!(record.is_tuple_record());
        assert!(!string_type().is_tuple());
    }

    #[test]
    fn test_is_nested_generic() {
        let flat = TypeDescriptor::collection("Seq".to_string(), int_type());
        assert!(!flat.is_nested_generic());

        let nested = TypeDescriptor::collection(
            "Seq".to_string(),
            TypeDescriptor::collection("Seq".to_string(), int_type()),
        );
        assert!(nested.is_nested_generic());

        let stream = TypeDescriptor::data_stream(flat.clone());
        assert!(stream.is_nested_generic());
    }

    #[test]
    fn test_stream_shapes_report_record() {
        let record = TypeDescriptor::object("com.acme.Click".to_string(), vec![], vec![]);
        let stream = TypeDescriptor::data_stream(record.clone());

        assert_eq!(stream.name(), "com.acme.Click");
        assert_eq!(stream.type_args(), vec![&record]);

        let joined = TypeDescriptor::joined_streams(record.clone(), int_type());
        assert_eq!(joined.type_args().len(), 2);
    }

    #[test]
    fn test_validate_depth_accepts_reasonable_nesting() {
        let mut descriptor = int_type();
        for _ in 0..10 {
            descriptor = TypeDescriptor::collection("Seq".to_string(), descriptor);
        }

        assert!(descriptor.validate_depth(MAX_TYPE_DEPTH).is_ok());
    }

    #[test]
    fn test_validate_depth_rejects_pathological_nesting() {
        let mut descriptor = int_type();
        for _ in 0..(MAX_TYPE_DEPTH + 10) {
            descriptor = TypeDescriptor::collection("Seq".to_string(), descriptor);
        }

        let result = descriptor.validate_depth(MAX_TYPE_DEPTH);
        assert!(matches!(
            result,
            Err(crate::CoreError::DepthLimitExceeded { .. })
        ));
    }

    #[test]
    fn test_descriptor_serde() {
        let descriptor = TypeDescriptor::tuple(
            "scala.Tuple2".to_string(),
            vec![string_type(), int_type()],
            vec![
                FieldDescriptor::new("word".to_string(), string_type()),
                FieldDescriptor::new("count".to_string(), int_type()),
            ],
        );

        let json = serde_json::to_string(&descriptor).unwrap();
        assert!(json.contains("tuple"));
        assert!(json.contains("word"));

        let deserialized: TypeDescriptor = serde_json::from_str(&json).unwrap();
        assert_eq!(deserialized, descriptor);
    }
}
