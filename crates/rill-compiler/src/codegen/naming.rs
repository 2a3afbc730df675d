//! Naming policies
//!
//! A naming policy maps a type descriptor to the fully-qualified name the
//! target runtime knows it by. The lifter is parameterized by a replaceable
//! policy so the same graph can be compiled against different runtime
//! surfaces; the one fixed rule is that a record's own declared type always
//! resolves through the default policy, because a wrapped record value must
//! still name its raw payload type, not the enclosing wrapper.

use rill_core::TypeDescriptor;

/// Target-runtime class rendered for data-stream shapes
const DATA_STREAM_CLASS: &str = "org.apache.flink.streaming.api.scala.DataStream";
/// Target-runtime class rendered for joined-stream shapes
const JOINED_STREAMS_CLASS: &str = "org.apache.flink.streaming.api.scala.JoinedStreams";
/// Target-runtime class rendered for grouped-stream shapes
const GROUPED_STREAM_CLASS: &str = "org.apache.flink.streaming.api.scala.KeyedStream";

/// Replace host-internal nested-scope separators with the target language's
/// qualified-name separator. Host class names use `$` for nested scopes;
/// splicing one into generated source unchanged produces invalid code.
pub fn normalize_qualified_name(name: &str) -> String {
    name.replace('$', ".")
}

/// Maps a type descriptor to its fully-qualified target-runtime name
pub trait NamingPolicy {
    /// Fully-qualified name for the given descriptor
    fn type_name(&self, descriptor: &TypeDescriptor) -> String;
}

/// Renders the declared, fully-qualified generic name of a type
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultNaming;

/// Wraps record types in a runtime envelope; everything else renders as the
/// default policy would, with nested records still wrapped
#[derive(Debug, Clone)]
pub struct EnvelopedNaming {
    /// Fully-qualified envelope class name
    wrapper: String,
}

/// Render a descriptor's name, resolving nested generic arguments through
/// `policy` so wrapping policies apply at every record position.
fn render_name(descriptor: &TypeDescriptor, policy: &dyn NamingPolicy) -> String {
    match descriptor {
        TypeDescriptor::Basic { name } | TypeDescriptor::Numeric { name } => {
            normalize_qualified_name(name)
        }
        TypeDescriptor::Tuple {
            name, type_args, ..
        }
        | TypeDescriptor::Object {
            name, type_args, ..
        } => {
            if type_args.is_empty() {
                normalize_qualified_name(name)
            } else {
                format!(
                    "{}[{}]",
                    normalize_qualified_name(name),
                    join_names(type_args.iter().collect(), policy)
                )
            }
        }
        TypeDescriptor::Collection { name, element } => format!(
            "{}[{}]",
            normalize_qualified_name(name),
            policy.type_name(element)
        ),
        TypeDescriptor::Generated { full_name, .. } => normalize_qualified_name(full_name),
        TypeDescriptor::DataStream { record } => {
            format!("{}[{}]", DATA_STREAM_CLASS, policy.type_name(record))
        }
        TypeDescriptor::JoinedStreams { left, right } => format!(
            "{}[{}, {}]",
            JOINED_STREAMS_CLASS,
            policy.type_name(left),
            policy.type_name(right)
        ),
        TypeDescriptor::GroupedStream { record } => {
            format!("{}[{}]", GROUPED_STREAM_CLASS, policy.type_name(record))
        }
    }
}

fn join_names(descriptors: Vec<&TypeDescriptor>, policy: &dyn NamingPolicy) -> String {
    descriptors
        .iter()
        .map(|d| policy.type_name(d))
        .collect::<Vec<_>>()
        .join(", ")
}

impl NamingPolicy for DefaultNaming {
    fn type_name(&self, descriptor: &TypeDescriptor) -> String {
        render_name(descriptor, self)
    }
}

impl EnvelopedNaming {
    /// Create a policy wrapping record types in the given envelope class
    pub fn new(wrapper: String) -> Self {
        Self { wrapper }
    }
}

impl NamingPolicy for EnvelopedNaming {
    fn type_name(&self, descriptor: &TypeDescriptor) -> String {
        match descriptor {
            // The payload inside the wrapper names its raw declared type,
            // resolved through the default policy.
            TypeDescriptor::Object { .. } => format!(
                "{}[{}]",
                normalize_qualified_name(&self.wrapper),
                render_name(descriptor, &DefaultNaming)
            ),
            _ => render_name(descriptor, self),
        }
    }
}
