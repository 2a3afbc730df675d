//! Code generation
//!
//! The lifting half of the compiler: turning runtime values and type
//! descriptors into target-language source fragments.

pub mod fragment;
pub mod naming;
pub mod typeinfo_codegen;
pub mod value_codegen;

pub use fragment::Fragment;
pub use naming::{normalize_qualified_name, DefaultNaming, EnvelopedNaming, NamingPolicy};
pub use typeinfo_codegen::ENVELOPE_TYPE;
pub use value_codegen::Lifter;
