//! Format, source, and sink configuration objects
//!
//! Each configuration kind has a fixed, documented attribute set; the lifter
//! reconstructs it in generated source as a constructor call with the
//! attributes in declared order. The byte-level readers and writers behind
//! these configurations live outside the compiler core.

use crate::types::value::Value;
use serde::{Deserialize, Serialize};

/// A format/source/sink configuration object
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ConfigValue {
    /// Delimited-text format
    CsvFormat {
        /// Input path or pattern
        path: String,
        /// Field delimiter
        field_delimiter: char,
        /// Optional quote character
        quote_character: Option<char>,
        /// Whether the first record is a header
        includes_header: bool,
    },

    /// Line-delimited JSON format
    JsonFormat {
        /// Input path or pattern
        path: String,
        /// Character set name
        charset: String,
    },

    /// Socket text source
    SocketSource {
        /// Host to connect to
        host: String,
        /// Port to connect to
        port: u16,
        /// Record delimiter
        delimiter: char,
    },

    /// File sink
    FileSink {
        /// Output path
        path: String,
        /// Whether to overwrite existing output
        overwrite: bool,
    },
}

impl ConfigValue {
    /// Fully-qualified constructor name of this configuration kind in the
    /// target runtime support library
    pub fn constructor_name(&self) -> &'static str {
        match self {
            ConfigValue::CsvFormat { .. } => "rill.formats.CsvFormat",
            ConfigValue::JsonFormat { .. } => "rill.formats.JsonFormat",
            ConfigValue::SocketSource { .. } => "rill.sources.SocketSource",
            ConfigValue::FileSink { .. } => "rill.sinks.FileSink",
        }
    }

    /// Declared attributes in this kind's fixed order, as liftable values
    pub fn attributes(&self) -> Vec<Value> {
        match self {
            ConfigValue::CsvFormat {
                path,
                field_delimiter,
                quote_character,
                includes_header,
            } => vec![
                Value::Str(path.clone()),
                Value::Char(*field_delimiter),
                Value::Optional(quote_character.map(|c| Box::new(Value::Char(c)))),
                Value::Bool(*includes_header),
            ],
            ConfigValue::JsonFormat { path, charset } => vec![
                Value::Str(path.clone()),
                Value::Str(charset.clone()),
            ],
            ConfigValue::SocketSource {
                host,
                port,
                delimiter,
            } => vec![
                Value::Str(host.clone()),
                Value::Int(i32::from(*port)),
                Value::Char(*delimiter),
            ],
            ConfigValue::FileSink { path, overwrite } => vec![
                Value::Str(path.clone()),
                Value::Bool(*overwrite),
            ],
        }
    }
}
