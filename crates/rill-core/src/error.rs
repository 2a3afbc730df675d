//! Error types for Rill Core

use thiserror::Error;

/// Core error type
#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Type nesting exceeds the maximum depth of {max_depth}")]
    DepthLimitExceeded { max_depth: usize },

    #[error("Unknown enumeration: {0}")]
    UnknownEnumeration(String),

    #[error("Enumeration '{enumeration}' has no tag '{tag}'")]
    UnknownTag { enumeration: String, tag: String },
}

pub type Result<T> = std::result::Result<T, CoreError>;
