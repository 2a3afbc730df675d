//! Enumeration registry
//!
//! The target runtime resolves enumeration values by reflection; the
//! compiler instead keeps an explicit registry. Each enumeration is defined
//! once with its canonical qualified name and declared tags, and every
//! `EnumValue` is minted through the registry so it always carries the
//! registered metadata.

use crate::error::{CoreError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Registered metadata for one enumeration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnumDef {
    /// Canonical qualified name, as declared by the host program. Nested
    /// scopes may still use the host separator; normalization happens at
    /// emission time.
    pub qualified_name: String,

    /// Declared tags, in declaration order
    pub tags: Vec<String>,
}

/// A single enumeration value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnumValue {
    /// Owning enumeration's canonical qualified name
    pub qualified_name: String,

    /// This value's tag
    pub tag: String,
}

/// Registry mapping enumerations to their declared metadata
#[derive(Debug, Clone, Default)]
pub struct EnumRegistry {
    enums: HashMap<String, EnumDef>,
}

impl EnumRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an enumeration with its declared tags
    pub fn register(&mut self, qualified_name: String, tags: Vec<String>) {
        self.enums.insert(
            qualified_name.clone(),
            EnumDef {
                qualified_name,
                tags,
            },
        );
    }

    /// Look up a registered enumeration
    pub fn get(&self, qualified_name: &str) -> Option<&EnumDef> {
        self.enums.get(qualified_name)
    }

    /// Mint a value of a registered enumeration
    pub fn value(&self, qualified_name: &str, tag: &str) -> Result<EnumValue> {
        let def = self
            .enums
            .get(qualified_name)
            .ok_or_else(|| CoreError::UnknownEnumeration(qualified_name.to_string()))?;

        if !def.tags.iter().any(|t| t == tag) {
            return Err(CoreError::UnknownTag {
                enumeration: qualified_name.to_string(),
                tag: tag.to_string(),
            });
        }

        Ok(EnumValue {
            qualified_name: def.qualified_name.clone(),
            tag: tag.to_string(),
        })
    }
}
