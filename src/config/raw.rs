//! Raw document tree
//!
//! Parsing is kept separate from validation so each is testable on its own:
//! this module only turns text into an untyped mapping, with no defaulting
//! and no type checks.

use crate::error::Result;
use serde_yaml::{Mapping, Value};

/// Untyped configuration tree, as parsed from disk
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawDocument {
    root: Mapping,
}

impl RawDocument {
    /// Parse YAML text into a raw tree.
    ///
    /// Fails on malformed YAML and on documents whose root is not a mapping.
    /// An empty document parses to an empty tree (every field defaulted).
    pub fn parse(text: &str) -> Result<Self> {
        let root: Option<Mapping> = serde_yaml::from_str(text)?;
        Ok(Self { root: root.unwrap_or_default() })
    }

    /// Top-level entries in document order
    pub fn entries(&self) -> impl Iterator<Item = (&Value, &Value)> {
        self.root.iter()
    }

    /// Raw value of one top-level section, if present
    pub fn section(&self, name: &str) -> Option<&Value> {
        self.root.get(Value::String(name.to_string()))
    }

    /// Whether `section.key` is present in the document
    pub fn contains_key(&self, section: &str, key: &str) -> bool {
        matches!(
            self.section(section),
            Some(Value::Mapping(map)) if map.contains_key(Value::String(key.to_string()))
        )
    }

    /// Set `section.key` to `value`, creating the section if needed.
    ///
    /// A section that exists but is not a mapping is replaced wholesale;
    /// validation reports on the merged result either way.
    pub fn set(&mut self, section: &str, key: &str, value: Value) {
        let section_key = Value::String(section.to_string());
        if !matches!(self.root.get(&section_key), Some(Value::Mapping(_))) {
            self.root.insert(section_key.clone(), Value::Mapping(Mapping::new()));
        }
        if let Some(Value::Mapping(map)) = self.root.get_mut(&section_key) {
            map.insert(Value::String(key.to_string()), value);
        }
    }
}
