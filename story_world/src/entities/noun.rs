//! Noun definitions.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::Value;

/// A named, taggable, property-bearing object in the story world.
///
/// The name is the only identity a noun has: matching, relations, and events
/// all refer to nouns by name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Noun {
    pub name: String,

    /// Free-form state mutated by rule actions.
    #[serde(default)]
    pub properties: BTreeMap<String, Value>,

    /// Classification labels used by `#tag` match patterns.
    #[serde(default)]
    pub tags: Vec<String>,
}

impl Noun {
    /// Create a noun with no properties and no tags.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            properties: BTreeMap::new(),
            tags: Vec::new(),
        }
    }

    /// Add a tag to this noun.
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.push(tag.into());
        self
    }

    /// Set a property on this noun.
    pub fn with_property(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.properties.insert(key.into(), value.into());
        self
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }

    /// Add a tag unless it is already present.
    pub fn add_tag(&mut self, tag: impl Into<String>) {
        let tag = tag.into();
        if !self.has_tag(&tag) {
            self.tags.push(tag);
        }
    }

    /// Remove every occurrence of a tag. Returns whether anything was removed.
    pub fn remove_tag(&mut self, tag: &str) -> bool {
        let before = self.tags.len();
        self.tags.retain(|t| t != tag);
        self.tags.len() != before
    }

    pub fn property(&self, key: &str) -> Option<&Value> {
        self.properties.get(key)
    }

    /// Set a property, returning the previous value if there was one.
    pub fn set_property(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.properties.insert(key.into(), value.into())
    }

    /// Boolean property, treating a missing or non-boolean value as `false`.
    pub fn flag(&self, key: &str) -> bool {
        self.property(key).and_then(Value::as_bool).unwrap_or(false)
    }

    /// Integer property, treating a missing or non-integer value as `0`.
    pub fn int(&self, key: &str) -> i64 {
        self.property(key).and_then(Value::as_int).unwrap_or(0)
    }
}
